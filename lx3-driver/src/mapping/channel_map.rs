use itertools::Itertools;

use crate::error::LX3DriverError;
use lx3_core::{common::ScanDirection, geometry::SensorGeometry};

/// Number of parallel acquisition lanes of the ASIC.
pub const LANE_COUNT: usize = 16;

/// Number of channel multiplexing phases per lane.
pub const MUX_PHASE_COUNT: usize = 4;

const UNSET: u16 = 0xFFFF;

/// Horizontal channel sampled by each (lane, phase) combination.
///
/// The first eight lanes sweep the odd channels left to right, the last
/// eight sweep the even channels right to left.
const MUX_PATTERN: [[u16; MUX_PHASE_COUNT]; LANE_COUNT] = [
    [1, 3, 5, 7],
    [9, 11, 13, 15],
    [17, 19, 21, 23],
    [25, 27, 29, 31],
    [33, 35, 37, 39],
    [41, 43, 45, 47],
    [49, 51, 53, 55],
    [57, 59, 61, 63],
    [6, 4, 2, 0],
    [14, 12, 10, 8],
    [22, 20, 18, 16],
    [30, 28, 26, 24],
    [38, 36, 34, 32],
    [46, 44, 42, 40],
    [54, 52, 50, 48],
    [62, 60, 58, 56],
];

/// Acquisition order of the vertical lines of the legacy 8-line ASIC:
/// even lines first, then odd.
const LEGACY_LINE_ORDER: [u16; 8] = [0, 2, 4, 6, 1, 3, 5, 7];

/// Vertical angle counts per acquisition bank.
///
/// Banks spread the whole field of view, so consecutive angles of one
/// bank land `bank_count` logical rows apart.
fn bank_angle_counts(vertical_channels: u16) -> Result<Vec<u16>, LX3DriverError> {
    match vertical_channels {
        256 => Ok(vec![86, 85, 85]),
        172 => Ok(vec![86, 86]),
        16 | 64 | 128 | 312 => Ok(vec![vertical_channels]),
        v => Err(LX3DriverError::UnsupportedVerticalChannels(v)),
    }
}

/// Bidirectional lookup tables between the ASIC's physical memory order
/// and the logical trace order of channels.
///
/// Each table is a permutation of `[0, N)` where N is the channel count;
/// generation validates this before a map is returned, so accessors never
/// see an inconsistent table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelMap {
    geometry: SensorGeometry,
    mem_to_trace: Vec<u16>,
    mem_to_trace_inverted: Vec<u16>,
    trace_to_mem: Vec<u16>,
    trace_to_mem_inverted: Vec<u16>,
}

impl ChannelMap {
    /// Generates and validates the index maps for `geometry`.
    ///
    /// # Errors
    ///
    /// [`LX3DriverError::UnsupportedVerticalChannels`] or
    /// [`LX3DriverError::IncompatibleHorizontalChannels`] when the
    /// geometry has no acquisition scheme, and the index-map validation
    /// errors when generation produced an inconsistent table. No map is
    /// returned in any error case.
    pub fn generate(geometry: SensorGeometry) -> Result<Self, LX3DriverError> {
        let n = geometry.channel_count();
        let h = geometry.horizontal_channels as usize;
        let mut mem_to_trace = vec![UNSET; n];
        let mut trace_to_mem = vec![UNSET; n];

        let written = if geometry.vertical_channels == 8 {
            Self::fill_legacy(&geometry, &mut mem_to_trace, &mut trace_to_mem)?
        } else {
            Self::fill_banked(&geometry, &mut mem_to_trace, &mut trace_to_mem)?
        };

        let mem_to_trace_inverted = invert_rows(&mem_to_trace, h);
        // Inverting the mirrored table keeps the pair exact inverses even
        // when the bank partition is uneven and does not commute with the
        // row mirror (the 256-row build).
        let mut trace_to_mem_inverted = vec![UNSET; n];
        for (mem, &trace) in mem_to_trace_inverted.iter().enumerate() {
            if trace != UNSET {
                trace_to_mem_inverted[trace as usize] = mem as u16;
            }
        }

        let map = Self {
            mem_to_trace_inverted,
            trace_to_mem_inverted,
            geometry,
            mem_to_trace,
            trace_to_mem,
        };
        map.validate(written)?;

        tracing::debug!(
            "Generated channel index map for {}x{} channels",
            geometry.vertical_channels,
            geometry.horizontal_channels
        );
        Ok(map)
    }

    fn fill_banked(
        geometry: &SensorGeometry,
        mem_to_trace: &mut [u16],
        trace_to_mem: &mut [u16],
    ) -> Result<usize, LX3DriverError> {
        let bank_angles = bank_angle_counts(geometry.vertical_channels)?;
        let h = geometry.horizontal_channels as usize;
        if h != LANE_COUNT * MUX_PHASE_COUNT {
            return Err(LX3DriverError::IncompatibleHorizontalChannels(
                geometry.horizontal_channels,
                LANE_COUNT * MUX_PHASE_COUNT,
            ));
        }

        let bank_count = bank_angles.len() as u16;
        let mut slot = 0;
        for (bank, &angles) in bank_angles.iter().enumerate() {
            for angle in 0..angles {
                let row = bank_count * angle + bank as u16;
                for phase in 0..MUX_PHASE_COUNT {
                    for lane in 0..LANE_COUNT {
                        let trace = row * h as u16 + MUX_PATTERN[lane][phase];
                        mem_to_trace[slot] = trace;
                        trace_to_mem[trace as usize] = slot as u16;
                        slot += 1;
                    }
                }
            }
        }
        Ok(slot)
    }

    fn fill_legacy(
        geometry: &SensorGeometry,
        mem_to_trace: &mut [u16],
        trace_to_mem: &mut [u16],
    ) -> Result<usize, LX3DriverError> {
        let h = geometry.horizontal_channels as usize;
        if h != 2 * LANE_COUNT {
            return Err(LX3DriverError::IncompatibleHorizontalChannels(
                geometry.horizontal_channels,
                2 * LANE_COUNT,
            ));
        }

        let mut slot = 0;
        for line in LEGACY_LINE_ORDER {
            // On each line the odd horizontal channels are sampled first,
            // then the even ones.
            for half in 0..2u16 {
                for sample in 0..LANE_COUNT as u16 {
                    let trace = line * h as u16 + sample * 2 + (half + 1) % 2;
                    mem_to_trace[slot] = trace;
                    trace_to_mem[trace as usize] = slot as u16;
                    slot += 1;
                }
            }
        }
        Ok(slot)
    }

    fn validate(&self, written: usize) -> Result<(), LX3DriverError> {
        let expected = self.geometry.channel_count();
        if written != expected {
            return Err(LX3DriverError::IndexMapEntryCount { written, expected });
        }
        for table in [
            &self.mem_to_trace,
            &self.mem_to_trace_inverted,
            &self.trace_to_mem,
            &self.trace_to_mem_inverted,
        ] {
            if let Some(pos) = table.iter().position(|&e| e == UNSET) {
                return Err(LX3DriverError::IndexMapUnsetEntry(pos));
            }
            if !table.iter().all_unique() {
                return Err(LX3DriverError::IndexMapDuplicate);
            }
        }
        Ok(())
    }

    /// The geometry the map was generated for.
    #[must_use]
    pub const fn geometry(&self) -> &SensorGeometry {
        &self.geometry
    }

    /// Number of channels covered by each table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mem_to_trace.len()
    }

    /// `true` when the map covers no channels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mem_to_trace.is_empty()
    }

    /// Logical trace index of the channel at physical `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not below [`ChannelMap::len`].
    #[must_use]
    pub fn mem_to_trace(&self, index: u16, direction: ScanDirection) -> u16 {
        match direction {
            ScanDirection::Normal => self.mem_to_trace[index as usize],
            ScanDirection::Inverted => self.mem_to_trace_inverted[index as usize],
        }
    }

    /// Physical memory index of the channel at logical trace `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not below [`ChannelMap::len`].
    #[must_use]
    pub fn trace_to_mem(&self, index: u16, direction: ScanDirection) -> u16 {
        match direction {
            ScanDirection::Normal => self.trace_to_mem[index as usize],
            ScanDirection::Inverted => self.trace_to_mem_inverted[index as usize],
        }
    }

    /// The full memory-to-trace table.
    #[must_use]
    pub fn mem_to_trace_table(&self, direction: ScanDirection) -> &[u16] {
        match direction {
            ScanDirection::Normal => &self.mem_to_trace,
            ScanDirection::Inverted => &self.mem_to_trace_inverted,
        }
    }

    /// The full trace-to-memory table.
    #[must_use]
    pub fn trace_to_mem_table(&self, direction: ScanDirection) -> &[u16] {
        match direction {
            ScanDirection::Normal => &self.trace_to_mem,
            ScanDirection::Inverted => &self.trace_to_mem_inverted,
        }
    }
}

/// Copies horizontal-channel-wide rows in reverse row order, modeling a
/// sensor scanned in the opposite direction.
fn invert_rows(table: &[u16], horizontal: usize) -> Vec<u16> {
    let mut out = vec![UNSET; table.len()];
    let rows = table.len() / horizontal;
    for row in 0..rows {
        let src = table.len() - (row + 1) * horizontal;
        out[row * horizontal..(row + 1) * horizontal]
            .copy_from_slice(&table[src..src + horizontal]);
    }
    out
}
