//! Rolling four-scan accumulation of raw traces.

use lx3_core::geometry::SensorGeometry;

/// Which slot pairs combine with the current rotation, newest first.
///
/// Row `r` lists the slot offsets for rotation `r` ordered from the
/// scan just stored back to the oldest one.
const PAIR_LUT: [[usize; 4]; 4] = [
    [0, 3, 2, 1],
    [1, 0, 3, 2],
    [2, 1, 0, 3],
    [3, 2, 1, 0],
];

const SLOT_COUNT: usize = 4;

/// Fill state of the rolling buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, derive_more::Display)]
pub enum State {
    /// Fewer than four scans stored; averages are not yet meaningful.
    #[default]
    Priming,
    /// All four slots hold a scan; every call yields an average.
    Steady,
}

/// Rolling buffer that averages the last two or four scans per sample.
///
/// Each call to [`Accumulator::accumulate`] stores the incoming scan into
/// the current rotation slot and, once the buffer is steady, replaces the
/// scan in place with a moving average: two scans deep up to the
/// crossover sample and four scans deep beyond it. The near samples stay
/// more reactive while the far samples trade latency for noise.
#[derive(Debug)]
pub struct Accumulator {
    channels: usize,
    samples_per_channel: usize,
    slots: Vec<i16>,
    pair2: Vec<i32>,
    pair4: Vec<i32>,
    rotation: usize,
    state: State,
}

impl Accumulator {
    /// Allocates the four scan slots for `geometry`.
    #[must_use]
    pub fn new(geometry: SensorGeometry) -> Self {
        let channels = geometry.channel_count();
        let samples_per_channel = geometry.samples_per_channel as usize;
        let scan_len = channels * samples_per_channel;
        Self {
            channels,
            samples_per_channel,
            slots: vec![0; SLOT_COUNT * scan_len],
            pair2: vec![0; scan_len],
            pair4: vec![0; scan_len],
            rotation: 0,
            state: State::Priming,
        }
    }

    /// Stores the scan in `trc` and rewrites it with the rolling average.
    ///
    /// `trc` holds `sample_count` contiguous samples for each of the
    /// buffer's channels. Samples in `[first_sample, crossover)` are
    /// averaged over the last two scans, samples in
    /// `[crossover, sample_count)` over the last four. While priming,
    /// `trc` is stored but left unmodified.
    pub fn accumulate(
        &mut self,
        trc: &mut [i16],
        sample_count: usize,
        first_sample: usize,
        crossover: usize,
    ) {
        debug_assert!(sample_count <= self.samples_per_channel);
        debug_assert!(first_sample <= crossover && crossover <= sample_count);
        debug_assert!(trc.len() >= self.channels * sample_count);

        let scan_len = self.channels * self.samples_per_channel;
        let average = self.state == State::Steady;
        let pairs = PAIR_LUT[self.rotation];

        for ch in 0..self.channels {
            let src = &trc[ch * sample_count..(ch + 1) * sample_count];
            let base = ch * self.samples_per_channel;
            self.slots[self.rotation * scan_len + base..][..sample_count].copy_from_slice(src);

            if average {
                for s in first_sample..sample_count {
                    let mut two = 0i32;
                    for &slot in &pairs[..2] {
                        two += self.slots[slot * scan_len + base + s] as i32;
                    }
                    self.pair2[base + s] = two;
                    let mut four = 0i32;
                    for &slot in &pairs[2..] {
                        four += self.slots[slot * scan_len + base + s] as i32;
                    }
                    self.pair4[base + s] = four;
                }
            }
        }

        if average {
            for ch in 0..self.channels {
                let base = ch * self.samples_per_channel;
                let dst = &mut trc[ch * sample_count..(ch + 1) * sample_count];
                for s in first_sample..crossover {
                    dst[s] = (self.pair2[base + s] >> 1) as i16;
                }
                for s in crossover..sample_count {
                    dst[s] = ((self.pair2[base + s] + self.pair4[base + s]) >> 2) as i16;
                }
            }
        }

        self.rotation += 1;
        if self.rotation == SLOT_COUNT {
            self.rotation = 0;
            self.state = State::Steady;
        }
    }

    /// Discards all stored scans and returns to priming.
    pub fn reset(&mut self) {
        self.slots.fill(0);
        self.rotation = 0;
        self.state = State::Priming;
    }

    /// Current fill state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> SensorGeometry {
        SensorGeometry::new(1, 2, 4)
    }

    #[test]
    fn priming_passes_scans_through() {
        let mut acc = Accumulator::new(tiny());
        for round in 0..3i16 {
            let mut trc = vec![round; 8];
            acc.accumulate(&mut trc, 4, 0, 2);
            assert_eq!(vec![round; 8], trc);
            assert_eq!(State::Priming, acc.state());
        }
    }

    #[test]
    fn fourth_scan_turns_steady_but_still_passes_through() {
        let mut acc = Accumulator::new(tiny());
        for v in [10i16, 20, 30] {
            let mut trc = vec![v; 8];
            acc.accumulate(&mut trc, 4, 0, 2);
        }
        let mut trc = vec![40i16; 8];
        acc.accumulate(&mut trc, 4, 0, 2);
        assert_eq!(State::Steady, acc.state());
        assert_eq!(vec![40i16; 8], trc);
    }

    #[test]
    fn fifth_scan_is_the_first_averaged_one() {
        let mut acc = Accumulator::new(tiny());
        for v in [10i16, 20, 30, 40] {
            let mut trc = vec![v; 8];
            acc.accumulate(&mut trc, 4, 0, 2);
        }
        let mut trc = vec![50i16; 8];
        acc.accumulate(&mut trc, 4, 0, 2);
        // Two-deep: (50 + 40) / 2; four-deep: (20 + 30 + 40 + 50) / 4.
        assert_eq!([45, 45, 35, 35], trc[..4]);
    }

    #[test]
    fn first_sample_leaves_prefix_untouched() {
        let mut acc = Accumulator::new(tiny());
        for v in [0i16, 0, 0, 0] {
            let mut trc = vec![v; 8];
            acc.accumulate(&mut trc, 4, 0, 2);
        }
        let mut trc = vec![100i16; 8];
        acc.accumulate(&mut trc, 4, 1, 3);
        assert_eq!(100, trc[0]);
        assert_eq!(50, trc[1]);
        assert_eq!(50, trc[2]);
        assert_eq!(25, trc[3]);
    }

    #[test]
    fn reset_returns_to_priming() {
        let mut acc = Accumulator::new(tiny());
        for v in [1i16, 2, 3, 4] {
            let mut trc = vec![v; 8];
            acc.accumulate(&mut trc, 4, 0, 2);
        }
        assert_eq!(State::Steady, acc.state());
        acc.reset();
        assert_eq!(State::Priming, acc.state());
        let mut trc = vec![7i16; 8];
        acc.accumulate(&mut trc, 4, 0, 2);
        assert_eq!(vec![7i16; 8], trc);
    }
}
