use tracing::debug;

use crate::accumulation::{Accumulator, State};
use crate::calibration::{self, BiasModel, Smoother};
use crate::error::LX3DriverError;
use crate::mapping::ChannelMap;
use lx3_core::common::ScanDirection;
use lx3_core::geometry::SensorGeometry;

/// Per-sensor processing context.
///
/// Owns the channel index map, the rolling accumulation buffer, and the
/// bias calibration chain for one sensor head, so several heads can be
/// driven from the same process without sharing state.
#[derive(Debug)]
pub struct TraceProcessor {
    map: ChannelMap,
    accumulator: Accumulator,
    smoother: Smoother,
    bias_model: BiasModel,
}

impl TraceProcessor {
    /// Builds the context for `geometry`, with the noise metric smoothed
    /// over the window paired with `bias_model`.
    ///
    /// # Errors
    ///
    /// Fails when `geometry` has no valid channel index map.
    pub fn new(geometry: SensorGeometry, bias_model: BiasModel) -> Result<Self, LX3DriverError> {
        let map = ChannelMap::generate(geometry)?;
        debug!(%bias_model, vertical = geometry.vertical_channels, horizontal = geometry.horizontal_channels, "trace processor ready");
        Ok(Self {
            map,
            accumulator: Accumulator::new(geometry),
            smoother: Smoother::new(bias_model.smoothing_window()),
            bias_model,
        })
    }

    /// Switches to a new sensor geometry.
    ///
    /// Rebuilds the index map and the accumulation buffer and restarts
    /// the noise smoothing history.
    ///
    /// # Errors
    ///
    /// Fails when `geometry` has no valid channel index map; the
    /// previous configuration stays active.
    pub fn reconfigure(&mut self, geometry: SensorGeometry) -> Result<(), LX3DriverError> {
        self.map = ChannelMap::generate(geometry)?;
        self.accumulator = Accumulator::new(geometry);
        self.smoother.reset();
        Ok(())
    }

    /// The active channel index map.
    #[must_use]
    pub const fn map(&self) -> &ChannelMap {
        &self.map
    }

    /// The active sensor geometry.
    #[must_use]
    pub const fn geometry(&self) -> &SensorGeometry {
        self.map.geometry()
    }

    /// Fill state of the accumulation buffer.
    #[must_use]
    pub const fn state(&self) -> State {
        self.accumulator.state()
    }

    /// Stores the scan in `trc` and rewrites it with the rolling
    /// average; see [`Accumulator::accumulate`].
    pub fn accumulate(
        &mut self,
        trc: &mut [i16],
        sample_count: usize,
        first_sample: usize,
        crossover: usize,
    ) {
        self.accumulator
            .accumulate(trc, sample_count, first_sample, crossover);
    }

    /// Drops the accumulated scans and the smoothing history, as after
    /// a gain or geometry change.
    pub fn reset(&mut self) {
        self.accumulator.reset();
        self.smoother.reset();
    }

    /// Ambient white-noise metric of row `column`; see
    /// [`calibration::white_noise`].
    ///
    /// # Errors
    ///
    /// See [`calibration::white_noise`].
    pub fn white_noise(
        &self,
        trc: &[i16],
        direction: ScanDirection,
        column: u16,
    ) -> Result<u32, LX3DriverError> {
        calibration::white_noise(trc, &self.map, direction, column)
    }

    /// Pre-pulse standard deviation of one pixel; see
    /// [`calibration::sigma`].
    ///
    /// # Errors
    ///
    /// See [`calibration::sigma`].
    pub fn sigma(
        &self,
        trc: &[i16],
        direction: ScanDirection,
        pixel: u16,
    ) -> Result<i32, LX3DriverError> {
        calibration::sigma(trc, &self.map, direction, pixel)
    }

    /// Feeds one noise metric into the smoothing history and returns
    /// the recommended APD bias, optionally temperature-compensated.
    pub fn recommend_bias(&mut self, metric: u32, apd_temperature: Option<i32>) -> u32 {
        let smoothed = self.smoother.push(metric);
        self.bias_model.recommend(smoothed, apd_temperature)
    }

    /// The fitted bias curve in use.
    #[must_use]
    pub const fn bias_model(&self) -> BiasModel {
        self.bias_model
    }
}
