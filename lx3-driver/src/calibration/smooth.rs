use lx3_core::utils::ceil_udiv;

/// History depth used when smoothing ambient white-noise metrics.
pub const WINDOW_WHITE_NOISE: usize = 50;
/// History depth used when smoothing pulse-amplitude metrics.
pub const WINDOW_PULSE_AMPLITUDE: usize = 100;

/// Moving-average filter over the last `window` pushed values.
///
/// The history starts zero-filled, so the output ramps up from zero over
/// the first `window` pushes instead of jumping to the first sample.
/// That cold-start bias is deliberate: it keeps the bias servo from
/// overreacting before enough scans have been seen.
#[derive(Clone, Debug)]
pub struct Smoother {
    history: Vec<u32>,
    index: usize,
}

impl Smoother {
    /// Creates a smoother averaging over `window` values.
    #[must_use]
    pub fn new(window: usize) -> Self {
        debug_assert!(window > 0);
        Self {
            history: vec![0; window],
            index: 0,
        }
    }

    /// Stores `value` and returns the average of the current history.
    ///
    /// The division rounds up, so a steady input is reproduced exactly
    /// once the history is full.
    pub fn push(&mut self, value: u32) -> u32 {
        self.history[self.index] = value;
        self.index = (self.index + 1) % self.history.len();
        let sum: u64 = self.history.iter().map(|&v| v as u64).sum();
        ceil_udiv(sum, self.history.len() as u64) as u32
    }

    /// Zero-fills the history.
    pub fn reset(&mut self) {
        self.history.fill(0);
        self.index = 0;
    }

    /// History depth.
    #[must_use]
    pub fn window(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_up_from_zero() {
        let mut sm = Smoother::new(4);
        // Sum ramps 8, 16, 24, 32 over a window of 4.
        assert_eq!(2, sm.push(8));
        assert_eq!(4, sm.push(8));
        assert_eq!(6, sm.push(8));
        assert_eq!(8, sm.push(8));
    }

    #[test]
    fn steady_input_reproduced_once_full() {
        let mut sm = Smoother::new(WINDOW_WHITE_NOISE);
        let mut last = 0;
        for _ in 0..WINDOW_WHITE_NOISE * 2 {
            last = sm.push(37);
        }
        assert_eq!(37, last);
    }

    #[test]
    fn rounds_up() {
        let mut sm = Smoother::new(2);
        sm.push(1);
        // (1 + 2) / 2 rounded up.
        assert_eq!(2, sm.push(2));
    }

    #[test]
    fn oldest_value_falls_out_of_the_window() {
        let mut sm = Smoother::new(2);
        sm.push(100);
        sm.push(0);
        assert_eq!(0, sm.push(0));
    }

    #[test]
    fn reset_restarts_the_ramp() {
        let mut sm = Smoother::new(4);
        for _ in 0..4 {
            sm.push(8);
        }
        sm.reset();
        assert_eq!(2, sm.push(8));
    }
}
