use thiserror::Error;

use crate::calibration::poly::{POLYVAL_COEFF_MAX, POLYVAL_X_MAX};
use lx3_core::geometry::MAX_CHANNEL_COUNT;

/// An interface for error handling in lx3-driver.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum LX3DriverError {
    /// The vertical channel count has no acquisition scheme.
    #[error("Vertical channel count ({0}) is not supported")]
    UnsupportedVerticalChannels(u16),
    /// The horizontal channel count does not match the multiplexing pattern.
    #[error("Horizontal channel count ({0}) does not match the multiplexing pattern width ({1})")]
    IncompatibleHorizontalChannels(u16, usize),
    /// Index-map generation wrote the wrong number of entries.
    #[error("Index map holds {written} entries, expected {expected}")]
    IndexMapEntryCount {
        /// Number of physical slots actually written.
        written: usize,
        /// Channel count of the requested geometry.
        expected: usize,
    },
    /// An index-map entry was never written.
    #[error("Index map entry {0} was never written")]
    IndexMapUnsetEntry(usize),
    /// An index-map table contains duplicate entries.
    #[error("Index map contains duplicate entries")]
    IndexMapDuplicate,

    /// The filter kernel does not fit in the trace.
    #[error("Filter length ({filter}) must be less than trace length ({trace})")]
    FilterTooLong {
        /// Length of the filter kernel.
        filter: usize,
        /// Length of the input trace.
        trace: usize,
    },
    /// The selection sort input exceeds its per-scan size bound.
    #[error(
        "Sort length ({0}) exceeds the per-scan bound ({max})",
        max = MAX_CHANNEL_COUNT
    )]
    SortLenOutOfRange(usize),

    /// A calibration estimator was given an out-of-range channel column.
    #[error("Channel column ({0}) is out of range ([0, {1}))")]
    ColumnOutOfRange(u16, u16),
    /// A calibration estimator was given an out-of-range pixel index.
    #[error("Pixel index ({0}) is out of range ([0, {1}))")]
    PixelOutOfRange(u16, usize),
    /// The trace buffer is shorter than the active geometry requires.
    #[error("Trace buffer holds {len} samples, expected at least {expected}")]
    TraceTooShort {
        /// Length of the supplied buffer.
        len: usize,
        /// Minimum length for the active geometry.
        expected: usize,
    },
    /// The channels are too short to contain the quiet pre-pulse window.
    #[error("Channels hold {samples} samples, the noise window needs {required}")]
    ChannelTooShort {
        /// Samples per channel of the active geometry.
        samples: usize,
        /// First sample past the noise window.
        required: usize,
    },

    /// The polynomial evaluation point is outside the calibrated domain.
    #[error(
        "Polynomial evaluation point ({0}) is out of range ([0, {max}])",
        max = POLYVAL_X_MAX
    )]
    PolyvalOutOfRange(u32),
    /// The polynomial coefficient count is outside the supported range.
    #[error(
        "Polynomial coefficient count ({0}) is out of range ([1, {max}])",
        max = POLYVAL_COEFF_MAX
    )]
    PolyvalCoeffCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display() {
        let err = LX3DriverError::UnsupportedVerticalChannels(100);
        assert!(err.source().is_none());
        assert_eq!(
            format!("{}", err),
            "Vertical channel count (100) is not supported"
        );
        assert_eq!(format!("{:?}", err), "UnsupportedVerticalChannels(100)");
    }
}
