use derive_more::Display;

/// Direction in which the emitter sweeps the field of view for one scan.
///
/// The acquisition hardware writes channels in the same memory order for
/// both directions; only the logical row ordering differs.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Default)]
pub enum ScanDirection {
    /// First physical row is the first logical row.
    #[default]
    Normal,
    /// First physical row is the last logical row.
    Inverted,
}

/// Number of fractional bits of an interpolation delay.
pub const DELAY_SCALE_BITS: u32 = 16;

/// Fixed-point scale of an interpolation delay.
pub const DELAY_SCALE: i32 = 1 << DELAY_SCALE_BITS;

/// Number of fractional bits of the common internal signal format.
///
/// Samples of any raw scale are brought to this scale before blending and
/// converted back on the way out.
pub const SIGNAL_SCALE_BITS: u8 = 10;

/// Number of fractional bits of a raw amplitude as captured by the ASIC.
pub const RAW_AMPLITUDE_SCALE_BITS: u8 = 2;

/// Fixed-point scale of a raw amplitude.
pub const RAW_AMPLITUDE_SCALE: i32 = 1 << RAW_AMPLITUDE_SCALE_BITS;

/// Number of bits added to a trace by the crosstalk filter kernel.
pub const DEFAULT_FILTER_SUM_BITS: u8 = 8;
