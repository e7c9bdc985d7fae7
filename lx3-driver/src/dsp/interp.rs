use lx3_core::common::{DELAY_SCALE_BITS, SIGNAL_SCALE_BITS};
use lx3_core::utils::{round_shift_right, shift};

/// Raw sample storage formats accepted by [`linear_interp`].
pub trait RawSample: Copy {
    #[doc(hidden)]
    fn widen(self) -> i64;
}

macro_rules! impl_raw_sample {
    ($($t:ty),*) => {
        $(impl RawSample for $t {
            fn widen(self) -> i64 {
                self as i64
            }
        })*
    };
}

impl_raw_sample!(i16, u16, i32, u32);

/// Linearly interpolates the sample value at `index - delay`.
///
/// `delay` is a fixed-point fraction with [`DELAY_SCALE_BITS`] fractional
/// bits; `scale_bits` is the fixed-point scale of the samples, which are
/// brought to [`SIGNAL_SCALE_BITS`] for the blend and converted back.
///
/// Returns zero when the bracketing integer positions fall outside
/// `[0, len - 1)`; out-of-range access is a policy, not an error.
#[must_use]
pub fn linear_interp<T: RawSample>(samples: &[T], delay: i32, index: u16, scale_bits: u8) -> i32 {
    let pos = ((index as i64) << DELAY_SCALE_BITS) - delay as i64;
    let floored = pos >> DELAY_SCALE_BITS;
    let frac = pos - (floored << DELAY_SCALE_BITS);

    if floored < 0 || floored >= samples.len() as i64 - 1 {
        return 0;
    }
    let floored = floored as usize;

    let to_signal_scale = SIGNAL_SCALE_BITS as i32 - scale_bits as i32;
    let y1 = shift(samples[floored].widen(), to_signal_scale);
    let y2 = shift(samples[floored + 1].widen(), to_signal_scale);
    let blended = round_shift_right((y2 - y1) * frac, DELAY_SCALE_BITS) + y1;
    shift(blended, -to_signal_scale) as i32
}
