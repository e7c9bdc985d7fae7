use crate::error::LX3DriverError;

/// Convolves a trace with a crosstalk filter kernel.
///
/// The output holds `trc.len() + coeff.len() - 1` samples; products are
/// accumulated in 64 bits and renormalized by an arithmetic right shift
/// of `sum_bits`.
///
/// # Errors
///
/// [`LX3DriverError::FilterTooLong`] when the filter does not fit in the
/// trace (`coeff.len() >= trc.len()`).
pub fn convolve(trc: &[i32], coeff: &[i32], sum_bits: u8) -> Result<Vec<i32>, LX3DriverError> {
    if trc.len() <= coeff.len() {
        return Err(LX3DriverError::FilterTooLong {
            filter: coeff.len(),
            trace: trc.len(),
        });
    }

    let out_len = trc.len() + coeff.len() - 1;
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let mut acc = 0i64;
        for (j, &c) in coeff.iter().enumerate() {
            if let Some(k) = i.checked_sub(j) {
                if k < trc.len() {
                    acc += trc[k] as i64 * c as i64;
                }
            }
        }
        out.push((acc >> sum_bits) as i32);
    }
    Ok(out)
}
