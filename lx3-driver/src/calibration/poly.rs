use crate::error::LX3DriverError;

/// Largest evaluation point the calibration polynomials are fitted for.
pub const POLYVAL_X_MAX: u32 = 225;
/// Largest coefficient count a calibration polynomial may carry.
pub const POLYVAL_COEFF_MAX: usize = 10;

/// Evaluates a calibration polynomial at `x`.
///
/// `coeffs` is ordered from the highest power down to the constant term,
/// matching the layout written by the fitting tool.
///
/// # Errors
///
/// [`LX3DriverError::PolyvalCoeffCount`] when `coeffs` is empty or holds
/// more than [`POLYVAL_COEFF_MAX`] terms, and
/// [`LX3DriverError::PolyvalOutOfRange`] when `x` exceeds
/// [`POLYVAL_X_MAX`].
pub fn polyval(coeffs: &[f32], x: u32) -> Result<f32, LX3DriverError> {
    if coeffs.is_empty() || coeffs.len() > POLYVAL_COEFF_MAX {
        return Err(LX3DriverError::PolyvalCoeffCount(coeffs.len()));
    }
    if x > POLYVAL_X_MAX {
        return Err(LX3DriverError::PolyvalOutOfRange(x));
    }
    let n = coeffs.len();
    Ok((1..n).fold(coeffs[n - 1], |acc, i| {
        acc + coeffs[n - 1 - i] * (x as f32).powi(i as i32)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[rstest::rstest]
    #[case(7.0, &[7.0], 100)]
    #[case(11.0, &[2.0, 3.0], 4)] // 2x + 3
    #[case(25.0, &[1.0, 0.0, -2.0, 1.0], 3)] // x^3 - 2x + 1
    fn evaluates_highest_power_first(#[case] expected: f32, #[case] coeffs: &[f32], #[case] x: u32) {
        assert_abs_diff_eq!(expected, polyval(coeffs, x).unwrap());
    }

    #[test]
    fn constant_at_domain_edge() {
        assert_abs_diff_eq!(1.5, polyval(&[1.5], POLYVAL_X_MAX).unwrap());
    }

    #[test]
    fn rejects_point_past_the_domain() {
        assert_eq!(
            Err(LX3DriverError::PolyvalOutOfRange(POLYVAL_X_MAX + 1)),
            polyval(&[1.0], POLYVAL_X_MAX + 1)
        );
    }

    #[rstest::rstest]
    #[case(0)]
    #[case(POLYVAL_COEFF_MAX + 1)]
    fn rejects_bad_coefficient_count(#[case] count: usize) {
        let coeffs = vec![0.0f32; count];
        assert_eq!(
            Err(LX3DriverError::PolyvalCoeffCount(count)),
            polyval(&coeffs, 0)
        );
    }
}
