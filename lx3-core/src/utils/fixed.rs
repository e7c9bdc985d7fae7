const fn sgn(v: i64) -> i64 {
    if v >= 0 {
        1
    } else {
        -1
    }
}

/// Sign-symmetric rounding right shift by `s` bits.
///
/// Rounds the absolute value half away from zero, matching the hardware
/// accumulator behavior. `s == 0` returns `v` unchanged.
#[must_use]
pub const fn round_shift_right(v: i64, s: u32) -> i64 {
    if s == 0 {
        return v;
    }
    sgn(v) * (((v.abs() >> (s - 1)) & 1) + (v.abs() >> s))
}

/// Shifts left for positive `s`, right for negative `s`.
#[must_use]
pub const fn shift(v: i64, s: i32) -> i64 {
    if s < 0 {
        v >> -s
    } else {
        v << s
    }
}

/// Rounded signed division, half away from zero.
#[must_use]
pub const fn round_div(a: i64, b: i64) -> i64 {
    a / b
        + if (a % b).abs() >= b.abs() / 2 {
            sgn(a) * sgn(b)
        } else {
            0
        }
}

/// Ceiled unsigned division.
#[must_use]
pub const fn ceil_udiv(a: u64, b: u64) -> u64 {
    a / b + if a % b > 0 { 1 } else { 0 }
}
