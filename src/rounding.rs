//! Rounding helpers.
//!
//! Every integer rounding in the crate goes through here so ties behave the
//! same everywhere (half to even, e.g. 2.5 -> 2 and 3.5 -> 4).

pub fn round_to_int(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round_ties_even() as i64
}

/// Same as [`round_to_int`] but clamps negatives to zero.
pub fn round_to_u32(value: f64) -> u32 {
    round_to_int(value).clamp(0, i64::from(u32::MAX)) as u32
}

pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
