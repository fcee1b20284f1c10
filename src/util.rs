//! Small numeric helpers.

/// Round `value` to `places` decimal places, half away from zero.
///
/// Negative zero is normalized to zero so rounded output never prints `-0`.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}
