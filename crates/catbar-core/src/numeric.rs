//! Numeric helpers shared by widgets.

/// Sum a sequence of numbers left to right.
///
/// Summation order matches the order cumulative positions are computed in,
/// so the final prefix sum of a sequence equals its total exactly.
#[must_use]
pub fn sum_numeric(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

/// Format a number the way it appears in labels.
///
/// Uses the shortest decimal that round-trips, without a trailing `.0`.
/// Magnitudes from `1e21` up and below `1e-6` switch to exponent form with
/// a signed exponent (`1e+21`, `1.5e-7`). Negative zero prints as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    value.to_string()
}
