//! Score normalisation functions.
//! See ARCHITECTURE.md §3.2 — clamped min/max normalisation.

use lifedex_common::ScoreScale;

/// Linear map of `value` from the observed `extent` onto `scale`, clamped
/// at the scale bounds.
///
/// A degenerate extent (min == max: all countries equal, or a single valid
/// value) is widened symmetrically by ±1 before mapping, so the value lands
/// on the scale midpoint instead of dividing by zero.
pub fn minmax_scale(value: f64, extent: (f64, f64), scale: &ScoreScale) -> f64 {
    let (mut lo, mut hi) = extent;
    if (hi - lo).abs() < 1e-10 {
        lo -= 1.0;
        hi += 1.0;
    }
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    scale.min + t * (scale.max - scale.min)
}

/// Arithmetic mean of the finite values in `values`, `None` when no valid
/// value remains. Missing data is excluded, never coerced to zero.
pub fn mean_of_available(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let valid: Vec<f64> = values.flatten().filter(|v| v.is_finite()).collect();
    if valid.is_empty() {
        None
    } else {
        Some(valid.iter().sum::<f64>() / valid.len() as f64)
    }
}
