// File: crates/chart-core/src/locate.rs
// Summary: Nearest-key lookup on an ascending axis for pointer-driven tooltips.

use crate::scale::LinearScale;

/// Index of the key nearest to `value` in ascending `keys`. The boundary is the
/// midpoint between neighbours; a value exactly on it goes to the lower index.
/// Values outside the key range clamp to the first/last index; NaN clamps to 0.
pub fn bisect_center(keys: &[f64], value: f64) -> Option<usize> {
    if keys.is_empty() {
        return None;
    }
    if value.is_nan() {
        return Some(0);
    }
    let last = keys.len() - 1;
    // first key >= value, capped at the last index
    let i = keys[..last].partition_point(|k| *k < value);
    if i > 0 && value - keys[i - 1] <= keys[i] - value {
        Some(i - 1)
    } else {
        Some(i)
    }
}

/// Invert a pixel coordinate through `scale` and find the nearest key.
pub fn locate(pointer_px: f32, scale: &LinearScale, keys: &[f64]) -> Option<usize> {
    bisect_center(keys, scale.from_px(pointer_px))
}
