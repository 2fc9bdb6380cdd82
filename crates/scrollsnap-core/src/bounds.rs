//! Clamping and snap-point rounding

/// Two-sided clamp that tolerates an inverted range by favouring `min`
#[inline]
pub fn clamp(min: f64, max: f64, value: f64) -> f64 {
    value.min(max).max(min)
}

/// Round `offset` to the nearest whole multiple of `snap_length`
///
/// Both operands are scaled by 1000 before dividing so that offsets sitting
/// on a half-cell boundary round consistently. A non-positive or non-finite
/// length leaves the offset untouched.
#[inline]
pub fn round_to_nearest_snap_point(offset: f64, snap_length: f64) -> f64 {
    const SCALE: f64 = 1000.0;

    if !(snap_length.is_finite() && snap_length > 0.0) {
        return offset;
    }
    ((offset * SCALE) / (snap_length * SCALE)).round() * snap_length
}

/// Index of the snap cell nearest to `offset`
#[inline]
pub fn nearest_cell(offset: f64, snap_length: f64) -> f64 {
    (offset / snap_length).round()
}
