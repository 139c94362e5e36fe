//! Double-precision emulation helpers.
//!
//! GPU shaders only have 32-bit floats. A 64-bit coordinate is carried to
//! the GPU as a `(hi, lo)` pair of f32s: `hi` is the nearest f32 to the
//! value and `lo` is the f32-rounded residual. Shaders subtract high parts
//! and low parts separately, which keeps precision for large coordinates.

/// Split `value` into `[hi, lo]`.
///
/// `hi` is `value` rounded to the nearest f32; `lo` is `value - hi`
/// (computed in f64) rounded to f32.
#[inline]
pub fn fp64ify(value: f64) -> [f32; 2] {
    let hi = value as f32;
    let lo = (value - f64::from(hi)) as f32;
    [hi, lo]
}

/// Recombine a split pair at double precision.
#[inline]
pub fn fp64_sum(pair: [f32; 2]) -> f64 {
    f64::from(pair[0]) + f64::from(pair[1])
}

/// Write the split encoding of a 2D coordinate into `out[0..4]` as
/// `x_hi, x_lo, y_hi, y_lo`.
///
/// `out` must hold at least four floats.
#[inline]
pub fn fp64ify_position(position: [f64; 2], out: &mut [f32]) {
    let [x_hi, x_lo] = fp64ify(position[0]);
    let [y_hi, y_lo] = fp64ify(position[1]);
    out[0] = x_hi;
    out[1] = x_lo;
    out[2] = y_hi;
    out[3] = y_lo;
}
