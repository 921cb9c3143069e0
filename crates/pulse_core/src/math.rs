//! Fixed-point shape math
//!
//! Progress is expressed on an integer scale of `0..=ANIM_RESOLUTION`
//! (1024 = 100%). No floating point is involved so results are bit-identical
//! on every target.

/// Number of progress steps representing a complete animation leg
pub const ANIM_RESOLUTION: i32 = 1024;

/// `log2(ANIM_RESOLUTION)`, the shift that scales a progress product back down
pub const ANIM_RES_SHIFT: u32 = 10;

/// Parameter value of the end point of a [`bezier3`] curve
pub const BEZIER_VAL_MAX: u32 = 1024;

/// Map `x` from `[min_in, max_in]` to `[min_out, max_out]`
///
/// Inputs outside the source range are clamped to the matching end of the
/// target range. A degenerate source range maps everything to `max_out`
/// when `x >= max_in`.
pub fn map(x: i32, min_in: i32, max_in: i32, min_out: i32, max_out: i32) -> i32 {
    if x >= max_in {
        return max_out;
    }
    if x <= min_in {
        return min_out;
    }

    // Multiply before dividing to keep the rounding error in the last step
    let delta_in = i64::from(max_in) - i64::from(min_in);
    let delta_out = i64::from(max_out) - i64::from(min_out);
    let mapped = (i64::from(x) - i64::from(min_in)) * delta_out / delta_in + i64::from(min_out);
    mapped as i32
}

/// Evaluate a cubic Bezier with control points `u0..u3` at `t`
///
/// `t` runs over `0..=BEZIER_VAL_MAX`; the result is on the scale of the
/// control points.
pub fn bezier3(t: u32, u0: i32, u1: i32, u2: i32, u3: i32) -> i32 {
    let t = i64::from(t.min(BEZIER_VAL_MAX));
    let t_rem = i64::from(BEZIER_VAL_MAX) - t;
    let t_rem2 = (t_rem * t_rem) >> 10;
    let t_rem3 = (t_rem2 * t_rem) >> 10;
    let t2 = (t * t) >> 10;
    let t3 = (t2 * t) >> 10;

    let v1 = (t_rem3 * i64::from(u0)) >> 10;
    let v2 = (3 * t_rem2 * t * i64::from(u1)) >> 20;
    let v3 = (3 * t_rem * t2 * i64::from(u2)) >> 20;
    let v4 = (t3 * i64::from(u3)) >> 10;

    (v1 + v2 + v3 + v4) as i32
}
