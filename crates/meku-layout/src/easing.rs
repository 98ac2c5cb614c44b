//! Easing for collapse/expand transitions.
//!
//! One curve is enough here: a symmetric cubic that accelerates for the
//! first half and decelerates for the second.

/// Evaluate a symmetric cubic ease-in-out at time `t`.
///
/// Input is clamped to `[0.0, 1.0]`; the result is also in `[0.0, 1.0]`
/// with exact endpoints, so a finished animation lands on its target
/// without residual rounding.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}
