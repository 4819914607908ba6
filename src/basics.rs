//! Foundation constants and numeric helpers.
//!
//! Epsilons shared by filter construction and the contribution builder,
//! plus the rounding and clamping used when converting accumulated
//! floating-point sums back into native channel values.

// ============================================================================
// Constants
// ============================================================================

/// Smallest meaningful distance/scale. Used to clamp blur, nudge the
/// sampling center off exact pixel boundaries, and guard reciprocals.
pub const EPSILON: f64 = 1.0e-12;

/// `sqrt(1/2)`: support of a Box filter used radially.
pub const SQRT1_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// `sqrt(2/pi)`: Gaussian normalization.
pub const SQRT_2_PI: f64 = 0.797_884_560_802_865_4;

// ============================================================================
// Reciprocals and rounding
// ============================================================================

/// Reciprocal of `x` that never divides by (nearly) zero.
///
/// Values whose magnitude is below [`EPSILON`] are treated as `±EPSILON`.
#[inline]
pub fn perceptible_reciprocal(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    if sign * x >= EPSILON {
        1.0 / x
    } else {
        sign / EPSILON
    }
}

/// Truncate toward zero to a signed index.
#[inline]
pub fn itrunc(v: f64) -> isize {
    v as isize
}

/// Round to nearest, ties toward negative infinity.
///
/// An exact half (e.g. the mean of 0 and 255) resolves downward, while
/// floating-point noise just under an integer still snaps up to it.
#[inline]
pub fn round_half_down(v: f64) -> f64 {
    (v - 0.5).ceil()
}

/// Clamp an accumulated channel value into `[0, max]` and convert it to the
/// native quantum.
#[inline]
pub fn clamp_to_quantum(v: f64, max: u16) -> u16 {
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    let max_f = max as f64;
    if v >= max_f {
        return max;
    }
    round_half_down(v) as u16
}

// ============================================================================
// Tests
// ============================================================================
