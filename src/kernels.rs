//! Filter kernel shapes.
//!
//! Every kernel maps a non-negative, blur-scaled distance `x` to a weight.
//! The same shapes serve both as weighting functions and as windowing
//! functions; which role a kernel plays is decided by the filter table in
//! [`crate::filter`]. Callers keep `x` inside `[0, support]`; shapes with a
//! finite natural support return `0.0` past it.
//!
//! Parameterized shapes (CubicBC, Kaiser, Lagrange) read their constants
//! from the owning [`ResizeFilter`].

use crate::filter::ResizeFilter;
use crate::math::{bessel_i0, bessel_order_one};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

// ============================================================================
// Kernel identifiers
// ============================================================================

/// The closed set of kernel shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    Box,
    Triangle,
    CubicBc,
    Gaussian,
    Quadratic,
    Hanning,
    Hamming,
    Blackman,
    Bohman,
    Welsh,
    Cosine,
    Kaiser,
    Sinc,
    SincFast,
    Bessel,
    Lagrange,
}

impl Kernel {
    /// Evaluate the kernel at distance `x`.
    #[inline]
    pub fn evaluate(self, x: f64, filter: &ResizeFilter) -> f64 {
        match self {
            Kernel::Box => box_weight(x),
            Kernel::Triangle => triangle(x),
            Kernel::CubicBc => cubic_bc(x, filter.cubic_coefficients()),
            Kernel::Gaussian => gaussian(
                x,
                filter.gaussian_coefficient(),
                filter.gaussian_normalization(),
            ),
            Kernel::Quadratic => quadratic(x),
            Kernel::Hanning => hanning(x),
            Kernel::Hamming => hamming(x),
            Kernel::Blackman => blackman(x),
            Kernel::Bohman => bohman(x),
            Kernel::Welsh => welsh(x),
            Kernel::Cosine => cosine(x),
            Kernel::Kaiser => kaiser(x, filter.kaiser_beta(), filter.kaiser_normalization()),
            Kernel::Sinc => sinc(x),
            Kernel::SincFast => sinc_fast(x),
            Kernel::Bessel => bessel(x),
            Kernel::Lagrange => lagrange(x, filter.support(), filter.window_support()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kernel::Box => "Box",
            Kernel::Triangle => "Triangle",
            Kernel::CubicBc => "Cubic",
            Kernel::Gaussian => "Gaussian",
            Kernel::Quadratic => "Quadratic",
            Kernel::Hanning => "Hanning",
            Kernel::Hamming => "Hamming",
            Kernel::Blackman => "Blackman",
            Kernel::Bohman => "Bohman",
            Kernel::Welsh => "Welsh",
            Kernel::Cosine => "Cosine",
            Kernel::Kaiser => "Kaiser",
            Kernel::Sinc => "Sinc",
            Kernel::SincFast => "SincFast",
            Kernel::Bessel => "Bessel",
            Kernel::Lagrange => "Lagrange",
        }
    }
}

// ============================================================================
// Weighting functions
// ============================================================================

/// Equal weighting. The caller's support does the clipping, which is what
/// lets point sampling reach one pixel beyond a zero support.
#[inline]
pub fn box_weight(_x: f64) -> f64 {
    1.0
}

/// Linear B-spline (tent); also the Bartlett window.
#[inline]
pub fn triangle(x: f64) -> f64 {
    if x < 1.0 {
        1.0 - x
    } else {
        0.0
    }
}

/// Piecewise cubic from precomputed B,C coefficients:
/// `P0 + P1 x + P2 x² + P3 x³` on `[0,1)`, `Q0 + Q1 x + Q2 x² + Q3 x³` on `[1,2)`.
#[inline]
pub fn cubic_bc(x: f64, c: &[f64; 8]) -> f64 {
    if x < 1.0 {
        return c[0] + x * (c[1] + x * (c[2] + x * c[3]));
    }
    if x < 2.0 {
        return c[4] + x * (c[5] + x * (c[6] + x * c[7]));
    }
    0.0
}

/// Gaussian `exp(-coefficient x²) * normalization`.
///
/// For sigma `s`, `coefficient = 1 / (2 s²)` and
/// `normalization = 1 / (s sqrt(2 pi))`; the default `s = 1/2` gives
/// `exp(-2x²) sqrt(2/pi)`.
#[inline]
pub fn gaussian(x: f64, coefficient: f64, normalization: f64) -> f64 {
    (-coefficient * x * x).exp() * normalization
}

/// Quadratic B-spline approximation of a Gaussian.
#[inline]
pub fn quadratic(x: f64) -> f64 {
    if x < 0.5 {
        return 0.75 - x * x;
    }
    if x < 1.5 {
        let t = x - 1.5;
        return 0.5 * t * t;
    }
    0.0
}

/// `sin(pi x) / (pi x)`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let a = PI * x;
    a.sin() / a
}

/// Rational minimax approximation of [`sinc`] on `[0, 4]`, exact sinc
/// beyond. Relative error stays below `1.2e-12`.
pub fn sinc_fast(x: f64) -> f64 {
    if x > 4.0 {
        let a = PI * x;
        return a.sin() / a;
    }
    let xx = x * x;
    let p = 0.0017361111111091072
        + xx * (-0.0002891055447178934
            + xx * (2.0695216124181574e-05
                + xx * (-8.344461801697272e-07
                    + xx * (2.0701010417102672e-08
                        + xx * (-3.197247849385071e-10
                            + xx * (2.8810167524910325e-12
                                + xx * -1.1821897180493424e-14))))));
    let q = 1.0
        + xx * (0.05479816196222848
            + xx * (0.001342262688353573
                + xx * (1.7899469750337105e-05
                    + xx * 1.1463339414043817e-07)));
    (xx - 1.0) * (xx - 4.0) * (xx - 9.0) * (xx - 16.0) / q * p
}

/// Jinc: `J1(pi x) / (2x)`, the radially symmetric analogue of sinc.
#[inline]
pub fn bessel(x: f64) -> f64 {
    if x == 0.0 {
        return FRAC_PI_4;
    }
    bessel_order_one(PI * x) / (2.0 * x)
}

/// Lagrange piecewise polynomial fit of sinc.
///
/// `2 * window_support` control points; the active piece is
/// `floor(window_support + x)`.
pub fn lagrange(x: f64, support: f64, window_support: f64) -> f64 {
    if x > support {
        return 0.0;
    }
    let order = (2.0 * window_support) as isize;
    let n = (window_support + x) as isize;
    let mut value = 1.0;
    for i in 0..order {
        if i != n {
            value *= ((n - i) as f64 - x) / (n - i) as f64;
        }
    }
    value
}

// ============================================================================
// Windowing functions
// ============================================================================

/// Raised cosine: `0.5 + 0.5 cos(pi x)`.
#[inline]
pub fn hanning(x: f64) -> f64 {
    if x > 1.0 {
        return 0.0;
    }
    0.5 + 0.5 * (PI * x).cos()
}

/// Offset raised cosine: `0.54 + 0.46 cos(pi x)`.
#[inline]
pub fn hamming(x: f64) -> f64 {
    if x > 1.0 {
        return 0.0;
    }
    0.54 + 0.46 * (PI * x).cos()
}

/// `0.42 + 0.5 cos(pi x) + 0.08 cos(2 pi x)`, folded to a single cosine.
#[inline]
pub fn blackman(x: f64) -> f64 {
    if x > 1.0 {
        return 0.0;
    }
    let c = (PI * x).cos();
    0.34 + c * (0.5 + c * 0.16)
}

/// `(1 - x) cos(pi x) + sin(pi x) / pi`.
#[inline]
pub fn bohman(x: f64) -> f64 {
    if x > 1.0 {
        return 0.0;
    }
    let (s, c) = (PI * x).sin_cos();
    (1.0 - x) * c + s / PI
}

/// Parabolic window: `1 - x²`.
#[inline]
pub fn welsh(x: f64) -> f64 {
    if x < 1.0 {
        1.0 - x * x
    } else {
        0.0
    }
}

/// Quarter-wave cosine: `cos(pi x / 2)`.
#[inline]
pub fn cosine(x: f64) -> f64 {
    if x > 1.0 {
        return 0.0;
    }
    (FRAC_PI_2 * x).cos()
}

/// Kaiser window: `I0(beta sqrt(1 - x²)) / I0(beta)`.
///
/// `normalization` is the precomputed `1 / I0(beta)`.
#[inline]
pub fn kaiser(x: f64, beta: f64, normalization: f64) -> f64 {
    if x > 1.0 {
        return 0.0;
    }
    normalization * bessel_i0(beta * (1.0 - x * x).sqrt())
}

// ============================================================================
// Tests
// ============================================================================
