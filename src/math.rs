//! Special functions used by the Bessel and Kaiser kernels.
//!
//! - [`bessel_i0`]: modified Bessel function of the first kind, order 0,
//!   by power series.
//! - [`bessel_order_one`]: Bessel function of the first kind, order 1,
//!   by a rational approximation below 8 and an asymptotic expansion above.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

// ============================================================================
// Modified Bessel I0
// ============================================================================

/// Zeroth order modified Bessel function of the first kind.
///
/// Sums the power series `sum((x²/4)^k / (k!)²)` until a term falls below
/// machine epsilon.
pub fn bessel_i0(x: f64) -> f64 {
    let mut sum = 1.0;
    let y = x * x / 4.0;
    let mut t = y;
    let mut i = 2u32;
    while t > f64::EPSILON {
        sum += t;
        t *= y / (i as f64 * i as f64);
        i += 1;
    }
    sum
}

// ============================================================================
// Bessel J1
// ============================================================================

const J1_P: [f64; 9] = [
    0.581199354001606143928050809e+21,
    -0.6672106568924916298020941484e+20,
    0.2316433580634002297931815435e+19,
    -0.3588817569910106050743641413e+17,
    0.2908795263834775409737601689e+15,
    -0.1322983480332126453125473247e+13,
    0.3413234182301700539091292655e+10,
    -0.4695753530642995859767162166e+7,
    0.270112271089232341485679099e+4,
];

const J1_Q: [f64; 9] = [
    0.11623987080032122878585294e+22,
    0.1185770712190320999837113348e+20,
    0.6092061398917521746105196863e+17,
    0.2081661221307607351240184229e+15,
    0.5243710262167649715406728642e+12,
    0.1013863514358673989967045588e+10,
    0.1501793594998585505921097578e+7,
    0.1606931573481487801970916749e+4,
    0.1e+1,
];

const P1_P: [f64; 6] = [
    0.352246649133679798341724373e+5,
    0.62758845247161281269005675e+5,
    0.313539631109159574238669888e+5,
    0.49854832060594338434500455e+4,
    0.2111529182853962382105718e+3,
    0.12571716929145341558495e+1,
];

const P1_Q: [f64; 6] = [
    0.352246649133679798068390431e+5,
    0.626943469593560511888833731e+5,
    0.312404063819041039923015703e+5,
    0.4930396490181088979386097e+4,
    0.2030775189134759322293574e+3,
    0.1e+1,
];

const Q1_P: [f64; 6] = [
    0.3511751914303552822533318e+3,
    0.7210391804904475039280863e+3,
    0.4259873011654442389886993e+3,
    0.831898957673850827325226e+2,
    0.45681716295512267064405e+1,
    0.3532840052740123642735e-1,
];

const Q1_Q: [f64; 6] = [
    0.74917374171809127714519505e+4,
    0.154141773392650970499848051e+5,
    0.91522317015169922705904727e+4,
    0.18111867005523513506724158e+4,
    0.1038187585462133728776636e+3,
    0.1e+1,
];

/// Evaluate `P(z) / Q(z)` by Horner's rule, highest coefficient last.
#[inline]
fn rational(p: &[f64], q: &[f64], z: f64) -> f64 {
    let mut num = p[p.len() - 1];
    let mut den = q[q.len() - 1];
    for i in (0..p.len() - 1).rev() {
        num = num * z + p[i];
        den = den * z + q[i];
    }
    num / den
}

/// `J1(x) / x` for `0 <= x < 8`.
#[inline]
pub fn bessel_j1(x: f64) -> f64 {
    rational(&J1_P, &J1_Q, x * x)
}

/// Asymptotic amplitude term for `x >= 8`.
#[inline]
pub fn bessel_p1(x: f64) -> f64 {
    let z = 8.0 / x;
    rational(&P1_P, &P1_Q, z * z)
}

/// Asymptotic phase term for `x >= 8`.
#[inline]
pub fn bessel_q1(x: f64) -> f64 {
    let z = 8.0 / x;
    rational(&Q1_P, &Q1_Q, z * z)
}

/// Bessel function of the first kind, order 1.
pub fn bessel_order_one(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let ax = x.abs();
    if ax < 8.0 {
        return x * bessel_j1(ax);
    }
    let (sin, cos) = ax.sin_cos();
    let q = (2.0 / (PI * ax)).sqrt()
        * (bessel_p1(ax) * (FRAC_1_SQRT_2 * (sin - cos))
            - 8.0 / ax * bessel_q1(ax) * (-FRAC_1_SQRT_2 * (sin + cos)));
    if x < 0.0 {
        -q
    } else {
        q
    }
}

// ============================================================================
// Tests
// ============================================================================
