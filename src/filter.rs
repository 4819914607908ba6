//! Resize filter identifiers and the filter construction protocol.
//!
//! A named [`FilterType`] resolves, through two static tables, into a
//! weighting kernel and a windowing kernel with default support radius,
//! window scale and cubic B,C parameters. [`build_filter`] applies the
//! cylindrical (radial) promotions, sharpening, and any
//! [`FilterOverrides`], and returns an immutable [`ResizeFilter`].
//!
//! - Orthogonal filters are used by the separable two-pass resize.
//! - Cylindrical filters are the radially symmetric form (Sinc becomes
//!   Jinc) used by elliptical resamplers; only construction is provided.

use crate::basics::{perceptible_reciprocal, EPSILON, SQRT1_2, SQRT_2_PI};
use crate::error::OptionError;
use crate::kernels::Kernel;
use crate::math::bessel_i0;
use log::debug;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// Zero crossings of `Jinc(x)` (first zeros of `J1(pi x)`), indexed by lobe
/// count minus one.
pub const JINC_ZEROS: [f64; 16] = [
    1.219_669_891_266_504_5,
    2.233_130_594_381_528_6,
    3.238_315_484_166_236_2,
    4.241_062_863_796_069_9,
    5.242_764_376_870_181_7,
    6.243_921_689_864_487_7,
    7.244_759_868_719_957,
    8.245_394_913_952_042_7,
    9.245_892_684_949_467_3,
    10.246_293_348_754_916,
    11.246_622_794_877_883,
    12.246_898_461_138_105,
    13.247_132_522_181_061,
    14.247_333_735_806_849,
    15.247_508_563_037_3,
    16.247_661_874_700_962,
];

/// Default Kaiser window shape parameter.
pub const DEFAULT_KAISER_BETA: f64 = 6.5;

/// Default Gaussian sigma: half a pixel.
pub const DEFAULT_GAUSSIAN_SIGMA: f64 = 0.5;

const LANCZOS_SHARP_BLUR: f64 = 0.981_250_564_426_935_6;
const LANCZOS2_SHARP_BLUR: f64 = 0.954_996_363_978_548_5;

// ============================================================================
// FilterType
// ============================================================================

/// Named resize filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    Point,
    Box,
    Triangle,
    Hermite,
    Hanning,
    Hamming,
    Blackman,
    Gaussian,
    Quadratic,
    Cubic,
    Catrom,
    Mitchell,
    Jinc,
    Sinc,
    SincFast,
    Kaiser,
    Welsh,
    Parzen,
    Bohman,
    Bartlett,
    Lagrange,
    Lanczos,
    LanczosSharp,
    Lanczos2,
    Lanczos2Sharp,
    LanczosRadius,
    Robidoux,
    RobidouxSharp,
    Cosine,
    Spline,
}

/// Default parameters of one kernel when it stands in for a filter name.
#[derive(Debug, Clone, Copy)]
struct KernelDefaults {
    kernel: Kernel,
    /// Support when used as the weighting function.
    support: f64,
    /// First zero crossing when used as a windowing function.
    scale: f64,
    b: f64,
    c: f64,
}

const fn defaults(kernel: Kernel, support: f64, scale: f64, b: f64, c: f64) -> KernelDefaults {
    KernelDefaults {
        kernel,
        support,
        scale,
        b,
        c,
    }
}

impl FilterType {
    pub const ALL: [FilterType; 30] = [
        FilterType::Point,
        FilterType::Box,
        FilterType::Triangle,
        FilterType::Hermite,
        FilterType::Hanning,
        FilterType::Hamming,
        FilterType::Blackman,
        FilterType::Gaussian,
        FilterType::Quadratic,
        FilterType::Cubic,
        FilterType::Catrom,
        FilterType::Mitchell,
        FilterType::Jinc,
        FilterType::Sinc,
        FilterType::SincFast,
        FilterType::Kaiser,
        FilterType::Welsh,
        FilterType::Parzen,
        FilterType::Bohman,
        FilterType::Bartlett,
        FilterType::Lagrange,
        FilterType::Lanczos,
        FilterType::LanczosSharp,
        FilterType::Lanczos2,
        FilterType::Lanczos2Sharp,
        FilterType::LanczosRadius,
        FilterType::Robidoux,
        FilterType::RobidouxSharp,
        FilterType::Cosine,
        FilterType::Spline,
    ];

    /// The (weighting, windowing) filter pair a request resolves to.
    pub fn mapping(self) -> (FilterType, FilterType) {
        use FilterType::*;
        match self {
            Point => (Point, Box),
            Box => (Box, Box),
            Triangle => (Triangle, Box),
            Hermite => (Hermite, Box),
            Hanning => (Sinc, Hanning),
            Hamming => (Sinc, Hamming),
            Blackman => (Sinc, Blackman),
            Gaussian => (Gaussian, Box),
            Quadratic => (Quadratic, Box),
            Cubic => (Cubic, Box),
            Catrom => (Catrom, Box),
            Mitchell => (Mitchell, Box),
            Jinc => (Jinc, Box),
            Sinc => (Sinc, Box),
            SincFast => (SincFast, Box),
            Kaiser => (Sinc, Kaiser),
            Welsh => (Lanczos, Welsh),
            Parzen => (Sinc, Cubic),
            Bohman => (Sinc, Bohman),
            Bartlett => (Sinc, Triangle),
            Lagrange => (Lagrange, Box),
            Lanczos => (Lanczos, Lanczos),
            LanczosSharp => (LanczosSharp, LanczosSharp),
            Lanczos2 => (Lanczos2, Lanczos2),
            Lanczos2Sharp => (Lanczos2Sharp, Lanczos2Sharp),
            LanczosRadius => (LanczosRadius, Lanczos),
            Robidoux => (Robidoux, Box),
            RobidouxSharp => (RobidouxSharp, Box),
            Cosine => (Lanczos, Cosine),
            Spline => (Spline, Box),
        }
    }

    fn defaults(self) -> KernelDefaults {
        use FilterType as F;
        use Kernel as K;
        match self {
            F::Point => defaults(K::Box, 0.0, 0.5, 0.0, 0.0),
            F::Box => defaults(K::Box, 0.5, 0.5, 0.0, 0.0),
            F::Triangle => defaults(K::Triangle, 1.0, 1.0, 0.0, 0.0),
            F::Hermite => defaults(K::CubicBc, 1.0, 1.0, 0.0, 0.0),
            F::Hanning => defaults(K::Hanning, 1.0, 1.0, 0.0, 0.0),
            F::Hamming => defaults(K::Hamming, 1.0, 1.0, 0.0, 0.0),
            F::Blackman => defaults(K::Blackman, 1.0, 1.0, 0.0, 0.0),
            F::Gaussian => defaults(K::Gaussian, 2.0, 1.5, 0.0, 0.0),
            F::Quadratic => defaults(K::Quadratic, 1.5, 1.5, 0.0, 0.0),
            F::Cubic => defaults(K::CubicBc, 2.0, 2.0, 1.0, 0.0),
            F::Catrom => defaults(K::CubicBc, 2.0, 1.0, 0.0, 0.5),
            F::Mitchell => defaults(K::CubicBc, 2.0, 8.0 / 7.0, 1.0 / 3.0, 1.0 / 3.0),
            F::Jinc => defaults(K::Bessel, 3.0, JINC_ZEROS[0], 0.0, 0.0),
            F::Sinc => defaults(K::Sinc, 4.0, 1.0, 0.0, 0.0),
            F::SincFast => defaults(K::SincFast, 4.0, 1.0, 0.0, 0.0),
            F::Kaiser => defaults(K::Kaiser, 1.0, 1.0, 0.0, 0.0),
            F::Welsh => defaults(K::Welsh, 1.0, 1.0, 0.0, 0.0),
            F::Parzen => defaults(K::CubicBc, 2.0, 2.0, 1.0, 0.0),
            F::Bohman => defaults(K::Bohman, 1.0, 1.0, 0.0, 0.0),
            F::Bartlett => defaults(K::Triangle, 1.0, 1.0, 0.0, 0.0),
            F::Lagrange => defaults(K::Lagrange, 2.0, 1.0, 0.0, 0.0),
            F::Lanczos | F::LanczosSharp | F::LanczosRadius => defaults(K::Sinc, 3.0, 1.0, 0.0, 0.0),
            F::Lanczos2 | F::Lanczos2Sharp => defaults(K::Sinc, 2.0, 1.0, 0.0, 0.0),
            F::Robidoux => defaults(
                K::CubicBc,
                2.0,
                1.168_577_762_083_693_2,
                0.378_215_755_093_998_67,
                0.310_892_122_453_000_67,
            ),
            F::RobidouxSharp => defaults(
                K::CubicBc,
                2.0,
                1.105_822_933_719_019,
                0.262_014_512_399_014_2,
                0.368_992_743_800_492_9,
            ),
            F::Cosine => defaults(K::Cosine, 1.0, 1.0, 0.0, 0.0),
            F::Spline => defaults(K::CubicBc, 2.0, 2.0, 1.0, 0.0),
        }
    }

    /// The kernel this filter name evaluates when used on its own.
    pub fn kernel(self) -> Kernel {
        self.defaults().kernel
    }

    fn is_lanczos(self) -> bool {
        matches!(
            self,
            FilterType::Lanczos
                | FilterType::LanczosSharp
                | FilterType::Lanczos2
                | FilterType::Lanczos2Sharp
                | FilterType::LanczosRadius
        )
    }

    pub fn name(self) -> &'static str {
        use FilterType::*;
        match self {
            Point => "Point",
            Box => "Box",
            Triangle => "Triangle",
            Hermite => "Hermite",
            Hanning => "Hanning",
            Hamming => "Hamming",
            Blackman => "Blackman",
            Gaussian => "Gaussian",
            Quadratic => "Quadratic",
            Cubic => "Cubic",
            Catrom => "Catrom",
            Mitchell => "Mitchell",
            Jinc => "Jinc",
            Sinc => "Sinc",
            SincFast => "SincFast",
            Kaiser => "Kaiser",
            Welsh => "Welsh",
            Parzen => "Parzen",
            Bohman => "Bohman",
            Bartlett => "Bartlett",
            Lagrange => "Lagrange",
            Lanczos => "Lanczos",
            LanczosSharp => "LanczosSharp",
            Lanczos2 => "Lanczos2",
            Lanczos2Sharp => "Lanczos2Sharp",
            LanczosRadius => "LanczosRadius",
            Robidoux => "Robidoux",
            RobidouxSharp => "RobidouxSharp",
            Cosine => "Cosine",
            Spline => "Spline",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterType {
    type Err = OptionError;

    /// Case-insensitive; accepts the canonical names plus `Bessel`, `Hann`,
    /// `Welch` and `CatmullRom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let alias = match key.as_str() {
            "bessel" => Some(FilterType::Jinc),
            "hann" => Some(FilterType::Hanning),
            "welch" => Some(FilterType::Welsh),
            "catmullrom" | "catmull-rom" => Some(FilterType::Catrom),
            _ => None,
        };
        alias
            .or_else(|| {
                FilterType::ALL
                    .iter()
                    .copied()
                    .find(|f| f.name().eq_ignore_ascii_case(&key))
            })
            .ok_or_else(|| OptionError::UnknownFilter {
                name: s.to_string(),
            })
    }
}

// ============================================================================
// FilterOverrides
// ============================================================================

/// Expert overrides applied on top of a named filter.
///
/// Every field is optional; `None` keeps the table default. Usually filled
/// from `filter:*` options by [`FilterOverrides::from_artifacts`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOverrides {
    /// Raw weighting filter; implies a Box window unless `window` is set.
    pub filter: Option<FilterType>,
    /// Windowing filter. Without `filter`, the weight becomes Sinc (or Jinc).
    pub window: Option<FilterType>,
    /// Lobe count; replaces the support, clamped to at least 1.
    pub lobes: Option<i64>,
    /// Explicit support radius (absolute value is used).
    pub support: Option<f64>,
    /// Explicit window support radius (absolute value is used).
    pub window_support: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    /// Multiplied into the blur passed to [`build_filter`].
    pub blur: Option<f64>,
    /// Gaussian sigma. Above 1/2 the support grows to `support * 2 * sigma`.
    pub sigma: Option<f64>,
    pub kaiser_beta: Option<f64>,
    /// Kaiser shape in units of pi; wins over `kaiser_beta`.
    pub kaiser_alpha: Option<f64>,
}

impl FilterOverrides {
    pub fn is_empty(&self) -> bool {
        *self == FilterOverrides::default()
    }
}

// ============================================================================
// ResizeFilter
// ============================================================================

/// Resolved, immutable resize filter descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeFilter {
    filter_type: FilterType,
    window_type: FilterType,
    filter: Kernel,
    window: Kernel,
    support: f64,
    window_support: f64,
    scale: f64,
    blur: f64,
    b: f64,
    c: f64,
    cubic: [f64; 8],
    gaussian_sigma: f64,
    gaussian_coefficient: f64,
    gaussian_normalization: f64,
    kaiser_beta: f64,
    kaiser_normalization: f64,
    cylindrical: bool,
}

/// Convert cubic B,C parameters into the piecewise polynomial coefficients
/// `[P0, P1, P2, P3, Q0, Q1, Q2, Q3]`.
pub fn cubic_coefficients(b: f64, c: f64) -> [f64; 8] {
    [
        (6.0 - 2.0 * b) / 6.0,
        0.0,
        (-18.0 + 12.0 * b + 6.0 * c) / 6.0,
        (12.0 - 9.0 * b - 6.0 * c) / 6.0,
        (8.0 * b + 24.0 * c) / 6.0,
        (-12.0 * b - 48.0 * c) / 6.0,
        (6.0 * b + 30.0 * c) / 6.0,
        (-b - 6.0 * c) / 6.0,
    ]
}

/// Resolve a named filter into a [`ResizeFilter`].
///
/// `cylindrical` selects the radially symmetric form. `blur > 1` softens,
/// `blur < 1` sharpens.
pub fn build_filter(
    filter: FilterType,
    blur: f64,
    cylindrical: bool,
    overrides: &FilterOverrides,
) -> ResizeFilter {
    ResizeFilter::new(filter, blur, cylindrical, overrides)
}

/// Effective support radius: `support * blur`.
#[inline]
pub fn filter_support(filter: &ResizeFilter) -> f64 {
    filter.effective_support()
}

/// Combined window and kernel weight at `distance`.
#[inline]
pub fn filter_weight(filter: &ResizeFilter, distance: f64) -> f64 {
    filter.weight(distance)
}

impl ResizeFilter {
    pub fn new(
        requested: FilterType,
        blur: f64,
        cylindrical: bool,
        overrides: &FilterOverrides,
    ) -> Self {
        let (mut filter_type, mut window_type) = requested.mapping();
        let mut blur = blur;

        if cylindrical && filter_type == FilterType::Sinc && requested != FilterType::Sinc {
            filter_type = FilterType::Jinc;
        }

        match (overrides.filter, overrides.window) {
            (Some(f), window) => {
                filter_type = f;
                window_type = window.unwrap_or(FilterType::Box);
            }
            (None, Some(w)) => {
                filter_type = if cylindrical {
                    FilterType::Jinc
                } else {
                    FilterType::Sinc
                };
                window_type = w;
            }
            (None, None) => {}
        }

        let filter_defaults = filter_type.defaults();
        let window_defaults = window_type.defaults();
        let mut filter = filter_defaults.kernel;
        let mut window = window_defaults.kernel;
        let mut support = filter_defaults.support;
        let mut scale = window_defaults.scale;

        if cylindrical {
            match filter_type {
                FilterType::Box | FilterType::Point => support = SQRT1_2,
                f if f.is_lanczos() => {
                    filter = Kernel::Bessel;
                    window = Kernel::Bessel;
                    scale = JINC_ZEROS[0];
                }
                FilterType::Gaussian => {
                    blur *= 2.0 * std::f64::consts::LN_2 / SQRT_2_PI;
                }
                FilterType::Jinc if window == Kernel::Box => {
                    blur *= JINC_ZEROS[0];
                }
                _ => {}
            }
        }

        match filter_type {
            FilterType::LanczosSharp => blur *= LANCZOS_SHARP_BLUR,
            FilterType::Lanczos2Sharp => blur *= LANCZOS2_SHARP_BLUR,
            _ => {}
        }

        let uses = |k: Kernel| filter == k || window == k;

        let gaussian_sigma = overrides.sigma.unwrap_or(DEFAULT_GAUSSIAN_SIGMA);
        let gaussian_coefficient = perceptible_reciprocal(2.0 * gaussian_sigma * gaussian_sigma);
        let gaussian_normalization = perceptible_reciprocal(gaussian_sigma * (2.0 * PI).sqrt());
        if uses(Kernel::Gaussian) && gaussian_sigma > DEFAULT_GAUSSIAN_SIGMA {
            support *= 2.0 * gaussian_sigma;
        }

        let kaiser_beta = overrides
            .kaiser_alpha
            .map(|alpha| alpha * PI)
            .or(overrides.kaiser_beta)
            .unwrap_or(DEFAULT_KAISER_BETA);
        let kaiser_normalization = perceptible_reciprocal(bessel_i0(kaiser_beta));

        if let Some(lobes) = overrides.lobes {
            support = lobes.max(1) as f64;
        }
        if filter == Kernel::Bessel {
            let lobes = (support as usize).clamp(1, JINC_ZEROS.len());
            support = JINC_ZEROS[lobes - 1];
            if filter_type == FilterType::LanczosRadius {
                // Pull the practical support back onto a whole pixel radius.
                blur *= support.floor() / support;
            }
        }

        if let Some(extra) = overrides.blur {
            blur *= extra;
        }
        if blur < EPSILON {
            blur = EPSILON;
        }

        if let Some(s) = overrides.support {
            support = s.abs();
        }
        let window_support = overrides.window_support.map_or(support, f64::abs);
        scale /= window_support;

        let (b, c) = if uses(Kernel::CubicBc) {
            let (mut b, mut c) = if window_defaults.kernel == Kernel::CubicBc {
                (window_defaults.b, window_defaults.c)
            } else {
                (filter_defaults.b, filter_defaults.c)
            };
            match (overrides.b, overrides.c) {
                (Some(ob), oc) => {
                    b = ob;
                    c = oc.unwrap_or((1.0 - ob) / 2.0);
                }
                (None, Some(oc)) => {
                    c = oc;
                    b = 1.0 - 2.0 * oc;
                }
                (None, None) => {}
            }
            (b, c)
        } else {
            (0.0, 0.0)
        };
        let cubic = if uses(Kernel::CubicBc) {
            cubic_coefficients(b, c)
        } else {
            [0.0; 8]
        };

        let resolved = Self {
            filter_type,
            window_type,
            filter,
            window,
            support,
            window_support,
            scale,
            blur,
            b,
            c,
            cubic,
            gaussian_sigma,
            gaussian_coefficient,
            gaussian_normalization,
            kaiser_beta,
            kaiser_normalization,
            cylindrical,
        };
        debug!(
            "resize filter {requested}: filter={} window={} support={} window-support={} blur={} B,C={},{}",
            resolved.filter.name(),
            resolved.window.name(),
            resolved.support,
            resolved.window_support,
            resolved.blur,
            resolved.b,
            resolved.c
        );
        resolved
    }

    /// Support radius before blur.
    #[inline]
    pub fn support(&self) -> f64 {
        self.support
    }

    /// Support radius used to scale the window argument.
    #[inline]
    pub fn window_support(&self) -> f64 {
        self.window_support
    }

    #[inline]
    pub fn blur(&self) -> f64 {
        self.blur
    }

    /// Window argument scale (window's first zero over window support).
    #[inline]
    pub fn window_scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn effective_support(&self) -> f64 {
        self.support * self.blur
    }

    #[inline]
    pub fn filter_kernel(&self) -> Kernel {
        self.filter
    }

    #[inline]
    pub fn window_kernel(&self) -> Kernel {
        self.window
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn window_type(&self) -> FilterType {
        self.window_type
    }

    pub fn is_cylindrical(&self) -> bool {
        self.cylindrical
    }

    /// Resolved cubic (B, C); both zero when no cubic kernel is involved.
    pub fn cubic_bc(&self) -> (f64, f64) {
        (self.b, self.c)
    }

    #[inline]
    pub fn cubic_coefficients(&self) -> &[f64; 8] {
        &self.cubic
    }

    pub fn gaussian_sigma(&self) -> f64 {
        self.gaussian_sigma
    }

    /// `1 / (2 sigma²)`, the exponent factor of the Gaussian kernel.
    #[inline]
    pub fn gaussian_coefficient(&self) -> f64 {
        self.gaussian_coefficient
    }

    #[inline]
    pub fn gaussian_normalization(&self) -> f64 {
        self.gaussian_normalization
    }

    #[inline]
    pub fn kaiser_beta(&self) -> f64 {
        self.kaiser_beta
    }

    #[inline]
    pub fn kaiser_normalization(&self) -> f64 {
        self.kaiser_normalization
    }

    /// Weight at signed distance `x` from the sample center.
    pub fn weight(&self, x: f64) -> f64 {
        let x_blur = x.abs() / self.blur;
        let window = if self.window_support < EPSILON || self.window == Kernel::Box {
            1.0
        } else {
            self.window.evaluate(x_blur * self.scale, self)
        };
        window * self.filter.evaluate(x_blur, self)
    }

    /// Sample the weight curve over `[0, effective_support]` every `step`,
    /// closing with `(effective_support, 0)`.
    pub fn graph(&self, step: f64) -> Vec<(f64, f64)> {
        let support = self.effective_support();
        let mut points = Vec::new();
        if step > 0.0 {
            let count = (support / step + EPSILON).floor() as usize;
            points.reserve(count + 2);
            for i in 0..=count {
                let x = i as f64 * step;
                points.push((x, self.weight(x)));
            }
        }
        points.push((support, 0.0));
        points
    }

    // Names the kernel actually evaluated, which can differ from the
    // requested filter (Point evaluates Box, Lanczos evaluates Sinc).
    fn kernel_name(kernel: Kernel, ty: FilterType) -> FilterType {
        match kernel {
            Kernel::Box => FilterType::Box,
            Kernel::Sinc => FilterType::Sinc,
            Kernel::SincFast => FilterType::SincFast,
            Kernel::Bessel => FilterType::Jinc,
            Kernel::CubicBc => FilterType::Cubic,
            _ => ty,
        }
    }

    fn filter_name(&self) -> FilterType {
        Self::kernel_name(self.filter, self.filter_type)
    }

    fn window_name(&self) -> FilterType {
        Self::kernel_name(self.window, self.window_type)
    }
}

impl fmt::Display for ResizeFilter {
    /// Descriptor report in the `# key = value` graphing-comment format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filter = self.filter_name();
        let window = self.window_name();
        writeln!(f, "# Resampling Filter (for graphing)")?;
        writeln!(f, "#")?;
        writeln!(f, "# filter = {filter}")?;
        writeln!(f, "# window = {window}")?;
        writeln!(f, "# support = {}", self.support)?;
        writeln!(f, "# window-support = {}", self.window_support)?;
        writeln!(f, "# scale-blur = {}", self.blur)?;
        if self.filter == Kernel::Gaussian || self.window == Kernel::Gaussian {
            writeln!(f, "# gaussian-sigma = {}", self.gaussian_sigma)?;
        }
        if self.filter == Kernel::Kaiser || self.window == Kernel::Kaiser {
            writeln!(f, "# kaiser-beta = {}", self.kaiser_beta)?;
        }
        writeln!(f, "# practical-support = {}", self.effective_support())?;
        if self.filter == Kernel::CubicBc || self.window == Kernel::CubicBc {
            writeln!(f, "# B,C = {},{}", self.b, self.c)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn ortho(filter: FilterType) -> ResizeFilter {
        build_filter(filter, 1.0, false, &FilterOverrides::default())
    }

    fn cyl(filter: FilterType) -> ResizeFilter {
        build_filter(filter, 1.0, true, &FilterOverrides::default())
    }

    #[test]
    fn test_point_and_box_support() {
        let point = ortho(FilterType::Point);
        assert_eq!(point.support(), 0.0);
        assert_eq!(point.filter_kernel(), Kernel::Box);
        let b = ortho(FilterType::Box);
        assert_eq!(b.support(), 0.5);
        assert_eq!(b.weight(0.3), 1.0);
    }

    #[test]
    fn test_lanczos_defaults() {
        let f = ortho(FilterType::Lanczos);
        assert_eq!(f.filter_kernel(), Kernel::Sinc);
        assert_eq!(f.window_kernel(), Kernel::Sinc);
        assert_eq!(f.support(), 3.0);
        assert_eq!(f.window_support(), 3.0);
        assert!((f.window_scale() - 1.0 / 3.0).abs() < TOL);
        assert_eq!(f.blur(), 1.0);
        assert!((f.weight(0.0) - 1.0).abs() < TOL);
        assert!(f.weight(1.0).abs() < TOL);
        assert!(f.weight(2.0).abs() < TOL);
    }

    #[test]
    fn test_weight_is_symmetric() {
        for filter in FilterType::ALL {
            let f = ortho(filter);
            for i in 0..8 {
                let x = i as f64 * 0.3;
                assert_eq!(f.weight(x), f.weight(-x), "{filter} at {x}");
            }
        }
    }

    #[test]
    fn test_all_filters_have_positive_center_weight() {
        for filter in FilterType::ALL {
            let f = ortho(filter);
            assert!(f.weight(0.0) > 0.0, "{filter}");
            assert!(f.blur() >= EPSILON);
        }
    }

    #[test]
    fn test_mitchell_cubic_coefficients() {
        let f = ortho(FilterType::Mitchell);
        let (b, c) = f.cubic_bc();
        assert!((b - 1.0 / 3.0).abs() < TOL);
        assert!((c - 1.0 / 3.0).abs() < TOL);
        assert_eq!(f.cubic_coefficients(), &cubic_coefficients(b, c));
        assert_eq!(f.support(), 2.0);
    }

    #[test]
    fn test_cubic_coefficients_catrom() {
        let c = cubic_coefficients(0.0, 0.5);
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 0.0);
        assert_eq!(c[2], -2.5);
        assert_eq!(c[3], 1.5);
        assert_eq!(c[4], 2.0);
        assert_eq!(c[5], -4.0);
        assert_eq!(c[6], 2.5);
        assert_eq!(c[7], -0.5);
    }

    #[test]
    fn test_parzen_takes_window_bc() {
        let f = ortho(FilterType::Parzen);
        assert_eq!(f.filter_kernel(), Kernel::Sinc);
        assert_eq!(f.window_kernel(), Kernel::CubicBc);
        assert_eq!(f.cubic_bc(), (1.0, 0.0));
    }

    #[test]
    fn test_b_override_derives_c() {
        let overrides = FilterOverrides {
            b: Some(0.5),
            ..Default::default()
        };
        let f = build_filter(FilterType::Cubic, 1.0, false, &overrides);
        assert_eq!(f.cubic_bc(), (0.5, 0.25));

        let overrides = FilterOverrides {
            b: Some(0.5),
            c: Some(0.1),
            ..Default::default()
        };
        let f = build_filter(FilterType::Cubic, 1.0, false, &overrides);
        assert_eq!(f.cubic_bc(), (0.5, 0.1));
    }

    #[test]
    fn test_c_override_derives_b() {
        let overrides = FilterOverrides {
            c: Some(0.25),
            ..Default::default()
        };
        let f = build_filter(FilterType::Mitchell, 1.0, false, &overrides);
        assert_eq!(f.cubic_bc(), (0.5, 0.25));
    }

    #[test]
    fn test_bc_ignored_without_cubic() {
        let overrides = FilterOverrides {
            b: Some(0.5),
            ..Default::default()
        };
        let f = build_filter(FilterType::Lanczos, 1.0, false, &overrides);
        assert_eq!(f.cubic_bc(), (0.0, 0.0));
    }

    #[test]
    fn test_cylindrical_sinc_promotion() {
        let f = cyl(FilterType::Hanning);
        assert_eq!(f.filter_kernel(), Kernel::Bessel);
        assert_eq!(f.filter_type(), FilterType::Jinc);
        assert_eq!(f.window_kernel(), Kernel::Hanning);
        // Lobe count 3 reselects the third zero crossing.
        assert_eq!(f.support(), JINC_ZEROS[2]);
    }

    #[test]
    fn test_raw_sinc_not_promoted() {
        let f = cyl(FilterType::Sinc);
        assert_eq!(f.filter_kernel(), Kernel::Sinc);
        assert_eq!(f.support(), 4.0);
    }

    #[test]
    fn test_cylindrical_lanczos() {
        let f = cyl(FilterType::Lanczos);
        assert_eq!(f.filter_kernel(), Kernel::Bessel);
        assert_eq!(f.window_kernel(), Kernel::Bessel);
        assert_eq!(f.support(), JINC_ZEROS[2]);
        assert!((f.window_scale() - JINC_ZEROS[0] / JINC_ZEROS[2]).abs() < TOL);
    }

    #[test]
    fn test_cylindrical_box_support() {
        assert!((cyl(FilterType::Box).support() - SQRT1_2).abs() < TOL);
        assert!((cyl(FilterType::Point).support() - SQRT1_2).abs() < TOL);
    }

    #[test]
    fn test_cylindrical_gaussian_blur() {
        let f = cyl(FilterType::Gaussian);
        let expected = 2.0 * std::f64::consts::LN_2 / SQRT_2_PI;
        assert!((f.blur() - expected).abs() < TOL);
        assert_eq!(ortho(FilterType::Gaussian).blur(), 1.0);
    }

    #[test]
    fn test_cylindrical_raw_jinc_blur() {
        let f = cyl(FilterType::Jinc);
        assert!((f.blur() - JINC_ZEROS[0]).abs() < TOL);
        assert_eq!(ortho(FilterType::Jinc).blur(), 1.0);
    }

    #[test]
    fn test_sharpened_lanczos() {
        assert!((ortho(FilterType::LanczosSharp).blur() - LANCZOS_SHARP_BLUR).abs() < TOL);
        assert!((ortho(FilterType::Lanczos2Sharp).blur() - LANCZOS2_SHARP_BLUR).abs() < TOL);
        assert_eq!(ortho(FilterType::Lanczos2).support(), 2.0);
    }

    #[test]
    fn test_lobes_override() {
        let overrides = FilterOverrides {
            lobes: Some(4),
            ..Default::default()
        };
        let f = build_filter(FilterType::Lanczos, 1.0, false, &overrides);
        assert_eq!(f.support(), 4.0);
        assert_eq!(f.window_support(), 4.0);

        let overrides = FilterOverrides {
            lobes: Some(-2),
            ..Default::default()
        };
        let f = build_filter(FilterType::Lanczos, 1.0, false, &overrides);
        assert_eq!(f.support(), 1.0);
    }

    #[test]
    fn test_jinc_lobes_clamp_to_table() {
        let overrides = FilterOverrides {
            lobes: Some(40),
            ..Default::default()
        };
        let f = build_filter(FilterType::Jinc, 1.0, false, &overrides);
        assert_eq!(f.support(), JINC_ZEROS[15]);
    }

    #[test]
    fn test_support_overrides() {
        let overrides = FilterOverrides {
            support: Some(-5.0),
            window_support: Some(2.5),
            ..Default::default()
        };
        let f = build_filter(FilterType::Lanczos, 1.0, false, &overrides);
        assert_eq!(f.support(), 5.0);
        assert_eq!(f.window_support(), 2.5);
        assert!((f.window_scale() - 0.4).abs() < TOL);
    }

    #[test]
    fn test_raw_filter_override() {
        let overrides = FilterOverrides {
            filter: Some(FilterType::Triangle),
            ..Default::default()
        };
        let f = build_filter(FilterType::Lanczos, 1.0, false, &overrides);
        assert_eq!(f.filter_kernel(), Kernel::Triangle);
        assert_eq!(f.window_kernel(), Kernel::Box);
        assert_eq!(f.support(), 1.0);
    }

    #[test]
    fn test_window_only_override_implies_sinc() {
        let overrides = FilterOverrides {
            window: Some(FilterType::Hamming),
            ..Default::default()
        };
        let f = build_filter(FilterType::Mitchell, 1.0, false, &overrides);
        assert_eq!(f.filter_kernel(), Kernel::Sinc);
        assert_eq!(f.window_kernel(), Kernel::Hamming);

        let f = build_filter(FilterType::Mitchell, 1.0, true, &overrides);
        assert_eq!(f.filter_kernel(), Kernel::Bessel);
    }

    #[test]
    fn test_blur_override_and_clamp() {
        let overrides = FilterOverrides {
            blur: Some(2.0),
            ..Default::default()
        };
        let f = build_filter(FilterType::Triangle, 1.5, false, &overrides);
        assert_eq!(f.blur(), 3.0);
        assert_eq!(f.effective_support(), 3.0);
        assert_eq!(filter_support(&f), 3.0);

        let f = build_filter(FilterType::Triangle, 0.0, false, &FilterOverrides::default());
        assert_eq!(f.blur(), EPSILON);
    }

    #[test]
    fn test_blur_scales_weight() {
        let f = build_filter(FilterType::Triangle, 2.0, false, &FilterOverrides::default());
        assert!((filter_weight(&f, 1.0) - 0.5).abs() < TOL);
    }

    #[test]
    fn test_kaiser_beta() {
        let f = ortho(FilterType::Kaiser);
        assert_eq!(f.kaiser_beta(), DEFAULT_KAISER_BETA);
        assert!((f.kaiser_normalization() * bessel_i0(6.5) - 1.0).abs() < TOL);

        let overrides = FilterOverrides {
            kaiser_beta: Some(4.0),
            ..Default::default()
        };
        let f = build_filter(FilterType::Kaiser, 1.0, false, &overrides);
        assert_eq!(f.kaiser_beta(), 4.0);
        assert!((f.weight(0.0) - 1.0).abs() < TOL);
    }

    #[test]
    fn test_kaiser_alpha_wins_over_beta() {
        let overrides = FilterOverrides {
            kaiser_beta: Some(4.0),
            kaiser_alpha: Some(2.0),
            ..Default::default()
        };
        let f = build_filter(FilterType::Kaiser, 1.0, false, &overrides);
        assert!((f.kaiser_beta() - 2.0 * PI).abs() < TOL);
        assert!((f.kaiser_normalization() * bessel_i0(2.0 * PI) - 1.0).abs() < TOL);
    }

    #[test]
    fn test_gaussian_sigma() {
        let f = ortho(FilterType::Gaussian);
        assert_eq!(f.gaussian_sigma(), DEFAULT_GAUSSIAN_SIGMA);
        assert_eq!(f.gaussian_coefficient(), 2.0);
        assert_eq!(f.support(), 2.0);
        assert!((f.weight(0.0) - SQRT_2_PI).abs() < TOL);

        let overrides = FilterOverrides {
            sigma: Some(1.0),
            ..Default::default()
        };
        let f = build_filter(FilterType::Gaussian, 1.0, false, &overrides);
        assert_eq!(f.gaussian_coefficient(), 0.5);
        assert_eq!(f.support(), 4.0);
        assert!((f.weight(0.0) - 1.0 / (2.0 * PI).sqrt()).abs() < TOL);
        assert!((f.weight(1.0) / f.weight(0.0) - (-0.5f64).exp()).abs() < TOL);
    }

    #[test]
    fn test_small_sigma_keeps_support() {
        let overrides = FilterOverrides {
            sigma: Some(0.25),
            ..Default::default()
        };
        let f = build_filter(FilterType::Gaussian, 1.0, false, &overrides);
        assert_eq!(f.support(), 2.0);
        assert_eq!(f.gaussian_coefficient(), 8.0);
    }

    #[test]
    fn test_sigma_ignored_without_gaussian() {
        let overrides = FilterOverrides {
            sigma: Some(3.0),
            ..Default::default()
        };
        let f = build_filter(FilterType::Lanczos, 1.0, false, &overrides);
        assert_eq!(f.support(), 3.0);
    }

    #[test]
    fn test_lanczos_radius() {
        let f = ortho(FilterType::LanczosRadius);
        assert_eq!(f.filter_kernel(), Kernel::Sinc);
        assert_eq!(f.window_kernel(), Kernel::Sinc);
        assert_eq!(f.support(), 3.0);
        assert_eq!(f.blur(), 1.0);

        let f = cyl(FilterType::LanczosRadius);
        assert_eq!(f.filter_kernel(), Kernel::Bessel);
        assert_eq!(f.support(), JINC_ZEROS[2]);
        assert!((f.blur() - 3.0 / JINC_ZEROS[2]).abs() < TOL);
        assert!((f.effective_support() - 3.0).abs() < TOL);
    }

    #[test]
    fn test_sinc_fast_filter() {
        let f = ortho(FilterType::SincFast);
        assert_eq!(f.filter_kernel(), Kernel::SincFast);
        assert_eq!(f.window_kernel(), Kernel::Box);
        assert_eq!(f.support(), 4.0);
        assert!((f.weight(0.5) - 2.0 / PI).abs() < 1e-11);

        let f = cyl(FilterType::SincFast);
        assert_eq!(f.filter_kernel(), Kernel::SincFast);
        assert!(f.to_string().contains("# filter = SincFast\n"));
    }

    #[test]
    fn test_graph_endpoints() {
        let f = ortho(FilterType::Triangle);
        let graph = f.graph(0.25);
        assert_eq!(graph.len(), 6);
        assert_eq!(graph[0], (0.0, 1.0));
        assert_eq!(graph[2], (0.5, 0.5));
        assert_eq!(graph[5], (1.0, 0.0));
        assert_eq!(f.graph(0.0), vec![(1.0, 0.0)]);
    }

    #[test]
    fn test_report() {
        let report = ortho(FilterType::Mitchell).to_string();
        assert!(report.starts_with("# Resampling Filter (for graphing)\n#\n"));
        assert!(report.contains("# filter = Cubic\n"));
        assert!(report.contains("# window = Box\n"));
        assert!(report.contains("# support = 2\n"));
        assert!(report.contains("# B,C = "));
        assert!(!report.contains("kaiser-beta"));

        let report = ortho(FilterType::Kaiser).to_string();
        assert!(report.contains("# filter = Sinc\n"));
        assert!(report.contains("# window = Kaiser\n"));
        assert!(report.contains("# kaiser-beta = 6.5\n"));
        assert!(!report.contains("gaussian-sigma"));

        let report = ortho(FilterType::Gaussian).to_string();
        assert!(report.contains("# gaussian-sigma = 0.5\n"));
    }

    #[test]
    fn test_filter_type_parse() {
        assert_eq!("lanczos".parse::<FilterType>(), Ok(FilterType::Lanczos));
        assert_eq!("LanczosSharp".parse::<FilterType>(), Ok(FilterType::LanczosSharp));
        assert_eq!("BESSEL".parse::<FilterType>(), Ok(FilterType::Jinc));
        assert_eq!(" hann ".parse::<FilterType>(), Ok(FilterType::Hanning));
        assert!("bogus".parse::<FilterType>().is_err());
        for filter in FilterType::ALL {
            assert_eq!(filter.to_string().parse::<FilterType>(), Ok(filter));
        }
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(FilterOverrides::default().is_empty());
        let o = FilterOverrides {
            blur: Some(1.0),
            ..Default::default()
        };
        assert!(!o.is_empty());
    }
}
