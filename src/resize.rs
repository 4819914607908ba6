//! Two-pass resize orchestration.
//!
//! Picks a filter when none is requested, orders the horizontal and vertical
//! passes to bound intermediate work, and threads one [`Progress`] through
//! both passes.

use crate::error::{OptionError, ResizeError};
use crate::filter::{build_filter, FilterOverrides, FilterType};
use crate::options::ArtifactSource;
use crate::progress::{Progress, ProgressMonitor};
use crate::raster::{PixelSource, PixelSpan, Raster, StorageClass};
use crate::resize_pass::{horizontal_filter, vertical_filter};
use log::debug;

/// Above this `x_factor * y_factor`, the width pass runs first.
pub const DEFAULT_WORKLOAD_THRESHOLD: f64 = 0.265;

/// Summed alpha weights below this are treated as fully transparent.
pub const DEFAULT_GAMMA_EPSILON: f64 = 1.0e-12;

// ============================================================================
// Configuration
// ============================================================================

/// Tunables of the resize engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeConfig {
    pub workload_threshold: f64,
    pub gamma_epsilon: f64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            workload_threshold: DEFAULT_WORKLOAD_THRESHOLD,
            gamma_epsilon: DEFAULT_GAMMA_EPSILON,
        }
    }
}

/// Everything a resize call can be told beyond the target size.
#[derive(Clone)]
pub struct ResizeOptions<'a> {
    /// `None` selects Point, Mitchell or Lanczos from the image and factors.
    pub filter: Option<FilterType>,
    pub blur: f64,
    pub overrides: FilterOverrides,
    pub config: ResizeConfig,
    pub monitor: Option<&'a dyn ProgressMonitor>,
}

impl Default for ResizeOptions<'_> {
    fn default() -> Self {
        Self {
            filter: None,
            blur: 1.0,
            overrides: FilterOverrides::default(),
            config: ResizeConfig::default(),
            monitor: None,
        }
    }
}

impl<'a> ResizeOptions<'a> {
    /// Default options with `filter:*` overrides read from `artifacts`.
    pub fn from_artifacts<A: ArtifactSource + ?Sized>(artifacts: &A) -> Result<Self, OptionError> {
        Ok(Self {
            overrides: FilterOverrides::from_artifacts(artifacts)?,
            ..Self::default()
        })
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }

    pub fn with_monitor(mut self, monitor: &'a dyn ProgressMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    fn is_plain(&self) -> bool {
        self.filter.is_none() && self.blur == 1.0 && self.overrides.is_empty()
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Resize `source` to `width x height`.
///
/// `filter: None` picks a filter automatically. `blur` above 1 softens,
/// below 1 sharpens.
pub fn resize(
    source: &Raster,
    width: usize,
    height: usize,
    filter: Option<FilterType>,
    blur: f64,
) -> Result<Raster, ResizeError> {
    let options = ResizeOptions {
        filter,
        blur,
        ..ResizeOptions::default()
    };
    resize_with(source, width, height, &options)
}

/// [`resize`] with full options.
pub fn resize_with(
    source: &Raster,
    width: usize,
    height: usize,
    options: &ResizeOptions<'_>,
) -> Result<Raster, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions { width, height });
    }
    if width == source.width() && height == source.height() && options.is_plain() {
        return Ok(source.clone());
    }
    resize_from(source, width, height, options)
}

/// Resize any [`PixelSource`].
pub fn resize_from<S: PixelSource + ?Sized>(
    source: &S,
    width: usize,
    height: usize,
    options: &ResizeOptions<'_>,
) -> Result<Raster, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions { width, height });
    }
    let info = source.info();
    if info.width == 0 || info.height == 0 {
        return Err(ResizeError::InvalidDimensions {
            width: info.width,
            height: info.height,
        });
    }
    if width == info.width && height == info.height && options.is_plain() {
        return copy_source(source);
    }

    let x_factor = width as f64 / info.width as f64;
    let y_factor = height as f64 / info.height as f64;
    let filter_type = options.filter.unwrap_or_else(|| {
        if x_factor == 1.0 && y_factor == 1.0 {
            FilterType::Point
        } else if info.storage_class == StorageClass::Pseudo
            || info.has_alpha
            || x_factor * y_factor > 1.0
        {
            FilterType::Mitchell
        } else {
            FilterType::Lanczos
        }
    });
    let filter = build_filter(filter_type, options.blur, false, &options.overrides);

    let config = &options.config;
    let width_first = x_factor * y_factor > config.workload_threshold;
    debug!(
        "resize {}x{} -> {}x{} with {filter_type} (factors {x_factor:.4}, {y_factor:.4}), {} first",
        info.width,
        info.height,
        width,
        height,
        if width_first { "width" } else { "height" }
    );

    let progress = Progress::new(options.monitor, (width + height) as u64);
    if width_first {
        let intermediate = horizontal_filter(&filter, source, width, config, &progress)?;
        debug!("intermediate {}x{}", intermediate.width(), intermediate.height());
        vertical_filter(&filter, &intermediate, height, config, &progress)
    } else {
        let intermediate = vertical_filter(&filter, source, height, config, &progress)?;
        debug!("intermediate {}x{}", intermediate.width(), intermediate.height());
        horizontal_filter(&filter, &intermediate, width, config, &progress)
    }
}

fn copy_source<S: PixelSource + ?Sized>(source: &S) -> Result<Raster, ResizeError> {
    let info = source.info();
    let mut span = PixelSpan::new();
    source.read_span(0, 0, info.width, info.height, &mut span)?;
    let (pixels, indexes) = span.into_parts();
    let indexes = if info.has_indexes() && indexes.len() == pixels.len() {
        Some(indexes)
    } else {
        None
    };
    Ok(Raster::from_parts(info, pixels, indexes))
}

// ============================================================================
// Tests
// ============================================================================
