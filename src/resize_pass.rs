//! Separable horizontal and vertical resize passes.
//!
//! Each destination line (a column for the horizontal pass, a row for the
//! vertical pass) is an independent unit of work. Lines run on the rayon
//! pool; every worker owns its contribution buffer and pixel span.
//!
//! With an alpha channel, color is accumulated premultiplied by alpha and
//! divided by the summed alpha weight afterwards, so fully transparent
//! neighbours never tint opaque output.

use crate::basics::clamp_to_quantum;
use crate::contribution::{Contribution, ContributionBuffer, ContributionBuilder};
use crate::error::ResizeError;
use crate::filter::ResizeFilter;
use crate::progress::Progress;
use crate::raster::{
    try_filled, Colorspace, PixelPacket, PixelSource, PixelSpan, Raster, RasterInfo,
    StorageClass,
};
use crate::resize::ResizeConfig;
use log::trace;
use rayon::prelude::*;

// ============================================================================
// Accumulation
// ============================================================================

/// What the destination index channel holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexMode {
    None,
    /// Palette index of the nearest source sample.
    Palette,
    /// CMYK black plate, blended like a color channel.
    Black,
}

#[derive(Debug, Default)]
struct Accumulator {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
    black: f64,
    gamma: f64,
}

#[derive(Debug, Clone, Copy)]
struct Blend {
    has_alpha: bool,
    quantum: u16,
    inv_max: f64,
    gamma_epsilon: f64,
    black: bool,
}

impl Blend {
    fn new(info: &RasterInfo, config: &ResizeConfig, mode: IndexMode) -> Self {
        let quantum = info.depth.max();
        Self {
            has_alpha: info.has_alpha,
            quantum,
            inv_max: 1.0 / quantum as f64,
            gamma_epsilon: config.gamma_epsilon,
            black: mode == IndexMode::Black,
        }
    }

    /// Weighted sum of the samples `sample(j)` for each contribution `j`.
    /// Returns the pixel and the blended black plate.
    #[inline]
    fn blend<F>(&self, contributions: &[Contribution], sample: F) -> (PixelPacket, u16)
    where
        F: Fn(usize) -> (PixelPacket, u16),
    {
        let mut acc = Accumulator::default();
        if !self.has_alpha {
            for (j, c) in contributions.iter().enumerate() {
                let (p, index) = sample(j);
                let w = c.weight;
                acc.red += w * p.red as f64;
                acc.green += w * p.green as f64;
                acc.blue += w * p.blue as f64;
                acc.alpha += w * p.alpha as f64;
                if self.black {
                    acc.black += w * index as f64;
                }
            }
            return self.finish(&acc, 1.0);
        }

        // `plain` keeps the unweighted color for windows with no opacity.
        let mut plain = Accumulator::default();
        for (j, c) in contributions.iter().enumerate() {
            let (p, index) = sample(j);
            let w = c.weight;
            let a = w * p.alpha as f64 * self.inv_max;
            acc.red += a * p.red as f64;
            acc.green += a * p.green as f64;
            acc.blue += a * p.blue as f64;
            acc.alpha += w * p.alpha as f64;
            acc.gamma += a;
            plain.red += w * p.red as f64;
            plain.green += w * p.green as f64;
            plain.blue += w * p.blue as f64;
            if self.black {
                acc.black += a * index as f64;
                plain.black += w * index as f64;
            }
        }
        if acc.gamma.abs() < self.gamma_epsilon {
            plain.alpha = acc.alpha;
            return self.finish(&plain, 1.0);
        }
        self.finish(&acc, 1.0 / acc.gamma)
    }

    #[inline]
    fn finish(&self, acc: &Accumulator, gamma: f64) -> (PixelPacket, u16) {
        let q = self.quantum;
        let pixel = PixelPacket {
            red: clamp_to_quantum(gamma * acc.red, q),
            green: clamp_to_quantum(gamma * acc.green, q),
            blue: clamp_to_quantum(gamma * acc.blue, q),
            alpha: clamp_to_quantum(acc.alpha, q),
        };
        let black = if self.black {
            clamp_to_quantum(gamma * acc.black, q)
        } else {
            0
        };
        (pixel, black)
    }
}

// ============================================================================
// Pass plumbing
// ============================================================================

/// Per-worker scratch.
struct LineScratch {
    contributions: ContributionBuffer,
    span: PixelSpan,
}

/// Everything a line needs that is shared, read-only, by the whole pass.
struct PassContext<'a, S: ?Sized> {
    source: &'a S,
    builder: ContributionBuilder<'a>,
    blend: Blend,
    mode: IndexMode,
}

impl<'a, S: PixelSource + ?Sized> PassContext<'a, S> {
    fn new(
        source: &'a S,
        filter: &'a ResizeFilter,
        factor: f64,
        source_extent: usize,
        config: &ResizeConfig,
        target: (usize, usize),
    ) -> (Self, RasterInfo) {
        let info = source.info();
        let builder = ContributionBuilder::new(filter, factor, source_extent);
        let storage_class = if builder.support() > 0.5 {
            StorageClass::Direct
        } else {
            info.storage_class
        };
        let output = RasterInfo {
            width: target.0,
            height: target.1,
            storage_class,
            ..info
        };
        let mode = if info.colorspace == Colorspace::Cmyk {
            IndexMode::Black
        } else if info.storage_class == StorageClass::Pseudo
            && storage_class == StorageClass::Pseudo
        {
            IndexMode::Palette
        } else {
            IndexMode::None
        };
        let context = Self {
            source,
            builder,
            blend: Blend::new(&info, config, mode),
            mode,
        };
        (context, output)
    }

    fn scratch(&self, progress: &Progress) -> Option<LineScratch> {
        match self.builder.buffer() {
            Ok(contributions) => Some(LineScratch {
                contributions,
                span: PixelSpan::new(),
            }),
            Err(e) => {
                progress.fail(e);
                None
            }
        }
    }
}

type Planes = (Vec<PixelPacket>, Option<Vec<u16>>);

/// Run `line` for each of `lines` destination lines of `line_len` pixels,
/// in parallel, into freshly allocated line-major planes.
fn run_lines<S, L>(
    context: &PassContext<'_, S>,
    lines: usize,
    line_len: usize,
    progress: &Progress,
    line: L,
) -> Result<Planes, ResizeError>
where
    S: PixelSource + ?Sized,
    L: Fn(&mut LineScratch, usize, &mut [PixelPacket], Option<&mut [u16]>) -> Result<(), ResizeError>
        + Sync,
{
    let len = lines.saturating_mul(line_len);
    let mut pixels = try_filled(len, PixelPacket::default(), "resize pixels")?;
    let mut indexes = if context.mode == IndexMode::None {
        None
    } else {
        Some(try_filled(len, 0u16, "resize indexes")?)
    };

    let init = || context.scratch(progress);
    let body = |scratch: &mut Option<LineScratch>,
                d: usize,
                out: &mut [PixelPacket],
                out_indexes: Option<&mut [u16]>| {
        if !progress.is_running() {
            return;
        }
        let Some(scratch) = scratch.as_mut() else {
            return;
        };
        match line(scratch, d, out, out_indexes) {
            Ok(()) => progress.line_done(),
            Err(e) => progress.fail(e),
        }
    };

    match indexes.as_mut() {
        Some(idx) => pixels
            .par_chunks_mut(line_len)
            .zip(idx.par_chunks_mut(line_len))
            .enumerate()
            .for_each_init(init, |scratch, (d, (out, out_indexes))| {
                body(scratch, d, out, Some(out_indexes))
            }),
        None => pixels
            .par_chunks_mut(line_len)
            .enumerate()
            .for_each_init(init, |scratch, (d, out)| body(scratch, d, out, None)),
    }

    progress.status()?;
    Ok((pixels, indexes))
}

/// Column-major `width x height` plane to row-major.
fn transpose<T>(columns: &[T], width: usize, height: usize, what: &'static str) -> Result<Vec<T>, ResizeError>
where
    T: Copy + Default + Send + Sync,
{
    let mut rows = try_filled(width.saturating_mul(height), T::default(), what)?;
    rows.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, p) in row.iter_mut().enumerate() {
            *p = columns[x * height + y];
        }
    });
    Ok(rows)
}

#[inline]
fn sample_at(span: &PixelSpan, k: usize) -> (PixelPacket, u16) {
    (
        span.pixels()[k],
        span.indexes().get(k).copied().unwrap_or(0),
    )
}

// ============================================================================
// Passes
// ============================================================================

/// Resize `source` to `columns` wide, keeping its height.
pub fn horizontal_filter<S: PixelSource + ?Sized>(
    filter: &ResizeFilter,
    source: &S,
    columns: usize,
    config: &ResizeConfig,
    progress: &Progress,
) -> Result<Raster, ResizeError> {
    let info = source.info();
    let rows = info.height;
    let factor = columns as f64 / info.width as f64;
    let (context, output) =
        PassContext::new(source, filter, factor, info.width, config, (columns, rows));
    trace!(
        "horizontal pass {}x{} -> {}x{}: support {}",
        info.width,
        rows,
        columns,
        rows,
        context.builder.support()
    );

    let line = |scratch: &mut LineScratch,
                x: usize,
                out: &mut [PixelPacket],
                out_indexes: Option<&mut [u16]>|
     -> Result<(), ResizeError> {
        let window = context.builder.build(x, &mut scratch.contributions);
        let n = window.len();
        context
            .source
            .read_span(window.start as isize, 0, n, rows, &mut scratch.span)?;
        let span = &scratch.span;
        let contributions = scratch.contributions.as_slice();
        let nearest = window.nearest();
        let mut out_indexes = out_indexes;
        for (y, p) in out.iter_mut().enumerate() {
            let base = y * n;
            let (pixel, black) = context
                .blend
                .blend(contributions, |j| sample_at(span, base + j));
            *p = pixel;
            if let Some(idx) = out_indexes.as_deref_mut() {
                idx[y] = match context.mode {
                    IndexMode::Black => black,
                    _ => sample_at(span, base + nearest).1,
                };
            }
        }
        Ok(())
    };

    let (pixels, indexes) = run_lines(&context, columns, rows, progress, line)?;
    let pixels = transpose(&pixels, columns, rows, "resize pixels")?;
    let indexes = match indexes {
        Some(i) => Some(transpose(&i, columns, rows, "resize indexes")?),
        None => None,
    };
    Ok(Raster::from_parts(output, pixels, indexes))
}

/// Resize `source` to `rows` high, keeping its width.
pub fn vertical_filter<S: PixelSource + ?Sized>(
    filter: &ResizeFilter,
    source: &S,
    rows: usize,
    config: &ResizeConfig,
    progress: &Progress,
) -> Result<Raster, ResizeError> {
    let info = source.info();
    let columns = info.width;
    let factor = rows as f64 / info.height as f64;
    let (context, output) =
        PassContext::new(source, filter, factor, info.height, config, (columns, rows));
    trace!(
        "vertical pass {}x{} -> {}x{}: support {}",
        columns,
        info.height,
        columns,
        rows,
        context.builder.support()
    );

    let line = |scratch: &mut LineScratch,
                y: usize,
                out: &mut [PixelPacket],
                out_indexes: Option<&mut [u16]>|
     -> Result<(), ResizeError> {
        let window = context.builder.build(y, &mut scratch.contributions);
        let n = window.len();
        context
            .source
            .read_span(0, window.start as isize, columns, n, &mut scratch.span)?;
        let span = &scratch.span;
        let contributions = scratch.contributions.as_slice();
        let nearest = window.nearest() * columns;
        let mut out_indexes = out_indexes;
        for (x, p) in out.iter_mut().enumerate() {
            let (pixel, black) = context
                .blend
                .blend(contributions, |j| sample_at(span, j * columns + x));
            *p = pixel;
            if let Some(idx) = out_indexes.as_deref_mut() {
                idx[x] = match context.mode {
                    IndexMode::Black => black,
                    _ => sample_at(span, nearest + x).1,
                };
            }
        }
        Ok(())
    };

    let (pixels, indexes) = run_lines(&context, rows, columns, progress, line)?;
    Ok(Raster::from_parts(output, pixels, indexes))
}

// ============================================================================
// Tests
// ============================================================================
