//! Contribution lists: which source pixels feed one destination sample,
//! and with what weight.

use crate::basics::{itrunc, perceptible_reciprocal, EPSILON};
use crate::error::ResizeError;
use crate::filter::ResizeFilter;

/// One source sample and its normalized weight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contribution {
    /// Absolute index along the source line.
    pub pixel: usize,
    pub weight: f64,
}

/// Per-worker contribution scratch, sized once for a pass.
#[derive(Debug)]
pub struct ContributionBuffer {
    items: Vec<Contribution>,
}

impl ContributionBuffer {
    /// Room for every contribution a support radius can produce on a line
    /// of `extent` source pixels: `2 * ceil(support) + 3`, never more than
    /// `extent + 1`.
    pub fn for_support(support: f64, extent: usize) -> Result<Self, ResizeError> {
        let capacity = ((2.0 * support.max(0.5).ceil() + 3.0) as usize).min(extent.saturating_add(1));
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| ResizeError::Allocation {
                what: "contribution buffer",
                bytes: capacity.saturating_mul(std::mem::size_of::<Contribution>()),
            })?;
        Ok(Self { items })
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Contribution] {
        &self.items
    }
}

/// Source range used for one destination coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionWindow {
    pub start: usize,
    pub stop: usize,
    /// Destination sample center mapped into source coordinates.
    pub center: f64,
}

impl ContributionWindow {
    #[inline]
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }

    /// Offset from `start` of the source sample whose area holds the center.
    #[inline]
    pub fn nearest(&self) -> usize {
        let last = (self.stop - 1) as f64;
        let j = itrunc(self.center.max(self.start as f64).min(last)) as usize;
        j - self.start
    }
}

/// Builds contribution lists along one axis of a pass.
///
/// The footprint scale and support are fixed for the whole pass; each call
/// to [`ContributionBuilder::build`] handles one destination coordinate.
#[derive(Debug, Clone, Copy)]
pub struct ContributionBuilder<'a> {
    filter: &'a ResizeFilter,
    factor: f64,
    extent: usize,
    scale: f64,
    support: f64,
}

impl<'a> ContributionBuilder<'a> {
    /// `factor` is destination extent over source extent.
    pub fn new(filter: &'a ResizeFilter, factor: f64, source_extent: usize) -> Self {
        // Minifying widens the footprint so each sample integrates its
        // whole source area.
        let mut scale = (1.0 / factor + EPSILON).max(1.0);
        let mut support = scale * filter.effective_support();
        if support < 0.5 {
            // Point sampling: exactly one source pixel.
            support = 0.5;
            scale = 1.0;
        }
        Self {
            filter,
            factor,
            extent: source_extent,
            scale,
            support,
        }
    }

    /// Support radius in source pixels for this pass.
    #[inline]
    pub fn support(&self) -> f64 {
        self.support
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// A buffer large enough for any window of this pass.
    pub fn buffer(&self) -> Result<ContributionBuffer, ResizeError> {
        ContributionBuffer::for_support(self.support, self.extent)
    }

    /// Fill `buffer` with the normalized contributions for destination
    /// coordinate `d`.
    pub fn build(&self, d: usize, buffer: &mut ContributionBuffer) -> ContributionWindow {
        let center = (d as f64 + 0.5) / self.factor + EPSILON;
        let start = itrunc((center - self.support + 0.5).max(0.0)) as usize;
        let stop = itrunc((center + self.support + 0.5).min(self.extent as f64)) as usize;
        debug_assert!(start < stop, "empty contribution window at {d}");

        let items = &mut buffer.items;
        items.clear();
        let mut density = 0.0;
        for pixel in start..stop {
            let weight = self
                .filter
                .weight((pixel as f64 - center + 0.5) / self.scale);
            density += weight;
            items.push(Contribution { pixel, weight });
        }
        debug_assert!(items.len() <= items.capacity());

        if density != 0.0 && density != 1.0 {
            let density = perceptible_reciprocal(density);
            for c in items.iter_mut() {
                c.weight *= density;
            }
        }
        ContributionWindow {
            start,
            stop,
            center,
        }
    }
}
