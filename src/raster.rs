//! In-memory raster and pixel span access.
//!
//! [`Raster`] stores row-major [`PixelPacket`]s plus an optional parallel
//! index channel (palette index for pseudo-class images, black plate for
//! CMYK). [`PixelSource`] is the read side the resize passes consume: it
//! copies rectangular spans into a caller-owned [`PixelSpan`], clamping
//! out-of-range coordinates to the nearest edge pixel.

use crate::error::ResizeError;

// ============================================================================
// Pixel and metadata types
// ============================================================================

/// One pixel. For CMYK rasters `red`, `green` and `blue` carry cyan,
/// magenta and yellow. `alpha` is opacity: `max` is fully opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelPacket {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub alpha: u16,
}

impl PixelPacket {
    pub const fn new(red: u16, green: u16, blue: u16, alpha: u16) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn gray(value: u16, alpha: u16) -> Self {
        Self::new(value, value, value, alpha)
    }
}

/// Channel depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    Eight,
    Sixteen,
}

impl Depth {
    /// Largest channel value.
    #[inline]
    pub fn max(self) -> u16 {
        match self {
            Depth::Eight => u8::MAX as u16,
            Depth::Sixteen => u16::MAX,
        }
    }
}

/// Whether pixels are free colors or palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    Direct,
    Pseudo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colorspace {
    Rgb,
    Cmyk,
}

/// Raster metadata the resize engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterInfo {
    pub width: usize,
    pub height: usize,
    pub depth: Depth,
    pub has_alpha: bool,
    pub storage_class: StorageClass,
    pub colorspace: Colorspace,
}

impl RasterInfo {
    /// True when pixels carry an index channel.
    #[inline]
    pub fn has_indexes(&self) -> bool {
        self.storage_class == StorageClass::Pseudo || self.colorspace == Colorspace::Cmyk
    }
}

// ============================================================================
// Allocation helpers
// ============================================================================

/// Allocate a zero-filled buffer, reporting failure instead of aborting.
pub(crate) fn try_filled<T: Copy>(
    len: usize,
    value: T,
    what: &'static str,
) -> Result<Vec<T>, ResizeError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| ResizeError::Allocation {
            what,
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    v.resize(len, value);
    Ok(v)
}

// ============================================================================
// PixelSpan
// ============================================================================

/// Row-major copy of a rectangular region.
#[derive(Debug, Clone, Default)]
pub struct PixelSpan {
    width: usize,
    height: usize,
    pixels: Vec<PixelPacket>,
    indexes: Vec<u16>,
}

impl PixelSpan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[PixelPacket] {
        &self.pixels
    }

    /// Index channel; empty when the source has none.
    #[inline]
    pub fn indexes(&self) -> &[u16] {
        &self.indexes
    }

    /// Clear and size the span for `width * height` pixels, keeping the
    /// allocation when it is large enough.
    pub fn reset(&mut self, width: usize, height: usize, indexes: bool) -> Result<(), ResizeError> {
        let len = width.saturating_mul(height);
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.indexes.clear();
        self.pixels
            .try_reserve(len)
            .map_err(|_| ResizeError::Allocation {
                what: "pixel span",
                bytes: len.saturating_mul(std::mem::size_of::<PixelPacket>()),
            })?;
        if indexes {
            self.indexes
                .try_reserve(len)
                .map_err(|_| ResizeError::Allocation {
                    what: "pixel span indexes",
                    bytes: len.saturating_mul(2),
                })?;
        }
        Ok(())
    }

    /// Append one row segment.
    pub fn extend_row(&mut self, pixels: &[PixelPacket], indexes: &[u16]) {
        self.pixels.extend_from_slice(pixels);
        self.indexes.extend_from_slice(indexes);
    }

    pub fn into_parts(self) -> (Vec<PixelPacket>, Vec<u16>) {
        (self.pixels, self.indexes)
    }

    pub fn push(&mut self, pixel: PixelPacket, index: Option<u16>) {
        self.pixels.push(pixel);
        if let Some(i) = index {
            self.indexes.push(i);
        }
    }
}

// ============================================================================
// PixelSource
// ============================================================================

/// Read access to a raster, shared by all workers of a pass.
pub trait PixelSource: Sync {
    fn info(&self) -> RasterInfo;

    /// Copy the `width x height` region at `(x, y)` into `span`.
    ///
    /// Coordinates outside the raster address its nearest edge pixel.
    fn read_span(
        &self,
        x: isize,
        y: isize,
        width: usize,
        height: usize,
        span: &mut PixelSpan,
    ) -> Result<(), ResizeError>;
}

// ============================================================================
// Raster
// ============================================================================

/// Owned row-major raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    info: RasterInfo,
    pixels: Vec<PixelPacket>,
    indexes: Option<Vec<u16>>,
}

impl Raster {
    /// Opaque black direct-class RGB raster without alpha.
    pub fn new(width: usize, height: usize, depth: Depth) -> Result<Self, ResizeError> {
        if width == 0 || height == 0 {
            return Err(ResizeError::InvalidDimensions { width, height });
        }
        let pixels = try_filled(
            width.saturating_mul(height),
            PixelPacket::gray(0, depth.max()),
            "raster pixels",
        )?;
        Ok(Self {
            info: RasterInfo {
                width,
                height,
                depth,
                has_alpha: false,
                storage_class: StorageClass::Direct,
                colorspace: Colorspace::Rgb,
            },
            pixels,
            indexes: None,
        })
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, depth: Depth, mut f: F) -> Result<Self, ResizeError>
    where
        F: FnMut(usize, usize) -> PixelPacket,
    {
        let mut raster = Self::new(width, height, depth)?;
        for (i, p) in raster.pixels.iter_mut().enumerate() {
            *p = f(i % width, i / width);
        }
        Ok(raster)
    }

    /// Assemble a raster from parts produced by a pass.
    pub(crate) fn from_parts(
        info: RasterInfo,
        pixels: Vec<PixelPacket>,
        indexes: Option<Vec<u16>>,
    ) -> Self {
        debug_assert_eq!(pixels.len(), info.width * info.height);
        debug_assert!(indexes
            .as_ref()
            .map_or(true, |i| i.len() == pixels.len()));
        Self {
            info,
            pixels,
            indexes,
        }
    }

    /// Enable or disable the alpha channel.
    pub fn with_alpha(mut self, has_alpha: bool) -> Self {
        self.info.has_alpha = has_alpha;
        self
    }

    /// Switch to CMYK with the given black plate, one value per pixel.
    pub fn with_cmyk(mut self, black: Vec<u16>) -> Result<Self, ResizeError> {
        self.check_channel("black plate", black.len())?;
        self.info.colorspace = Colorspace::Cmyk;
        self.indexes = Some(black);
        Ok(self)
    }

    /// Mark as pseudo-class with per-pixel palette indexes. Pixel colors
    /// must already hold the palette colors.
    pub fn with_palette_indexes(mut self, indexes: Vec<u16>) -> Result<Self, ResizeError> {
        self.check_channel("palette indexes", indexes.len())?;
        self.info.storage_class = StorageClass::Pseudo;
        self.indexes = Some(indexes);
        Ok(self)
    }

    fn check_channel(&self, what: &'static str, len: usize) -> Result<(), ResizeError> {
        if len != self.pixels.len() {
            return Err(ResizeError::ChannelLength {
                what,
                expected: self.pixels.len(),
                actual: len,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.info.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.info.height
    }

    pub fn depth(&self) -> Depth {
        self.info.depth
    }

    pub fn has_alpha(&self) -> bool {
        self.info.has_alpha
    }

    pub fn storage_class(&self) -> StorageClass {
        self.info.storage_class
    }

    pub fn colorspace(&self) -> Colorspace {
        self.info.colorspace
    }

    #[inline]
    pub fn pixels(&self) -> &[PixelPacket] {
        &self.pixels
    }

    pub fn indexes(&self) -> Option<&[u16]> {
        self.indexes.as_deref()
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[PixelPacket] {
        let w = self.info.width;
        &self.pixels[y * w..(y + 1) * w]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> PixelPacket {
        self.pixels[y * self.info.width + x]
    }

    pub fn index(&self, x: usize, y: usize) -> Option<u16> {
        self.indexes
            .as_ref()
            .map(|i| i[y * self.info.width + x])
    }

    #[inline]
    fn clamp_x(&self, x: isize) -> usize {
        x.clamp(0, self.info.width as isize - 1) as usize
    }

    #[inline]
    fn clamp_y(&self, y: isize) -> usize {
        y.clamp(0, self.info.height as isize - 1) as usize
    }
}

impl PixelSource for Raster {
    fn info(&self) -> RasterInfo {
        self.info
    }

    fn read_span(
        &self,
        x: isize,
        y: isize,
        width: usize,
        height: usize,
        span: &mut PixelSpan,
    ) -> Result<(), ResizeError> {
        span.reset(width, height, self.indexes.is_some())?;
        let w = self.info.width;
        let inside_x = x >= 0 && x as usize + width <= w;
        for row in 0..height {
            let sy = self.clamp_y(y + row as isize);
            let base = sy * w;
            if inside_x {
                let from = base + x as usize;
                let to = from + width;
                let indexes = self.indexes.as_ref().map_or(&[][..], |i| &i[from..to]);
                span.extend_row(&self.pixels[from..to], indexes);
            } else {
                for col in 0..width {
                    let offset = base + self.clamp_x(x + col as isize);
                    span.push(
                        self.pixels[offset],
                        self.indexes.as_ref().map(|i| i[offset]),
                    );
                }
            }
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

    fn ramp(width: usize, height: usize) -> Raster {
        Raster::from_fn(width, height, Depth::Eight, |x, y| {
            PixelPacket::gray((y * 10 + x) as u16, 255)
        })
        .unwrap()
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            Raster::new(0, 3, Depth::Eight),
            Err(ResizeError::InvalidDimensions { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_defaults() {
        let r = Raster::new(2, 3, Depth::Sixteen).unwrap();
        assert_eq!(r.width(), 2);
        assert_eq!(r.height(), 3);
        assert_eq!(r.pixels().len(), 6);
        assert_eq!(r.pixel(1, 2), PixelPacket::gray(0, 65535));
        assert!(!r.has_alpha());
        assert_eq!(r.storage_class(), StorageClass::Direct);
        assert_eq!(r.colorspace(), Colorspace::Rgb);
        assert_eq!(r.indexes(), None);
        assert!(!r.info().has_indexes());
    }

    #[test]
    fn test_from_fn_row_major() {
        let r = ramp(3, 2);
        assert_eq!(r.pixel(2, 1).red, 12);
        assert_eq!(r.row(1)[0].red, 10);
    }

    #[test]
    fn test_read_span_inside() {
        let r = ramp(4, 4);
        let mut span = PixelSpan::new();
        r.read_span(1, 2, 2, 2, &mut span).unwrap();
        let reds: Vec<u16> = span.pixels().iter().map(|p| p.red).collect();
        assert_eq!(reds, vec![21, 22, 31, 32]);
        assert_eq!(span.width(), 2);
        assert_eq!(span.height(), 2);
        assert!(span.indexes().is_empty());
    }

    #[test]
    fn test_read_span_clamps_edges() {
        let r = ramp(3, 2);
        let mut span = PixelSpan::new();
        r.read_span(-2, -1, 6, 1, &mut span).unwrap();
        let reds: Vec<u16> = span.pixels().iter().map(|p| p.red).collect();
        assert_eq!(reds, vec![0, 0, 0, 1, 2, 2]);

        r.read_span(2, 1, 1, 3, &mut span).unwrap();
        let reds: Vec<u16> = span.pixels().iter().map(|p| p.red).collect();
        assert_eq!(reds, vec![12, 12, 12]);
    }

    #[test]
    fn test_read_span_reuses_buffer() {
        let r = ramp(4, 4);
        let mut span = PixelSpan::new();
        r.read_span(0, 0, 4, 4, &mut span).unwrap();
        r.read_span(0, 3, 1, 1, &mut span).unwrap();
        assert_eq!(span.pixels().len(), 1);
        assert_eq!(span.pixels()[0].red, 30);
    }

    #[test]
    fn test_read_span_indexes() {
        let r = ramp(2, 2).with_palette_indexes(vec![5, 6, 7, 8]).unwrap();
        assert_eq!(r.storage_class(), StorageClass::Pseudo);
        assert_eq!(r.index(1, 1), Some(8));
        let mut span = PixelSpan::new();
        r.read_span(1, -1, 2, 2, &mut span).unwrap();
        assert_eq!(span.indexes(), &[6, 6, 6, 6]);
        r.read_span(0, 1, 2, 1, &mut span).unwrap();
        assert_eq!(span.indexes(), &[7, 8]);
    }

    #[test]
    fn test_cmyk() {
        let r = ramp(2, 1).with_cmyk(vec![1, 2]).unwrap();
        assert_eq!(r.colorspace(), Colorspace::Cmyk);
        assert!(r.info().has_indexes());
        assert_eq!(r.index(0, 0), Some(1));
    }

    #[test]
    fn test_channel_length_mismatch() {
        assert!(matches!(
            ramp(2, 2).with_palette_indexes(vec![0; 3]),
            Err(ResizeError::ChannelLength {
                what: "palette indexes",
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            ramp(2, 1).with_cmyk(Vec::new()),
            Err(ResizeError::ChannelLength { expected: 2, actual: 0, .. })
        ));
    }

    #[test]
    fn test_depth_max() {
        assert_eq!(Depth::Eight.max(), 255);
        assert_eq!(Depth::Sixteen.max(), 65535);
    }
}
