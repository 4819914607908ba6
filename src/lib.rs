//! # filtered-resize
//!
//! Separable filtered raster resampling: a library of continuous filter
//! kernels, a construction protocol that composes a weighting kernel with a
//! windowing kernel, normalized contribution lists, and a parallel two-pass
//! convolution that handles alpha without color bleeding.
//!
//! ## Pipeline
//!
//! 1. **Filter**: a [`filter::FilterType`] plus optional overrides
//!    resolves into an immutable [`filter::ResizeFilter`]
//! 2. **Contributions**: for each destination coordinate, the source
//!    pixels under the filter footprint and their normalized weights
//! 3. **Passes**: horizontal and vertical 1-D convolutions, each line an
//!    independent unit of work on the rayon pool
//! 4. **Orchestrator**: picks the filter and pass order, reports progress
//!
//! ```no_run
//! use filtered_resize::filter::FilterType;
//! use filtered_resize::raster::{Depth, PixelPacket, Raster};
//!
//! let src = Raster::from_fn(64, 64, Depth::Eight, |x, y| {
//!     PixelPacket::gray(((x ^ y) & 0xff) as u16, 255)
//! })?;
//! let small = filtered_resize::resize(&src, 20, 20, Some(FilterType::Lanczos), 1.0)?;
//! assert_eq!(small.width(), 20);
//! # Ok::<(), filtered_resize::ResizeError>(())
//! ```

// Foundation: constants & special functions
pub mod basics;
pub mod math;

// Filters
pub mod filter;
pub mod kernels;
pub mod options;

// Raster access & scheduling
pub mod contribution;
pub mod progress;
pub mod raster;

// Resize
pub mod error;
pub mod resize;
pub mod resize_pass;

pub use error::{OptionError, ResizeError};
pub use filter::{build_filter, filter_support, filter_weight, FilterType, ResizeFilter};
pub use resize::{resize, resize_from, resize_with, ResizeConfig, ResizeOptions};
