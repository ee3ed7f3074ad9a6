//! Reshape an image so its rows follow a caption.
//!
//! A base image is paired with a reference string that describes it top to
//! bottom: with a reference of `n` characters, each character stands for
//! `height / n` rows. Morphing to a target string aligns the target against
//! the reference (longest common substring first, then recursively on either
//! side) and stacks the row bands of every aligned piece in target order.

pub mod decompose;
pub mod find;
pub mod rows;
pub mod splice;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use decompose::{decompose, NoMatchPolicy};
pub use find::{find_longest_common_substring, IndexRange};
pub use rows::{map_row, RowMapper};
pub use splice::splice;

use image::{DynamicImage, ImageBuffer, Pixel};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum MorphError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No common substring between the reference and {fragment:?}")]
    NoMatch { fragment: String },
    /// Indicates a bug in range decomposition, never bad input.
    #[error("Range {start}..{end} falls outside a reference of length {len}")]
    OutOfRangeIndex { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, MorphError>;

/// Image buffer with any pixel layout and channel type.
pub type PixelBuffer<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Morph `image` with the default [`NoMatchPolicy`].
pub fn morph<P: Pixel>(image: &PixelBuffer<P>, reference: &str, target: &str) -> Result<PixelBuffer<P>> {
    morph_with(image, reference, target, NoMatchPolicy::default())
}

/// Morph `image`, described by `reference`, so its rows follow `target`.
pub fn morph_with<P: Pixel>(
    image: &PixelBuffer<P>,
    reference: &str,
    target: &str,
    policy: NoMatchPolicy,
) -> Result<PixelBuffer<P>> {
    let ranges = decompose(reference.as_bytes(), target.as_bytes(), policy)?;
    debug!(ranges = ranges.len(), target, "decomposed target");
    splice(image, reference.len(), &ranges)
}

/// Morph a decoded image, keeping its pixel format.
pub fn morph_dynamic(
    image: &DynamicImage,
    reference: &str,
    target: &str,
    policy: NoMatchPolicy,
) -> Result<DynamicImage> {
    let out = match image {
        DynamicImage::ImageLuma8(buf) => {
            DynamicImage::ImageLuma8(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageLumaA8(buf) => {
            DynamicImage::ImageLumaA8(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageRgb8(buf) => {
            DynamicImage::ImageRgb8(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageRgba8(buf) => {
            DynamicImage::ImageRgba8(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageLuma16(buf) => {
            DynamicImage::ImageLuma16(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageLumaA16(buf) => {
            DynamicImage::ImageLumaA16(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageRgb16(buf) => {
            DynamicImage::ImageRgb16(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageRgba16(buf) => {
            DynamicImage::ImageRgba16(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageRgb32F(buf) => {
            DynamicImage::ImageRgb32F(morph_with(buf, reference, target, policy)?)
        }
        DynamicImage::ImageRgba32F(buf) => {
            DynamicImage::ImageRgba32F(morph_with(buf, reference, target, policy)?)
        }
        other => DynamicImage::ImageRgba8(morph_with(&other.to_rgba8(), reference, target, policy)?),
    };
    Ok(out)
}

/// Base image plus the reference string that describes it
pub struct Morpher<P: Pixel> {
    image: PixelBuffer<P>,
    reference: String,
    on_no_match: NoMatchPolicy,
}

impl<P: Pixel> Morpher<P> {
    pub fn new(image: PixelBuffer<P>, reference: impl Into<String>) -> Self {
        Self { image, reference: reference.into(), on_no_match: NoMatchPolicy::default() }
    }

    pub fn with_no_match(mut self, policy: NoMatchPolicy) -> Self {
        self.on_no_match = policy;
        self
    }

    pub fn set_no_match(&mut self, policy: NoMatchPolicy) {
        self.on_no_match = policy;
    }

    pub fn image(&self) -> &PixelBuffer<P> {
        &self.image
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Reference ranges whose rows make up the morph of `target`.
    pub fn ranges(&self, target: &str) -> Result<Vec<IndexRange>> {
        decompose(self.reference.as_bytes(), target.as_bytes(), self.on_no_match)
    }

    pub fn morph(&self, target: &str) -> Result<PixelBuffer<P>> {
        morph_with(&self.image, &self.reference, target, self.on_no_match)
    }
}
