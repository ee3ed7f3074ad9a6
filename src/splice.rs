//! Vertical concatenation of the base image's row bands.

use crate::rows::RowMapper;
use crate::{IndexRange, MorphError, PixelBuffer, Result};
use image::Pixel;
use tracing::{debug, trace};

/// Stack the row band of `image` behind each range, top to bottom.
///
/// Ranges index into a reference string of `reference_len` characters. The
/// output keeps the width and pixel layout of `image`; its height is the sum
/// of the mapped row spans.
pub fn splice<P: Pixel>(
    image: &PixelBuffer<P>,
    reference_len: usize,
    ranges: &[IndexRange],
) -> Result<PixelBuffer<P>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        debug!(width, height, "degenerate base image");
    }

    let mapper = RowMapper::new(reference_len, height);
    let stride = width as usize * usize::from(P::CHANNEL_COUNT);
    let raw = image.as_raw();

    let mut out_height = 0u32;
    let mut samples = Vec::new();
    for &range in ranges {
        if range.start > range.end || range.end > reference_len {
            return Err(MorphError::OutOfRangeIndex {
                start: range.start,
                end: range.end,
                len: reference_len,
            });
        }
        let rows = mapper.rows(range);
        trace!(?range, ?rows, "splicing band");
        samples.extend_from_slice(&raw[rows.start as usize * stride..rows.end as usize * stride]);
        out_height += rows.end - rows.start;
    }

    PixelBuffer::<P>::from_raw(width, out_height, samples).ok_or_else(|| {
        MorphError::OutOfRangeIndex { start: 0, end: out_height as usize, len: height as usize }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    /// One-column image whose row `y` holds the value `y`.
    fn ramp(height: u32) -> GrayImage {
        GrayImage::from_fn(1, height, |_, y| Luma([y as u8]))
    }

    fn column(image: &GrayImage) -> Vec<u8> {
        image.as_raw().clone()
    }

    #[test]
    fn full_range_copies_image() {
        let image = ramp(8);
        let out = splice(&image, 4, &[IndexRange::new(0, 4)]).unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn no_ranges_gives_empty_image() {
        let image = GrayImage::from_pixel(3, 8, Luma([7]));
        let out = splice(&image, 4, &[]).unwrap();
        assert_eq!(out.dimensions(), (3, 0));
    }

    #[test]
    fn bands_are_stacked_in_order() {
        let image = ramp(8);
        let out = splice(&image, 4, &[IndexRange::new(3, 4), IndexRange::new(0, 1)]).unwrap();
        assert_eq!(column(&out), vec![6, 7, 0, 1]);
    }

    #[test]
    fn bands_may_repeat() {
        let image = ramp(4);
        let out = splice(&image, 2, &[IndexRange::new(0, 1), IndexRange::new(0, 1)]).unwrap();
        assert_eq!(column(&out), vec![0, 1, 0, 1]);
    }

    #[test]
    fn zero_height_image_yields_zero_height() {
        let image = GrayImage::new(5, 0);
        let out = splice(&image, 3, &[IndexRange::new(0, 3)]).unwrap();
        assert_eq!(out.dimensions(), (5, 0));
    }

    #[test]
    fn zero_width_image_keeps_row_count() {
        let image = GrayImage::new(0, 6);
        let out = splice(&image, 3, &[IndexRange::new(0, 2)]).unwrap();
        assert_eq!(out.dimensions(), (0, 4));
    }

    #[test]
    fn range_past_reference_is_rejected() {
        let image = ramp(4);
        let err = splice(&image, 2, &[IndexRange { start: 1, end: 3 }]).unwrap_err();
        assert!(matches!(err, MorphError::OutOfRangeIndex { start: 1, end: 3, len: 2 }));
    }
}
