//! Proportional mapping from reference-string positions to image rows.

use crate::IndexRange;
use std::ops::Range;

/// Row of an image of `image_height` rows that corresponds to character
/// `index` of a reference string of `reference_len` characters.
///
/// Uses floor division, so adjacent ranges may gain or lose a row at their
/// shared boundary when the reference length does not divide the height.
pub fn map_row(reference_len: usize, image_height: u32, index: usize) -> u32 {
    if reference_len == 0 {
        return 0;
    }
    (u64::from(image_height) * index as u64 / reference_len as u64) as u32
}

/// Maps character ranges of one reference string onto rows of one image.
#[derive(Debug, Clone, Copy)]
pub struct RowMapper {
    reference_len: usize,
    height: u32,
}

impl RowMapper {
    pub fn new(reference_len: usize, height: u32) -> Self {
        Self { reference_len, height }
    }

    pub fn reference_len(&self) -> usize {
        self.reference_len
    }

    pub fn row(&self, index: usize) -> u32 {
        map_row(self.reference_len, self.height, index)
    }

    pub fn rows(&self, range: IndexRange) -> Range<u32> {
        self.row(range.start)..self.row(range.end)
    }
}
