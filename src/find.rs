//! Longest common substring search over byte strings.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open range `[start, end)` of character positions in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for IndexRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Find the longest run of characters common to `a` and `b`.
///
/// The returned range indexes into `a`. Ties go to the match ending earliest
/// in `a`, then earliest in `b`. Returns `None` when the strings share no
/// character, including when either is empty.
pub fn find_longest_common_substring(a: &[u8], b: &[u8]) -> Option<IndexRange> {
    let table = SuffixTable::build(a, b);
    let (i, j) = table.longest_cell()?;
    let len = table.get(i, j);
    Some(IndexRange::new(i + 1 - len, i + 1))
}

/// `cell(i, j)` holds the length of the common suffix of `a[..=i]` and `b[..=j]`.
struct SuffixTable {
    cells: Vec<usize>,
    cols: usize,
}

impl SuffixTable {
    fn build(a: &[u8], b: &[u8]) -> Self {
        let cols = b.len();
        let mut cells = vec![0; a.len() * cols];
        for (i, &ca) in a.iter().enumerate() {
            for (j, &cb) in b.iter().enumerate() {
                if ca != cb {
                    continue;
                }
                cells[i * cols + j] = if i > 0 && j > 0 {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    1
                };
            }
        }
        Self { cells, cols }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    /// Row-major scan with strict `>`, so the first cell to reach the maximum wins.
    fn longest_cell(&self) -> Option<(usize, usize)> {
        if self.cols == 0 {
            return None;
        }
        let mut best: Option<(usize, usize)> = None;
        let mut best_len = 0;
        for (i, row) in self.cells.chunks_exact(self.cols).enumerate() {
            for (j, &len) in row.iter().enumerate() {
                if len > best_len {
                    best_len = len;
                    best = Some((i, j));
                }
            }
        }
        best
    }
}
