use std::ops::Range;

pub use algo::{Path, RectScan};
pub use engine::{align_kbest, AlignmentResult, Engine, KBestScan, Status};
pub use ledger::UsedCells;
pub use storage::{Candidate, KBest, Storage};

pub mod algo;
pub mod engine;
pub mod ledger;
pub mod storage;
pub mod trace;

/// A rectangular region of the alignment matrix with inclusive bounds.
/// Rows index the first sequence, columns index the second one.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Rect {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Rect {
    /// A rectangle covering a single cell.
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            top: row,
            bottom: row,
            left: col,
            right: col,
        }
    }

    /// A rectangle covering the given half-open sequence ranges. Both must be non-empty.
    pub fn span(seq1: Range<usize>, seq2: Range<usize>) -> Self {
        debug_assert!(!seq1.is_empty() && !seq2.is_empty());
        Self {
            top: seq1.start,
            bottom: seq1.end - 1,
            left: seq2.start,
            right: seq2.end - 1,
        }
    }

    /// Grow the rectangle to include the given cell.
    pub fn widen(&mut self, row: usize, col: usize) {
        self.top = self.top.min(row);
        self.bottom = self.bottom.max(row);
        self.left = self.left.min(col);
        self.right = self.right.max(col);
    }

    /// Grow the rectangle to include another rectangle.
    pub fn union(&mut self, other: &Rect) {
        self.top = self.top.min(other.top);
        self.bottom = self.bottom.max(other.bottom);
        self.left = self.left.min(other.left);
        self.right = self.right.max(other.right);
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.top <= other.bottom
            && other.top <= self.bottom
            && self.left <= other.right
            && other.left <= self.right
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect() {
        let mut rect = Rect::cell(2, 3);
        assert_eq!((rect.width(), rect.height()), (1, 1));

        rect.widen(0, 5);
        assert_eq!(
            rect,
            Rect {
                top: 0,
                bottom: 2,
                left: 3,
                right: 5
            }
        );

        rect.union(&Rect::cell(4, 1));
        assert_eq!(
            rect,
            Rect {
                top: 0,
                bottom: 4,
                left: 1,
                right: 5
            }
        );

        assert_eq!(rect, Rect::span(0..5, 1..6));
    }

    #[test]
    fn test_rect_intersects() {
        let rect = Rect::span(2..5, 2..5);

        assert!(rect.intersects(&rect));
        assert!(rect.intersects(&Rect::cell(4, 4)));
        assert!(rect.intersects(&Rect::span(4..10, 0..3)));

        assert!(!rect.intersects(&Rect::cell(1, 1)));
        assert!(!rect.intersects(&Rect::span(5..10, 2..5)));
        assert!(!rect.intersects(&Rect::span(2..5, 5..6)));
    }
}
