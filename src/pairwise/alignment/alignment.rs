use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, From, Into};

use crate::num::Score;

use super::step::Step;

/// A local alignment between two sequences.
///
/// Coordinates are 0-based half-open ranges over the original sequences.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Constructor, Dissolve, From, Into)]
pub struct Alignment<S: Score> {
    score: S,
    steps: Vec<Step<u32>>,
    seq1: Range<usize>,
    seq2: Range<usize>,
}

impl<S: Score> Alignment<S> {
    /// Checks if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        // Empty alignment is an alignment with no steps.
        // Note: length of each step is guaranteed to be non-zero.
        self.steps.is_empty()
    }

    /// Returns the total length of the alignment - the sum of all step lengths.
    pub fn len(&self) -> usize {
        self.steps.iter().map(|x| *x.len() as usize).sum()
    }

    /// Returns the RLE representation of the alignment.
    pub fn rle(&self) -> String {
        Step::rle_string(self.steps.iter())
    }

    /// Returns 1-based inclusive endpoints `((seq1_start, seq1_end), (seq2_start, seq2_end))`.
    pub fn endpoints_1based(&self) -> ((usize, usize), (usize, usize)) {
        (
            (self.seq1.start + 1, self.seq1.end),
            (self.seq2.start + 1, self.seq2.end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::Op;

    #[test]
    fn test_alignment_accessors() {
        let steps = vec![
            Step::new(Op::Match, 3u32).unwrap(),
            Step::new(Op::GapFirst, 2).unwrap(),
            Step::new(Op::Match, 1).unwrap(),
        ];
        let alignment = Alignment::new(10i64, steps, 4..10, 7..11);

        assert!(!alignment.is_empty());
        assert_eq!(alignment.len(), 6);
        assert_eq!(alignment.rle(), "3=2v1=");
        assert_eq!(alignment.endpoints_1based(), ((5, 10), (8, 11)));
    }
}
