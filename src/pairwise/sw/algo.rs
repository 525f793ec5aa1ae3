use crate::num::Score;
use crate::pairwise::scoring;
use crate::Alignable;

use super::ledger::UsedCells;
use super::storage::Storage;
use super::Rect;

// Large negative sentinel that survives a few additions without wrapping around.
pub(crate) fn ninf<S: Score>() -> S {
    let four = S::one() + S::one() + S::one() + S::one();
    S::min_value() / four
}

/// A positive-scoring path threaded through the matrix during the scan.
///
/// The score and the end cell always describe the best prefix of the path seen
/// so far, while the bounding box covers every visited cell.
#[derive(Copy, Clone, Debug)]
pub struct Path<S: Score> {
    pub start: (usize, usize),
    pub end: (usize, usize),
    pub score: S,
    pub bbox: Rect,
}

impl<S: Score> Path<S> {
    pub fn new(row: usize, col: usize, score: S) -> Self {
        Self {
            start: (row, col),
            end: (row, col),
            score,
            bbox: Rect::cell(row, col),
        }
    }

    /// Extend the path into the given cell with the given running score.
    pub fn touch(&mut self, row: usize, col: usize, score: S) {
        self.bbox.widen(row, col);
        if score > self.score {
            self.score = score;
            self.end = (row, col);
        }
    }
}

/// Affine-gap local alignment scan over a rectangular region of the matrix.
///
/// The scan runs row by row with linear memory: one score and one path slot per
/// column for the main and the vertical-gap states. Cells outside the rectangle
/// are treated as empty alignments, and diagonal transitions through cells
/// claimed by the ledger are forbidden. Every positive cell reports its path to
/// the storage.
pub struct RectScan<S: Score> {
    h: Vec<S>,
    hp: Vec<Option<Path<S>>>,
    e: Vec<S>,
    ep: Vec<Option<Path<S>>>,
}

impl<S: Score> RectScan<S> {
    pub fn new() -> Self {
        Self {
            h: Vec::new(),
            hp: Vec::new(),
            e: Vec::new(),
            ep: Vec::new(),
        }
    }

    pub fn scan<Scheme, Seq1, Seq2, St>(
        &mut self,
        seq1: &Seq1,
        seq2: &Seq2,
        scoring: &Scheme,
        ledger: &UsedCells,
        rect: &Rect,
        storage: &mut St,
    ) where
        Scheme: scoring::Scheme<Score = S>,
        Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
        Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
        St: Storage<Score = S>,
    {
        debug_assert!(rect.bottom < seq1.len() && rect.right < seq2.len());

        let width = rect.width();
        let ninf = ninf::<S>();
        let zero = S::zero();

        self.h.clear();
        self.h.resize(width, zero);
        self.hp.clear();
        self.hp.resize(width, None);
        self.e.clear();
        self.e.resize(width, ninf);
        self.ep.clear();
        self.ep.resize(width, None);

        for i in rect.top..=rect.bottom {
            let go1 = scoring.seq1_gap_open(i);
            let ge1 = scoring.seq1_gap_extend(i);

            // State of the previous cell in the diagonal direction
            let mut diag = zero;
            let mut diagp: Option<Path<S>> = None;
            // Horizontal gap state within the current row
            let mut f = ninf;
            let mut fp: Option<Path<S>> = None;
            // State of the previous cell in the current row
            let mut left = zero;
            let mut leftp: Option<Path<S>> = None;

            for q in 0..width {
                let j = rect.left + q;
                let go2 = scoring.seq2_gap_open(j);
                let ge2 = scoring.seq2_gap_extend(j);

                let up = self.h[q];
                let upp = self.hp[q];

                // Vertical gap, consuming seq1. Extension is preferred on ties.
                let ext = self.e[q] + ge1;
                let opn = up + go1 + ge1;
                if opn > ext {
                    self.e[q] = opn;
                    self.ep[q] = upp;
                } else {
                    self.e[q] = ext;
                }

                // Horizontal gap, consuming seq2
                let ext = f + ge2;
                let opn = left + go2 + ge2;
                if opn > ext {
                    f = opn;
                    fp = leftp;
                } else {
                    f = ext;
                }

                let d = if ledger.contains(i, j) {
                    ninf
                } else {
                    diag + scoring.score(i, seq1.at(i), j, seq2.at(j))
                };

                // Move preference on ties: diagonal, then vertical, then horizontal
                let (best, bestp) = if d > zero && d >= self.e[q] && d >= f {
                    (d, diagp)
                } else if self.e[q] > zero && self.e[q] >= f {
                    (self.e[q], self.ep[q])
                } else if f > zero {
                    (f, fp)
                } else {
                    (zero, None)
                };

                let cell = if best > zero {
                    let mut path = match bestp {
                        Some(x) => x,
                        None => Path::new(i, j, zero),
                    };
                    path.touch(i, j, best);
                    storage.observe(path.start, path.end, path.score, path.bbox);
                    Some(path)
                } else {
                    None
                };

                diag = up;
                diagp = upp;
                left = best;
                leftp = cell;
                self.h[q] = best;
                self.hp[q] = cell;
            }
        }
    }
}

impl<S: Score> Default for RectScan<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::scoring::{compose, equiv, gaps, symbols};
    use crate::pairwise::sw::storage::KBest;

    fn scheme(
        equal: i64,
        different: i64,
        open: i64,
        extend: i64,
    ) -> impl scoring::Scheme<Score = i64, Symbol = u8> {
        compose(
            symbols::Equality::new(equal, different),
            gaps::Affine { open, extend },
            equiv::Equality::new(),
        )
    }

    #[test]
    fn test_scan_perfect_match() {
        let scheme = scheme(1, -2, -5, -1);
        let mut ledger = UsedCells::new();
        ledger.reset(4);
        let mut tracker = KBest::new(4, 1);
        let mut algo = RectScan::new();

        let seq1: &[u8] = b"ACGT";
        let seq2: &[u8] = b"ACGT";
        algo.scan(
            &seq1,
            &seq2,
            &scheme,
            &ledger,
            &Rect::span(0..4, 0..4),
            &mut tracker,
        );

        let best = tracker.pop_best().unwrap();
        assert_eq!((best.start, best.end, best.score), ((0, 0), (3, 3), 4));
    }

    #[test]
    fn test_scan_gapped_path() {
        // The best path must jump over the mismatching middle with a gap
        let scheme = scheme(1, -2, -2, -1);
        let mut ledger = UsedCells::new();
        ledger.reset(19);
        let mut tracker = KBest::new(1, 1);
        let mut algo = RectScan::new();

        let seq1: &[u8] = b"AAAAAAAAGGGAAAAAAAA";
        let seq2: &[u8] = b"AAAAAAAAAAAAAAAA";
        algo.scan(
            &seq1,
            &seq2,
            &scheme,
            &ledger,
            &Rect::span(0..19, 0..16),
            &mut tracker,
        );

        let best = tracker.pop_best().unwrap();
        // 16 matches minus a gap of length 3
        assert_eq!((best.start, best.end, best.score), ((0, 0), (18, 15), 11));
    }

    #[test]
    fn test_scan_respects_ledger() {
        let scheme = scheme(1, -2, -5, -1);
        let mut ledger = UsedCells::new();
        ledger.reset(3);
        ledger.insert(1, 1);

        let mut tracker = KBest::new(4, 1);
        let mut algo = RectScan::new();

        let seq1: &[u8] = b"ABC";
        let seq2: &[u8] = b"ABC";
        algo.scan(
            &seq1,
            &seq2,
            &scheme,
            &ledger,
            &Rect::span(0..3, 0..3),
            &mut tracker,
        );

        // The main diagonal is cut in two by the used cell
        let best = tracker.pop_best().unwrap();
        assert_eq!(best.score, 1);
        while let Some(cand) = tracker.pop_best() {
            assert_ne!((cand.start, cand.end), ((0, 0), (2, 2)));
        }
    }
}
