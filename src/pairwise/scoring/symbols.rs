use std::marker::PhantomData;

use eyre::Result;

use crate::pairwise::scoring::Score;

pub trait Scorer {
    type Score: Score;
    type Symbol;

    fn score(
        &self,
        seq1pos: usize,
        s1: &Self::Symbol,
        seq2pos: usize,
        s2: &Self::Symbol,
    ) -> Self::Score;
}

pub trait PosInvariantScorer {
    type SymScore: Score;
    type Symbol;

    fn score(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Self::SymScore;
}

impl<T: PosInvariantScorer> Scorer for T {
    type Score = <Self as PosInvariantScorer>::SymScore;
    type Symbol = <Self as PosInvariantScorer>::Symbol;

    #[inline(always)]
    fn score(&self, _: usize, s1: &Self::Symbol, _: usize, s2: &Self::Symbol) -> Self::Score {
        self.score(s1, s2)
    }
}

pub struct Equality<S: Score, Symbol> {
    pub equal: S,
    pub different: S,
    _phantom: PhantomData<Symbol>,
}

impl<S: Score, Symbol: PartialEq> PosInvariantScorer for Equality<S, Symbol> {
    type SymScore = S;
    type Symbol = Symbol;

    #[inline(always)]
    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::SymScore {
        if a == b {
            self.equal
        } else {
            self.different
        }
    }
}

impl<S: Score, Symbol: PartialEq> Equality<S, Symbol> {
    pub fn new(equal: S, different: S) -> Self {
        Self {
            equal,
            different,
            _phantom: Default::default(),
        }
    }
}

/// A dense substitution matrix over an alphabet of `dim` integer codes.
/// Sequences scored against it must be encoded as `u8` codes in `[0, dim)`.
#[derive(Clone, Debug)]
pub struct Matrix<S: Score> {
    dim: usize,
    scores: Vec<S>,
}

impl<S: Score> Matrix<S> {
    pub fn new(dim: usize, scores: Vec<S>) -> Result<Self> {
        if dim == 0 || dim > u8::MAX as usize + 1 {
            return Err(eyre::eyre!(
                "Alphabet size must be in [1, 256], got {}",
                dim
            ));
        }
        if scores.len() != dim * dim {
            return Err(eyre::eyre!(
                "Expected {} scores for an alphabet of {} codes, got {}",
                dim * dim,
                dim,
                scores.len()
            ));
        }
        Ok(Self { dim, scores })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Ensures that all symbols in the sequence are valid alphabet codes.
    pub fn check(&self, seq: &[u8]) -> Result<()> {
        for (pos, &code) in seq.iter().enumerate() {
            if code as usize >= self.dim {
                return Err(eyre::eyre!(
                    "Symbol code {} at position {} is outside the alphabet of {} codes",
                    code,
                    pos,
                    self.dim
                ));
            }
        }
        Ok(())
    }
}

impl<S: Score> PosInvariantScorer for Matrix<S> {
    type SymScore = S;
    type Symbol = u8;

    #[inline(always)]
    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::SymScore {
        self.scores[*a as usize * self.dim + *b as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix() {
        assert!(Matrix::<i32>::new(2, vec![1, -1, -1]).is_err());
        assert!(Matrix::<i32>::new(0, vec![]).is_err());

        let matrix = Matrix::new(2, vec![2, -3, -3, 2]).unwrap();
        assert_eq!(PosInvariantScorer::score(&matrix, &0u8, &0u8), 2);
        assert_eq!(PosInvariantScorer::score(&matrix, &0u8, &1u8), -3);
        assert_eq!(PosInvariantScorer::score(&matrix, &1u8, &1u8), 2);

        assert!(matrix.check(&[0, 1, 1, 0]).is_ok());
        assert!(matrix.check(&[0, 2]).is_err());
    }
}
