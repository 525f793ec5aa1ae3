use derive_getters::{Dissolve, Getters};

use crate::pairwise::{Op, Step};
use crate::Alignable;

/// A pair of gapped sequences spelling out an alignment symbol by symbol.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Dissolve)]
pub struct GappedPair<Smb> {
    /// The aligned region of the first sequence with gap symbols inserted.
    seq1: Vec<Smb>,
    /// The aligned region of the second sequence with gap symbols inserted.
    seq2: Vec<Smb>,
    /// The number of exactly matching positions.
    identities: usize,
    /// The total length of the gapped sequences.
    length: usize,
}

impl<Smb: Copy> GappedPair<Smb> {
    /// Spell out the alignment given its steps and start positions in each sequence.
    pub fn render<Seq1, Seq2>(
        steps: &[Step<u32>],
        seq1: &Seq1,
        seq2: &Seq2,
        mut pos1: usize,
        mut pos2: usize,
        gap: Smb,
    ) -> Self
    where
        Seq1: Alignable<Symbol = Smb>,
        Seq2: Alignable<Symbol = Smb>,
    {
        let length = steps.iter().map(|x| *x.len() as usize).sum();
        let mut gapped1 = Vec::with_capacity(length);
        let mut gapped2 = Vec::with_capacity(length);
        let mut identities = 0;

        for step in steps {
            let len = *step.len() as usize;
            match step.op() {
                Op::GapFirst => {
                    for _ in 0..len {
                        gapped1.push(*seq1.at(pos1));
                        gapped2.push(gap);
                        pos1 += 1;
                    }
                }
                Op::GapSecond => {
                    for _ in 0..len {
                        gapped1.push(gap);
                        gapped2.push(*seq2.at(pos2));
                        pos2 += 1;
                    }
                }
                Op::Match | Op::Mismatch | Op::Equivalent => {
                    if *step.op() == Op::Match {
                        identities += len;
                    }
                    for _ in 0..len {
                        gapped1.push(*seq1.at(pos1));
                        gapped2.push(*seq2.at(pos2));
                        pos1 += 1;
                        pos2 += 1;
                    }
                }
            }
        }

        Self {
            seq1: gapped1,
            seq2: gapped2,
            identities,
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let steps = vec![
            Step::new(Op::Match, 2u32).unwrap(),
            Step::new(Op::GapFirst, 1).unwrap(),
            Step::new(Op::Mismatch, 1).unwrap(),
            Step::new(Op::GapSecond, 2).unwrap(),
        ];

        let seq1: &[u8] = b"ACGT";
        let seq2: &[u8] = b"ACCGG";

        let gapped = GappedPair::render(&steps, &seq1, &seq2, 0, 0, b'-');
        assert_eq!(gapped.seq1().as_slice(), b"ACGT--".as_slice());
        assert_eq!(gapped.seq2().as_slice(), b"AC-CGG".as_slice());
        assert_eq!(*gapped.identities(), 2);
        assert_eq!(*gapped.length(), 6);
    }
}
