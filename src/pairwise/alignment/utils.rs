use num::Zero;

use crate::pairwise::{scoring, Op, Step};
use crate::Alignable;

/// Resolve ambiguous `Equivalent` runs into concrete match/mismatch steps
/// using the classifier from the scoring scheme.
pub fn disambiguate<Scheme, Seq1, Seq2>(
    ops: Vec<Step<u32>>,
    scoring: &Scheme,
    seq1: &Seq1,
    seq1offset: usize,
    seq2: &Seq2,
    seq2offset: usize,
) -> Vec<Step<u32>>
where
    Scheme: scoring::Scheme,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
{
    let mut s1: usize = seq1offset;
    let mut s2: usize = seq2offset;
    let mut result = Vec::with_capacity(ops.len() * 2);
    for x in ops {
        match x.op() {
            Op::GapFirst => {
                s1 += *x.len() as usize;
                result.push(x);
            }
            Op::GapSecond => {
                s2 += *x.len() as usize;
                result.push(x);
            }
            Op::Equivalent => {
                let mut curop = scoring.classify(seq1.at(s1), seq2.at(s2));
                let mut len = 0;

                for _ in 0..*x.len() {
                    let op = scoring.classify(seq1.at(s1), seq2.at(s2));
                    if op == curop {
                        len += 1;
                    } else {
                        // Save results
                        let tail = len % (u32::MAX as usize);
                        if tail > 0 {
                            result.push(Step::new(curop.into(), tail as u32).unwrap());
                        }
                        for _ in 0..(len / (u32::MAX as usize)) {
                            result.push(Step::new(curop.into(), u32::MAX).unwrap());
                        }

                        curop = op;
                        len = 1;
                    }

                    s1 += 1;
                    s2 += 1;
                }
                // Save the last batch
                if len > 0 {
                    let tail = len % (u32::MAX as usize);
                    if tail > 0 {
                        result.push(Step::new(curop.into(), tail as u32).unwrap());
                    }
                    for _ in 0..(len / (u32::MAX as usize)) {
                        result.push(Step::new(curop.into(), u32::MAX).unwrap());
                    }
                }
            }
            Op::Match | Op::Mismatch => {
                s1 += *x.len() as usize;
                s2 += *x.len() as usize;
                result.push(x);
            }
        }
    }
    result
}

/// Recompute the score of an alignment from its steps.
pub fn score_of<Scheme, Seq1, Seq2>(
    steps: &[Step<u32>],
    scoring: &Scheme,
    seq1: &Seq1,
    seq1offset: usize,
    seq2: &Seq2,
    seq2offset: usize,
) -> <Scheme as scoring::Scheme>::Score
where
    Scheme: scoring::Scheme,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
{
    let mut s1 = seq1offset;
    let mut s2 = seq2offset;
    let mut total = <Scheme as scoring::Scheme>::Score::zero();

    for step in steps {
        let len = *step.len() as usize;
        match step.op() {
            Op::GapFirst => {
                total = total + scoring.seq1_gap_open(s1);
                for _ in 0..len {
                    total = total + scoring.seq1_gap_extend(s1);
                    s1 += 1;
                }
            }
            Op::GapSecond => {
                total = total + scoring.seq2_gap_open(s2);
                for _ in 0..len {
                    total = total + scoring.seq2_gap_extend(s2);
                    s2 += 1;
                }
            }
            Op::Match | Op::Mismatch | Op::Equivalent => {
                for _ in 0..len {
                    total = total + scoring.score(s1, seq1.at(s1), s2, seq2.at(s2));
                    s1 += 1;
                    s2 += 1;
                }
            }
        }
    }
    total
}

/// Total number of symbols the steps consume in each sequence.
pub fn consumed(steps: &[Step<u32>]) -> (usize, usize) {
    let mut n1 = 0;
    let mut n2 = 0;
    for step in steps {
        let len = *step.len() as usize;
        match step.op() {
            Op::GapFirst => n1 += len,
            Op::GapSecond => n2 += len,
            Op::Match | Op::Mismatch | Op::Equivalent => {
                n1 += len;
                n2 += len;
            }
        }
    }
    (n1, n2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::scoring::{compose, equiv, gaps, symbols};

    #[test]
    fn test_disambiguate() {
        let scheme = compose(
            symbols::Equality::new(1i32, -1),
            gaps::Affine {
                open: -5,
                extend: -1,
            },
            equiv::Equality::new(),
        );

        let seq1: &[u8] = b"ACGTACGT";
        let seq2: &[u8] = b"ACCTAC";

        let ops = vec![
            Step::new(Op::Equivalent, 4u32).unwrap(),
            Step::new(Op::GapFirst, 2).unwrap(),
            Step::new(Op::Equivalent, 2).unwrap(),
        ];

        let result = disambiguate(ops, &scheme, &seq1, 0, &seq2, 0);
        assert_eq!(Step::rle_string(result.iter()), "2=1X1=2v2X");
    }

    #[test]
    fn test_score_of() {
        let scheme = compose(
            symbols::Equality::new(2i32, -3),
            gaps::Affine {
                open: -5,
                extend: -2,
            },
            equiv::Equality::new(),
        );

        let seq1: &[u8] = b"AACCAA";
        let seq2: &[u8] = b"AAAA";

        let steps = vec![
            Step::new(Op::Match, 2u32).unwrap(),
            Step::new(Op::GapFirst, 2).unwrap(),
            Step::new(Op::Match, 2).unwrap(),
        ];

        // 4 matches and a gap of length 2
        assert_eq!(score_of(&steps, &scheme, &seq1, 0, &seq2, 0), 8 - 5 - 4);
        assert_eq!(consumed(&steps), (6, 4));
    }
}
