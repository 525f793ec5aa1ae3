use std::cmp::max;
use std::ops::Range;

use itertools::Itertools;
use num::Zero;

use crate::pairwise::scoring;
use crate::pairwise::{Op, Step};
use crate::Alignable;

use super::algo::ninf;
use super::ledger::UsedCells;

/// Recover the steps of an alignment spanning the given sequence ranges.
///
/// Runs a divide-and-conquer pass in linear memory: the matrix window is split
/// by its middle row, forward and reverse affine-gap sweeps meet at the split,
/// and the best crossing point decides the recursion. A crossing inside a
/// vertical gap merges both halves of the gap and refunds the doubly counted
/// open penalty. Diagonal transitions through cells claimed by the ledger are
/// forbidden, mirroring the scan.
///
/// Diagonal steps are emitted as `Op::Equivalent` and are expected to be
/// disambiguated afterwards.
pub(crate) fn trace<Scheme, Seq1, Seq2>(
    seq1: &Seq1,
    seq2: &Seq2,
    scoring: &Scheme,
    ledger: &UsedCells,
    seq1range: Range<usize>,
    seq2range: Range<usize>,
) -> Vec<Step<u32>>
where
    Scheme: scoring::Scheme,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
{
    let hirschberg = Hirschberg {
        seq1,
        seq2,
        scoring,
        ledger,
    };

    let mut ops = Vec::with_capacity(seq1range.len() + seq2range.len());
    hirschberg.diff(seq1range, seq2range, false, false, &mut ops);

    let mut steps = Vec::new();
    for (count, op) in ops.into_iter().dedup_with_count() {
        let mut count = count;
        while count > u32::MAX as usize {
            steps.push(Step::new(op, u32::MAX).unwrap());
            count -= u32::MAX as usize;
        }
        steps.push(Step::new(op, count as u32).unwrap());
    }
    steps
}

struct Hirschberg<'a, Scheme, Seq1, Seq2> {
    seq1: &'a Seq1,
    seq2: &'a Seq2,
    scoring: &'a Scheme,
    ledger: &'a UsedCells,
}

impl<Scheme, Seq1, Seq2> Hirschberg<'_, Scheme, Seq1, Seq2>
where
    Scheme: scoring::Scheme,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol>,
{
    /// Append the optimal global alignment of the window to `out`.
    ///
    /// `tb`/`te` flag a vertical gap continuing into the window across its
    /// top/bottom boundary, whose open penalty was already paid outside.
    fn diff(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
        tb: bool,
        te: bool,
        out: &mut Vec<Op>,
    ) {
        let (m, n) = (rows.len(), cols.len());

        if n == 0 {
            out.extend(std::iter::repeat(Op::GapFirst).take(m));
            return;
        }
        if m == 0 {
            out.extend(std::iter::repeat(Op::GapSecond).take(n));
            return;
        }
        if m == 1 {
            self.single(rows.start, cols, tb, te, out);
            return;
        }

        let mid = m / 2;
        let gmid = rows.start + mid;

        let (cc, dd) = self.forward(rows.start..gmid, cols.clone(), tb);
        let (rr, ss) = self.reverse(gmid..rows.end, cols.clone(), te);

        // Pick the best crossing point on the split row. A plain node crossing
        // wins ties against a gap merge, earlier columns win ties overall.
        let refund = self.scoring.seq1_gap_open(gmid);
        let mut best = ninf::<<Scheme as scoring::Scheme>::Score>();
        let mut bestq = 0;
        let mut merge = false;
        for q in 0..=n {
            let node = cc[q] + rr[q];
            if node > best {
                best = node;
                bestq = q;
                merge = false;
            }
            let gapped = dd[q] + ss[q] - refund;
            if gapped > best {
                best = gapped;
                bestq = q;
                merge = true;
            }
        }

        let split = cols.start + bestq;
        if !merge {
            self.diff(rows.start..gmid, cols.start..split, tb, false, out);
            self.diff(gmid..rows.end, split..cols.end, false, te, out);
        } else {
            // The crossing gap consumes the rows on both sides of the split
            self.diff(rows.start..gmid - 1, cols.start..split, tb, true, out);
            out.push(Op::GapFirst);
            out.push(Op::GapFirst);
            self.diff(gmid + 1..rows.end, split..cols.end, true, te, out);
        }
    }

    /// Forward sweep over the window: `cc[q]` is the best score of aligning all
    /// rows against the first q columns, `dd[q]` is the best such score with
    /// the alignment ending in a vertical gap.
    fn forward(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
        tb: bool,
    ) -> (
        Vec<<Scheme as scoring::Scheme>::Score>,
        Vec<<Scheme as scoring::Scheme>::Score>,
    ) {
        let n = cols.len();
        let ninf = ninf::<<Scheme as scoring::Scheme>::Score>();
        let zero = <Scheme as scoring::Scheme>::Score::zero();

        let mut cc = vec![zero; n + 1];
        let mut dd = vec![ninf; n + 1];

        // No rows consumed yet: horizontal gaps only
        let mut t = zero;
        for q in 1..=n {
            let gj = cols.start + q - 1;
            t = if q == 1 {
                self.scoring.seq2_gap_open(gj) + self.scoring.seq2_gap_extend(gj)
            } else {
                t + self.scoring.seq2_gap_extend(gj)
            };
            cc[q] = t;
        }

        let mut t = zero;
        for (i, gi) in rows.clone().enumerate() {
            let go1 = self.scoring.seq1_gap_open(gi);
            let ge1 = self.scoring.seq1_gap_extend(gi);

            let mut s = cc[0];
            t = if i == 0 {
                (if tb { zero } else { go1 }) + ge1
            } else {
                t + ge1
            };
            cc[0] = t;
            dd[0] = t;
            let mut e = ninf;

            for q in 1..=n {
                let gj = cols.start + q - 1;
                let go2 = self.scoring.seq2_gap_open(gj);
                let ge2 = self.scoring.seq2_gap_extend(gj);

                e = max(e, cc[q - 1] + go2) + ge2;
                dd[q] = max(dd[q], cc[q] + go1) + ge1;
                let diag = if self.ledger.contains(gi, gj) {
                    ninf
                } else {
                    s + self.scoring.score(gi, self.seq1.at(gi), gj, self.seq2.at(gj))
                };
                s = cc[q];
                cc[q] = max(max(diag, dd[q]), e);
            }
        }

        (cc, dd)
    }

    /// Mirror of [`Self::forward`] walking the window bottom-up: `rr[q]` scores
    /// the alignment of all rows against columns q.. and `ss[q]` the same with
    /// a vertical gap at the top.
    fn reverse(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
        te: bool,
    ) -> (
        Vec<<Scheme as scoring::Scheme>::Score>,
        Vec<<Scheme as scoring::Scheme>::Score>,
    ) {
        let n = cols.len();
        let ninf = ninf::<<Scheme as scoring::Scheme>::Score>();
        let zero = <Scheme as scoring::Scheme>::Score::zero();

        let mut rr = vec![zero; n + 1];
        let mut ss = vec![ninf; n + 1];

        let mut sumext = zero;
        for q in (0..n).rev() {
            let gj = cols.start + q;
            sumext = sumext + self.scoring.seq2_gap_extend(gj);
            rr[q] = self.scoring.seq2_gap_open(gj) + sumext;
        }

        let mut t = zero;
        for (p, gi) in rows.rev().enumerate() {
            let go1 = self.scoring.seq1_gap_open(gi);
            let ge1 = self.scoring.seq1_gap_extend(gi);

            let mut s = rr[n];
            t = if p == 0 {
                (if te { zero } else { go1 }) + ge1
            } else {
                t + ge1
            };
            rr[n] = t;
            ss[n] = t;
            let mut e = ninf;

            for q in (0..n).rev() {
                let gj = cols.start + q;
                let go2 = self.scoring.seq2_gap_open(gj);
                let ge2 = self.scoring.seq2_gap_extend(gj);

                e = max(e, rr[q + 1] + go2) + ge2;
                ss[q] = max(ss[q], rr[q] + go1) + ge1;
                let diag = if self.ledger.contains(gi, gj) {
                    ninf
                } else {
                    s + self.scoring.score(gi, self.seq1.at(gi), gj, self.seq2.at(gj))
                };
                s = rr[q];
                rr[q] = max(max(diag, ss[q]), e);
            }
        }

        (rr, ss)
    }

    /// Align a single row against the columns: either one diagonal step at the
    /// best allowed column surrounded by horizontal gaps, or a vertical gap
    /// next to one horizontal run when every diagonal is blocked or too costly.
    fn single(&self, row: usize, cols: Range<usize>, tb: bool, te: bool, out: &mut Vec<Op>) {
        let n = cols.len();
        debug_assert!(n > 0);

        // Prefix sums of horizontal extension costs
        let mut ge_pref = Vec::with_capacity(n + 1);
        let mut acc = <Scheme as scoring::Scheme>::Score::zero();
        ge_pref.push(acc);
        for q in 0..n {
            acc = acc + self.scoring.seq2_gap_extend(cols.start + q);
            ge_pref.push(acc);
        }
        let hrun = |c1: usize, c2: usize| {
            if c1 == c2 {
                <Scheme as scoring::Scheme>::Score::zero()
            } else {
                self.scoring.seq2_gap_open(cols.start + c1) + ge_pref[c2] - ge_pref[c1]
            }
        };

        let mut best_diag = None;
        for c in 0..n {
            let gj = cols.start + c;
            if self.ledger.contains(row, gj) {
                continue;
            }
            let score = hrun(0, c)
                + self.scoring.score(row, self.seq1.at(row), gj, self.seq2.at(gj))
                + hrun(c + 1, n);
            match best_diag {
                Some((_, s)) if s >= score => {}
                _ => best_diag = Some((c, score)),
            }
        }

        let vopen = if tb || te {
            <Scheme as scoring::Scheme>::Score::zero()
        } else {
            self.scoring.seq1_gap_open(row)
        };
        let nodiag = vopen + self.scoring.seq1_gap_extend(row) + hrun(0, n);

        match best_diag {
            // Diagonal placement wins ties
            Some((c, score)) if score >= nodiag => {
                out.extend(std::iter::repeat(Op::GapSecond).take(c));
                out.push(Op::Equivalent);
                out.extend(std::iter::repeat(Op::GapSecond).take(n - 1 - c));
            }
            _ => {
                // Keep the vertical gap adjacent to the boundary it continues
                if tb || !te {
                    out.push(Op::GapFirst);
                    out.extend(std::iter::repeat(Op::GapSecond).take(n));
                } else {
                    out.extend(std::iter::repeat(Op::GapSecond).take(n));
                    out.push(Op::GapFirst);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::scoring::{compose, equiv, gaps, symbols};

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
    fn test_trace_with_gap() {
        let scheme = scheme(1, -2, -5, -1);
        let mut ledger = UsedCells::new();
        ledger.reset(4);

        let seq1: &[u8] = b"ACGT";
        let seq2: &[u8] = b"AGT";

        let steps = trace(&seq1, &seq2, &scheme, &ledger, 0..4, 0..3);
        assert_eq!(Step::rle_string(steps.iter()), "1~1v2~");
    }

    #[test]
    fn test_trace_around_used_cell() {
        let scheme = scheme(1, -2, -5, -1);
        let mut ledger = UsedCells::new();
        ledger.reset(2);
        ledger.insert(1, 1);

        let seq1: &[u8] = b"AA";
        let seq2: &[u8] = b"AA";

        let steps = trace(&seq1, &seq2, &scheme, &ledger, 0..2, 0..2);
        assert_eq!(Step::rle_string(steps.iter()), "1v1~1^");
    }

    #[test]
    fn test_trace_merged_gap() {
        let scheme = scheme(1, -2, -2, -1);
        let mut ledger = UsedCells::new();
        ledger.reset(10);

        // The vertical gap must span the mismatching middle in one run
        let seq1: &[u8] = b"AAAAGGAAAA";
        let seq2: &[u8] = b"AAAAAAAA";

        let steps = trace(&seq1, &seq2, &scheme, &ledger, 0..10, 0..8);
        assert_eq!(Step::rle_string(steps.iter()), "4~2v4~");
    }

    #[test]
    fn test_trace_single_row() {
        let scheme = scheme(1, -2, -2, -1);
        let ledger = UsedCells::new();

        let seq1: &[u8] = b"G";
        let seq2: &[u8] = b"AGA";

        let steps = trace(&seq1, &seq2, &scheme, &ledger, 0..1, 0..3);
        assert_eq!(Step::rle_string(steps.iter()), "1^1~1^");
    }
}
