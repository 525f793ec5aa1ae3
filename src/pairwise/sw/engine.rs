use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::Result;

use crate::num::Score;
use crate::pairwise::alignment::{utils, Alignment, GappedPair, Op, Step};
use crate::pairwise::scoring;
use crate::Alignable;

use super::algo::RectScan;
use super::ledger::UsedCells;
use super::storage::{KBest, Storage};
use super::trace::trace;
use super::Rect;

/// Why the scan stopped producing alignments.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Status {
    /// The requested number of alignments was found.
    Complete,
    /// The matrix ran out of candidates scoring above the floor.
    Exhausted,
}

/// A reported alignment together with its gapped rendering.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Dissolve, Constructor)]
pub struct AlignmentResult<S: Score, Smb> {
    alignment: Alignment<S>,
    gapped: GappedPair<Smb>,
}

/// The outcome of a k-best scan: alignments in extraction order plus a status.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Dissolve)]
pub struct KBestScan<S: Score, Smb> {
    alignments: Vec<AlignmentResult<S, Smb>>,
    status: Status,
}

/// Reports up to k best local alignments that are mutually non-overlapping,
/// i.e. no two of them align the same symbol pair.
///
/// A full matrix scan seeds a bounded candidate tracker. After each extraction
/// the traced cells are claimed in the ledger and only the affected region,
/// grown until no tracked candidate touches it, is rescanned.
pub struct Engine<S, Smb, Scheme>
where
    S: Score,
    Scheme: scoring::Scheme<Score = S, Symbol = Smb>,
{
    scoring: Scheme,
    algo: RectScan<S>,
    storage: KBest<S>,
    ledger: UsedCells,
    gap_symbol: Smb,
}

impl<S, Smb, Scheme> Engine<S, Smb, Scheme>
where
    S: Score,
    Smb: Copy,
    Scheme: scoring::Scheme<Score = S, Symbol = Smb>,
{
    pub fn new(k: usize, min_score: S, gap_symbol: Smb, scoring: Scheme) -> Self {
        Self {
            scoring,
            algo: RectScan::new(),
            storage: KBest::new(k, min_score),
            ledger: UsedCells::new(),
            gap_symbol,
        }
    }

    pub fn with_scoring(&mut self, scoring: Scheme) {
        self.scoring = scoring;
    }

    pub fn scan_kbest<S1, S2>(&mut self, seq1: &S1, seq2: &S2) -> Result<KBestScan<S, Smb>>
    where
        S1: Alignable<Symbol = Smb>,
        S2: Alignable<Symbol = Smb>,
    {
        eyre::ensure!(self.storage.k() > 0, "The number of alignments must be positive");
        eyre::ensure!(
            !seq1.is_empty() && !seq2.is_empty(),
            "Can't align empty sequences"
        );

        let k = self.storage.k();
        self.ledger.reset(seq1.len());
        self.storage.clear();
        self.algo.scan(
            seq1,
            seq2,
            &self.scoring,
            &self.ledger,
            &Rect::span(0..seq1.len(), 0..seq2.len()),
            &mut self.storage,
        );

        let mut alignments = Vec::with_capacity(k);
        let status = loop {
            if alignments.len() == k {
                break Status::Complete;
            }
            let cand = match self.storage.pop_best() {
                Some(x) => x,
                None => break Status::Exhausted,
            };

            let r1 = cand.start.0..cand.end.0 + 1;
            let r2 = cand.start.1..cand.end.1 + 1;
            let ops = trace(seq1, seq2, &self.scoring, &self.ledger, r1.clone(), r2.clone());

            let (n1, n2) = utils::consumed(&ops);
            assert_eq!(n1, r1.len(), "Traceback consumed an unexpected span of the first sequence");
            assert_eq!(n2, r2.len(), "Traceback consumed an unexpected span of the second sequence");

            let steps = utils::disambiguate(ops, &self.scoring, seq1, r1.start, seq2, r2.start);
            let score = utils::score_of(&steps, &self.scoring, seq1, r1.start, seq2, r2.start);
            debug_assert_eq!(score, cand.score);

            // Claim the aligned pairs so that further scans can't reuse them
            let (mut i, mut j) = (r1.start, r2.start);
            for step in &steps {
                let len = *step.len() as usize;
                match step.op() {
                    Op::GapFirst => i += len,
                    Op::GapSecond => j += len,
                    Op::Match | Op::Mismatch | Op::Equivalent => {
                        for _ in 0..len {
                            self.ledger.insert(i, j);
                            i += 1;
                            j += 1;
                        }
                    }
                }
            }

            log::debug!(
                "Extracted alignment {} at {:?}/{:?} with score {:?}",
                Step::rle_string(steps.iter()),
                r1,
                r2,
                score
            );

            let gapped = GappedPair::render(&steps, seq1, seq2, r1.start, r2.start, self.gap_symbol);
            alignments.push(AlignmentResult::new(
                Alignment::new(score, steps, r1, r2),
                gapped,
            ));

            if alignments.len() < k {
                // Rescan the region affected by the extraction. Candidates whose
                // paths might touch it are dropped and recomputed from scratch.
                let mut rect = cand.bbox;
                while self.storage.take_intersecting(&mut rect) > 0 {}
                self.algo.scan(
                    seq1,
                    seq2,
                    &self.scoring,
                    &self.ledger,
                    &rect,
                    &mut self.storage,
                );
            }
        };

        Ok(KBestScan { alignments, status })
    }
}

/// Find up to k best non-overlapping local alignments between two code-encoded
/// sequences under a substitution matrix and affine gap penalties, where a gap
/// of length n costs `gap_open + gap_extend * n`.
pub fn align_kbest<S: Score>(
    seq1: &[u8],
    seq2: &[u8],
    matrix: &scoring::symbols::Matrix<S>,
    gap_open: S,
    gap_extend: S,
    k: usize,
) -> Result<KBestScan<S, u8>> {
    eyre::ensure!(k > 0, "The number of alignments must be positive");
    eyre::ensure!(
        gap_open <= S::zero() && gap_extend <= S::zero(),
        "Gap penalties must not be positive"
    );
    matrix.check(seq1)?;
    matrix.check(seq2)?;

    let scoring = scoring::compose(
        matrix.clone(),
        scoring::gaps::Affine {
            open: gap_open,
            extend: gap_extend,
        },
        scoring::equiv::Equality::new(),
    );

    let mut engine = Engine::new(k, S::one(), b'-', scoring);
    engine.scan_kbest(&seq1, &seq2)
}
