use ahash::AHashSet;

/// Tracks matrix cells consumed by diagonal steps of already reported alignments.
/// Diagonal transitions through these cells are forbidden in later scans, which
/// makes every reported alignment pairwise non-overlapping. Gaps are free to
/// cross used cells since they do not align any symbol pair.
#[derive(Clone, Debug, Default)]
pub struct UsedCells {
    rows: Vec<AHashSet<usize>>,
}

impl UsedCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the ledger and resize it to the given number of rows.
    pub fn reset(&mut self, rows: usize) {
        for row in &mut self.rows {
            row.clear();
        }
        self.rows.resize_with(rows, AHashSet::new);
    }

    #[inline(always)]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows.get(row).is_some_and(|x| x.contains(&col))
    }

    pub fn insert(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.rows.len());
        self.rows[row].insert(col);
    }

    pub fn count(&self) -> usize {
        self.rows.iter().map(|x| x.len()).sum()
    }
}
