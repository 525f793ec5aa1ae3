use crate::num::Score;

use super::Rect;

pub trait Storage {
    type Score: Score;

    /// Forget all candidates recorded so far.
    fn clear(&mut self);

    /// Record the current state of a positive-scoring path: where it started,
    /// where its best prefix ends, the best prefix score, and the bounding box
    /// of every cell the path has visited.
    fn observe(
        &mut self,
        start: (usize, usize),
        end: (usize, usize),
        score: Self::Score,
        bbox: Rect,
    );
}

/// A candidate local alignment discovered during the matrix scan.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Candidate<S: Score> {
    /// First cell of the path, i.e. the top-left aligned pair.
    pub start: (usize, usize),
    /// Cell where the path score is maximized.
    pub end: (usize, usize),
    pub score: S,
    /// Bounding box of every cell visited by the path and its forks.
    pub bbox: Rect,
    /// Insertion order, used to break eviction ties.
    seq: u64,
}

/// Bounded tracker keeping at most k best candidates, deduplicated by start cell.
///
/// An incoming candidate with a start that is already tracked updates the tracked
/// one in place. A new start is admitted when there is room or when its score is
/// strictly greater than the weakest tracked score; the weakest entry (earliest
/// inserted on ties) is evicted.
pub struct KBest<S: Score> {
    k: usize,
    min_score: S,
    next_seq: u64,
    items: Vec<Candidate<S>>,
}

impl<S: Score> KBest<S> {
    pub fn new(k: usize, min_score: S) -> Self {
        Self {
            k,
            min_score,
            next_seq: 0,
            items: Vec::with_capacity(k),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn min_score(&self) -> S {
        self.min_score
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove and return the best candidate. Score ties are broken towards the
    /// smallest start cell so that extraction order is deterministic.
    pub fn pop_best(&mut self) -> Option<Candidate<S>> {
        let idx = self
            .items
            .iter()
            .enumerate()
            .max_by(|a, b| {
                a.1.score
                    .cmp(&b.1.score)
                    .then_with(|| b.1.start.cmp(&a.1.start))
            })?
            .0;
        Some(self.items.swap_remove(idx))
    }

    /// Remove every candidate whose bounding box intersects the rectangle and
    /// grow the rectangle to cover the removed boxes. Returns the number of
    /// removed candidates; callers loop until the rectangle stops growing.
    pub fn take_intersecting(&mut self, rect: &mut Rect) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.items.len() {
            if self.items[i].bbox.intersects(rect) {
                rect.union(&self.items[i].bbox);
                self.items.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }
}

impl<S: Score> Storage for KBest<S> {
    type Score = S;

    fn clear(&mut self) {
        self.items.clear();
        self.next_seq = 0;
    }

    fn observe(&mut self, start: (usize, usize), end: (usize, usize), score: S, bbox: Rect) {
        for item in self.items.iter_mut() {
            if item.start == start {
                if score > item.score {
                    item.score = score;
                    item.end = end;
                }
                item.bbox.union(&bbox);
                return;
            }
        }

        if score < self.min_score {
            return;
        }

        let cand = Candidate {
            start,
            end,
            score,
            bbox,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        if self.items.len() < self.k {
            self.items.push(cand);
            return;
        }

        let weakest = self
            .items
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.score.cmp(&b.1.score).then(a.1.seq.cmp(&b.1.seq)))
            .map(|(idx, x)| (idx, x.score));
        if let Some((idx, wscore)) = weakest {
            if score > wscore {
                self.items[idx] = cand;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(tracker: &mut KBest<i64>, start: (usize, usize), score: i64) {
        tracker.observe(start, start, score, Rect::cell(start.0, start.1));
    }

    #[test]
    fn test_same_start_updates() {
        let mut tracker = KBest::new(2, 1);

        tracker.observe((0, 0), (0, 0), 1, Rect::cell(0, 0));
        tracker.observe((0, 0), (3, 3), 5, Rect::span(0..4, 0..4));
        // Weaker observation widens the box but keeps the best end
        tracker.observe((0, 0), (4, 4), 2, Rect::cell(4, 4));

        assert_eq!(tracker.len(), 1);
        let best = tracker.pop_best().unwrap();
        assert_eq!((best.start, best.end, best.score), ((0, 0), (3, 3), 5));
        assert_eq!(best.bbox, Rect::span(0..5, 0..5));
    }

    #[test]
    fn test_bounded_eviction() {
        let mut tracker = KBest::new(2, 1);

        observe(&mut tracker, (0, 0), 3);
        observe(&mut tracker, (1, 0), 4);
        // Equal to the weakest -> not admitted
        observe(&mut tracker, (2, 0), 3);
        assert_eq!(tracker.len(), 2);

        // Strictly better -> evicts the weakest
        observe(&mut tracker, (3, 0), 7);
        assert_eq!(tracker.len(), 2);

        assert_eq!(tracker.pop_best().unwrap().start, (3, 0));
        assert_eq!(tracker.pop_best().unwrap().start, (1, 0));
        assert!(tracker.pop_best().is_none());
    }

    #[test]
    fn test_min_score_floor() {
        let mut tracker = KBest::new(4, 5);

        observe(&mut tracker, (0, 0), 4);
        assert!(tracker.is_empty());

        observe(&mut tracker, (0, 0), 5);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_pop_order() {
        let mut tracker = KBest::new(4, 1);

        observe(&mut tracker, (5, 2), 8);
        observe(&mut tracker, (1, 9), 8);
        observe(&mut tracker, (0, 3), 2);

        // Ties are popped in ascending start order
        assert_eq!(tracker.pop_best().unwrap().start, (1, 9));
        assert_eq!(tracker.pop_best().unwrap().start, (5, 2));
        assert_eq!(tracker.pop_best().unwrap().start, (0, 3));
    }

    #[test]
    fn test_take_intersecting() {
        let mut tracker = KBest::new(4, 1);

        tracker.observe((0, 0), (2, 2), 3, Rect::span(0..3, 0..3));
        tracker.observe((4, 4), (6, 6), 3, Rect::span(2..7, 2..7));
        tracker.observe((20, 20), (22, 22), 3, Rect::span(20..23, 20..23));

        let mut rect = Rect::cell(0, 0);
        // The first pass grabs the first box and then the one it now touches
        assert_eq!(tracker.take_intersecting(&mut rect), 2);
        assert_eq!(tracker.take_intersecting(&mut rect), 0);

        assert_eq!(rect, Rect::span(0..7, 0..7));
        assert_eq!(tracker.len(), 1);
    }
}
