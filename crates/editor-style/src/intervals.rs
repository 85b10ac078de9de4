//! Interval index backing the decoration tree.
//!
//! Intervals live in a vector sorted by start offset, with a prefix-maximum of end offsets for
//! pruning. Any number of values may share the same (or overlapping) `[start, end)` key.

/// A half-open `[start, end)` range carrying a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<T> {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Payload
    pub value: T,
}

impl<T> Interval<T> {
    /// Create a new interval with `[start, end)` offsets.
    pub fn new(start: usize, end: usize, value: T) -> Self {
        Self { start, end, value }
    }

    /// Check if interval contains a specific position
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if the interval intersects `[start, end)`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Whether the interval covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Interval tree over a sorted vector.
///
/// Query complexity: O(log n + k), where k is the number of overlapping intervals.
/// Insertion complexity: O(n) (requires maintaining sort order).
#[derive(Debug, Clone)]
pub struct IntervalTree<T> {
    /// Intervals, sorted by start. Equal starts keep insertion order.
    intervals: Vec<Interval<T>>,
    /// `prefix_max_end[i] = max(intervals[0..=i].end)`
    prefix_max_end: Vec<usize>,
}

impl<T> IntervalTree<T> {
    /// Create an empty interval tree.
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
            prefix_max_end: Vec::new(),
        }
    }

    fn rebuild_prefix_max_end_from(&mut self, start_idx: usize) {
        if self.intervals.is_empty() {
            self.prefix_max_end.clear();
            return;
        }

        if self.prefix_max_end.len() != self.intervals.len() {
            self.prefix_max_end.resize(self.intervals.len(), 0);
        }

        let mut max_end = if start_idx == 0 {
            0
        } else {
            self.prefix_max_end[start_idx - 1]
        };

        for (idx, interval) in self.intervals.iter().enumerate().skip(start_idx) {
            max_end = max_end.max(interval.end);
            self.prefix_max_end[idx] = max_end;
        }
    }

    fn rebuild_prefix_max_end(&mut self) {
        self.rebuild_prefix_max_end_from(0);
    }

    /// Insert `value` under `[start, end)`.
    ///
    /// Callers keep intervals non-empty; empty ones are stored but never match a query.
    pub fn insert(&mut self, start: usize, end: usize, value: T) {
        debug_assert!(start <= end, "inverted interval [{start}, {end})");
        let pos = self.intervals.partition_point(|i| i.start <= start);

        self.intervals.insert(pos, Interval::new(start, end, value));
        self.prefix_max_end.insert(pos, 0);
        self.rebuild_prefix_max_end_from(pos);
    }

    /// Query all intervals containing `pos`, in start order.
    pub fn query_point(&self, pos: usize) -> Vec<&Interval<T>> {
        self.query_point_impl(pos).0
    }

    fn query_point_impl(&self, pos: usize) -> (Vec<&Interval<T>>, usize) {
        if self.intervals.is_empty() {
            return (Vec::new(), 0);
        }

        let mut result = Vec::new();
        let mut scanned = 0usize;

        // Every interval with start <= pos sits before idx.
        let idx = self.intervals.partition_point(|i| i.start <= pos);

        for i in (0..idx).rev() {
            scanned = scanned.saturating_add(1);

            // If maximum end of `intervals[0..=i]` is <= pos, earlier intervals cannot contain pos.
            if self.prefix_max_end[i] <= pos {
                break;
            }

            let interval = &self.intervals[i];
            if interval.contains(pos) {
                result.push(interval);
            }
        }

        result.reverse();
        (result, scanned)
    }

    #[cfg(test)]
    fn query_point_scan_count(&self, pos: usize) -> usize {
        self.query_point_impl(pos).1
    }

    /// Query all intervals overlapping `[start, end)`, in start order.
    ///
    /// Returns nothing when `start >= end`.
    pub fn query_range(&self, start: usize, end: usize) -> Vec<&Interval<T>> {
        if self.intervals.is_empty() || start >= end {
            return Vec::new();
        }

        // All intervals that may overlap start before `end`.
        let search_end = self.intervals.partition_point(|i| i.start < end);
        if search_end == 0 {
            return Vec::new();
        }

        // First find position where start >= start, then expand backward,
        // until `prefix_max_end` indicates earlier intervals cannot cross start.
        let mut scan_start = self
            .intervals
            .partition_point(|i| i.start < start)
            .min(search_end);

        while scan_start > 0 && self.prefix_max_end[scan_start - 1] > start {
            scan_start -= 1;
        }

        self.intervals[scan_start..search_end]
            .iter()
            .filter(|interval| interval.overlaps(start, end))
            .collect()
    }

    /// Largest end offset stored, 0 when empty.
    pub fn max_end(&self) -> usize {
        self.prefix_max_end.last().copied().unwrap_or(0)
    }

    /// Iterate over all intervals in start order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval<T>> {
        self.intervals.iter()
    }

    /// Mutable access to the values; the ranges themselves stay read-only.
    pub fn values_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        self.intervals
            .iter_mut()
            .map(|interval| (interval.start, interval.end, &mut interval.value))
    }

    /// Keep only intervals matching `keep`; returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Interval<T>) -> bool) -> usize {
        let before = self.intervals.len();
        self.intervals.retain(|interval| keep(interval));
        let removed = before - self.intervals.len();
        if removed > 0 {
            self.rebuild_prefix_max_end();
        }
        removed
    }

    /// Remove every interval, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.intervals.len();
        self.intervals.clear();
        self.prefix_max_end.clear();
        removed
    }

    /// Get number of intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Shift offsets for `delta` units inserted at `pos`.
    ///
    /// Start edges stick to the text after them unless the insertion is exactly at the start,
    /// end edges grow with an insertion exactly at the end. An interval `[s, e)` therefore
    /// absorbs text inserted anywhere in `s..=e` and only moves for insertions before `s`.
    pub fn update_for_insertion(&mut self, pos: usize, delta: usize) {
        if delta == 0 {
            return;
        }

        for interval in &mut self.intervals {
            if interval.start > pos {
                interval.start += delta;
            }
            if interval.end >= pos {
                interval.end += delta;
            }
        }
        self.rebuild_prefix_max_end();
    }

    /// Shift offsets for the deletion of `[start, end)`.
    ///
    /// Edges inside the deleted span collapse onto `start`. Intervals that become empty are
    /// taken out of the tree and returned.
    pub fn update_for_deletion(&mut self, start: usize, end: usize) -> Vec<Interval<T>> {
        if start >= end {
            return Vec::new();
        }

        let delta = end - start;
        let map = |offset: usize| {
            if offset <= start {
                offset
            } else if offset >= end {
                offset - delta
            } else {
                start
            }
        };

        let mut collapsed = Vec::new();
        let mut kept = Vec::with_capacity(self.intervals.len());
        for mut interval in self.intervals.drain(..) {
            interval.start = map(interval.start);
            interval.end = map(interval.end);
            if interval.is_empty() {
                collapsed.push(interval);
            } else {
                kept.push(interval);
            }
        }

        // The mapping is monotonic, so start order survives.
        self.intervals = kept;
        self.rebuild_prefix_max_end();
        collapsed
    }
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts_ends(tree: &IntervalTree<u32>) -> Vec<(usize, usize)> {
        tree.iter().map(|i| (i.start, i.end)).collect()
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(10, 20, ());
        assert!(interval.contains(10));
        assert!(interval.contains(15));
        assert!(interval.contains(19));
        assert!(!interval.contains(20));
        assert!(!interval.contains(9));
    }

    #[test]
    fn test_interval_overlaps() {
        let i1 = Interval::new(10, 20, ());
        assert!(i1.overlaps(15, 25));
        assert!(!i1.overlaps(20, 30));
        assert!(!i1.overlaps(0, 10));
    }

    #[test]
    fn test_interval_tree_insert_keeps_order() {
        let mut tree = IntervalTree::new();
        tree.insert(10, 20, 1);
        tree.insert(5, 15, 2);
        tree.insert(10, 12, 3);

        assert_eq!(tree.len(), 3);
        let values: Vec<u32> = tree.iter().map(|i| i.value).collect();
        assert_eq!(values, vec![2, 1, 3]);
        assert_eq!(tree.max_end(), 20);
    }

    #[test]
    fn test_interval_tree_same_key_multiple_values() {
        let mut tree = IntervalTree::new();
        tree.insert(0, 10, 1);
        tree.insert(0, 10, 2);

        let values: Vec<u32> = tree.query_point(3).iter().map(|i| i.value).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_interval_tree_query_point() {
        let mut tree = IntervalTree::new();
        tree.insert(10, 20, 1);
        tree.insert(5, 15, 2);
        tree.insert(15, 25, 3);

        let results = tree.query_point(12);
        assert_eq!(results.len(), 2); // intervals 1 and 2

        let results = tree.query_point(18);
        assert_eq!(results.len(), 2); // intervals 1 and 3
        assert!(tree.query_point(25).is_empty());
    }

    #[test]
    fn test_interval_tree_query_point_prunes_scan() {
        let mut tree = IntervalTree::new();

        for i in 0..10_000usize {
            let start = i * 2;
            tree.insert(start, start + 1, 1u32);
        }

        let pos = 2 * 10_000 - 2;
        let results = tree.query_point(pos);
        assert_eq!(results.len(), 1);

        assert!(
            tree.query_point_scan_count(pos) <= 4,
            "scan should be pruned for disjoint intervals"
        );
    }

    #[test]
    fn test_interval_tree_query_range() {
        let mut tree = IntervalTree::new();
        tree.insert(10, 20, 1);
        tree.insert(25, 35, 2);
        tree.insert(40, 50, 3);

        let results = tree.query_range(15, 30);
        assert_eq!(results.len(), 2); // intervals 1 and 2

        let results = tree.query_range(0, 60);
        assert_eq!(results.len(), 3); // all intervals

        // A long interval starting far before the query is still found.
        tree.insert(0, 100, 4);
        let values: Vec<u32> = tree.query_range(45, 46).iter().map(|i| i.value).collect();
        assert_eq!(values, vec![4, 3]);
    }

    #[test]
    fn test_interval_tree_query_range_degenerate() {
        let mut tree = IntervalTree::new();
        tree.insert(0, 10, 1u32);
        assert!(tree.query_range(5, 5).is_empty());
        assert!(tree.query_range(8, 3).is_empty());
    }

    #[test]
    fn test_interval_tree_retain() {
        let mut tree = IntervalTree::new();
        tree.insert(0, 100, 1);
        tree.insert(10, 20, 2);
        tree.insert(30, 40, 1);

        assert_eq!(tree.retain(|i| i.value != 1), 2);
        assert_eq!(starts_ends(&tree), vec![(10, 20)]);
        assert_eq!(tree.max_end(), 20);
        assert!(tree.query_point(50).is_empty());

        assert_eq!(tree.clear(), 1);
        assert_eq!(tree.max_end(), 0);
    }

    #[test]
    fn test_interval_tree_update_insertion() {
        let mut tree = IntervalTree::new();
        tree.insert(10, 20, 1);
        tree.insert(30, 40, 2);

        tree.update_for_insertion(15, 5);
        assert_eq!(starts_ends(&tree), vec![(10, 25), (35, 45)]);
    }

    #[test]
    fn test_interval_tree_update_insertion_edge_bias() {
        let mut tree = IntervalTree::new();
        tree.insert(10, 20, 1);

        // At the start: the start edge stays, the interval grows.
        tree.update_for_insertion(10, 2);
        assert_eq!(starts_ends(&tree), vec![(10, 22)]);

        // At the end: the end edge moves along.
        tree.update_for_insertion(22, 3);
        assert_eq!(starts_ends(&tree), vec![(10, 25)]);

        tree.update_for_insertion(0, 1);
        assert_eq!(starts_ends(&tree), vec![(11, 26)]);
    }

    #[test]
    fn test_interval_tree_update_deletion() {
        let mut tree = IntervalTree::new();
        tree.insert(10, 20, 1);
        tree.insert(30, 40, 2);
        tree.insert(12, 14, 3);

        let collapsed = tree.update_for_deletion(12, 15);
        assert_eq!(collapsed.len(), 1);
        assert_eq!((collapsed[0].start, collapsed[0].end, collapsed[0].value), (12, 12, 3));
        assert_eq!(starts_ends(&tree), vec![(10, 17), (27, 37)]);

        // Partial overlaps clip to the deletion start.
        tree.update_for_deletion(5, 12);
        assert_eq!(starts_ends(&tree), vec![(5, 10), (20, 30)]);
        assert_eq!(tree.max_end(), 30);
    }
}
