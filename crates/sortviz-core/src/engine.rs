//! Step-callable sorting algorithms.
//!
//! Both algorithms report every unit of work to a [`StepSink`] immediately
//! after mutating the [`Sequence`], so a caller can re-render between steps
//! without the algorithms knowing anything about rendering.
//!
//! - **Bubble**: the atomic unit is [`compare_swap_at`]. A pass sweeps indices
//!   `1..n` in order; a full sort is `n - 1` passes with no early exit.
//! - **Merge**: top-down recursive merge sort. Every element placed during a
//!   merge (leftover drains included) is one step.

use crate::cell::Cell;
use crate::sequence::Sequence;

/// Receives notifications after each algorithmic step.
pub trait StepSink {
    /// Mark the two indices of interest for the current step.
    fn highlight(&mut self, first: usize, second: usize);

    /// Rebuild any derived view of the whole sequence.
    fn refresh_chart(&mut self, seq: &Sequence);

    /// One complete step: highlight, then refresh.
    fn on_step(&mut self, seq: &Sequence, first: usize, second: usize) {
        self.highlight(first, second);
        self.refresh_chart(seq);
    }
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StepSink for NullSink {
    fn highlight(&mut self, _first: usize, _second: usize) {}
    fn refresh_chart(&mut self, _seq: &Sequence) {}
}

// ---------------------------------------------------------------------------
// Bubble sort
// ---------------------------------------------------------------------------

/// Swap `seq[index - 1]` and `seq[index]` if they are out of order.
///
/// Returns `true` when a swap happened. Indices outside `1..seq.len()` are a
/// no-op.
pub fn compare_swap_at(seq: &mut Sequence, index: usize) -> bool {
    if index == 0 || index >= seq.len() {
        return false;
    }
    let (Some(prev), Some(cur)) = (seq.get(index - 1), seq.get(index)) else {
        return false;
    };
    if prev > cur {
        seq.swap(index - 1, index);
        true
    } else {
        false
    }
}

/// [`compare_swap_at`] followed by a step notification for `(index - 1, index)`.
pub fn bubble_step<S>(seq: &mut Sequence, index: usize, sink: &mut S) -> bool
where
    S: StepSink + ?Sized,
{
    if index == 0 || index >= seq.len() {
        return false;
    }
    let swapped = compare_swap_at(seq, index);
    sink.on_step(seq, index - 1, index);
    swapped
}

/// One left-to-right pass. Returns the number of swaps performed.
pub fn bubble_pass<S: StepSink + ?Sized>(seq: &mut Sequence, sink: &mut S) -> usize {
    (1..seq.len())
        .filter(|&index| bubble_step(seq, index, sink))
        .count()
}

/// `n - 1` passes, always, even when the sequence is already sorted.
/// Returns the total number of swaps.
pub fn bubble_sort<S: StepSink + ?Sized>(seq: &mut Sequence, sink: &mut S) -> usize {
    let passes = seq.len().saturating_sub(1);
    (0..passes).map(|_| bubble_pass(seq, sink)).sum()
}

// ---------------------------------------------------------------------------
// Merge sort
// ---------------------------------------------------------------------------

/// Sort the whole sequence with a top-down merge sort.
///
/// Returns the number of placements (steps) reported to `sink`.
pub fn merge_sort<S: StepSink + ?Sized>(seq: &mut Sequence, sink: &mut S) -> usize {
    let len = seq.len();
    sort_range(seq, 0, len, sink)
}

fn sort_range<S>(seq: &mut Sequence, lo: usize, hi: usize, sink: &mut S) -> usize
where
    S: StepSink + ?Sized,
{
    let len = hi - lo;
    if len < 2 {
        return 0;
    }
    let mid = lo + len / 2;
    let mut steps = sort_range(seq, lo, mid, sink);
    steps += sort_range(seq, mid, hi, sink);

    let left = seq.cells()[lo..mid].to_vec();
    let right = seq.cells()[mid..hi].to_vec();
    steps + merge(seq, lo, &left, &right, sink)
}

/// Stable two-pointer merge of `left` and `right` into `dst[start..]`.
///
/// Ties take the left element. Each placement highlights the destination slot
/// and the slot the element came from (left run first, right run after it).
pub fn merge<S: StepSink + ?Sized>(
    dst: &mut Sequence,
    start: usize,
    left: &[Cell],
    right: &[Cell],
    sink: &mut S,
) -> usize {
    let right_origin = start + left.len();
    let (mut i, mut j, mut k) = (0, 0, start);

    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            place(dst, k, left[i], start + i, sink);
            i += 1;
        } else {
            place(dst, k, right[j], right_origin + j, sink);
            j += 1;
        }
        k += 1;
    }
    while i < left.len() {
        place(dst, k, left[i], start + i, sink);
        i += 1;
        k += 1;
    }
    while j < right.len() {
        place(dst, k, right[j], right_origin + j, sink);
        j += 1;
        k += 1;
    }
    k - start
}

fn place<S>(dst: &mut Sequence, at: usize, cell: Cell, from: usize, sink: &mut S)
where
    S: StepSink + ?Sized,
{
    dst.set(at, cell);
    sink.on_step(dst, at, from);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every notification for inspection.
    #[derive(Default)]
    struct Recorder {
        highlights: Vec<(usize, usize)>,
        charts: Vec<Vec<u32>>,
    }

    impl StepSink for Recorder {
        fn highlight(&mut self, first: usize, second: usize) {
            self.highlights.push((first, second));
        }
        fn refresh_chart(&mut self, seq: &Sequence) {
            self.charts.push(seq.values());
        }
    }

    #[test]
    fn compare_swap_swaps_only_inversions() {
        let mut seq = Sequence::from(vec![5, 1, 1]);
        assert!(compare_swap_at(&mut seq, 1));
        assert_eq!(seq.values(), vec![1, 5, 1]);
        assert!(!compare_swap_at(&mut seq, 1));
        assert!(compare_swap_at(&mut seq, 2));
        assert_eq!(seq.values(), vec![1, 1, 5]);
    }

    #[test]
    fn compare_swap_out_of_range_is_noop() {
        let mut seq = Sequence::from(vec![2, 1]);
        assert!(!compare_swap_at(&mut seq, 0));
        assert!(!compare_swap_at(&mut seq, 2));
        assert_eq!(seq.values(), vec![2, 1]);
    }

    #[test]
    fn bubble_pass_moves_max_to_end() {
        let mut seq = Sequence::from(vec![5, 1, 4, 2]);
        let mut rec = Recorder::default();
        let swaps = bubble_pass(&mut seq, &mut rec);
        assert_eq!(swaps, 3);
        assert_eq!(seq.values(), vec![1, 4, 2, 5]);
        assert_eq!(rec.highlights, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(rec.charts.last().unwrap(), &vec![1, 4, 2, 5]);
    }

    #[test]
    fn bubble_sort_runs_every_pass() {
        let mut seq = Sequence::from(vec![5, 1, 4, 2]);
        let mut rec = Recorder::default();
        bubble_sort(&mut seq, &mut rec);
        assert_eq!(seq.values(), vec![1, 2, 4, 5]);
        // 3 passes x 3 comparisons, no early exit
        assert_eq!(rec.highlights.len(), 9);
    }

    #[test]
    fn bubble_sort_on_sorted_input_swaps_nothing() {
        let mut seq = Sequence::from(vec![1, 2, 2, 8, 9]);
        assert_eq!(bubble_sort(&mut seq, &mut NullSink), 0);
        assert_eq!(seq.values(), vec![1, 2, 2, 8, 9]);
    }

    #[test]
    fn bubble_sort_single_element() {
        let mut seq = Sequence::from(vec![7]);
        let mut rec = Recorder::default();
        assert_eq!(bubble_sort(&mut seq, &mut rec), 0);
        assert!(rec.highlights.is_empty());
    }

    #[test]
    fn merge_sort_example() {
        let mut seq = Sequence::from(vec![5, 1, 4, 2]);
        let mut rec = Recorder::default();
        let steps = merge_sort(&mut seq, &mut rec);
        assert_eq!(seq.values(), vec![1, 2, 4, 5]);
        // 2 + 2 placements for the halves, 4 for the final merge
        assert_eq!(steps, 8);
        assert_eq!(rec.charts[1], vec![1, 5, 4, 2]);
        assert_eq!(rec.charts[3], vec![1, 5, 2, 4]);
        assert_eq!(rec.charts.last().unwrap(), &vec![1, 2, 4, 5]);
    }

    #[test]
    fn merge_reports_source_slots() {
        let mut seq = Sequence::from(vec![1, 5, 2, 4]);
        let left = seq.cells()[0..2].to_vec();
        let right = seq.cells()[2..4].to_vec();
        let mut rec = Recorder::default();
        merge(&mut seq, 0, &left, &right, &mut rec);
        assert_eq!(rec.highlights, vec![(0, 0), (1, 2), (2, 3), (3, 1)]);
        assert_eq!(seq.values(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn merge_ties_take_left_first() {
        let mut seq = Sequence::from(vec![3, 3]);
        let mut rec = Recorder::default();
        merge_sort(&mut seq, &mut rec);
        assert_eq!(rec.highlights, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn merge_sort_sorted_input_keeps_order() {
        let mut seq = Sequence::from(vec![1, 2, 3, 4, 5, 6, 7]);
        let mut rec = Recorder::default();
        merge_sort(&mut seq, &mut rec);
        assert!(rec.highlights.iter().all(|&(to, from)| to == from));
        assert_eq!(seq.values(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn merge_sort_trivial_lengths() {
        let mut empty = Sequence::new();
        assert_eq!(merge_sort(&mut empty, &mut NullSink), 0);
        let mut one = Sequence::from(vec![4]);
        assert_eq!(merge_sort(&mut one, &mut NullSink), 0);
    }
}
