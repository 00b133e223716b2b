//! Array-backed binary heap maintenance shared by the sorter and the
//! priority queue.
//!
//! The heap lives in a plain slice: the children of index `i` sit at
//! `2i + 1` and `2i + 2`. Ordering is supplied by an `outranks`
//! predicate ("must `a` sit above `b`?") so the same sift routines
//! serve both max-ordering (sorting) and min-ordering (the queue).

/// Restore the heap property at `index`, assuming the subtrees below it
/// already satisfy it. Only positions `< bound` take part; anything at
/// or past `bound` is treated as outside the heap.
pub fn sift_down<T, F>(items: &mut [T], bound: usize, mut index: usize, outranks: F)
where
    F: Fn(&T, &T) -> bool,
{
    debug_assert!(bound <= items.len(), "heap bound exceeds storage");
    loop {
        let left = 2 * index + 1;
        let right = 2 * index + 2;
        let mut candidate = index;

        if left < bound && outranks(&items[left], &items[candidate]) {
            candidate = left;
        }
        if right < bound && outranks(&items[right], &items[candidate]) {
            candidate = right;
        }
        // Equal keys never swap, so ties keep their current positions.
        if candidate == index {
            return;
        }
        items.swap(index, candidate);
        index = candidate;
    }
}

/// Restore the heap property between `index` and its ancestors after the
/// element at `index` gained rank (was appended or had its key improved).
pub fn sift_up<T, F>(items: &mut [T], mut index: usize, outranks: F)
where
    F: Fn(&T, &T) -> bool,
{
    debug_assert!(index < items.len() || items.is_empty(), "index out of range");
    while index > 0 {
        let parent = (index - 1) / 2;
        if outranks(&items[index], &items[parent]) {
            items.swap(index, parent);
            index = parent;
        } else {
            return;
        }
    }
}

/// Establish the heap property over `items[..size]` bottom-up.
///
/// Visits every index from `size / 2` down to `0`; each visit sees
/// subtrees that are already valid heaps, which is what keeps the whole
/// pass O(size) rather than O(size log size).
pub fn build_heap<T, F>(items: &mut [T], size: usize, outranks: F)
where
    F: Fn(&T, &T) -> bool,
{
    debug_assert!(size <= items.len(), "heap size exceeds storage");
    for index in (0..=size / 2).rev() {
        sift_down(items, size, index, &outranks);
    }
}
