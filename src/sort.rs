//! In-place heap sort over any totally ordered element type.

use crate::heap::{build_heap, sift_down};

/// Sort `items` ascending in place.
///
/// Builds a max-heap over the whole slice, then repeatedly swaps the
/// current maximum into the shrinking tail and repairs the heap over
/// the remaining prefix. Empty and single-element slices fall out of
/// the loop bounds untouched.
pub fn heap_sort<T: Ord>(items: &mut [T]) {
    let size = items.len();
    build_heap(items, size, |a: &T, b: &T| a > b);

    for end in (1..size).rev() {
        // The root holds the largest element of items[..=end]; park it
        // at `end` and re-heap the prefix that excludes it.
        items.swap(0, end);
        sift_down(items, end, 0, |a: &T, b: &T| a > b);
    }
}
