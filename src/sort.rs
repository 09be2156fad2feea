//! Partition-based quicksort over a slice. Pending ranges live on an explicit
//! stack rather than the call stack, so badly chosen pivots cost time but
//! never depth.

use std::cmp::Ordering;

use crate::array_list::ArrayList;

/// Sorts `items` in ascending order according to `cmp`. Not stable.
pub(crate) fn quick_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // half-open [start, end) ranges still waiting to be partitioned
    let mut todo = ArrayList::new();
    todo.append((0, items.len()));

    while let Some((start, end)) = todo.pop() {
        if end - start <= 1 {
            continue;
        }

        let p = partition(items, start, end, &mut cmp);

        todo.append((start, p));
        todo.append((p + 1, end));
    }
}

/// Partitions `items[start..end]` around a pivot and returns the pivot's final
/// index. Everything left of it compares less than or equal to the pivot,
/// everything right of it greater.
fn partition<T, F>(items: &mut [T], start: usize, end: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    // the middle element makes a better pivot than the first on inputs that
    // are already mostly in order
    items.swap(start, start + (end - start) / 2);

    // sweep everything greater than the pivot to the back of the range
    let mut next = end - 1;
    for i in (start + 1..end).rev() {
        if cmp(&items[i], &items[start]) == Ordering::Greater {
            items.swap(next, i);
            next -= 1;
        }
    }

    items.swap(start, next);
    next
}
