use std::cmp::Reverse;

use itertools::Itertools;

use crate::entities::Item;
use crate::prep::WorkItem;
use crate::util::knapsack::max_subset_sum;

/// Sorts the items by non-increasing width, then non-increasing height (later items first on full ties),
/// and assigns their canonical `idx`.
pub fn order_items(items: &[Item]) -> Vec<WorkItem> {
    items
        .iter()
        .sorted_by_key(|i| (Reverse(i.width), Reverse(i.height), Reverse(i.id)))
        .enumerate()
        .map(|(idx, i)| WorkItem {
            idx,
            id: i.id,
            width: i.width,
            height: i.height,
        })
        .collect()
}

/// Splits off the items that cannot share a column with any other item:
/// those whose width plus the smallest width exceeds `strip_width`.
/// Returns `(fixed, remaining)`, both in canonical order.
pub fn fix_items(items: Vec<WorkItem>, strip_width: usize) -> (Vec<WorkItem>, Vec<WorkItem>) {
    let Some(min_width) = items.iter().map(|i| i.width).min() else {
        return (vec![], vec![]);
    };
    items
        .into_iter()
        .partition(|i| i.width + min_width > strip_width)
}

/// Largest combined width of items placed side by side
pub fn reduce_width(items: &[WorkItem], strip_width: usize) -> usize {
    max_subset_sum(items.iter().map(|i| i.width), strip_width)
}

/// Grows every item whose width, combined with the widest attainable set of other items,
/// falls short of `width`. Such slack can never be filled in any packing.
/// Items are processed in order, later items see the widths already grown.
/// Returns the number of widened items.
pub fn widen_items(items: &mut [WorkItem], width: usize) -> usize {
    let mut n_widened = 0;
    for i in 0..items.len() {
        let w = items[i].width;
        let others = items
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, o)| o.width);
        let attainable = max_subset_sum(others, width.saturating_sub(w)) + w;
        if attainable < width {
            items[i].width += width - attainable;
            n_widened += 1;
        }
    }
    n_widened
}
