use crate::prep::WorkItem;
use crate::util::knapsack::max_subset_sum;

/// Reduction of the preprocessed items for one specific trial height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightReduction {
    /// Items left for the column search, with their heights grown where slack can never be used
    pub items: Vec<WorkItem>,
    /// Items which cannot share a column with any other item height-wise.
    /// They are placed side by side at the right of the search area.
    pub dropped: Vec<WorkItem>,
    /// Width left for the column search
    pub bin_width: usize,
    pub bin_height: usize,
}

/// Height counterpart of the width reductions, for a bin of `bin_width x bin_height`.
/// Returns `None` when the trial height is provably infeasible.
pub fn reduce_for_height(
    items: &[WorkItem],
    bin_height: usize,
    bin_width: usize,
) -> Option<HeightReduction> {
    if items.iter().any(|i| i.height > bin_height) {
        return None;
    }
    let mut items = items.to_vec();
    for i in 0..items.len() {
        let h = items[i].height;
        let others = items
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, o)| o.height);
        let attainable = max_subset_sum(others, bin_height - h) + h;
        if attainable < bin_height {
            items[i].height += bin_height - attainable;
        }
    }

    let min_height = items.iter().map(|i| i.height).min().unwrap_or(0);
    let (dropped, kept): (Vec<_>, Vec<_>) = items
        .into_iter()
        .partition(|i| i.height + min_height > bin_height);

    let dropped_width: usize = dropped.iter().map(|i| i.width).sum();
    let bin_width = bin_width.checked_sub(dropped_width)?;

    Some(HeightReduction {
        items: kept,
        dropped,
        bin_width,
        bin_height,
    })
}
