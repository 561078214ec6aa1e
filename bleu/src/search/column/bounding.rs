use itertools::Itertools;

use crate::prep::WorkItem;
use crate::search::column::ColumnNode;
use crate::util::knapsack::prefix_profile;

/// Checks whether a node can be discarded without branching
pub fn fathomed(node: &ColumnNode, items: &[WorkItem]) -> bool {
    twin_remains(node, items) || area_exceeds(node, items) || dynamic_cut(node, items)
}

/// The last packed item has an identical twin with a smaller index that is still remaining.
/// Equal items are always packed in ascending order.
pub fn twin_remains(node: &ColumnNode, items: &[WorkItem]) -> bool {
    match node.packed.last() {
        Some(&last) => node
            .remaining
            .iter()
            .any(|&r| r < last && items[r].same_shape(&items[last])),
        None => false,
    }
}

/// The remaining items need more area than is left in the open columns
pub fn area_exceeds(node: &ColumnNode, items: &[WorkItem]) -> bool {
    let remaining_area: usize = node.remaining.iter().map(|&r| items[r].area()).sum();
    remaining_area > node.free_area()
}

/// Area argument on the staircase formed by the column heights.
///
/// Every step of the staircase defines a rectangle reaching to the right border and the top of the bin.
/// Its usable part is limited by the largest combination of remaining widths and heights that fits
/// in it; everything else is wasted. The node is discarded when, for some prefix of the remaining
/// items, the area left after subtracting the waste is smaller than the area of that prefix.
pub fn dynamic_cut(node: &ColumnNode, items: &[WorkItem]) -> bool {
    let (width, height) = (node.bin_width() as i64, node.trial_height as i64);

    let mut corners = vec![];
    let mut prev = height;
    for (col, &occ) in node.occupied.iter().enumerate() {
        let occ = occ as i64;
        if prev > occ {
            corners.push((col as i64, occ));
        }
        prev = occ;
    }
    let n_steps = corners.len();
    if n_steps == 0 || node.remaining.is_empty() {
        return false;
    }

    //step sizes (horizontal, vertical) and the rectangles spanned from every corner
    let mut step = vec![[0i64; 2]; n_steps];
    let mut rect = vec![[0i64; 2]; n_steps];
    for (i, &(x, y)) in corners.iter().enumerate() {
        rect[i] = [width - x, height - y];
        if i == 0 {
            step[i][1] = height - y;
        } else {
            let (px, py) = corners[i - 1];
            step[i - 1][0] = x - px;
            step[i][1] = py - y;
        }
        if i == n_steps - 1 {
            step[i][0] = width - x;
        }
    }
    let free_area: i64 = (0..n_steps).map(|i| rect[i][1] * step[i][0]).sum();

    let widths = node.remaining.iter().map(|&r| items[r].width).collect_vec();
    let heights = node.remaining.iter().map(|&r| items[r].height).collect_vec();
    let width_profiles = rect
        .iter()
        .map(|r| prefix_profile(&widths, r[0] as usize))
        .collect_vec();
    let height_profiles = rect
        .iter()
        .map(|r| prefix_profile(&heights, r[1] as usize))
        .collect_vec();

    let n_remaining = node.remaining.len();
    let mut prefix_area = 0;
    for (j, &r) in node.remaining.iter().enumerate() {
        prefix_area += items[r].area() as i64;
        //waste in both dimensions of every rectangle
        let gap = (0..n_steps)
            .map(|i| {
                [
                    rect[i][0] - width_profiles[i][j] as i64,
                    rect[i][1] - height_profiles[i][j] as i64,
                ]
            })
            .collect_vec();

        let mut waste = 0;
        for i in 0..n_steps {
            waste += step[i][0] * gap[i][1] + step[i][1] * gap[i][0] - gap[i][1] * gap[i][0];
            if i + 1 < n_steps {
                waste += gap[i][1] * gap[i + 1][0];
            }
        }

        //with fewer items than steps, some steps stay empty and their waste was overestimated
        let mut correction = 0;
        if n_remaining < n_steps {
            let corrections = (0..n_steps)
                .map(|i| {
                    let horizontal = match i + 1 < n_steps {
                        true => gap[i + 1][0] + step[i][0] - gap[i][0],
                        false => step[i][0] - gap[i][0],
                    };
                    let vertical = match i {
                        0 => step[0][1] - gap[0][1],
                        _ => gap[i - 1][1] + step[i][1] - gap[i][1],
                    };
                    horizontal * vertical
                })
                .sorted()
                .collect_vec();
            correction = corrections[..n_steps - n_remaining].iter().sum();
        }

        if free_area - (waste + correction) < prefix_area {
            return true;
        }
    }
    false
}
