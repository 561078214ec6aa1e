//! All functions in this module are 0/1 dynamic programs over integer weights,
//! running in `O(capacity * n)` time.

use float_cmp::approx_eq;

/// Table of the subset sums of `weights` that can be reached without exceeding `capacity`.
/// `reach[c]` is true iff some subset sums to exactly `c`.
fn reachability(weights: impl IntoIterator<Item = usize>, capacity: usize) -> Vec<bool> {
    let mut reach = vec![false; capacity + 1];
    reach[0] = true;
    for w in weights {
        if w > capacity {
            continue;
        }
        for c in (w..=capacity).rev() {
            if reach[c - w] {
                reach[c] = true;
            }
        }
    }
    reach
}

/// Largest sum of a subset of `weights` that does not exceed `capacity`
pub fn max_subset_sum(weights: impl IntoIterator<Item = usize>, capacity: usize) -> usize {
    let reach = reachability(weights, capacity);
    (0..=capacity).rev().find(|&c| reach[c]).unwrap_or(0)
}

/// All subset sums of `weights` up to `capacity`, in ascending order.
/// These are the normal pattern coordinates: the positions an item can take
/// when everything to its left is pushed against the origin.
pub fn reachable_sums(weights: impl IntoIterator<Item = usize>, capacity: usize) -> Vec<usize> {
    reachability(weights, capacity)
        .into_iter()
        .enumerate()
        .filter_map(|(c, r)| r.then_some(c))
        .collect()
}

/// Entry `j` holds the largest subset sum not exceeding `capacity` using only `weights[0..=j]`.
pub fn prefix_profile(weights: &[usize], capacity: usize) -> Vec<usize> {
    let mut reach = vec![false; capacity + 1];
    reach[0] = true;
    let mut best = 0;
    weights
        .iter()
        .map(|&w| {
            if w <= capacity {
                for c in (w..=capacity).rev() {
                    if reach[c - w] && !reach[c] {
                        reach[c] = true;
                        best = best.max(c);
                    }
                }
            }
            best
        })
        .collect()
}

/// Solves the 0/1 knapsack problem with real valued profits.
/// Returns the optimal profit and the indices of one optimal selection, in descending order.
///
/// The selection is reconstructed by a backward scan over the DP table; stored totals are
/// compared within `tolerance` to absorb floating point accumulation.
pub fn knapsack_with_selection(
    values: &[f64],
    weights: &[usize],
    capacity: usize,
    tolerance: f64,
) -> (f64, Vec<usize>) {
    assert_eq!(values.len(), weights.len());
    let n = values.len();
    let cols = n + 1;
    // table[c * cols + j]: best profit with capacity c using the first j items
    let mut table = vec![0.0f64; (capacity + 1) * cols];
    for j in 1..=n {
        let (v, w) = (values[j - 1], weights[j - 1]);
        for c in 0..=capacity {
            let without = table[c * cols + j - 1];
            table[c * cols + j] = match w <= c {
                true => without.max(table[(c - w) * cols + j - 1] + v),
                false => without,
            };
        }
    }

    let optimum = table[capacity * cols + n];
    let mut selection = vec![];
    let mut remaining = optimum;
    let mut c = capacity;
    for j in (1..=n).rev() {
        if remaining <= tolerance {
            break;
        }
        if weights[j - 1] > c
            || approx_eq!(f64, table[c * cols + j - 1], remaining, epsilon = tolerance)
        {
            //item j - 1 is not needed to reach the remaining profit
            continue;
        }
        selection.push(j - 1);
        remaining -= values[j - 1];
        c -= weights[j - 1];
    }
    (optimum, selection)
}
