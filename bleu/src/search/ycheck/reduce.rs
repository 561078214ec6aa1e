use std::cmp::Reverse;

use itertools::Itertools;
use log::trace;
use slotmap::SlotMap;

use crate::search::Outcome;
use crate::search::SearchStats;
use crate::search::ycheck::enumeration::{Enumeration, Slot};
use crate::search::ycheck::{Unit, UnitKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Units to absorb into a host, with their offsets above the bottom of the host
struct Merge {
    side: Side,
    boundary: usize,
    absorbed: Vec<(UnitKey, usize)>,
}

/// Repeatedly merges a unit with all units on one side of it, up to some column boundary,
/// whenever those units provably fit next to it within its height.
/// The merged unit spans the host and the absorbed units.
pub fn merge_units(
    units: &mut SlotMap<UnitKey, Unit>,
    bin_width: usize,
    budget: usize,
    stats: &mut SearchStats,
) {
    loop {
        let order = units
            .iter()
            .sorted_by_key(|(_, u)| (Reverse(u.x), Reverse(u.idx)))
            .map(|(k, _)| k)
            .collect_vec();

        let merge = order.into_iter().find_map(|host| {
            [Side::Left, Side::Right]
                .into_iter()
                .find_map(|side| find_merge(units, host, side, bin_width, budget, stats))
                .map(|m| (host, m))
        });
        let Some((host, merge)) = merge else {
            return;
        };

        let absorbed = merge
            .absorbed
            .iter()
            .filter_map(|&(k, dy)| units.remove(k).map(|u| (u, dy)))
            .collect_vec();
        stats.merges += absorbed.len();
        let host_unit = &mut units[host];
        for (unit, dy) in &absorbed {
            host_unit.absorb(unit, *dy);
        }
        match merge.side {
            Side::Left => {
                host_unit.width += host_unit.x - merge.boundary;
                host_unit.x = merge.boundary;
            }
            Side::Right => host_unit.width = merge.boundary - host_unit.x,
        }
        trace!(
            "[YC] merged {} units into unit {} spanning [{}, {})",
            absorbed.len(),
            host_unit.idx,
            host_unit.x,
            host_unit.right()
        );
    }
}

fn find_merge(
    units: &SlotMap<UnitKey, Unit>,
    host_key: UnitKey,
    side: Side,
    bin_width: usize,
    budget: usize,
    stats: &mut SearchStats,
) -> Option<Merge> {
    let host = &units[host_key];
    let neighbours = units
        .iter()
        .filter(|(k, u)| {
            *k != host_key
                && match side {
                    Side::Left => u.left_of(host),
                    Side::Right => host.left_of(u),
                }
        })
        .collect_vec();
    if neighbours.is_empty() {
        return None;
    }
    let cuts_a_unit = |c: usize| neighbours.iter().any(|(_, u)| u.x < c && c < u.right());

    let boundaries = match side {
        Side::Left => std::iter::once(0)
            .chain(neighbours.iter().map(|(_, u)| u.x))
            .unique()
            .sorted()
            .filter(|&c| c < host.x && !cuts_a_unit(c))
            .collect_vec(),
        Side::Right => std::iter::once(bin_width)
            .chain(neighbours.iter().map(|(_, u)| u.right()))
            .unique()
            .sorted_by_key(|&c| Reverse(c))
            .filter(|&c| c > host.right() && !cuts_a_unit(c))
            .collect_vec(),
    };

    for boundary in boundaries {
        let between = neighbours
            .iter()
            .filter(|(_, u)| match side {
                Side::Left => u.x >= boundary,
                Side::Right => u.right() <= boundary,
            })
            .collect_vec();
        if between.is_empty() || between.iter().any(|(_, u)| u.height > host.height) {
            continue;
        }
        let (offset, gap) = match side {
            Side::Left => (boundary, host.x - boundary),
            Side::Right => (host.right(), boundary - host.right()),
        };
        let slots = between
            .iter()
            .map(|(_, u)| Slot {
                x: u.x - offset,
                ..Slot::from(*u)
            })
            .collect_vec();

        let (outcome, n_nodes) = Enumeration::new(&slots, gap, host.height, budget).run();
        stats.y_check_nodes += n_nodes;
        //a pending enumeration simply means the units are not merged
        if let Outcome::Feasible(ys) = outcome {
            return Some(Merge {
                side,
                boundary,
                absorbed: between.iter().map(|(k, _)| *k).zip(ys).collect(),
            });
        }
    }
    None
}

/// Stretches every unit horizontally up to its nearest neighbours on both sides.
/// Units are processed by ascending width, height and idx.
pub fn lift_units(units: &mut SlotMap<UnitKey, Unit>, bin_width: usize) {
    let order = units
        .iter()
        .sorted_by_key(|(_, u)| (u.width, u.height, u.idx))
        .map(|(k, _)| k)
        .collect_vec();

    for key in order {
        let unit = &units[key];
        let left = units
            .values()
            .filter(|o| o.left_of(unit))
            .map(Unit::right)
            .max()
            .unwrap_or(0);
        let right = units
            .values()
            .filter(|o| unit.left_of(o))
            .map(|o| o.x)
            .min()
            .unwrap_or(bin_width);
        let unit = &mut units[key];
        unit.x = left;
        unit.width = right - left;
    }
}

/// Collapses runs of adjacent columns crossed by exactly the same units into a single column.
/// Returns the new bin width.
pub fn compress_columns(units: &mut SlotMap<UnitKey, Unit>, bin_width: usize) -> usize {
    let mut occupants = vec![vec![]; bin_width];
    for (key, unit) in units.iter() {
        for column in &mut occupants[unit.x..unit.right()] {
            column.push(key);
        }
    }
    let mut new_column = Vec::with_capacity(bin_width);
    let mut n_columns = 0;
    for c in 0..bin_width {
        if c == 0 || occupants[c] != occupants[c - 1] {
            n_columns += 1;
        }
        new_column.push(n_columns - 1);
    }
    for unit in units.values_mut() {
        let (start, end) = (new_column[unit.x], new_column[unit.right() - 1]);
        unit.x = start;
        unit.width = end - start + 1;
    }
    n_columns
}
