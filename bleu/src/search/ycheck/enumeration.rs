use std::cmp::Reverse;

use itertools::Itertools;

use crate::search::Outcome;
use crate::search::ycheck::Unit;

/// Rectangle with a fixed x-interval whose y-coordinate is to be determined
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub idx: usize,
    pub x: usize,
    pub width: usize,
    pub height: usize,
}

impl Slot {
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    fn same_shape(&self, other: &Slot) -> bool {
        self.x == other.x && self.width == other.width && self.height == other.height
    }
}

impl From<&Unit> for Slot {
    fn from(u: &Unit) -> Self {
        Self {
            idx: u.idx,
            x: u.x,
            width: u.width,
            height: u.height,
        }
    }
}

#[derive(Clone, Debug)]
struct YNode {
    occupied: Vec<usize>,
    /// Slots still to be placed, by descending x then descending idx
    remaining: Vec<usize>,
    packed: Vec<usize>,
    ys: Vec<Option<usize>>,
}

/// Depth-first enumeration of the y-coordinates of slots with fixed x-intervals.
///
/// Every node fills the niche: the leftmost maximal run of columns at the lowest height.
/// Either a slot lying entirely within the niche is put on its floor, or the niche is raised
/// to the lower of its two walls.
pub struct Enumeration<'a> {
    slots: &'a [Slot],
    bin_width: usize,
    bin_height: usize,
    budget: usize,
}

impl<'a> Enumeration<'a> {
    pub fn new(slots: &'a [Slot], bin_width: usize, bin_height: usize, budget: usize) -> Self {
        Self {
            slots,
            bin_width,
            bin_height,
            budget,
        }
    }

    /// Returns the outcome, holding the y-coordinate of every slot if feasible, and the number of expanded nodes
    pub fn run(&self) -> (Outcome<Vec<usize>>, usize) {
        if self.bin_width == 0 {
            return (Outcome::Infeasible, 0);
        }
        let n = self.slots.len();
        let root = YNode {
            occupied: vec![0; self.bin_width],
            remaining: (0..n)
                .sorted_by_key(|&s| (Reverse(self.slots[s].x), Reverse(self.slots[s].idx)))
                .collect(),
            packed: vec![],
            ys: vec![None; n],
        };

        let mut stack = vec![root];
        let mut n_expanded = 0;
        while let Some(node) = stack.pop() {
            if node.remaining.is_empty() {
                if let Some(ys) = node.ys.iter().copied().collect::<Option<Vec<_>>>() {
                    return (Outcome::Feasible(ys), n_expanded);
                }
                continue;
            }
            if self.fathomed(&node) {
                continue;
            }
            if n_expanded >= self.budget {
                return (Outcome::Pending, n_expanded);
            }
            n_expanded += 1;
            self.branch(&node, &mut stack);
        }
        (Outcome::Infeasible, n_expanded)
    }

    fn fathomed(&self, node: &YNode) -> bool {
        self.overloaded(node) || self.twin_remains(node) || self.stacked_out_of_order(node)
    }

    /// Some column cannot hold all remaining slots crossing it
    fn overloaded(&self, node: &YNode) -> bool {
        let mut delta = vec![0isize; self.bin_width + 1];
        for &r in &node.remaining {
            let s = &self.slots[r];
            delta[s.x] += s.height as isize;
            delta[s.right()] -= s.height as isize;
        }
        let mut load = 0;
        node.occupied.iter().zip(delta).any(|(&occ, d)| {
            load += d;
            occ as isize + load > self.bin_height as isize
        })
    }

    /// The last placed slot has an identical twin with a smaller idx still remaining
    fn twin_remains(&self, node: &YNode) -> bool {
        let Some(&last) = node.packed.last() else {
            return false;
        };
        let last = &self.slots[last];
        node.remaining.iter().any(|&r| {
            let s = &self.slots[r];
            s.same_shape(last) && s.idx < last.idx
        })
    }

    /// The last placed slot sits directly on top of a slot with the same x-interval and a larger idx:
    /// the swapped stack is explored elsewhere.
    fn stacked_out_of_order(&self, node: &YNode) -> bool {
        let Some((&last, earlier)) = node.packed.split_last() else {
            return false;
        };
        let j = &self.slots[last];
        let top = node.occupied[j.x];
        earlier.iter().any(|&k| {
            let below = &self.slots[k];
            below.x == j.x
                && below.width == j.width
                && j.idx < below.idx
                && node.ys[k].is_some_and(|y| y + below.height + j.height == top)
        })
    }

    fn branch(&self, node: &YNode, stack: &mut Vec<YNode>) {
        let h_max = self.bin_height;
        let Some((start, &floor)) = node.occupied.iter().enumerate().min_by_key(|(_, o)| **o)
        else {
            return;
        };
        let end = (start..self.bin_width)
            .take_while(|&c| node.occupied[c] == floor)
            .last()
            .unwrap_or(start);
        let left_wall = match start {
            0 => h_max,
            _ => node.occupied[start - 1],
        };
        let right_wall = match end + 1 == self.bin_width {
            true => h_max,
            false => node.occupied[end + 1],
        };
        let lowest_wall = left_wall.min(right_wall);

        let in_niche = node
            .remaining
            .iter()
            .copied()
            .filter(|&r| self.slots[r].x >= start && self.slots[r].right() <= end + 1)
            .collect_vec();

        let mut children = vec![];
        let mut raise_needed = true;
        for &r in &in_niche {
            let s = &self.slots[r];
            //a lower slot to the left could take this floor position first
            let dominated = s.x > start
                && in_niche.iter().any(|&o| {
                    let other = &self.slots[o];
                    o != r
                        && other.right() <= s.x
                        && other.height <= (left_wall - floor).min(s.height)
                });
            if dominated {
                continue;
            }
            let mut child = node.clone();
            child.occupied[s.x..s.right()]
                .iter_mut()
                .for_each(|o| *o += s.height);
            child.ys[r] = Some(floor);
            child.remaining.retain(|&o| o != r);
            child.packed.push(r);
            children.push(child);
            if floor + s.height <= lowest_wall {
                raise_needed = false;
            }
        }
        if raise_needed {
            let mut child = node.clone();
            child.occupied[start..=end]
                .iter_mut()
                .for_each(|o| *o = lowest_wall);
            children.push(child);
        }
        stack.extend(children.into_iter().rev());
    }
}
