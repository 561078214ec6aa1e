use crate::entities::Coord;
use crate::prep::WorkItem;
use crate::util::assertions::columns_within_height;

/// Node of the column-assignment search.
///
/// Items are referred to by their position in the item slice of the search, which is sorted by `idx`.
/// Nodes are never shared: every child is an independent copy of its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnNode {
    pub trial_height: usize,
    /// Stacked height per column; a column at `trial_height` is closed
    pub occupied: Vec<usize>,
    /// Largest item placed with its left edge in each column
    pub max_item: Vec<Option<usize>>,
    /// Items still to be placed, ascending
    pub remaining: Vec<usize>,
    /// Placed items, in placement order
    pub packed: Vec<usize>,
    pub positions: Vec<Option<Coord>>,
    /// First column which is not closed, never decreases along a path
    pub leftmost_open: usize,
}

impl ColumnNode {
    pub fn root(n_items: usize, bin_width: usize, trial_height: usize) -> Self {
        Self {
            trial_height,
            occupied: vec![0; bin_width],
            max_item: vec![None; bin_width],
            remaining: (0..n_items).collect(),
            packed: vec![],
            positions: vec![None; n_items],
            leftmost_open: 0,
        }
    }

    pub fn bin_width(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Free area left in all columns
    pub fn free_area(&self) -> usize {
        self.occupied.iter().map(|o| self.trial_height - o).sum()
    }

    /// Closes the leftmost open column without placing anything in it.
    /// Only sensible if the column already holds something.
    pub fn close_column(&self) -> Self {
        let mut child = self.clone();
        child.occupied[self.leftmost_open] = self.trial_height;
        child.advance_open_column();
        child
    }

    /// Places item `k` with its left edge in the leftmost open column, on top of what is stacked there.
    /// Returns `None` if the item does not fit or would break the canonical order of the column.
    pub fn place(&self, items: &[WorkItem], k: usize) -> Option<Self> {
        let (c, h_max) = (self.leftmost_open, self.trial_height);
        let item = &items[k];
        let span = c..c + item.width;
        if span.end > self.bin_width()
            || self.max_item[c].is_some_and(|m| m > k)
            || self.occupied[span.clone()].iter().any(|o| o + item.height > h_max)
        {
            return None;
        }
        //columns which cannot fit the smallest other remaining item on top of this one are closed
        let min_other_height = self
            .remaining
            .iter()
            .filter(|&&r| r != k)
            .map(|&r| items[r].height)
            .min();

        let mut child = self.clone();
        child.positions[k] = Some(Coord::new(c, self.occupied[c]));
        child.max_item[c] = Some(k);
        child.packed.push(k);
        child.remaining.retain(|&r| r != k);
        for col in span {
            let stacked = self.occupied[col] + item.height;
            child.occupied[col] = match min_other_height {
                Some(min_h) if stacked + min_h <= h_max => stacked,
                _ => h_max,
            };
        }
        child.advance_open_column();
        debug_assert!(columns_within_height(&child.occupied, h_max));
        Some(child)
    }

    fn advance_open_column(&mut self) {
        while self.leftmost_open < self.bin_width()
            && self.occupied[self.leftmost_open] >= self.trial_height
        {
            self.leftmost_open += 1;
        }
    }
}
