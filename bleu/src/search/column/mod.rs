mod bounding;
mod node;

use log::{debug, trace};
use thousands::Separable;

use crate::entities::Coord;
use crate::prep::WorkItem;
use crate::search::ycheck::YCheck;
use crate::search::{Outcome, SearchContext};

#[doc(inline)]
pub use bounding::{area_exceeds, dynamic_cut, fathomed, twin_remains};
#[doc(inline)]
pub use node::ColumnNode;

/// What to do with a complete column assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafPolicy {
    /// Verify the assignment with the y-check, continue searching if it is rejected
    Verify { y_check_budget: usize },
    /// Accept the first complete assignment: decides the contiguous relaxation only
    Accept,
}

/// Depth-first search assigning every item to a contiguous range of columns.
///
/// Items are placed left to right: only the leftmost open column receives items, and it is either
/// filled further or closed. Within a column items are placed in ascending order.
pub struct ColumnSearch<'a> {
    /// Items to place, ascending by `idx`
    items: &'a [WorkItem],
    bin_width: usize,
    bin_height: usize,
    budget: usize,
    leaf_policy: LeafPolicy,
}

impl<'a> ColumnSearch<'a> {
    pub fn new(
        items: &'a [WorkItem],
        bin_width: usize,
        bin_height: usize,
        budget: usize,
        leaf_policy: LeafPolicy,
    ) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0].idx < w[1].idx));
        Self {
            items,
            bin_width,
            bin_height,
            budget,
            leaf_policy,
        }
    }

    /// Runs the search. A feasible outcome holds the position of every item (indexed as `items`).
    pub fn run(&self, ctx: &mut SearchContext) -> Outcome<Vec<Coord>> {
        if self.items.is_empty() {
            return Outcome::Feasible(vec![]);
        }
        let mut stack = vec![ColumnNode::root(
            self.items.len(),
            self.bin_width,
            self.bin_height,
        )];
        let mut n_expanded = 0;

        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                if let Some(positions) = self.resolve_leaf(&node, ctx) {
                    debug!(
                        "[BB] feasible after {} nodes",
                        n_expanded.separate_with_commas()
                    );
                    return Outcome::Feasible(positions);
                }
                continue;
            }
            if fathomed(&node, self.items) {
                ctx.stats.column_fathomed += 1;
                continue;
            }
            if n_expanded >= self.budget {
                debug!(
                    "[BB] node budget of {} exhausted",
                    self.budget.separate_with_commas()
                );
                return Outcome::Pending;
            }
            n_expanded += 1;
            ctx.stats.column_nodes += 1;
            self.branch(&node, &mut stack);
        }
        debug!(
            "[BB] infeasible after {} nodes",
            n_expanded.separate_with_commas()
        );
        Outcome::Infeasible
    }

    /// Children are pushed in reverse, so items are explored in ascending order
    /// and closing the column is explored last.
    fn branch(&self, node: &ColumnNode, stack: &mut Vec<ColumnNode>) {
        let c = node.leftmost_open;
        if c >= node.bin_width() {
            return;
        }
        if node.occupied[c] > 0 {
            stack.push(node.close_column());
        }
        let n_before = stack.len();
        stack.extend(
            node.remaining
                .iter()
                .rev()
                .filter_map(|&k| node.place(self.items, k)),
        );
        trace!(
            "[BB] column {c}: {} children (depth {})",
            stack.len() - n_before,
            node.packed.len()
        );
    }

    fn resolve_leaf(&self, node: &ColumnNode, ctx: &mut SearchContext) -> Option<Vec<Coord>> {
        let xs = node
            .positions
            .iter()
            .map(|p| p.map(|c| c.x))
            .collect::<Option<Vec<usize>>>()?;
        match self.leaf_policy {
            LeafPolicy::Accept => node.positions.iter().copied().collect(),
            LeafPolicy::Verify { y_check_budget } => {
                ctx.stats.y_checks += 1;
                let y_check = YCheck::new(self.items, self.bin_width, self.bin_height, y_check_budget);
                let ys = y_check.run(&xs, ctx)?;
                Some(
                    xs.into_iter()
                        .zip(ys)
                        .map(|(x, y)| Coord::new(x, y))
                        .collect(),
                )
            }
        }
    }
}
