mod enumeration;
mod reduce;
mod unit;

use itertools::Itertools;
use log::trace;
use slotmap::SlotMap;

use crate::entities::Coord;
use crate::prep::WorkItem;
use crate::search::{Outcome, SearchContext};
use crate::util::assertions::packing_is_valid;

#[doc(inline)]
pub use enumeration::{Enumeration, Slot};
#[doc(inline)]
pub use reduce::{compress_columns, lift_units, merge_units};
#[doc(inline)]
pub use unit::{Content, Member, Unit, UnitKey};

/// Decides whether a complete column assignment can be turned into a packing
/// by choosing the y-coordinate of every item.
///
/// The assignment is first reduced: units that provably fit next to a taller unit are merged into it,
/// units are stretched up to their neighbours and columns crossed by the same units are collapsed.
/// The reduced assignment is then enumerated.
pub struct YCheck<'a> {
    items: &'a [WorkItem],
    bin_width: usize,
    bin_height: usize,
    budget: usize,
}

impl<'a> YCheck<'a> {
    pub fn new(items: &'a [WorkItem], bin_width: usize, bin_height: usize, budget: usize) -> Self {
        Self {
            items,
            bin_width,
            bin_height,
            budget,
        }
    }

    /// Returns the y-coordinate of every item, or `None` if no packing exists for the assignment `xs`.
    /// A rejection caused by the node budget raises the node limit flag of `ctx`.
    pub fn run(&self, xs: &[usize], ctx: &mut SearchContext) -> Option<Vec<usize>> {
        debug_assert_eq!(xs.len(), self.items.len());
        let mut units = SlotMap::with_key();
        for (k, (item, &x)) in self.items.iter().zip(xs).enumerate() {
            units.insert(Unit::simple(k, item.idx, x, item.width, item.height));
        }

        merge_units(&mut units, self.bin_width, self.budget, &mut ctx.stats);
        lift_units(&mut units, self.bin_width);
        let width = compress_columns(&mut units, self.bin_width);

        let keys = units.keys().collect_vec();
        let slots = keys.iter().map(|&k| Slot::from(&units[k])).collect_vec();
        let (outcome, n_nodes) = Enumeration::new(&slots, width, self.bin_height, self.budget).run();
        ctx.stats.y_check_nodes += n_nodes;

        match outcome {
            Outcome::Feasible(unit_ys) => {
                let mut ys = vec![0; self.items.len()];
                for (&key, unit_y) in keys.iter().zip(unit_ys) {
                    for member in units[key].members() {
                        ys[member.item] = unit_y + member.dy;
                    }
                }
                debug_assert!(self.is_packing(xs, &ys));
                Some(ys)
            }
            Outcome::Infeasible => None,
            Outcome::Pending => {
                trace!("[YC] enumeration ran out of nodes, assignment rejected");
                ctx.node_limit_reached = true;
                None
            }
        }
    }

    fn is_packing(&self, xs: &[usize], ys: &[usize]) -> bool {
        let positions = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| Coord::new(x, y))
            .collect_vec();
        let dims = self
            .items
            .iter()
            .map(|i| (i.width, i.height))
            .collect_vec();
        packing_is_valid(&positions, &dims, self.bin_width, self.bin_height)
    }
}
