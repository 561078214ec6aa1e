use itertools::Itertools;

use crate::bounds::lp::{CoveringLp, LowerBoundUnavailable, LpSolver};
use crate::prep::WorkItem;
use crate::util::FPA;
use crate::util::knapsack::reachable_sums;

/// Relaxation as parallel machines with contiguity: every column is a machine and every item a job
/// that occupies `w` consecutive machines for `h` time units, ignoring the order of the jobs on a machine.
///
/// Each item chooses its normal pattern positions fractionally (total weight one) and the load of every
/// column is bounded by `z`, which is minimized.
pub fn contiguous_bound<S: LpSolver + ?Sized>(
    items: &[WorkItem],
    width: usize,
    solver: &S,
    tolerance: f64,
    max_cells: usize,
) -> Result<usize, LowerBoundUnavailable> {
    let positions = items
        .iter()
        .enumerate()
        .map(|(j, item)| {
            let others = items
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != j)
                .map(|(_, o)| o.width);
            reachable_sums(others, width.saturating_sub(item.width))
        })
        .collect_vec();

    //variable 0 is the makespan z, followed by one variable per (item, position)
    let vars = std::iter::once(None)
        .chain(
            positions
                .iter()
                .enumerate()
                .flat_map(|(j, ps)| ps.iter().map(move |&p| Some((j, p)))),
        )
        .collect_vec();

    let cells = vars.len() * (items.len() + width);
    if cells > max_cells {
        return Err(LowerBoundUnavailable::TooLarge {
            cells,
            limit: max_cells,
        });
    }

    let item_rows = (0..items.len()).map(|i| {
        vars.iter()
            .map(|v| match v {
                Some((j, _)) if *j == i => 1.0,
                _ => 0.0,
            })
            .collect_vec()
    });
    let column_rows = (0..width).map(|q| {
        vars.iter()
            .map(|v| match v {
                None => 1.0,
                Some((j, p)) if *p <= q && q < p + items[*j].width => -(items[*j].height as f64),
                Some(_) => 0.0,
            })
            .collect_vec()
    });

    let lp = CoveringLp {
        objective: vars.iter().map(|v| if v.is_none() { 1.0 } else { 0.0 }).collect(),
        rows: item_rows.chain(column_rows).collect(),
        rhs: std::iter::repeat_n(1.0, items.len())
            .chain(std::iter::repeat_n(0.0, width))
            .collect(),
    };
    let solution = solver.solve(&lp)?;

    Ok(FPA(solution.objective).ceil_within(tolerance))
}
