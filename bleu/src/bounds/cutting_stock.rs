use itertools::Itertools;
use log::debug;

use crate::bounds::lp::{CoveringLp, LowerBoundUnavailable, LpSolver};
use crate::prep::WorkItem;
use crate::util::FPA;
use crate::util::knapsack::knapsack_with_selection;

/// Relaxation where every item is cut into unit-height slices which can be placed in any
/// row independently. Rows are packed with patterns: sets of items whose widths fit side by side.
///
/// `min sum x_p  s.t.  sum_{p containing i} x_p >= h_i`, solved by column generation starting from
/// single-item patterns. New patterns are priced with a knapsack over the duals.
pub fn cutting_stock_bound<S: LpSolver + ?Sized>(
    items: &[WorkItem],
    width: usize,
    solver: &S,
    tolerance: f64,
    max_iterations: usize,
    max_cells: usize,
) -> Result<usize, LowerBoundUnavailable> {
    let widths = items.iter().map(|i| i.width).collect_vec();
    let mut patterns: Vec<Vec<usize>> = (0..items.len()).map(|i| vec![i]).collect();

    for iteration in 0..max_iterations {
        let lp = master_problem(items, &patterns);
        if lp.n_cells() > max_cells {
            return Err(LowerBoundUnavailable::TooLarge {
                cells: lp.n_cells(),
                limit: max_cells,
            });
        }
        let solution = solver.solve(&lp)?;

        let (value, mut pattern) =
            knapsack_with_selection(&solution.duals, &widths, width, tolerance);
        pattern.sort_unstable();

        if value <= 1.0 + tolerance || patterns.contains(&pattern) {
            debug!(
                "[LB] column generation converged after {iteration} rounds with {} patterns, objective {:.4}",
                patterns.len(),
                solution.objective
            );
            return Ok(FPA(solution.objective).ceil_within(tolerance));
        }
        patterns.push(pattern);
    }
    Err(LowerBoundUnavailable::IterationLimit(max_iterations))
}

fn master_problem(items: &[WorkItem], patterns: &[Vec<usize>]) -> CoveringLp {
    let rows = (0..items.len())
        .map(|i| {
            patterns
                .iter()
                .map(|p| if p.contains(&i) { 1.0 } else { 0.0 })
                .collect_vec()
        })
        .collect_vec();

    CoveringLp {
        objective: vec![1.0; patterns.len()],
        rows,
        rhs: items.iter().map(|i| i.height as f64).collect(),
    }
}
