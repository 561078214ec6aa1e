mod area;
mod contiguous;
mod cutting_stock;
mod dff;
mod l_shape;

/// Linear programming collaborator used by the LP-based bounds
pub mod lp;

use log::{info, warn};

use crate::entities::Instance;
use crate::prep::{Preprocessed, preprocess};
use crate::util::BleuConfig;

#[doc(inline)]
pub use area::area_bound;
#[doc(inline)]
pub use contiguous::contiguous_bound;
#[doc(inline)]
pub use cutting_stock::cutting_stock_bound;
#[doc(inline)]
pub use dff::{clipping_bound, dff_bound, doubling_bound, scaling_bound};
#[doc(inline)]
pub use l_shape::l_shape_bound;

use lp::{DenseSimplex, LowerBoundUnavailable, LpSolver};

/// Values of all lower bounds on the height needed by the items which share columns.
/// A bound is `None` when it was disabled or could not be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LowerBoundReport {
    pub area: usize,
    pub dff: Option<usize>,
    pub l_shape: Option<usize>,
    pub cutting_stock: Option<usize>,
    pub contiguous: Option<usize>,
    /// Height of the fixed items, stacked below everything else
    pub fixed_height: usize,
}

impl LowerBoundReport {
    /// Best lower bound on the height of the strip
    pub fn best(&self) -> usize {
        let best = [self.dff, self.l_shape, self.cutting_stock, self.contiguous]
            .into_iter()
            .flatten()
            .fold(self.area, usize::max);
        best + self.fixed_height
    }
}

/// Computes every enabled lower bound for the preprocessed items.
/// LP-based bounds are computed with `solver`; without one, or when solving fails,
/// only the combinatorial bounds are reported.
pub fn compute_bounds(
    prep: &Preprocessed,
    config: &BleuConfig,
    solver: Option<&dyn LpSolver>,
) -> LowerBoundReport {
    let mut report = LowerBoundReport {
        fixed_height: prep.fixed_height,
        ..Default::default()
    };
    if prep.items.is_empty() {
        return report;
    }
    let (items, width) = (prep.items.as_slice(), prep.effective_width);
    let bc = config.bounds;

    report.area = area_bound(items, width);
    if bc.dff {
        report.dff = Some(dff_bound(items, width));
    }
    if bc.l_shape {
        let start = report.area.max(report.dff.unwrap_or(0));
        report.l_shape = Some(l_shape_bound(items, width, start));
    }
    if bc.cutting_stock {
        let result = solver
            .ok_or(LowerBoundUnavailable::NoSolver)
            .and_then(|s| {
                cutting_stock_bound(
                    items,
                    width,
                    s,
                    config.tolerance,
                    bc.max_column_generation_iterations,
                    bc.max_lp_cells,
                )
            });
        report.cutting_stock = available("cutting stock", result);
    }
    if bc.contiguous {
        let result = solver
            .ok_or(LowerBoundUnavailable::NoSolver)
            .and_then(|s| contiguous_bound(items, width, s, config.tolerance, bc.max_lp_cells));
        report.contiguous = available("contiguous", result);
    }

    info!(
        "[LB] area: {}, dff: {:?}, l-shape: {:?}, cutting stock: {:?}, contiguous: {:?} (+{} fixed) => {}",
        report.area,
        report.dff,
        report.l_shape,
        report.cutting_stock,
        report.contiguous,
        report.fixed_height,
        report.best()
    );
    report
}

fn available(name: &str, result: Result<usize, LowerBoundUnavailable>) -> Option<usize> {
    match result {
        Ok(bound) => Some(bound),
        Err(reason) => {
            warn!("[LB] {name} bound unavailable: {reason}");
            None
        }
    }
}

/// Best lower bound on the minimum strip height of `instance`, using the default configuration
/// and the built-in [`DenseSimplex`] for the LP-based bounds.
pub fn compute_lower_bound(instance: &Instance) -> usize {
    let prep = preprocess(instance);
    compute_bounds(&prep, &BleuConfig::default(), Some(&DenseSimplex::default())).best()
}
