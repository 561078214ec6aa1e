use std::time::Instant;

use crate::entities::{Instance, Packing};
use crate::io::ext_repr::{ExtPlacement, ExtSolution, ExtStatus};
use crate::search::{Exactness, Outcome};
use crate::solver::{Evaluation, HeightSearchReport, HeightSearchStatus};

/// Exports an evaluation out of the library
pub fn export(
    instance: &Instance,
    evaluation: &Evaluation,
    lower_bound: usize,
    epoch: Instant,
) -> ExtSolution {
    let (status, positions) = match &evaluation.decision {
        Outcome::Feasible(packing) => (ExtStatus::Feasible, export_packing(instance, packing)),
        Outcome::Infeasible => (ExtStatus::Infeasible, vec![]),
        Outcome::Pending => (ExtStatus::Pending, vec![]),
    };
    ExtSolution {
        height: evaluation.height as u64,
        status,
        positions,
        lower_bound: lower_bound as u64,
        exact: evaluation.exactness == Exactness::Exact,
        run_time_ms: epoch.elapsed().as_millis() as u64,
    }
}

/// Exports the outcome of a height minimization out of the library.
/// Without a solution, the reported height is the best lower bound.
pub fn export_height_search(
    instance: &Instance,
    report: &HeightSearchReport,
    epoch: Instant,
) -> ExtSolution {
    let (height, status, positions) = match (&report.solution, report.status) {
        (Some((height, packing)), _) => (
            *height,
            ExtStatus::Feasible,
            export_packing(instance, packing),
        ),
        (None, HeightSearchStatus::TimeLimit) => (report.lower_bound, ExtStatus::TimeLimit, vec![]),
        (None, _) => (report.lower_bound, ExtStatus::Pending, vec![]),
    };
    ExtSolution {
        height: height as u64,
        status,
        positions,
        lower_bound: report.lower_bound as u64,
        exact: report.status == HeightSearchStatus::Optimal,
        run_time_ms: epoch.elapsed().as_millis() as u64,
    }
}

fn export_packing(instance: &Instance, packing: &Packing) -> Vec<ExtPlacement> {
    instance
        .items()
        .iter()
        .map(|item| {
            let pos = packing.position(item.id);
            let (width, height) = packing.dims[item.id];
            ExtPlacement {
                id: item.id as u64,
                x: pos.x as u64,
                y: pos.y as u64,
                width: width as u64,
                height: height as u64,
            }
        })
        .collect()
}
