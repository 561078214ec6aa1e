use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info, warn};
use thousands::Separable;

use crate::bounds::lp::{DenseSimplex, LpSolver};
use crate::bounds::{LowerBoundReport, compute_bounds};
use crate::entities::{Coord, Instance, InvalidInstance, Packing};
use crate::prep::{Preprocessed, WorkItem, preprocess, reduce_for_height};
use crate::search::column::{ColumnSearch, LeafPolicy};
use crate::search::{Exactness, Outcome, SearchContext, SearchStats};
use crate::util::knapsack::reachable_sums;
use crate::util::{BleuConfig, BoundsConfig, FPA};

/// Outcome of a feasibility decision for one trial height
pub type Decision = Outcome<Packing>;

/// Result of [`Bleu::evaluate`]
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub height: usize,
    pub decision: Decision,
    pub exactness: Exactness,
    pub stats: SearchStats,
}

/// Exact decision procedure for a single instance.
///
/// Construction orders the items, applies the width reductions and computes the lower bounds once.
/// Every trial height is then decided independently by [`Bleu::evaluate`].
pub struct Bleu {
    instance: Instance,
    config: BleuConfig,
    prep: Preprocessed,
    bounds: LowerBoundReport,
}

impl Bleu {
    /// Uses the built-in [`DenseSimplex`] for the LP-based lower bounds
    pub fn new(instance: Instance, config: BleuConfig) -> Self {
        Self::with_lp_solver(instance, config, Some(&DenseSimplex::default()))
    }

    /// Without a solver only the combinatorial lower bounds are computed
    pub fn with_lp_solver(
        instance: Instance,
        config: BleuConfig,
        lp_solver: Option<&dyn LpSolver>,
    ) -> Self {
        let prep = preprocess(&instance);
        let bounds = compute_bounds(&prep, &config, lp_solver);
        Self {
            instance,
            config,
            prep,
            bounds,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn config(&self) -> &BleuConfig {
        &self.config
    }

    pub fn preprocessed(&self) -> &Preprocessed {
        &self.prep
    }

    pub fn bounds(&self) -> &LowerBoundReport {
        &self.bounds
    }

    pub fn lower_bound(&self) -> usize {
        self.bounds.best()
    }

    /// Decides whether all items fit in a strip of the given height
    pub fn evaluate(&self, height: usize) -> Evaluation {
        let mut ctx = SearchContext::new(self.lower_bound());
        let decision = match self.config.transpose && prefers_transposed(&self.instance, height) {
            true => self.decide_transposed(height, &mut ctx),
            false => self.decide(height, &mut ctx, self.verify_policy()),
        };
        info!(
            "[BLEU] height {height}: {} ({} column nodes, {} y-checks, {} y-check nodes)",
            decision.label(),
            ctx.stats.column_nodes.separate_with_commas(),
            ctx.stats.y_checks.separate_with_commas(),
            ctx.stats.y_check_nodes.separate_with_commas()
        );
        Evaluation {
            height,
            decision,
            exactness: ctx.exactness,
            stats: ctx.stats,
        }
    }

    /// Decides the relaxation in which items only need contiguous columns: every complete column
    /// assignment is accepted without fixing y-coordinates.
    /// [`Outcome::Infeasible`] proves that the strip of this height is infeasible,
    /// [`Outcome::Feasible`] does not prove that it is feasible.
    pub fn evaluate_relaxed(&self, height: usize) -> Outcome<()> {
        let mut ctx = SearchContext::new(self.lower_bound());
        self.decide(height, &mut ctx, LeafPolicy::Accept).map(|_| ())
    }

    /// Searches the minimum feasible height, trying every height from the lower bound upwards.
    /// Stops at the first feasible height, at the first pending decision or when the time limit runs out.
    pub fn minimize(&self) -> HeightSearchReport {
        let start = Instant::now();
        let time_limit = self.config.time_limit_s.map(Duration::from_secs);
        let mut report = HeightSearchReport {
            status: HeightSearchStatus::Pending,
            lower_bound: self.lower_bound(),
            solution: None,
            n_evaluations: 0,
            stats: SearchStats::default(),
        };

        for height in self.lower_bound()..=self.instance.total_height() {
            if time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                warn!("[BLEU] time limit reached at height {height}");
                report.status = HeightSearchStatus::TimeLimit;
                return report;
            }
            let evaluation = self.evaluate(height);
            report.n_evaluations += 1;
            report.stats += evaluation.stats;
            match evaluation.decision {
                Outcome::Feasible(packing) => {
                    report.status = HeightSearchStatus::Optimal;
                    report.solution = Some((height, packing));
                    return report;
                }
                Outcome::Infeasible => report.lower_bound = height + 1,
                Outcome::Pending => {
                    report.status = HeightSearchStatus::Pending;
                    return report;
                }
            }
        }
        //stacking all items on top of each other always fits
        let height = self.instance.total_height();
        report.status = HeightSearchStatus::Optimal;
        report.solution = Some((height, stacked_packing(&self.instance)));
        report
    }

    fn verify_policy(&self) -> LeafPolicy {
        LeafPolicy::Verify {
            y_check_budget: self.config.budgets.y_check,
        }
    }

    fn decide(&self, height: usize, ctx: &mut SearchContext, policy: LeafPolicy) -> Decision {
        let prep = &self.prep;
        if height < self.instance.max_height() || prep.fixed_height > height {
            return Outcome::Infeasible;
        }
        if ctx.best_lower_bound > height {
            debug!(
                "[BLEU] height {height} below lower bound {}",
                ctx.best_lower_bound
            );
            return Outcome::Infeasible;
        }

        let n = self.instance.n_items();
        let mut positions = vec![Coord::default(); n];
        let mut dims = self
            .instance
            .items()
            .iter()
            .map(|i| (i.width, i.height))
            .collect_vec();

        let mut y = 0;
        for item in &prep.fixed {
            positions[item.id] = Coord::new(0, y);
            y += item.height;
        }
        if prep.items.is_empty() {
            return Outcome::Feasible(Packing { positions, dims });
        }

        let Some(reduction) =
            reduce_for_height(&prep.items, height - prep.fixed_height, prep.effective_width)
        else {
            debug!("[BLEU] height {height} infeasible after height reduction");
            return Outcome::Infeasible;
        };

        let mut x = reduction.bin_width;
        for item in &reduction.dropped {
            positions[item.id] = Coord::new(x, prep.fixed_height);
            dims[item.id] = (item.width, item.height);
            x += item.width;
        }

        let budget = self.column_budget(&reduction.items, reduction.bin_width, reduction.bin_height);
        let search = ColumnSearch::new(
            &reduction.items,
            reduction.bin_width,
            reduction.bin_height,
            budget,
            policy,
        );
        let outcome = search.run(ctx);
        let outcome = ctx.conclude(outcome);

        outcome.map(|coords| {
            for (item, c) in reduction.items.iter().zip(coords) {
                positions[item.id] = Coord::new(c.x, c.y + prep.fixed_height);
                dims[item.id] = (item.width, item.height);
            }
            let packing = Packing { positions, dims };
            debug_assert!(policy == LeafPolicy::Accept || packing.is_valid(&self.instance, height));
            packing
        })
    }

    /// Budget of the column search: a perfect packing (no waste at all) gets the larger budget
    fn column_budget(
        &self,
        items: &[WorkItem],
        bin_width: usize,
        bin_height: usize,
    ) -> usize {
        let budgets = self.config.budgets;
        if bin_width == 0 {
            return budgets.general;
        }
        let area: usize = items.iter().map(|i| i.area()).sum();
        let perfect_height = area as f64 / bin_width as f64;
        match FPA(bin_height as f64).eq_within(perfect_height, self.config.tolerance) {
            true => budgets.perfect_packing,
            false => budgets.general,
        }
    }

    /// Decides the mirrored instance, where the trial height acts as the strip width
    fn decide_transposed(&self, height: usize, ctx: &mut SearchContext) -> Decision {
        let transposed = match self.instance.transposed(height) {
            Ok(t) => t,
            Err(InvalidInstance::ItemTooWide { .. }) => return Outcome::Infeasible,
            Err(e) => {
                warn!("[BLEU] instance cannot be transposed: {e}");
                return self.decide(height, ctx, self.verify_policy());
            }
        };
        debug!("[BLEU] deciding height {height} on the transposed instance");
        //the mirror changes with every trial height, so only the combinatorial bounds are computed
        let config = BleuConfig {
            transpose: false,
            bounds: BoundsConfig::combinatorial(),
            ..self.config
        };
        let mirror = Bleu::with_lp_solver(transposed, config, None);
        ctx.best_lower_bound = mirror.lower_bound();
        let decision = mirror.decide(self.instance.strip_width(), ctx, self.verify_policy());
        decision.map(|p| p.transposed())
    }
}

/// Counts the normal pattern positions of all items in both dimensions.
/// The search enumerates columns, so the dimension with fewer positions is the cheaper one to branch on.
pub fn prefers_transposed(instance: &Instance, height: usize) -> bool {
    let items = instance.items();
    let n_positions = |dim: fn(&crate::entities::Item) -> usize, capacity: usize| -> usize {
        items
            .iter()
            .map(|item| {
                let others = items.iter().filter(|o| o.id != item.id).map(dim);
                match capacity.checked_sub(dim(item)) {
                    Some(cap) => reachable_sums(others, cap).len(),
                    None => 0,
                }
            })
            .sum()
    };
    let along_height = n_positions(|i| i.height, height);
    let along_width = n_positions(|i| i.width, instance.strip_width());
    along_height < along_width
}

/// All items stacked at `x = 0`, always valid for a strip as high as the total item height
pub fn stacked_packing(instance: &Instance) -> Packing {
    let positions = instance
        .items()
        .iter()
        .scan(0, |y, item| {
            let c = Coord::new(0, *y);
            *y += item.height;
            Some(c)
        })
        .collect();
    Packing {
        positions,
        dims: instance
            .items()
            .iter()
            .map(|i| (i.width, i.height))
            .collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightSearchStatus {
    /// The reported height is the minimum feasible height
    Optimal,
    /// A decision ran out of nodes, the minimum height is undetermined
    Pending,
    /// The time limit ran out, the minimum height is undetermined
    TimeLimit,
}

/// Result of [`Bleu::minimize`]
#[derive(Clone, Debug, PartialEq)]
pub struct HeightSearchReport {
    pub status: HeightSearchStatus,
    /// Largest height proven to be a lower bound
    pub lower_bound: usize,
    /// Minimum feasible height and a packing achieving it
    pub solution: Option<(usize, Packing)>,
    pub n_evaluations: usize,
    pub stats: SearchStats,
}

/// Decides whether the items given as `(width, height)` fit in a `strip_width x height` strip.
/// Fails fast on a malformed instance.
pub fn decide_feasibility(
    strip_width: usize,
    dims: &[(usize, usize)],
    height: usize,
    config: BleuConfig,
) -> Result<Evaluation, InvalidInstance> {
    let instance = Instance::from_dims(strip_width, dims.iter().copied())?;
    Ok(Bleu::new(instance, config).evaluate(height))
}
