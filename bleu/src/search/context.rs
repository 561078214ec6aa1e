use std::ops::AddAssign;

use crate::search::Outcome;

/// State shared by all levels of a single top-level decision.
/// A fresh context is created for every decision, nothing carries over between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchContext {
    /// Best known lower bound on the strip height
    pub best_lower_bound: usize,
    /// Set when a y-check enumeration ran out of nodes. The rejected column assignment
    /// might have been feasible, so an infeasible conclusion is no longer a proof.
    pub node_limit_reached: bool,
    pub exactness: Exactness,
    pub stats: SearchStats,
}

impl SearchContext {
    pub fn new(best_lower_bound: usize) -> Self {
        Self {
            best_lower_bound,
            ..Default::default()
        }
    }

    /// Final bookkeeping once the column search has concluded.
    /// An infeasible conclusion reached after a y-check hit its node limit is downgraded to pending.
    pub fn conclude<T>(&mut self, outcome: Outcome<T>) -> Outcome<T> {
        match outcome {
            Outcome::Infeasible if self.node_limit_reached => {
                self.exactness = Exactness::Approximate;
                Outcome::Pending
            }
            other => other,
        }
    }
}

/// Whether an infeasible conclusion is a proof
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Exactness {
    #[default]
    Exact,
    Approximate,
}

/// Counters gathered during a decision
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes expanded by the column search
    pub column_nodes: usize,
    /// Nodes discarded by the column search bounding rules
    pub column_fathomed: usize,
    /// Complete column assignments handed to the y-check
    pub y_checks: usize,
    /// Nodes expanded by all y-check enumerations
    pub y_check_nodes: usize,
    /// Units absorbed by y-check merging
    pub merges: usize,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.column_nodes += rhs.column_nodes;
        self.column_fathomed += rhs.column_fathomed;
        self.y_checks += rhs.y_checks;
        self.y_check_nodes += rhs.y_check_nodes;
        self.merges += rhs.merges;
    }
}
