/// Column-assignment branch-and-bound
pub mod column;

/// Y-coordinate feasibility oracle for column assignments
pub mod ycheck;

mod context;

#[doc(inline)]
pub use context::Exactness;
#[doc(inline)]
pub use context::SearchContext;
#[doc(inline)]
pub use context::SearchStats;

/// Result of a search with a node budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// A solution was found
    Feasible(T),
    /// The search space was exhausted without finding a solution
    Infeasible,
    /// The node budget ran out before the search could conclude.
    /// This is not a proof of infeasibility and must never be treated as one.
    Pending,
}

impl<T> Outcome<T> {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Outcome::Feasible(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Outcome::Infeasible)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Feasible(t) => Outcome::Feasible(f(t)),
            Outcome::Infeasible => Outcome::Infeasible,
            Outcome::Pending => Outcome::Pending,
        }
    }

    pub fn feasible(self) -> Option<T> {
        match self {
            Outcome::Feasible(t) => Some(t),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Feasible(_) => "feasible",
            Outcome::Infeasible => "infeasible",
            Outcome::Pending => "pending",
        }
    }
}
