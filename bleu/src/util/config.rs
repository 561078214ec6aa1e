use serde::{Deserialize, Serialize};

/// Configuration of the decision procedure
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BleuConfig {
    /// Node budgets of both search levels
    pub budgets: BudgetConfig,
    /// Which lower bounds to compute, and the limits on the LP-based ones
    pub bounds: BoundsConfig,
    /// Tolerance for all floating point comparisons (area ratios, LP values)
    pub tolerance: f64,
    /// Solve the transposed instance when the trial height offers fewer normal positions than the width
    #[serde(default)]
    pub transpose: bool,
    /// Wall-clock limit for the minimum height search, in seconds. Single decisions are only bounded by the node budgets.
    #[serde(default)]
    pub time_limit_s: Option<u64>,
}

impl Default for BleuConfig {
    fn default() -> Self {
        Self {
            budgets: BudgetConfig::default(),
            bounds: BoundsConfig::default(),
            tolerance: 1e-4,
            transpose: false,
            time_limit_s: None,
        }
    }
}

/// Maximum number of nodes explored before a search gives up and reports a pending result
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetConfig {
    /// Column search budget when the trial height equals the area of the items divided by the width
    pub perfect_packing: usize,
    /// Column search budget for all other trial heights
    pub general: usize,
    /// Budget of a single y-check enumeration
    pub y_check: usize,
}

impl BudgetConfig {
    pub fn unlimited() -> Self {
        Self {
            perfect_packing: usize::MAX,
            general: usize::MAX,
            y_check: usize::MAX,
        }
    }

    pub fn uniform(budget: usize) -> Self {
        Self {
            perfect_packing: budget,
            general: budget,
            y_check: budget,
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            perfect_packing: 10_000_000,
            general: 80_000,
            y_check: 10_000_000,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsConfig {
    /// Dual feasible function bounds
    pub dff: bool,
    /// Greedy L-shaped reduction bound
    pub l_shape: bool,
    /// Cutting stock relaxation solved by column generation
    pub cutting_stock: bool,
    /// Contiguous parallel machine relaxation
    pub contiguous: bool,
    /// Maximum number of pricing rounds of the column generation
    pub max_column_generation_iterations: usize,
    /// LPs with more coefficients than this are not solved (the bound is reported unavailable)
    pub max_lp_cells: usize,
}

impl BoundsConfig {
    /// Only the combinatorial bounds, no LP is solved
    pub fn combinatorial() -> Self {
        Self {
            cutting_stock: false,
            contiguous: false,
            ..Self::default()
        }
    }
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            dff: true,
            l_shape: true,
            cutting_stock: true,
            contiguous: true,
            max_column_generation_iterations: 1_000,
            max_lp_cells: 4_000_000,
        }
    }
}
