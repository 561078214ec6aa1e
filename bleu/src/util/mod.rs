/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

/// Dynamic programs over integer weights (subset-sum and 0/1 knapsack).
pub mod knapsack;

mod config;
mod fpa;

#[doc(inline)]
pub use config::BleuConfig;
#[doc(inline)]
pub use config::BoundsConfig;
#[doc(inline)]
pub use config::BudgetConfig;
#[doc(inline)]
pub use fpa::FPA;
