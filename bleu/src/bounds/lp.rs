use std::fmt::Display;

use log::trace;

/// Linear program in covering form: `min c·x  s.t.  A x >= b,  x >= 0`, with `c >= 0` and `b >= 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoveringLp {
    /// Objective coefficients `c`, one per variable
    pub objective: Vec<f64>,
    /// Constraint matrix `A`, one dense row per constraint
    pub rows: Vec<Vec<f64>>,
    /// Right hand sides `b`, one per constraint
    pub rhs: Vec<f64>,
}

impl CoveringLp {
    pub fn n_vars(&self) -> usize {
        self.objective.len()
    }

    pub fn n_constraints(&self) -> usize {
        self.rows.len()
    }

    /// Number of coefficients of the constraint matrix
    pub fn n_cells(&self) -> usize {
        self.n_vars() * self.n_constraints()
    }

    fn validate(&self) -> Result<(), LowerBoundUnavailable> {
        let well_formed = self.rows.len() == self.rhs.len()
            && self.rows.iter().all(|r| r.len() == self.objective.len())
            && self.objective.iter().all(|&c| c >= 0.0)
            && self.rhs.iter().all(|&b| b >= 0.0);
        match well_formed {
            true => Ok(()),
            false => Err(LowerBoundUnavailable::MalformedModel),
        }
    }
}

/// Optimal solution of a [`CoveringLp`]
#[derive(Clone, Debug, PartialEq)]
pub struct LpSolution {
    pub objective: f64,
    /// Value of every variable
    pub primal: Vec<f64>,
    /// Dual value of every constraint
    pub duals: Vec<f64>,
}

/// Anything capable of solving a [`CoveringLp`] to optimality.
pub trait LpSolver {
    fn solve(&self, lp: &CoveringLp) -> Result<LpSolution, LowerBoundUnavailable>;
}

/// Dense tableau simplex.
///
/// Solves the dual of the covering program, `max b·y  s.t.  Aᵀ y <= c,  y >= 0`, which is
/// feasible at the slack basis because `c >= 0`. Bland's rule prevents cycling.
/// The optimal `y` are the duals of the covering constraints and the reduced costs of the
/// slack columns are the covering variables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenseSimplex {
    pub max_pivots: usize,
    pub epsilon: f64,
}

impl Default for DenseSimplex {
    fn default() -> Self {
        Self {
            max_pivots: 100_000,
            epsilon: 1e-9,
        }
    }
}

impl LpSolver for DenseSimplex {
    fn solve(&self, lp: &CoveringLp) -> Result<LpSolution, LowerBoundUnavailable> {
        lp.validate()?;
        let n_y = lp.n_constraints();
        let n_rows = lp.n_vars();
        let n_cols = n_y + n_rows;
        let stride = n_cols + 1;
        let eps = self.epsilon;

        //row k of the tableau: column k of A, slack k, c_k
        let mut tableau = vec![0.0f64; n_rows * stride];
        for k in 0..n_rows {
            let row = &mut tableau[k * stride..(k + 1) * stride];
            for (i, a_row) in lp.rows.iter().enumerate() {
                row[i] = a_row[k];
            }
            row[n_y + k] = 1.0;
            row[n_cols] = lp.objective[k];
        }
        let mut reduced = vec![0.0f64; stride];
        for (i, b) in lp.rhs.iter().enumerate() {
            reduced[i] = -b;
        }
        let mut basis = (n_y..n_cols).collect::<Vec<_>>();

        let mut n_pivots = 0;
        loop {
            let Some(entering) = (0..n_cols).find(|&j| reduced[j] < -eps) else {
                break;
            };
            if n_pivots >= self.max_pivots {
                return Err(LowerBoundUnavailable::PivotLimit(self.max_pivots));
            }
            n_pivots += 1;

            let mut leaving: Option<(usize, f64)> = None;
            for r in 0..n_rows {
                let a = tableau[r * stride + entering];
                if a <= eps {
                    continue;
                }
                let ratio = tableau[r * stride + n_cols] / a;
                leaving = match leaving {
                    None => Some((r, ratio)),
                    Some((lr, lratio)) => {
                        if ratio < lratio - eps
                            || (ratio <= lratio + eps && basis[r] < basis[lr])
                        {
                            Some((r, ratio))
                        } else {
                            Some((lr, lratio))
                        }
                    }
                };
            }
            let Some((pivot_row, _)) = leaving else {
                //the dual is unbounded, so the covering program has no solution
                return Err(LowerBoundUnavailable::InfeasibleRelaxation);
            };

            let pivot = tableau[pivot_row * stride + entering];
            let pivot_range = pivot_row * stride..(pivot_row + 1) * stride;
            tableau[pivot_range.clone()].iter_mut().for_each(|v| *v /= pivot);
            let pivot_values = tableau[pivot_range].to_vec();

            for r in (0..n_rows).filter(|&r| r != pivot_row) {
                let factor = tableau[r * stride + entering];
                if factor != 0.0 {
                    let row = &mut tableau[r * stride..(r + 1) * stride];
                    row.iter_mut()
                        .zip(pivot_values.iter())
                        .for_each(|(v, p)| *v -= factor * p);
                }
            }
            let factor = reduced[entering];
            reduced
                .iter_mut()
                .zip(pivot_values.iter())
                .for_each(|(v, p)| *v -= factor * p);
            basis[pivot_row] = entering;
        }
        trace!("[LP] optimal after {n_pivots} pivots");

        let mut duals = vec![0.0; n_y];
        for (r, &b) in basis.iter().enumerate() {
            if b < n_y {
                duals[b] = tableau[r * stride + n_cols];
            }
        }
        let primal = (0..n_rows).map(|k| reduced[n_y + k]).collect();

        Ok(LpSolution {
            objective: reduced[n_cols],
            primal,
            duals,
        })
    }
}

/// Reasons why an LP-based lower bound could not be computed.
/// The suite then falls back to the combinatorial bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LowerBoundUnavailable {
    /// No LP solver was provided.
    NoSolver,
    /// The model violates the covering form (negative cost or right hand side, ragged rows).
    MalformedModel,
    /// The relaxation has no feasible solution, which does not happen for a valid instance.
    InfeasibleRelaxation,
    /// The simplex did not reach optimality within this many pivots.
    PivotLimit(usize),
    /// The column generation did not converge within this many pricing rounds.
    IterationLimit(usize),
    /// The model has more coefficients than allowed.
    TooLarge { cells: usize, limit: usize },
    /// An external solver reported a failure.
    Solver(String),
}

impl Display for LowerBoundUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSolver => write!(f, "no LP solver available"),
            Self::MalformedModel => write!(f, "LP is not in covering form"),
            Self::InfeasibleRelaxation => write!(f, "LP relaxation is infeasible"),
            Self::PivotLimit(n) => write!(f, "simplex did not converge within {n} pivots"),
            Self::IterationLimit(n) => {
                write!(f, "column generation did not converge within {n} rounds")
            }
            Self::TooLarge { cells, limit } => {
                write!(f, "LP has {cells} coefficients, limit is {limit}")
            }
            Self::Solver(msg) => write!(f, "LP solver failure: {msg}"),
        }
    }
}

impl std::error::Error for LowerBoundUnavailable {}
