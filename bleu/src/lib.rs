//! An exact feasibility decider for the two-dimensional Strip Packing Problem.
//!
//! Given a strip of fixed width and a trial height, [`solver::Bleu`] decides whether all
//! rectangular items (no rotation) fit without overlap. The decision is made by a two-level
//! branch-and-bound: a column-assignment search over integer x-coordinates and a nested
//! y-coordinate enumeration that verifies every candidate column assignment.
//! Preprocessing reductions and a suite of lower bounds keep both levels tractable.

/// Items, instances and packings
pub mod entities;

/// Reductions applied before and during the search
pub mod prep;

/// Lower bounds on the minimum strip height
pub mod bounds;

/// The column-assignment search and the y-check oracle
pub mod search;

/// Entry points tying preprocessing, bounds and search together
pub mod solver;

/// Importing and exporting instances and solutions
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
