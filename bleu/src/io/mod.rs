mod export;
mod import;

///External (serializable) representations of instances and solutions.
pub mod ext_repr;

/// Exports an evaluation to an external representation.
pub use export::export;

/// Exports the result of a height minimization to an external representation.
pub use export::export_height_search;

/// Imports a strip packing instance from an external representation.
pub use import::import;
