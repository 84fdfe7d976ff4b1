//! Propositional logic data structures
//!
//! Formulas as a closed syntax tree, and the clause representation every
//! calculus works on.

pub mod clause;
pub mod formula;

pub use clause::{Atom, Clause, ClauseSet};
pub use formula::Formula;
