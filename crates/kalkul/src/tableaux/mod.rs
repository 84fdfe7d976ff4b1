//! Propositional clause tableaux

pub mod codec;
pub mod moves;
pub mod node;
pub mod state;

#[cfg(test)]
mod proptest_tests;

pub use codec::{decode, encode};
pub use moves::{MoveRecord, TableauxMove};
pub use node::{TableauxNode, ROOT, ROOT_SPELLING};
pub use state::TableauxState;
