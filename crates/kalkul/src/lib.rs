//! kalkul: a stateless proof-calculus kernel
//!
//! The kernel turns propositional formulas into clause sets (naive or
//! Tseytin CNF) and runs clause tableaux proofs on them. A proof state is
//! never kept between calls: it is encoded into a canonical string, handed
//! to the client and decoded again when the next move arrives.

pub mod calculus;
pub mod config;
pub mod error;
pub mod json;
pub mod logic;
pub mod parser;
pub mod tableaux;

pub use calculus::{Calculus, CloseMsg, PropositionalTableaux};
pub use config::{CnfStrategy, Connectedness, KernelConfig, TableauxParams};
pub use error::{KernelError, Result};
pub use logic::{Atom, Clause, ClauseSet, Formula};

pub use parser::{
    formula_to_cnf, naive_cnf, parse_clause_set, parse_flexible, parse_formula, tseytin_cnf,
    CnfConversionError,
};

pub use tableaux::{MoveRecord, TableauxMove, TableauxNode, TableauxState};
