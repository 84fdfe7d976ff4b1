//! The seam between the stateless request protocol and a concrete calculus
//!
//! Every request carries the complete proof state. A calculus therefore
//! only needs to decode a state, change a private copy and encode the
//! result; nothing is kept between calls.

use crate::config::{CnfStrategy, KernelConfig, TableauxParams};
use crate::error::Result;
use crate::parser::parse_flexible;
use crate::tableaux::{self, TableauxMove, TableauxState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a close check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseMsg {
    pub closed: bool,
    pub msg: String,
}

pub trait Calculus {
    type Params: Default;
    type State;
    type Move;

    /// Name under which the calculus is enabled in the configuration
    fn identifier(&self) -> &'static str;

    fn parse_formula(&self, formula: &str, params: Self::Params) -> Result<Self::State>;

    fn apply_move(&self, state: Self::State, mv: Self::Move) -> Result<Self::State>;

    fn check_close(&self, state: &Self::State) -> CloseMsg;

    fn encode_state(&self, state: &Self::State) -> String;

    fn decode_state(&self, encoded: &str) -> Result<Self::State>;

    fn decode_move(&self, payload: &str) -> Result<Self::Move>;

    fn decode_params(&self, payload: &str) -> Result<Self::Params>;

    /// Parse a formula into an encoded initial state. Missing parameters
    /// fall back to their defaults.
    fn parse(&self, formula: &str, params: Option<&str>) -> Result<String> {
        let params = match params {
            Some(json) => self.decode_params(json)?,
            None => Self::Params::default(),
        };
        let state = self.parse_formula(formula, params)?;
        Ok(self.encode_state(&state))
    }

    /// Apply an encoded move to an encoded state
    fn apply_move_str(&self, state: &str, mv: &str) -> Result<String> {
        let state = self.decode_state(state)?;
        let mv = self.decode_move(mv)?;
        let state = self.apply_move(state, mv)?;
        Ok(self.encode_state(&state))
    }

    fn check_close_str(&self, state: &str) -> Result<CloseMsg> {
        let state = self.decode_state(state)?;
        Ok(self.check_close(&state))
    }
}

/// Clause tableaux over propositional clause sets
#[derive(Debug, Clone, Copy)]
pub struct PropositionalTableaux {
    strategy: CnfStrategy,
    blowup_limit: Option<usize>,
}

impl PropositionalTableaux {
    pub const IDENTIFIER: &'static str = "prop-tableaux";

    pub fn new(strategy: CnfStrategy, blowup_limit: Option<usize>) -> Self {
        PropositionalTableaux { strategy, blowup_limit }
    }

    /// Build the calculus from the process configuration, failing if it has
    /// been switched off there
    pub fn from_config(config: &KernelConfig) -> Result<Self> {
        config.ensure_enabled(Self::IDENTIFIER)?;
        Ok(Self::new(config.cnf_strategy, config.blowup_limit()))
    }
}

impl Default for PropositionalTableaux {
    fn default() -> Self {
        let config = KernelConfig::default();
        Self::new(config.cnf_strategy, config.blowup_limit())
    }
}

impl Calculus for PropositionalTableaux {
    type Params = TableauxParams;
    type State = TableauxState;
    type Move = TableauxMove;

    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn parse_formula(&self, formula: &str, params: TableauxParams) -> Result<TableauxState> {
        let clauses = parse_flexible(formula, self.strategy, self.blowup_limit)?;
        debug!(clauses = clauses.len(), ?params, "initialized tableaux");
        Ok(TableauxState::new(clauses, params))
    }

    fn apply_move(&self, mut state: TableauxState, mv: TableauxMove) -> Result<TableauxState> {
        state.apply(mv)?;
        Ok(state)
    }

    fn check_close(&self, state: &TableauxState) -> CloseMsg {
        let open = state.open_leaf_count();
        if open == 0 {
            CloseMsg {
                closed: true,
                msg: "The proof tree is closed and valid".to_string(),
            }
        } else {
            let branches = if open == 1 { "branch" } else { "branches" };
            CloseMsg {
                closed: false,
                msg: format!("The proof tree is not closed: {} open {} left", open, branches),
            }
        }
    }

    fn encode_state(&self, state: &TableauxState) -> String {
        tableaux::encode(state)
    }

    fn decode_state(&self, encoded: &str) -> Result<TableauxState> {
        tableaux::decode(encoded)
    }

    fn decode_move(&self, payload: &str) -> Result<TableauxMove> {
        TableauxMove::from_json(payload)
    }

    fn decode_params(&self, payload: &str) -> Result<TableauxParams> {
        TableauxParams::from_json(payload)
    }
}
