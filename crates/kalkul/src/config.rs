//! Kernel configuration types.

use crate::error::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// CNF transformation used when the input is a full formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CnfStrategy {
    /// Distribution only, equivalent to the input
    Naive,
    /// One auxiliary variable per sub-formula, equisatisfiable
    Tseytin,
    /// Naive while it stays below the blow-up limit, Tseytin otherwise
    #[default]
    Optimal,
}

/// Connectedness requirement for tableaux expansions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectedness {
    #[default]
    Unconnected,
    /// The expanded clause must mention the leaf's variable
    Weak,
    /// The expanded clause must contain the leaf's complement
    Strong,
}

impl Connectedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connectedness::Unconnected => "unconnected",
            Connectedness::Weak => "weak",
            Connectedness::Strong => "strong",
        }
    }
}

/// Per-proof options, chosen when the formula is parsed and carried in the
/// state from then on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableauxParams {
    pub connectedness: Connectedness,
    pub regular: bool,
    pub backtracking: bool,
}

impl Default for TableauxParams {
    fn default() -> Self {
        TableauxParams {
            connectedness: Connectedness::Unconnected,
            regular: false,
            backtracking: true,
        }
    }
}

impl TableauxParams {
    /// Parse the optional JSON parameter object sent along with a formula
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| KernelError::malformed(format!("Invalid tableaux parameters: {}", e)))
    }
}

/// Process-wide settings, loaded once and only read afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub cnf_strategy: CnfStrategy,
    /// Largest clause count the naive transformation may reach (0 = no limit)
    pub cnf_blowup_limit: usize,
    /// Availability per calculus identifier. An empty table enables all.
    pub calculi: BTreeMap<String, bool>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            cnf_strategy: CnfStrategy::Optimal,
            cnf_blowup_limit: 5000,
            calculi: BTreeMap::new(),
        }
    }
}

impl KernelConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input)
            .map_err(|e| KernelError::malformed(format!("Invalid kernel configuration: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            KernelError::malformed(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Blow-up limit as passed to the CNF conversion
    pub fn blowup_limit(&self) -> Option<usize> {
        (self.cnf_blowup_limit > 0).then_some(self.cnf_blowup_limit)
    }

    pub fn is_enabled(&self, identifier: &str) -> bool {
        if self.calculi.is_empty() {
            return true;
        }
        self.calculi.get(identifier).copied().unwrap_or(false)
    }

    pub fn ensure_enabled(&self, identifier: &str) -> Result<()> {
        if self.is_enabled(identifier) {
            Ok(())
        } else {
            Err(KernelError::CalculusUnavailable(identifier.to_string()))
        }
    }
}
