//! Error types for the kalkul kernel

use thiserror::Error;

/// Every failure that can cross the kernel boundary.
///
/// A rejected operation never leaves a partially modified state behind:
/// moves are validated completely before the tree is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The formula or clause set could not be parsed (or converted to CNF)
    #[error("Invalid formula format: {0}")]
    InvalidFormulaFormat(String),

    /// The move violates a rule of the calculus
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// The move descriptor or state encoding is structurally invalid
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The calculus has been disabled in the configuration
    #[error("Calculus '{0}' is not available")]
    CalculusUnavailable(String),
}

impl KernelError {
    pub fn invalid_formula(msg: impl Into<String>) -> Self {
        KernelError::InvalidFormulaFormat(msg.into())
    }

    pub fn illegal_move(msg: impl Into<String>) -> Self {
        KernelError::IllegalMove(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        KernelError::MalformedPayload(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
