//! Errors raised by the calculator engine.

use thiserror::Error;

/// Failure of a single engine operation.
///
/// An operation that returns one of these has not changed any engine state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// A division whose right-hand operand is exactly zero.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// A key token that does not name any calculator key.
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}
