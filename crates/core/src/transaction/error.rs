//! Error types for transaction rules.

use thiserror::Error;

use super::types::TransactionStatus;
use fluxo_shared::AppError;

/// A violated transaction business rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionRuleError {
    /// Status change not allowed by the lifecycle state machine.
    #[error("Illegal status transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current status.
        from: TransactionStatus,
        /// Requested status.
        to: TransactionStatus,
    },

    /// Amount must be at least 0.01.
    #[error("Amount must be positive (minimum 0.01), got {0}")]
    InvalidAmount(rust_decimal::Decimal),

    /// Description is required.
    #[error("Description must not be empty")]
    EmptyDescription,

    /// Description exceeds the 200 character limit.
    #[error("Description exceeds {max} characters (got {len})")]
    DescriptionTooLong {
        /// Actual length.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Notes exceed the 1000 character limit.
    #[error("Notes exceed {max} characters (got {len})")]
    NotesTooLong {
        /// Actual length.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl From<TransactionRuleError> for AppError {
    fn from(err: TransactionRuleError) -> Self {
        Self::Validation(err.to_string())
    }
}
