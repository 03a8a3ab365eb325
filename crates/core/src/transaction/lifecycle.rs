//! Status transition rules for the generic update path.
//!
//! The pay operation and the overdue sweep set statuses directly and do not
//! go through these checks: pay must work from any prior status, and the
//! sweep only ever touches `Pending` rows by construction.

use super::error::TransactionRuleError;
use super::types::TransactionStatus;

/// Whether the generic update path may change `from` into `to`.
///
/// Allowed edges:
/// - `Pending` -> `Paid` | `Overdue` | `Cancelled`
/// - `Overdue` -> `Paid` | `Cancelled`
/// - any status -> itself (no-op)
///
/// `Paid` and `Cancelled` are terminal.
#[must_use]
pub fn can_transition(from: TransactionStatus, to: TransactionStatus) -> bool {
    use TransactionStatus::{Cancelled, Overdue, Paid, Pending};

    match (from, to) {
        (Pending, Paid | Overdue | Cancelled) | (Overdue, Paid | Cancelled) => true,
        _ => from == to,
    }
}

/// Validates a status change, returning the offending edge on failure.
pub fn validate_transition(
    from: TransactionStatus,
    to: TransactionStatus,
) -> Result<(), TransactionRuleError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransactionRuleError::IllegalTransition { from, to })
    }
}
