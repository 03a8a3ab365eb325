//! Transaction lifecycle rules.
//!
//! A transaction is created `Pending`, may be promoted to `Overdue` by the
//! sweep, paid via the pay operation, or cancelled. `Paid` and `Cancelled`
//! are terminal for the generic update path; paying is allowed from any
//! status (re-paying just re-sets the payment date).

pub mod error;
pub mod lifecycle;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use error::TransactionRuleError;
pub use lifecycle::{can_transition, validate_transition};
pub use types::{TransactionKind, TransactionStatus};
pub use validation::{validate_amount, validate_description, validate_notes};
