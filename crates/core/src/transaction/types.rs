//! Transaction kinds and statuses.

use serde::{Deserialize, Serialize};

/// Direction of cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money owed by the organization.
    Payable,
    /// Money owed to the organization.
    Receivable,
}

impl TransactionKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payable => "PAYABLE",
            Self::Receivable => "RECEIVABLE",
        }
    }

    /// Parses a kind from its wire representation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PAYABLE" => Some(Self::Payable),
            "RECEIVABLE" => Some(Self::Receivable),
            _ => None,
        }
    }
}

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Awaiting payment, due date not yet passed.
    Pending,
    /// Payment recorded.
    Paid,
    /// Due date passed without payment.
    Overdue,
    /// Explicitly cancelled.
    Cancelled,
}

impl TransactionStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from its wire representation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PAID" => Some(Self::Paid),
            "OVERDUE" => Some(Self::Overdue),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the generic update path may move a transaction out of this
    /// status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }
}
