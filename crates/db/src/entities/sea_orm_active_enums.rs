//! String-backed active enums shared by the entities.
//!
//! Stored as plain strings so the same schema works on Postgres and on the
//! SQLite databases the test suite runs against. Conversions to and from the
//! `fluxo-core` enums keep the business logic free of `SeaORM` types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionKind {
    /// Money owed by the organization.
    #[sea_orm(string_value = "PAYABLE")]
    Payable,
    /// Money owed to the organization.
    #[sea_orm(string_value = "RECEIVABLE")]
    Receivable,
}

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionStatus {
    /// Awaiting payment.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Payment recorded.
    #[sea_orm(string_value = "PAID")]
    Paid,
    /// Due date passed without payment.
    #[sea_orm(string_value = "OVERDUE")]
    Overdue,
    /// Explicitly cancelled.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl From<fluxo_core::transaction::TransactionKind> for TransactionKind {
    fn from(kind: fluxo_core::transaction::TransactionKind) -> Self {
        match kind {
            fluxo_core::transaction::TransactionKind::Payable => Self::Payable,
            fluxo_core::transaction::TransactionKind::Receivable => Self::Receivable,
        }
    }
}

impl From<TransactionKind> for fluxo_core::transaction::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Payable => Self::Payable,
            TransactionKind::Receivable => Self::Receivable,
        }
    }
}

impl From<fluxo_core::transaction::TransactionStatus> for TransactionStatus {
    fn from(status: fluxo_core::transaction::TransactionStatus) -> Self {
        match status {
            fluxo_core::transaction::TransactionStatus::Pending => Self::Pending,
            fluxo_core::transaction::TransactionStatus::Paid => Self::Paid,
            fluxo_core::transaction::TransactionStatus::Overdue => Self::Overdue,
            fluxo_core::transaction::TransactionStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TransactionStatus> for fluxo_core::transaction::TransactionStatus {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Paid => Self::Paid,
            TransactionStatus::Overdue => Self::Overdue,
            TransactionStatus::Cancelled => Self::Cancelled,
        }
    }
}
