//! Cashflow report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionKind;

/// A paid transaction as seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaidTransaction {
    /// Direction of the cash movement.
    pub kind: TransactionKind,
    /// Transaction amount.
    pub amount: Decimal,
    /// Calendar date the payment landed on.
    pub payment_date: NaiveDate,
}

/// The reported date range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowPeriod {
    /// Range start.
    pub from: NaiveDate,
    /// Range end.
    pub to: NaiveDate,
}

/// Period-wide totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowTotals {
    /// Sum of receivable amounts.
    pub received: Decimal,
    /// Sum of payable amounts.
    pub paid: Decimal,
    /// `received - paid`.
    pub balance: Decimal,
}

/// One day's inflow/outflow bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineBucket {
    /// Calendar date (ISO `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Receivable total for the day.
    #[serde(rename = "in")]
    pub inflow: Decimal,
    /// Payable total for the day.
    #[serde(rename = "out")]
    pub outflow: Decimal,
}

/// The complete cashflow report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowReport {
    /// The requested period.
    pub period: CashflowPeriod,
    /// Period-wide totals.
    pub totals: CashflowTotals,
    /// Per-day buckets, ascending by date.
    pub timeline: Vec<TimelineBucket>,
}
