//! Cashflow report generation.
//!
//! Pure aggregation over paid transactions: per-day inflow/outflow buckets
//! plus period totals. The database layer supplies the rows; nothing here
//! mutates state.

pub mod service;
pub mod types;


pub use service::CashflowService;
pub use types::{CashflowPeriod, CashflowReport, CashflowTotals, PaidTransaction, TimelineBucket};
