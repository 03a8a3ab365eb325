//! Cashflow aggregation service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{CashflowPeriod, CashflowReport, CashflowTotals, PaidTransaction, TimelineBucket};
use crate::transaction::TransactionKind;

/// Service for generating the cashflow report.
pub struct CashflowService;

impl CashflowService {
    /// Aggregates paid transactions into per-day inflow/outflow buckets and
    /// period totals.
    ///
    /// Transactions outside `[from, to]` are ignored, so an inverted range
    /// yields an empty timeline rather than an error. Amounts accumulate at
    /// full `Decimal` precision and are rounded to 2 decimal places once, at
    /// output.
    #[must_use]
    pub fn cashflow(
        from: NaiveDate,
        to: NaiveDate,
        transactions: &[PaidTransaction],
    ) -> CashflowReport {
        let mut total_received = Decimal::ZERO;
        let mut total_paid = Decimal::ZERO;
        let mut buckets: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

        for tx in transactions {
            if tx.payment_date < from || tx.payment_date > to {
                continue;
            }

            let (inflow, outflow) = buckets.entry(tx.payment_date).or_default();
            match tx.kind {
                TransactionKind::Receivable => {
                    total_received += tx.amount;
                    *inflow += tx.amount;
                }
                TransactionKind::Payable => {
                    total_paid += tx.amount;
                    *outflow += tx.amount;
                }
            }
        }

        // BTreeMap iteration is already ascending by date.
        let timeline = buckets
            .into_iter()
            .map(|(date, (inflow, outflow))| TimelineBucket {
                date,
                inflow: round_money(inflow),
                outflow: round_money(outflow),
            })
            .collect();

        CashflowReport {
            period: CashflowPeriod { from, to },
            totals: CashflowTotals {
                received: round_money(total_received),
                paid: round_money(total_paid),
                balance: round_money(total_received - total_paid),
            },
            timeline,
        }
    }
}

/// Rounds a currency amount to exactly 2 decimal places, half away from
/// zero, so every reported figure serializes as e.g. `"60.00"`.
fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
