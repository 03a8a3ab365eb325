//! Report repository feeding the cashflow aggregation.

use chrono::NaiveDate;
use fluxo_core::reports::PaidTransaction;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{
    sea_orm_active_enums::TransactionStatus,
    transactions,
};

/// Report repository for read-only aggregate queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches all paid transactions with a payment date inside the
    /// inclusive range, ready for the cashflow aggregation.
    ///
    /// Rows without a payment date cannot be `Paid` through the repository,
    /// but any that exist are skipped rather than reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn paid_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PaidTransaction>, DbErr> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::Status.eq(TransactionStatus::Paid))
            .filter(transactions::Column::PaymentDate.between(from, to))
            .filter(transactions::Column::DeletedAt.is_null())
            .order_by_asc(transactions::Column::PaymentDate)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.payment_date.map(|payment_date| PaidTransaction {
                    kind: row.kind.into(),
                    amount: row.amount,
                    payment_date,
                })
            })
            .collect())
    }
}
