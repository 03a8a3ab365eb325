//! Transaction repository for lifecycle and listing operations.

use chrono::{NaiveDate, Utc};
use fluxo_core::transaction::{
    self, TransactionRuleError, validate_amount, validate_description, validate_notes,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, prelude::DateTimeWithTimeZone, sea_query::Expr,
};
use uuid::Uuid;

use fluxo_shared::types::{PageRequest, PageResponse};

use crate::entities::{
    sea_orm_active_enums::{TransactionKind, TransactionStatus},
    transactions,
};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// A business rule was violated.
    #[error(transparent)]
    Rule(#[from] TransactionRuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for fluxo_shared::AppError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::NotFound(_) => Self::NotFound(e.to_string()),
            TransactionError::Rule(rule) => rule.into(),
            TransactionError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Direction of the cash movement.
    pub kind: TransactionKind,
    /// Initial status; defaults to `Pending`.
    pub status: Option<TransactionStatus>,
    /// What the transaction is for.
    pub description: String,
    /// Monetary amount, at least 0.01.
    pub amount: Decimal,
    /// Date the transaction falls due.
    pub due_date: NaiveDate,
    /// Date the transaction was paid, if already settled.
    pub payment_date: Option<NaiveDate>,
    /// Optional linked client.
    pub client_id: Option<Uuid>,
    /// Optional free-form notes.
    pub notes: Option<String>,
}

/// Input for updating a transaction. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New status, checked against the transition rules.
    pub status: Option<TransactionStatus>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New payment date.
    pub payment_date: Option<NaiveDate>,
    /// New linked client.
    pub client_id: Option<Uuid>,
    /// New notes.
    pub notes: Option<String>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by status.
    pub status: Option<TransactionStatus>,
    /// Filter by kind.
    pub kind: Option<TransactionKind>,
    /// Filter by linked client.
    pub client_id: Option<Uuid>,
    /// Filter by due date range start (inclusive).
    pub due_from: Option<NaiveDate>,
    /// Filter by due date range end (inclusive).
    pub due_to: Option<NaiveDate>,
}

/// Transaction repository for CRUD and lifecycle operations.
///
/// Soft-deleted rows are invisible to every method here: reads filter them
/// out and the sweep never promotes them.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new transaction, defaulting the status to `Pending`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input violates a field rule or the insert
    /// fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        validate_description(&input.description)?;
        validate_amount(input.amount)?;
        if let Some(notes) = &input.notes {
            validate_notes(notes)?;
        }

        let status = input.status.unwrap_or(TransactionStatus::Pending);
        // Paid rows always carry a payment date.
        let payment_date = match (status, input.payment_date) {
            (TransactionStatus::Paid, None) => Some(Utc::now().date_naive()),
            (_, supplied) => supplied,
        };

        let now = Utc::now().into();
        let model = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(input.kind),
            status: Set(status),
            description: Set(input.description),
            amount: Set(input.amount),
            due_date: Set(input.due_date),
            payment_date: Set(payment_date),
            client_id: Set(input.client_id),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let created = model.insert(&self.db).await?;
        tracing::info!(transaction_id = %created.id, "transaction created");
        Ok(created)
    }

    /// Finds a transaction by ID, excluding soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live row matches, or a database error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Lists transactions with optional filters, newest due date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<PageResponse<transactions::Model>, TransactionError> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::DeletedAt.is_null());

        if let Some(status) = filter.status {
            query = query.filter(transactions::Column::Status.eq(status));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }
        if let Some(client_id) = filter.client_id {
            query = query.filter(transactions::Column::ClientId.eq(client_id));
        }
        if let Some(due_from) = filter.due_from {
            query = query.filter(transactions::Column::DueDate.gte(due_from));
        }
        if let Some(due_to) = filter.due_to {
            query = query.filter(transactions::Column::DueDate.lte(due_to));
        }

        let paginator = query
            .order_by_desc(transactions::Column::DueDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(data, page.page, page.limit, total))
    }

    /// Updates a transaction, merging only the provided fields.
    ///
    /// A supplied status must be a legal transition from the current one;
    /// `Paid` and `Cancelled` are terminal on this path. Moving a row to
    /// `Paid` without a payment date fills in today's date, so paid rows
    /// always carry one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a rule violation, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let existing = self.find_by_id(id).await?;

        if let Some(status) = input.status {
            transaction::validate_transition(existing.status.into(), status.into())?;
        }
        if let Some(description) = &input.description {
            validate_description(description)?;
        }
        if let Some(amount) = input.amount {
            validate_amount(amount)?;
        }
        if let Some(notes) = &input.notes {
            validate_notes(notes)?;
        }

        let backfill_payment_date = input.status == Some(TransactionStatus::Paid)
            && input.payment_date.is_none()
            && existing.payment_date.is_none();

        let mut active: transactions::ActiveModel = existing.into();
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(due_date) = input.due_date {
            active.due_date = Set(due_date);
        }
        if let Some(payment_date) = input.payment_date {
            active.payment_date = Set(Some(payment_date));
        } else if backfill_payment_date {
            active.payment_date = Set(Some(Utc::now().date_naive()));
        }
        if let Some(client_id) = input.client_id {
            active.client_id = Set(Some(client_id));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Marks a transaction as paid.
    ///
    /// Works from any current status; the payment date defaults to today
    /// when not supplied. Re-paying a paid transaction just re-sets the
    /// payment date.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn pay(
        &self,
        id: Uuid,
        payment_date: Option<NaiveDate>,
    ) -> Result<transactions::Model, TransactionError> {
        let existing = self.find_by_id(id).await?;
        let payment_date = payment_date.unwrap_or_else(|| Utc::now().date_naive());

        let mut active: transactions::ActiveModel = existing.into();
        active.status = Set(TransactionStatus::Paid);
        active.payment_date = Set(Some(payment_date));
        active.updated_at = Set(Utc::now().into());

        let paid = active.update(&self.db).await?;
        tracing::info!(transaction_id = %paid.id, %payment_date, "transaction paid");
        Ok(paid)
    }

    /// Soft-deletes a transaction by setting `deleted_at`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), TransactionError> {
        let existing = self.find_by_id(id).await?;
        let now = Utc::now().into();

        let mut active: transactions::ActiveModel = existing.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await?;

        Ok(())
    }

    /// Promotes every pending transaction whose due date has passed to
    /// `Overdue` in a single bulk update.
    ///
    /// Returns the number of rows promoted. Running the sweep twice in a row
    /// is a no-op the second time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, TransactionError> {
        let result = transactions::Entity::update_many()
            .col_expr(
                transactions::Column::Status,
                Expr::value(TransactionStatus::Overdue),
            )
            .col_expr(
                transactions::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(transactions::Column::Status.eq(TransactionStatus::Pending))
            .filter(transactions::Column::DueDate.lt(today))
            .filter(transactions::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(count = result.rows_affected, "transactions marked overdue");
        }
        Ok(result.rows_affected)
    }
}
