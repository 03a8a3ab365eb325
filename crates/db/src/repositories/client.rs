//! Client repository for client CRUD operations.

use chrono::Utc;
use fluxo_core::client::{
    ClientRuleError, validate_address, validate_document, validate_email, validate_name,
    validate_phone,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use fluxo_shared::types::{PageRequest, PageResponse};

use crate::entities::clients;

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("Client not found: {0}")]
    NotFound(Uuid),

    /// Email already registered to another live client.
    #[error("Email already in use: {0}")]
    EmailTaken(String),

    /// A business rule was violated.
    #[error(transparent)]
    Rule(#[from] ClientRuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClientError> for fluxo_shared::AppError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::NotFound(_) => Self::NotFound(e.to_string()),
            ClientError::EmailTaken(_) => Self::Conflict(e.to_string()),
            ClientError::Rule(rule) => rule.into(),
            ClientError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a client.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Display name, 3 to 100 characters.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Optional phone number, 10 or 11 digits.
    pub phone: Option<String>,
    /// Optional identity document, 11 to 14 digits.
    pub document: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
}

/// Input for updating a client. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientInput {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New document.
    pub document: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// Activate or deactivate the client.
    pub is_active: Option<bool>,
}

/// Filter options for listing clients.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    /// Substring match on name or email.
    pub search: Option<String>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

/// Client repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken` if another live client already uses the email,
    /// a rule violation for invalid fields, or a database error.
    pub async fn create(&self, input: CreateClientInput) -> Result<clients::Model, ClientError> {
        validate_name(&input.name)?;
        validate_email(&input.email)?;
        if let Some(phone) = &input.phone {
            validate_phone(phone)?;
        }
        if let Some(document) = &input.document {
            validate_document(document)?;
        }
        if let Some(address) = &input.address {
            validate_address(address)?;
        }
        self.ensure_email_free(&input.email, None).await?;

        let now = Utc::now().into();
        let model = clients::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            document: Set(input.document),
            address: Set(input.address),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let created = model.insert(&self.db).await?;
        tracing::info!(client_id = %created.id, "client created");
        Ok(created)
    }

    /// Finds a client by ID, excluding soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live row matches, or a database error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<clients::Model, ClientError> {
        clients::Entity::find_by_id(id)
            .filter(clients::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(ClientError::NotFound(id))
    }

    /// Lists clients ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: ClientFilter,
        page: PageRequest,
    ) -> Result<PageResponse<clients::Model>, ClientError> {
        let mut query = clients::Entity::find().filter(clients::Column::DeletedAt.is_null());

        if let Some(search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(clients::Column::Name.contains(&search))
                    .add(clients::Column::Email.contains(&search)),
            );
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(clients::Column::IsActive.eq(is_active));
        }

        let paginator = query
            .order_by_asc(clients::Column::Name)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(data, page.page, page.limit, total))
    }

    /// Updates a client, merging only the provided fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `EmailTaken` when changing to an email another
    /// live client holds, a rule violation, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateClientInput,
    ) -> Result<clients::Model, ClientError> {
        let existing = self.find_by_id(id).await?;

        if let Some(name) = &input.name {
            validate_name(name)?;
        }
        if let Some(email) = &input.email {
            validate_email(email)?;
            if *email != existing.email {
                self.ensure_email_free(email, Some(id)).await?;
            }
        }
        if let Some(phone) = &input.phone {
            validate_phone(phone)?;
        }
        if let Some(document) = &input.document {
            validate_document(document)?;
        }
        if let Some(address) = &input.address {
            validate_address(address)?;
        }

        let mut active: clients::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(document) = input.document {
            active.document = Set(Some(document));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Soft-deletes a client by setting `deleted_at`.
    ///
    /// Linked transactions keep their `client_id`; only a hard delete would
    /// null it out through the foreign key.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), ClientError> {
        let existing = self.find_by_id(id).await?;
        let now = Utc::now().into();

        let mut active: clients::ActiveModel = existing.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await?;

        Ok(())
    }

    /// Checks that no live client other than `exclude` holds the email.
    async fn ensure_email_free(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ClientError> {
        let mut query = clients::Entity::find()
            .filter(clients::Column::Email.eq(email))
            .filter(clients::Column::DeletedAt.is_null());

        if let Some(id) = exclude {
            query = query.filter(clients::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(ClientError::EmailTaken(email.to_owned()));
        }
        Ok(())
    }
}
