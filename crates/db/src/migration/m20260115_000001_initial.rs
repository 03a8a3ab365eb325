//! Initial database migration.
//!
//! Creates the clients and transactions tables together with the indexes
//! the listing and report queries rely on.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clients::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Clients::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Clients::Phone).string_len(11))
                    .col(ColumnDef::new(Clients::Document).string_len(14))
                    .col(ColumnDef::new(Clients::Address).text())
                    .col(
                        ColumnDef::new(Clients::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Clients::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Description)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::DueDate).date().not_null())
                    .col(ColumnDef::new(Transactions::PaymentDate).date())
                    .col(ColumnDef::new(Transactions::ClientId).uuid())
                    .col(ColumnDef::new(Transactions::Notes).text())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_client_id")
                            .from(Transactions::Table, Transactions::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_status")
                    .table(Transactions::Table)
                    .col(Transactions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_due_date")
                    .table(Transactions::Table)
                    .col(Transactions::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_payment_date")
                    .table(Transactions::Table)
                    .col(Transactions::PaymentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_client_id")
                    .table(Transactions::Table)
                    .col(Transactions::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Document,
    Address,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Kind,
    Status,
    Description,
    Amount,
    DueDate,
    PaymentDate,
    ClientId,
    Notes,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
