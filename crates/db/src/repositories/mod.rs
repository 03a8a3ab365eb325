//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod client;
pub mod report;
pub mod transaction;

pub use client::{ClientError, ClientFilter, ClientRepository, CreateClientInput, UpdateClientInput};
pub use report::ReportRepository;
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
