//! Core business logic for Fluxo.
//!
//! This crate holds the rules that make the application a financial system
//! rather than a generic CRUD shell:
//! - Transaction lifecycle: status machine and input validation
//! - Client input validation
//! - Cashflow aggregation over paid transactions
//!
//! It has no web or database dependencies; the `db` and `api` crates feed it
//! plain values and persist what it returns.

pub mod client;
pub mod reports;
pub mod transaction;
