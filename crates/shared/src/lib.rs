//! Shared types, errors, and configuration for Fluxo.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Pagination types for list endpoints
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
