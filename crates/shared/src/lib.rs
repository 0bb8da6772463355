//! Shared types, errors, and configuration for Tesoria.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency tags attached to ledger entries
//! - Application-wide error types
//! - Ledger configuration

pub mod config;
pub mod error;
pub mod types;

pub use config::LedgerConfig;
pub use error::{AppError, AppResult};
