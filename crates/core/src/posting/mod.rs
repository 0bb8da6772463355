//! Posting engine.
//!
//! This module validates and commits postings into the ledger store:
//! - Caller-facing posting requests
//! - Leaf/organization/amount validation with typed errors
//! - System-generated opening and closing entries with idempotent
//!   supersession per account and period

pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::PostingEngine;
pub use types::PostingRequest;
