//! Append-only ledger entries and balance calculations.
//!
//! This module implements the ledger store:
//! - Ledger entry domain types (postings)
//! - Append-only storage with soft cancellation (audit trail)
//! - As-of balance computation with hierarchical roll-up
//! - Ordered range queries for reporting

pub mod entry;
pub mod error;
pub mod store;

#[cfg(test)]
mod store_props;

pub use entry::{EntryStatus, LedgerEntry, Partner, PartnerKind, VoucherType};
pub use error::LedgerError;
pub use store::LedgerStore;
