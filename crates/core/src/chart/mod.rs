//! Hierarchical chart of accounts.
//!
//! This module owns the per-organization account tree:
//! - Account domain types
//! - Account creation with code uniqueness and parent validation
//! - Children/descendants traversal (iterative, cycle-safe)
//! - Reparenting with cycle detection
//!
//! The dotted account code (e.g. `1.1.1.5`) is advisory/display-only; the
//! authoritative hierarchy is the `parent_id` pointer graph.

pub mod error;
pub mod service;
pub mod types;

pub use error::ChartError;
pub use service::ChartOfAccounts;
pub use types::{Account, AccountType};
