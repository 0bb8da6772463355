//! Core business logic for Tesoria.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; transport and persistence adapters embed it through a typed
//! in-process API.
//!
//! # Modules
//!
//! - `chart` - Hierarchical chart of accounts
//! - `ledger` - Append-only ledger entries and balance calculations
//! - `posting` - Posting engine with opening/closing entry generation
//! - `approval` - Hierarchical approval chain resolution and state machine
//! - `report` - General ledger report projection
//! - `fiscal` - Fiscal period management

pub mod approval;
pub mod chart;
pub mod fiscal;
pub mod ledger;
pub mod posting;
pub mod report;
