//! Hierarchical approval chain resolution and state machine.
//!
//! This module resolves which approvers, at which organizational level,
//! must sign off on a financial action before it may post:
//! - Role hierarchy with context-independent cross-cutting overrides
//! - Approval contexts (cost center or project) and assignments
//! - Ordered chain resolution over the assignments
//! - Per-request approval state machine with optimistic concurrency

pub mod error;
pub mod graph;
pub mod state;
pub mod types;

#[cfg(test)]
mod approval_props;

pub use error::ApprovalError;
pub use graph::ApprovalGraph;
pub use state::{ApprovalDecision, ApprovalRequest};
pub use types::{ApprovalAssignment, ApprovalContext, ApprovalStatus, NextStep, Role};
