//! Per-request approval state machine.

use chrono::{DateTime, Utc};
use tesoria_shared::types::UserId;

use super::error::ApprovalError;
use super::graph::ApprovalGraph;
use super::types::{ApprovalContext, ApprovalStatus, Role};

/// One recorded approval decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalDecision {
    /// The user who decided.
    pub user_id: UserId,
    /// The chain role the decision satisfied (or rejected at).
    pub role: Role,
    /// True for an approval, false for a rejection.
    pub approved: bool,
    /// Mandatory reason for rejections, absent for approvals.
    pub reason: Option<String>,
    /// When the decision was recorded.
    pub decided_at: DateTime<Utc>,
}

/// A single approval request walking its required chain.
///
/// The required chain is re-resolved from the graph on every decision, so
/// assignment changes between decisions take effect immediately. Callers
/// pass the role index they observed; a mismatch with the current index
/// means the request advanced concurrently and the caller must re-read.
#[derive(Debug)]
pub struct ApprovalRequest {
    context: ApprovalContext,
    status: ApprovalStatus,
    history: Vec<ApprovalDecision>,
}

impl ApprovalRequest {
    /// Opens a request for a context, pending on the first chain role.
    ///
    /// # Errors
    ///
    /// Returns `EmptyChain` if the context has no approval assignments;
    /// a request with nothing to approve it would be unresolvable.
    pub fn new(graph: &ApprovalGraph, context: ApprovalContext) -> Result<Self, ApprovalError> {
        if graph.required_chain(context).is_empty() {
            return Err(ApprovalError::EmptyChain);
        }
        Ok(Self {
            context,
            status: ApprovalStatus::Pending { role_index: 0 },
            history: Vec::new(),
        })
    }

    /// The context this request was opened for.
    #[must_use]
    pub fn context(&self) -> ApprovalContext {
        self.context
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ApprovalStatus {
        self.status
    }

    /// The chain index currently awaited, if the request is still pending.
    #[must_use]
    pub fn role_index(&self) -> Option<usize> {
        match self.status {
            ApprovalStatus::Pending { role_index } => Some(role_index),
            _ => None,
        }
    }

    /// The decisions recorded so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ApprovalDecision] {
        &self.history
    }

    /// Records an approval for the chain step at `expected_role_index`.
    ///
    /// The expected index is a compare-and-swap guard: it must match the
    /// request's current index or the call fails without side effects.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the request is already terminal
    /// - `StaleApprovalState` if `expected_role_index` does not match
    /// - `NotAnApprover` if the user may not approve the current role
    pub fn approve(
        &mut self,
        graph: &ApprovalGraph,
        user_id: UserId,
        expected_role_index: usize,
    ) -> Result<ApprovalStatus, ApprovalError> {
        let ApprovalStatus::Pending { role_index } = self.status else {
            return Err(ApprovalError::InvalidTransition { from: self.status });
        };
        if expected_role_index != role_index {
            return Err(ApprovalError::StaleApprovalState {
                expected: expected_role_index,
                actual: role_index,
            });
        }

        let chain = graph.required_chain(self.context);
        let Some(role) = chain.get(role_index).copied() else {
            // The chain shrank underneath a pending index. Every remaining
            // requirement is gone, so the request completes.
            self.status = ApprovalStatus::Approved;
            return Ok(self.status);
        };

        if !graph.can_approve(self.context, user_id, role) {
            return Err(ApprovalError::NotAnApprover { user_id, role });
        }

        self.history.push(ApprovalDecision {
            user_id,
            role,
            approved: true,
            reason: None,
            decided_at: Utc::now(),
        });
        self.status = if role_index + 1 < chain.len() {
            ApprovalStatus::Pending {
                role_index: role_index + 1,
            }
        } else {
            ApprovalStatus::Approved
        };
        tracing::info!(
            user_id = %user_id,
            role = %role,
            status = self.status.as_str(),
            "approval recorded"
        );
        Ok(self.status)
    }

    /// Rejects the request with a mandatory reason.
    ///
    /// Any valid approver for the current step may reject; rejection is
    /// terminal and short-circuits the rest of the chain.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the request is already terminal
    /// - `RejectionReasonRequired` if the reason is empty or whitespace
    /// - `NotAnApprover` if the user may not decide the current role
    pub fn reject(
        &mut self,
        graph: &ApprovalGraph,
        user_id: UserId,
        reason: &str,
    ) -> Result<ApprovalStatus, ApprovalError> {
        let ApprovalStatus::Pending { role_index } = self.status else {
            return Err(ApprovalError::InvalidTransition { from: self.status });
        };
        if reason.trim().is_empty() {
            return Err(ApprovalError::RejectionReasonRequired);
        }

        let chain = graph.required_chain(self.context);
        let Some(role) = chain.get(role_index).copied() else {
            self.status = ApprovalStatus::Approved;
            return Err(ApprovalError::InvalidTransition { from: self.status });
        };
        if !graph.can_approve(self.context, user_id, role) {
            return Err(ApprovalError::NotAnApprover { user_id, role });
        }

        self.history.push(ApprovalDecision {
            user_id,
            role,
            approved: false,
            reason: Some(reason.trim().to_string()),
            decided_at: Utc::now(),
        });
        self.status = ApprovalStatus::Rejected;
        tracing::info!(user_id = %user_id, role = %role, "approval request rejected");
        Ok(self.status)
    }
}
