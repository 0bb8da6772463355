//! Approval error types.

use tesoria_shared::AppError;
use tesoria_shared::types::UserId;
use thiserror::Error;

use super::types::{ApprovalStatus, Role};

/// Errors that can occur during approval operations.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// User is not a valid approver for the current chain step.
    #[error("User {user_id} cannot approve at role {role}")]
    NotAnApprover {
        /// The user attempting the approval.
        user_id: UserId,
        /// The role whose approval is currently required.
        role: Role,
    },

    /// The approval advanced concurrently; the caller saw stale state.
    #[error("Stale approval state: expected role index {expected}, current is {actual}")]
    StaleApprovalState {
        /// The role index the caller believed was current.
        expected: usize,
        /// The actual current role index.
        actual: usize,
    },

    /// The request is already in a terminal state.
    #[error("Invalid transition: request is already {}", from.as_str())]
    InvalidTransition {
        /// The terminal state the request is in.
        from: ApprovalStatus,
    },

    /// Rejections must carry a reason.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// The context has no approval assignments at all.
    #[error("No approval assignments exist for the context")]
    EmptyChain,

    /// Context assignment attempted with a cross-cutting role.
    #[error("Role {0} is cross-cutting and cannot be assigned to a context")]
    RoleNotContextScoped(Role),

    /// Override grant attempted with a hierarchy role.
    #[error("Role {0} is context-scoped and cannot be granted as an override")]
    RoleNotCrossCutting(Role),
}

impl ApprovalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotAnApprover { .. } => "NOT_AN_APPROVER",
            Self::StaleApprovalState { .. } => "STALE_APPROVAL_STATE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::EmptyChain => "EMPTY_CHAIN",
            Self::RoleNotContextScoped(_) => "ROLE_NOT_CONTEXT_SCOPED",
            Self::RoleNotCrossCutting(_) => "ROLE_NOT_CROSS_CUTTING",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NotAnApprover { .. } => 403,
            Self::StaleApprovalState { .. } => 409,
            Self::InvalidTransition { .. }
            | Self::RejectionReasonRequired
            | Self::EmptyChain
            | Self::RoleNotContextScoped(_)
            | Self::RoleNotCrossCutting(_) => 400,
        }
    }

    /// Returns true if the caller may retry after re-reading current state.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StaleApprovalState { .. })
    }
}

impl From<ApprovalError> for AppError {
    fn from(err: ApprovalError) -> Self {
        match err {
            ApprovalError::StaleApprovalState { .. } => Self::Conflict(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
