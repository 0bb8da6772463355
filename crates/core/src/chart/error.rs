//! Chart of accounts error types.

use tesoria_shared::AppError;
use tesoria_shared::types::{AccountId, OrganizationId};
use thiserror::Error;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Account code already exists in the organization.
    #[error("Account code {code} already exists in organization {organization_id}")]
    DuplicateCode {
        /// The organization scoping the code.
        organization_id: OrganizationId,
        /// The duplicated code.
        code: String,
    },

    /// Parent account is missing or belongs to another organization.
    #[error("Invalid parent account: {0}")]
    InvalidParent(AccountId),

    /// The requested hierarchy change would create a cycle.
    #[error("Reparenting account {0} would create a cycle")]
    CycleDetected(AccountId),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
}

impl ChartError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode { .. } => "DUPLICATE_CODE",
            Self::InvalidParent(_) => "INVALID_PARENT",
            Self::CycleDetected(_) => "CYCLE_DETECTED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::DuplicateCode { .. } | Self::InvalidParent(_) => 400,
            Self::CycleDetected(_) => 422,
            Self::AccountNotFound(_) => 404,
        }
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::CycleDetected(_) => Self::IntegrityViolation(err.to_string()),
            ChartError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            ChartError::DuplicateCode { .. } | ChartError::InvalidParent(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}
