//! Ledger error types for posting validation and store state errors.

use tesoria_shared::AppError;
use tesoria_shared::types::{AccountId, LedgerEntryId, OrganizationId};
use thiserror::Error;

use crate::chart::ChartError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account belongs to a different organization than the request.
    #[error(
        "Account {account_id} belongs to organization {account_organization}, request targets {request_organization}"
    )]
    CrossOrganizationAccount {
        /// The account being posted to.
        account_id: AccountId,
        /// The organization owning the account.
        account_organization: OrganizationId,
        /// The organization named by the request.
        request_organization: OrganizationId,
    },

    /// Posting targeted an account that has children.
    #[error("Account {0} has children and cannot accept direct postings")]
    PostingToParentAccount(AccountId),

    /// Debit or credit amount is negative.
    #[error("Debit and credit amounts cannot be negative")]
    NegativeAmount,

    /// Both debit and credit are zero.
    #[error("Entry must carry a non-zero debit or credit")]
    ZeroAmount,

    // ========== Store Errors ==========
    /// Ledger entry not found.
    #[error("Ledger entry not found: {0}")]
    EntryNotFound(LedgerEntryId),

    // ========== Chart Errors ==========
    /// Underlying chart of accounts error (e.g. cycle during roll-up).
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::CrossOrganizationAccount { .. } => "CROSS_ORGANIZATION_ACCOUNT",
            Self::PostingToParentAccount(_) => "POSTING_TO_PARENT_ACCOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Chart(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::CrossOrganizationAccount { .. }
            | Self::PostingToParentAccount(_)
            | Self::NegativeAmount
            | Self::ZeroAmount => 400,
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,
            Self::Chart(err) => err.http_status_code(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(_) | LedgerError::EntryNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LedgerError::Chart(chart) => chart.into(),
            _ => Self::Validation(err.to_string()),
        }
    }
}
