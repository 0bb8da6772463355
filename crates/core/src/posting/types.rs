//! Posting request types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoria_shared::types::{AccountId, CostCenterId, Currency, OrganizationId, ProjectId};

use crate::ledger::{Partner, VoucherType};

/// A caller-supplied posting request.
///
/// Each request describes one independent account movement; the engine does
/// not require balanced debit/credit legs across a voucher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingRequest {
    /// The leaf account to post against.
    pub chart_account_id: AccountId,
    /// Organization the posting belongs to.
    pub organization_id: OrganizationId,
    /// Date the movement takes effect.
    pub posting_date: NaiveDate,
    /// Business document type.
    pub voucher_type: VoucherType,
    /// Business document number.
    pub voucher_number: String,
    /// Optional link to a counter-entry's voucher.
    pub against_voucher_number: Option<String>,
    /// Optional counterparty.
    pub partner: Option<Partner>,
    /// Optional project dimension.
    pub project: Option<ProjectId>,
    /// Optional cost center dimension.
    pub cost_center: Option<CostCenterId>,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
    /// Currency tag; the configured default applies when absent.
    pub currency: Option<Currency>,
    /// Line description.
    pub description: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

impl PostingRequest {
    /// Creates a minimal request; optional fields default to `None`.
    #[must_use]
    pub fn new(
        chart_account_id: AccountId,
        organization_id: OrganizationId,
        posting_date: NaiveDate,
        voucher_type: VoucherType,
        voucher_number: impl Into<String>,
        debit: Decimal,
        credit: Decimal,
    ) -> Self {
        Self {
            chart_account_id,
            organization_id,
            posting_date,
            voucher_type,
            voucher_number: voucher_number.into(),
            against_voucher_number: None,
            partner: None,
            project: None,
            cost_center: None,
            debit,
            credit,
            currency: None,
            description: None,
            remarks: None,
        }
    }
}
