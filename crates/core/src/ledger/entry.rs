//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoria_shared::types::{
    AccountId, CostCenterId, Currency, LedgerEntryId, OrganizationId, PartnerId, ProjectId,
};

/// Lifecycle status of a ledger entry.
///
/// Entries are never deleted; a cancelled entry stays in the store for the
/// audit trail but is excluded from every balance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry counts toward balances.
    Active,
    /// Entry is soft-reversed and excluded from balances.
    Cancelled,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Business document type a posting line references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    /// Manual journal entry.
    Journal,
    /// Outgoing payment.
    Payment,
    /// Incoming receipt.
    Receipt,
    /// Purchase document.
    Purchase,
    /// Sales document.
    Sales,
    /// System-generated period opening.
    Opening,
    /// System-generated period closing.
    Closing,
}

impl VoucherType {
    /// Returns the string representation of the voucher type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Payment => "payment",
            Self::Receipt => "receipt",
            Self::Purchase => "purchase",
            Self::Sales => "sales",
            Self::Opening => "opening",
            Self::Closing => "closing",
        }
    }
}

/// Kind of counterparty referenced by an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerKind {
    /// A customer.
    Customer,
    /// A supplier.
    Supplier,
    /// An employee.
    Employee,
}

/// Polymorphic counterparty reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    /// Counterparty kind.
    pub kind: PartnerKind,
    /// Counterparty identifier.
    pub id: PartnerId,
}

/// A single posting line against a leaf account.
///
/// Entries are created by the posting engine only and are immutable after
/// creation except for `status` transitioning to `Cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: LedgerEntryId,
    /// Organization the entry belongs to.
    pub organization_id: OrganizationId,
    /// The leaf account this entry posts against.
    pub chart_account_id: AccountId,
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
    /// Currency tag.
    pub currency: Currency,
    /// Line description.
    pub description: Option<String>,
    /// Free-form remarks.
    pub remarks: Option<String>,
    /// True for system-generated period opening entries.
    pub is_opening_entry: bool,
    /// True for system-generated period closing snapshots.
    pub is_closing_entry: bool,
    /// True when generated by the engine rather than a caller.
    pub is_system_generated: bool,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Append sequence assigned by the store; stable tie-break for
    /// same-day entries.
    pub seq: u64,
}

impl LedgerEntry {
    /// Returns the net movement of this line (`debit - credit`).
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if this line is a debit (`debit > 0`).
    #[must_use]
    pub fn is_debit(&self) -> bool {
        self.debit > Decimal::ZERO
    }

    /// Returns true if the entry counts toward balances.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EntryStatus::Active
    }
}
