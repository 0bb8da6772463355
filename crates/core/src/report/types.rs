//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoria_shared::types::{AccountId, OrganizationId};

use crate::ledger::entry::{EntryStatus, VoucherType};

/// Parameters for a general ledger report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParams {
    /// Organization to report on.
    pub organization_id: OrganizationId,
    /// Restrict to one account and its subtree; `None` means all accounts.
    pub account: Option<AccountId>,
    /// First posting date included.
    pub start_date: NaiveDate,
    /// Last posting date included.
    pub end_date: NaiveDate,
    /// Emit synthetic opening balance lines per account.
    pub show_opening_entries: bool,
    /// Include cancelled entries as display-only lines.
    pub show_cancelled_entries: bool,
}

/// What a report line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Synthetic opening balance carried into the range.
    Opening,
    /// A real ledger entry.
    Entry,
    /// Synthetic grand total over the real lines.
    Total,
}

/// One row of a general ledger report.
///
/// Synthetic rows (`Opening`, `Total`) leave the per-entry fields unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLine {
    /// Row kind.
    pub kind: LineKind,
    /// Posting date, where applicable.
    pub posting_date: Option<NaiveDate>,
    /// Account the row belongs to.
    pub account_id: Option<AccountId>,
    /// Account code.
    pub account_code: Option<String>,
    /// Account name.
    pub account_name: Option<String>,
    /// Voucher type of the underlying entry.
    pub voucher_type: Option<VoucherType>,
    /// Voucher number of the underlying entry.
    pub voucher_number: Option<String>,
    /// Entry description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this row (opening seed for `Opening` rows,
    /// net debit minus credit for the `Total` row).
    pub balance: Decimal,
    /// Entry status, where applicable.
    pub status: Option<EntryStatus>,
}
