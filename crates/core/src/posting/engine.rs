//! Posting validation and commit logic.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tesoria_shared::LedgerConfig;
use tesoria_shared::types::{AccountId, LedgerEntryId, OrganizationId};

use super::types::PostingRequest;
use crate::chart::{Account, ChartOfAccounts};
use crate::fiscal::Period;
use crate::ledger::{EntryStatus, LedgerEntry, LedgerError, LedgerStore, VoucherType};

/// Validates and commits postings into the ledger store.
///
/// Every operation validates fully before touching the store: a posting
/// either fully succeeds or the store is unchanged. The `&mut LedgerStore`
/// borrow is the transaction boundary, so validate-then-append cannot be
/// interleaved by a concurrent writer.
#[derive(Debug, Default)]
pub struct PostingEngine {
    config: LedgerConfig,
}

impl PostingEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    /// Validates and commits a caller posting.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` if the account does not exist
    /// * `CrossOrganizationAccount` if the account belongs to another
    ///   organization
    /// * `PostingToParentAccount` if the account has children
    /// * `NegativeAmount` / `ZeroAmount` for invalid amounts
    pub fn post(
        &self,
        chart: &ChartOfAccounts,
        store: &mut LedgerStore,
        request: PostingRequest,
    ) -> Result<LedgerEntry, LedgerError> {
        self.validate_target(chart, request.chart_account_id, request.organization_id)?;
        if request.debit < Decimal::ZERO || request.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        let debit = self.round(request.debit);
        let credit = self.round(request.credit);
        if debit.is_zero() && credit.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }

        let entry = LedgerEntry {
            id: LedgerEntryId::new(),
            organization_id: request.organization_id,
            chart_account_id: request.chart_account_id,
            posting_date: request.posting_date,
            voucher_type: request.voucher_type,
            voucher_number: request.voucher_number,
            against_voucher_number: request.against_voucher_number,
            partner: request.partner,
            project: request.project,
            cost_center: request.cost_center,
            debit,
            credit,
            currency: request.currency.unwrap_or(self.config.default_currency),
            description: request.description,
            remarks: request.remarks,
            is_opening_entry: false,
            is_closing_entry: false,
            is_system_generated: false,
            status: EntryStatus::Active,
            seq: 0,
        };
        let id = store.append(entry.clone());
        tracing::info!(
            entry_id = %id,
            voucher = %store.entry(id).map(|e| e.voucher_number.as_str()).unwrap_or_default(),
            "posting committed"
        );
        store
            .entry(id)
            .cloned()
            .ok_or(LedgerError::EntryNotFound(id))
    }

    /// Generates the system opening entry for an account and period.
    ///
    /// Idempotent by `(account, period)`: a prior active opening entry for
    /// the same period is cancelled and the replacement appended as one
    /// atomic unit, so two concurrent seeders can never leave duplicate
    /// opening balances.
    ///
    /// # Errors
    ///
    /// Same target validation as [`post`](Self::post).
    pub fn generate_opening_entry(
        &self,
        chart: &ChartOfAccounts,
        store: &mut LedgerStore,
        account_id: AccountId,
        organization_id: OrganizationId,
        amount: Decimal,
        as_of: NaiveDate,
    ) -> Result<LedgerEntry, LedgerError> {
        self.validate_target(chart, account_id, organization_id)?;
        let period = Period::containing(as_of);
        let superseded: Vec<LedgerEntryId> = store
            .opening_entries_for(account_id, period)
            .iter()
            .map(|e| e.id)
            .collect();
        for prior in &superseded {
            store.cancel(*prior)?;
        }
        if !superseded.is_empty() {
            tracing::info!(
                account_id = %account_id,
                period = %period,
                count = superseded.len(),
                "superseded prior opening entries"
            );
        }

        let entry = self.system_entry(
            account_id,
            organization_id,
            as_of,
            self.round(amount),
            VoucherType::Opening,
            format!("OPEN-{}", period.year),
        );
        let id = store.append(entry);
        store
            .entry(id)
            .cloned()
            .ok_or(LedgerError::EntryNotFound(id))
    }

    /// Snapshots an account's balance into a system closing entry.
    ///
    /// The snapshot is used as the opening seed for the following period.
    /// Idempotent per `(account, period)` like opening generation.
    ///
    /// # Errors
    ///
    /// Same target validation as [`post`](Self::post), plus any balance
    /// computation error.
    pub fn generate_closing_entry(
        &self,
        chart: &ChartOfAccounts,
        store: &mut LedgerStore,
        account_id: AccountId,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<LedgerEntry, LedgerError> {
        self.validate_target(chart, account_id, organization_id)?;
        let balance = store.balance_as_of(chart, account_id, as_of)?;
        let period = Period::containing(as_of);
        let superseded: Vec<LedgerEntryId> = store
            .closing_entries_for(account_id, period)
            .iter()
            .map(|e| e.id)
            .collect();
        for prior in &superseded {
            store.cancel(*prior)?;
        }

        let entry = self.system_entry(
            account_id,
            organization_id,
            as_of,
            self.round(balance),
            VoucherType::Closing,
            format!("CLOSE-{}", period.year),
        );
        let id = store.append(entry);
        store
            .entry(id)
            .cloned()
            .ok_or(LedgerError::EntryNotFound(id))
    }

    fn validate_target(
        &self,
        chart: &ChartOfAccounts,
        account_id: AccountId,
        organization_id: OrganizationId,
    ) -> Result<(), LedgerError> {
        let account: &Account = chart
            .account(account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;
        if account.organization_id != organization_id {
            return Err(LedgerError::CrossOrganizationAccount {
                account_id,
                account_organization: account.organization_id,
                request_organization: organization_id,
            });
        }
        if !chart.is_leaf(account_id) {
            return Err(LedgerError::PostingToParentAccount(account_id));
        }
        Ok(())
    }

    /// Builds a system-generated entry carrying a signed amount: positive on
    /// the debit side, negative on the credit side.
    fn system_entry(
        &self,
        account_id: AccountId,
        organization_id: OrganizationId,
        posting_date: NaiveDate,
        amount: Decimal,
        voucher_type: VoucherType,
        voucher_number: String,
    ) -> LedgerEntry {
        let (debit, credit) = if amount >= Decimal::ZERO {
            (amount, Decimal::ZERO)
        } else {
            (Decimal::ZERO, -amount)
        };
        LedgerEntry {
            id: LedgerEntryId::new(),
            organization_id,
            chart_account_id: account_id,
            posting_date,
            voucher_type,
            voucher_number,
            against_voucher_number: None,
            partner: None,
            project: None,
            cost_center: None,
            debit,
            credit,
            currency: self.config.default_currency,
            description: None,
            remarks: None,
            is_opening_entry: voucher_type == VoucherType::Opening,
            is_closing_entry: voucher_type == VoucherType::Closing,
            is_system_generated: true,
            status: EntryStatus::Active,
            seq: 0,
        }
    }

    /// Rounds to the configured monetary scale using banker's rounding.
    fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(
            self.config.monetary_scale,
            RoundingStrategy::MidpointNearestEven,
        )
    }
}
