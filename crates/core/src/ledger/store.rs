//! Append-only ledger storage and balance computation.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesoria_shared::types::{AccountId, LedgerEntryId, OrganizationId};

use super::entry::{EntryStatus, LedgerEntry};
use super::error::LedgerError;
use crate::chart::{Account, ChartOfAccounts};
use crate::fiscal::Period;

/// Append-mostly store of ledger entries.
///
/// Entries are immutable after append except for cancellation, which flips
/// the status and never deletes the row. No balance is stored per entry;
/// balances are always recomputed from the active entries, so concurrent
/// writes landing out of chronological order can never cause drift.
///
/// Mutating methods take `&mut self`: the exclusive borrow is the in-process
/// transaction boundary. The embedding persistence adapter maps it onto a
/// real database transaction.
#[derive(Debug, Default)]
pub struct LedgerStore {
    entries: Vec<LedgerEntry>,
    next_seq: u64,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, assigning its sequence number.
    ///
    /// The store performs no validation; the posting engine is the only
    /// writer and validates before appending.
    pub fn append(&mut self, mut entry: LedgerEntry) -> LedgerEntryId {
        entry.seq = self.next_seq;
        self.next_seq += 1;
        let id = entry.id;
        tracing::info!(
            entry_id = %id,
            account_id = %entry.chart_account_id,
            posting_date = %entry.posting_date,
            debit = %entry.debit,
            credit = %entry.credit,
            "ledger entry appended"
        );
        self.entries.push(entry);
        id
    }

    /// Looks up an entry by ID.
    #[must_use]
    pub fn entry(&self, id: LedgerEntryId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Marks an entry cancelled (soft-reversal).
    ///
    /// The row is kept for the audit trail but is excluded from all balance
    /// computations from this point forward, including retroactively for
    /// periods already reported.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist.
    pub fn cancel(&mut self, id: LedgerEntryId) -> Result<(), LedgerError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        entry.status = EntryStatus::Cancelled;
        tracing::info!(entry_id = %id, "ledger entry cancelled");
        Ok(())
    }

    /// Computes an account's balance as of a date.
    ///
    /// Leaf accounts sum `debit - credit` over active, non-closing entries
    /// with `posting_date <= date`, seeded by the account's `opening_amount`
    /// while no system opening entry exists in that range. A parent
    /// account's balance is the sum over its leaf descendants; it never
    /// double counts because only leaves accept postings.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown account, or a chart error if
    /// the hierarchy is malformed.
    pub fn balance_as_of(
        &self,
        chart: &ChartOfAccounts,
        account_id: AccountId,
        date: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        if chart.account(account_id).is_none() {
            return Err(LedgerError::AccountNotFound(account_id));
        }
        let mut total = Decimal::ZERO;
        for leaf in chart.leaf_descendants(account_id)? {
            total += self.leaf_balance_as_of(leaf, date);
        }
        Ok(total)
    }

    /// Returns active opening entries for an account within a period.
    #[must_use]
    pub fn opening_entries_for(&self, account_id: AccountId, period: Period) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| {
                e.chart_account_id == account_id
                    && e.is_opening_entry
                    && e.is_active()
                    && period.contains(e.posting_date)
            })
            .collect()
    }

    /// Returns active closing entries for an account within a period.
    #[must_use]
    pub fn closing_entries_for(&self, account_id: AccountId, period: Period) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| {
                e.chart_account_id == account_id
                    && e.is_closing_entry
                    && e.is_active()
                    && period.contains(e.posting_date)
            })
            .collect()
    }

    /// Returns all entries for an account, in append order.
    #[must_use]
    pub fn entries_for_account(&self, account_id: AccountId) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| e.chart_account_id == account_id)
            .collect()
    }

    /// Returns entries for an organization within a date range, ordered by
    /// `(posting_date, seq)` ascending - a stable tie-break for same-day
    /// entries.
    ///
    /// `accounts` narrows the result to a set of accounts when provided.
    /// Cancelled entries are excluded unless `include_cancelled`.
    #[must_use]
    pub fn entries_in_range(
        &self,
        organization_id: OrganizationId,
        accounts: Option<&HashSet<AccountId>>,
        start: NaiveDate,
        end: NaiveDate,
        include_cancelled: bool,
    ) -> Vec<&LedgerEntry> {
        let mut result: Vec<&LedgerEntry> = self
            .entries
            .iter()
            .filter(|e| e.organization_id == organization_id)
            .filter(|e| e.posting_date >= start && e.posting_date <= end)
            .filter(|e| accounts.is_none_or(|set| set.contains(&e.chart_account_id)))
            .filter(|e| include_cancelled || e.is_active())
            .collect();
        result.sort_by_key(|e| (e.posting_date, e.seq));
        result
    }

    /// Number of entries in the store, cancelled included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn leaf_balance_as_of(&self, account: &Account, date: NaiveDate) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut has_opening_entry = false;
        for entry in &self.entries {
            if entry.chart_account_id != account.id
                || !entry.is_active()
                || entry.is_closing_entry
                || entry.posting_date > date
            {
                continue;
            }
            has_opening_entry |= entry.is_opening_entry;
            total += entry.net_amount();
        }
        // The stored opening_amount seeds the balance only until a system
        // opening entry supersedes it.
        if !has_opening_entry {
            total += account.opening_amount;
        }
        total
    }
}
