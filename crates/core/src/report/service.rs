//! General ledger report rendering.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesoria_shared::types::AccountId;

use crate::chart::{Account, ChartOfAccounts};
use crate::ledger::{LedgerEntry, LedgerStore};

use super::types::{LineKind, ReportLine, ReportParams};

/// Renders general ledger reports.
pub struct GeneralLedgerReport;

impl GeneralLedgerReport {
    /// Renders the report as an ordered list of lines.
    ///
    /// Entry lines are ordered by `(posting_date, seq)` across accounts,
    /// each carrying the running balance of its own account. A malformed
    /// request (inverted date range, unknown or cross-organization account
    /// filter) degrades to an empty report rather than failing.
    #[must_use]
    pub fn render(
        chart: &ChartOfAccounts,
        store: &LedgerStore,
        params: &ReportParams,
    ) -> Vec<ReportLine> {
        if params.start_date > params.end_date {
            return Vec::new();
        }
        let Some(leaves) = Self::resolve_leaves(chart, params) else {
            return Vec::new();
        };

        let leaf_set: HashSet<AccountId> = leaves.iter().map(|a| a.id).collect();
        let entries = store.entries_in_range(
            params.organization_id,
            Some(&leaf_set),
            params.start_date,
            params.end_date,
            params.show_cancelled_entries,
        );

        // Running balance per account, seeded with everything before the
        // range so mid-year reports start from the true carried balance.
        let mut running: HashMap<AccountId, Decimal> = leaves
            .iter()
            .map(|leaf| {
                let seed = match params.start_date.pred_opt() {
                    Some(prev) => store.balance_as_of(chart, leaf.id, prev).unwrap_or_default(),
                    None => leaf.opening_amount,
                };
                (leaf.id, seed)
            })
            .collect();

        // Accounts whose seed still carries the stored opening_amount. An
        // in-range system opening entry supersedes that seed, so the first
        // one encountered backs the stored amount out again.
        let mut opening_seeded: HashSet<AccountId> = {
            let prior_openings: HashSet<AccountId> = params
                .start_date
                .pred_opt()
                .map(|prev| {
                    store
                        .entries_in_range(
                            params.organization_id,
                            Some(&leaf_set),
                            NaiveDate::MIN,
                            prev,
                            false,
                        )
                        .iter()
                        .filter(|e| e.is_opening_entry)
                        .map(|e| e.chart_account_id)
                        .collect()
                })
                .unwrap_or_default();
            leaf_set
                .iter()
                .filter(|id| !prior_openings.contains(id))
                .copied()
                .collect()
        };

        let mut lines = Vec::new();
        if params.show_opening_entries {
            for leaf in &leaves {
                let seed = running.get(&leaf.id).copied().unwrap_or_default();
                let has_activity = entries.iter().any(|e| e.chart_account_id == leaf.id);
                if seed != Decimal::ZERO || has_activity {
                    lines.push(Self::opening_line(leaf, params, seed));
                }
            }
        }

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for entry in entries {
            let slot = running.entry(entry.chart_account_id).or_default();
            // Cancelled entries display but never move the balance; closing
            // entries are snapshots, not movements.
            if entry.is_active() && !entry.is_closing_entry {
                if entry.is_opening_entry && opening_seeded.remove(&entry.chart_account_id) {
                    if let Some(account) = chart.account(entry.chart_account_id) {
                        *slot -= account.opening_amount;
                    }
                }
                *slot += entry.net_amount();
            }
            let balance = *slot;
            if entry.is_active() && !entry.is_opening_entry && !entry.is_closing_entry {
                total_debit += entry.debit;
                total_credit += entry.credit;
            }
            lines.push(Self::entry_line(chart, entry, balance));
        }

        lines.push(ReportLine {
            kind: LineKind::Total,
            posting_date: None,
            account_id: None,
            account_code: None,
            account_name: None,
            voucher_type: None,
            voucher_number: None,
            description: None,
            debit: total_debit,
            credit: total_credit,
            balance: total_debit - total_credit,
            status: None,
        });
        lines
    }

    /// Resolves the leaf accounts in scope, ordered by code.
    ///
    /// `None` signals a filter the report cannot honor.
    fn resolve_leaves<'a>(
        chart: &'a ChartOfAccounts,
        params: &ReportParams,
    ) -> Option<Vec<&'a Account>> {
        let mut leaves = match params.account {
            Some(id) => {
                let account = chart.account(id)?;
                if account.organization_id != params.organization_id {
                    return None;
                }
                chart.leaf_descendants(id).ok()?
            }
            None => chart
                .organization_accounts(params.organization_id)
                .into_iter()
                .filter(|a| chart.is_leaf(a.id))
                .collect(),
        };
        leaves.sort_by(|a, b| a.code.cmp(&b.code));
        Some(leaves)
    }

    fn opening_line(account: &Account, params: &ReportParams, seed: Decimal) -> ReportLine {
        ReportLine {
            kind: LineKind::Opening,
            posting_date: Some(params.start_date),
            account_id: Some(account.id),
            account_code: Some(account.code.clone()),
            account_name: Some(account.name.clone()),
            voucher_type: None,
            voucher_number: None,
            description: Some("Opening balance".to_string()),
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            balance: seed,
            status: None,
        }
    }

    fn entry_line(chart: &ChartOfAccounts, entry: &LedgerEntry, balance: Decimal) -> ReportLine {
        let account = chart.account(entry.chart_account_id);
        ReportLine {
            kind: LineKind::Entry,
            posting_date: Some(entry.posting_date),
            account_id: Some(entry.chart_account_id),
            account_code: account.map(|a| a.code.clone()),
            account_name: account.map(|a| a.name.clone()),
            voucher_type: Some(entry.voucher_type),
            voucher_number: Some(entry.voucher_number.clone()),
            description: entry.description.clone(),
            debit: entry.debit,
            credit: entry.credit,
            balance,
            status: Some(entry.status),
        }
    }
}
