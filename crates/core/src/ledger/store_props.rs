//! Property-based tests for ledger balance computation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tesoria_shared::types::{AccountId, Currency, LedgerEntryId, OrganizationId};

use crate::chart::{AccountType, ChartOfAccounts};
use crate::ledger::entry::{EntryStatus, LedgerEntry, VoucherType};
use crate::ledger::store::LedgerStore;

/// One randomized posting: (leaf index, day-of-january, signed cents).
type Movement = (usize, u32, i64);

fn movement_strategy(leaves: usize) -> impl Strategy<Value = Movement> {
    (0..leaves, 1u32..=31, -1_000_000i64..1_000_000i64)
}

fn movements_strategy(leaves: usize, max_len: usize) -> impl Strategy<Value = Vec<Movement>> {
    prop::collection::vec(movement_strategy(leaves), 1..=max_len)
}

fn build_chart(leaves: usize) -> (ChartOfAccounts, OrganizationId, AccountId, Vec<AccountId>) {
    let mut chart = ChartOfAccounts::new();
    let org = OrganizationId::new();
    let root = chart
        .create_account(org, "1", "Root", AccountType::Asset, None, Decimal::ZERO)
        .unwrap()
        .id;
    let leaf_ids: Vec<AccountId> = (0..leaves)
        .map(|i| {
            chart
                .create_account(
                    org,
                    format!("1.{i}"),
                    format!("Leaf {i}"),
                    AccountType::Asset,
                    Some(root),
                    Decimal::ZERO,
                )
                .unwrap()
                .id
        })
        .collect();
    (chart, org, root, leaf_ids)
}

fn entry_for(org: OrganizationId, account: AccountId, movement: Movement) -> LedgerEntry {
    let (_, day, cents) = movement;
    let amount = Decimal::new(cents, 2);
    let (debit, credit) = if amount >= Decimal::ZERO {
        (amount, Decimal::ZERO)
    } else {
        (Decimal::ZERO, -amount)
    };
    LedgerEntry {
        id: LedgerEntryId::new(),
        organization_id: org,
        chart_account_id: account,
        posting_date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        voucher_type: VoucherType::Journal,
        voucher_number: "J".to_string(),
        against_voucher_number: None,
        partner: None,
        project: None,
        cost_center: None,
        debit,
        credit,
        currency: Currency::Brl,
        description: None,
        remarks: None,
        is_opening_entry: false,
        is_closing_entry: false,
        is_system_generated: false,
        status: EntryStatus::Active,
        seq: 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any account with children, its balance equals the sum of its
    /// children's balances on every date.
    #[test]
    fn prop_parent_balance_is_sum_of_children(
        movements in movements_strategy(4, 30),
        asof_day in 1u32..=31,
    ) {
        let (chart, org, root, leaves) = build_chart(4);
        let mut store = LedgerStore::new();
        for m in &movements {
            store.append(entry_for(org, leaves[m.0], *m));
        }

        let asof = NaiveDate::from_ymd_opt(2025, 1, asof_day).unwrap();
        let parent = store.balance_as_of(&chart, root, asof).unwrap();
        let sum: Decimal = leaves
            .iter()
            .map(|leaf| store.balance_as_of(&chart, *leaf, asof).unwrap())
            .sum();
        prop_assert_eq!(parent, sum);
    }

    /// The balance as of the last day equals the signed sum of all active
    /// movements regardless of append order.
    #[test]
    fn prop_balance_equals_sum_of_movements(
        movements in movements_strategy(1, 30),
    ) {
        let (chart, org, _, leaves) = build_chart(1);
        let mut store = LedgerStore::new();
        for m in &movements {
            store.append(entry_for(org, leaves[0], *m));
        }

        let expected: Decimal = movements.iter().map(|m| Decimal::new(m.2, 2)).sum();
        let asof = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        prop_assert_eq!(
            store.balance_as_of(&chart, leaves[0], asof).unwrap(),
            expected
        );
    }

    /// After cancelling an entry, no balance at or after its posting date
    /// includes its movement.
    #[test]
    fn prop_cancellation_excludes_entry(
        movements in movements_strategy(1, 20),
        cancel_index in 0usize..20,
    ) {
        let (chart, org, _, leaves) = build_chart(1);
        let mut store = LedgerStore::new();
        let ids: Vec<LedgerEntryId> = movements
            .iter()
            .map(|m| store.append(entry_for(org, leaves[0], *m)))
            .collect();
        let cancel_index = cancel_index % ids.len();
        store.cancel(ids[cancel_index]).unwrap();

        let expected: Decimal = movements
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != cancel_index)
            .map(|(_, m)| Decimal::new(m.2, 2))
            .sum();
        let asof = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        prop_assert_eq!(
            store.balance_as_of(&chart, leaves[0], asof).unwrap(),
            expected
        );
    }

    /// Range queries return entries sorted by posting date with the append
    /// sequence as a stable tie-break.
    #[test]
    fn prop_range_query_is_ordered(
        movements in movements_strategy(2, 30),
    ) {
        let (_chart, org, _, leaves) = build_chart(2);
        let mut store = LedgerStore::new();
        for m in &movements {
            store.append(entry_for(org, leaves[m.0 % 2], *m));
        }

        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let ordered = store.entries_in_range(org, None, start, end, false);
        for pair in ordered.windows(2) {
            prop_assert!(
                (pair[0].posting_date, pair[0].seq) < (pair[1].posting_date, pair[1].seq)
            );
        }
    }
}
