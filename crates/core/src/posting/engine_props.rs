//! Property-based tests for the posting engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tesoria_shared::LedgerConfig;
use tesoria_shared::types::{AccountId, OrganizationId};

use crate::chart::{AccountType, ChartOfAccounts};
use crate::fiscal::Period;
use crate::ledger::{LedgerError, LedgerStore, VoucherType};
use crate::posting::engine::PostingEngine;
use crate::posting::types::PostingRequest;

fn fixture() -> (ChartOfAccounts, OrganizationId, AccountId, AccountId) {
    let mut chart = ChartOfAccounts::new();
    let org = OrganizationId::new();
    let parent = chart
        .create_account(org, "1", "Root", AccountType::Asset, None, Decimal::ZERO)
        .unwrap()
        .id;
    let leaf = chart
        .create_account(org, "1.1", "Leaf", AccountType::Asset, Some(parent), Decimal::ZERO)
        .unwrap()
        .id;
    (chart, org, parent, leaf)
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Posting to an account with children always fails, whatever the
    /// amounts, and leaves the store untouched.
    #[test]
    fn prop_posting_to_parent_always_fails(
        debit in amount_strategy(),
        credit in amount_strategy(),
        day in 1u32..=28,
    ) {
        let (chart, org, parent, _) = fixture();
        let mut store = LedgerStore::new();
        let engine = PostingEngine::new(LedgerConfig::default());

        let request = PostingRequest::new(
            parent,
            org,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            VoucherType::Journal,
            "J",
            debit,
            credit,
        );
        let result = engine.post(&chart, &mut store, request);
        prop_assert!(matches!(result, Err(LedgerError::PostingToParentAccount(_))));
        prop_assert!(store.is_empty());
    }

    /// However many times the opening entry is regenerated for a period,
    /// exactly one active opening entry remains and it carries the last
    /// amount.
    #[test]
    fn prop_opening_generation_idempotent(
        amounts in prop::collection::vec(-1_000_000i64..1_000_000, 1..6),
    ) {
        let (chart, org, _, leaf) = fixture();
        let mut store = LedgerStore::new();
        let engine = PostingEngine::new(LedgerConfig::default());
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        for cents in &amounts {
            engine
                .generate_opening_entry(&chart, &mut store, leaf, org, Decimal::new(*cents, 2), as_of)
                .unwrap();
        }

        let active = store.opening_entries_for(leaf, Period { year: 2025 });
        prop_assert_eq!(active.len(), 1);
        let last = Decimal::new(*amounts.last().unwrap(), 2);
        prop_assert_eq!(active[0].net_amount(), last);
        // Every generation appended a row; none were deleted.
        prop_assert_eq!(store.len(), amounts.len());
    }

    /// A posting either fully succeeds or the store is unchanged.
    #[test]
    fn prop_failed_posting_never_partially_commits(
        debit in -5_000i64..5_000,
        credit in -5_000i64..5_000,
    ) {
        let (chart, org, _, leaf) = fixture();
        let mut store = LedgerStore::new();
        let engine = PostingEngine::new(LedgerConfig::default());

        let request = PostingRequest::new(
            leaf,
            org,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            VoucherType::Journal,
            "J",
            Decimal::new(debit, 2),
            Decimal::new(credit, 2),
        );
        let before = store.len();
        match engine.post(&chart, &mut store, request) {
            Ok(_) => prop_assert_eq!(store.len(), before + 1),
            Err(_) => prop_assert_eq!(store.len(), before),
        }
    }
}
