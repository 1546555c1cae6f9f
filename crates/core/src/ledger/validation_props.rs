//! Property tests for ledger validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use saldo_shared::types::{AccountId, UserId};

use super::error::LedgerError;
use super::types::{AccountStatus, EntryType, JournalLineInput, PostEntryInput, SourceModule};
use super::validation::validate_and_resolve;

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn make_line(entry_type: EntryType, amount: Decimal) -> JournalLineInput {
    JournalLineInput {
        account_id: AccountId::new(),
        amount,
        entry_type,
        memo: None,
        customer_id: None,
        supplier_id: None,
        batch_id: None,
    }
}

fn make_input(lines: Vec<JournalLineInput>) -> PostEntryInput {
    PostEntryInput {
        source_module: SourceModule::Adjustments,
        reference_id: None,
        reference_number: None,
        entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        description: "prop entry".to_string(),
        lines,
        created_by: UserId::new(),
    }
}

fn ok_lookup(id: AccountId) -> Result<AccountStatus, LedgerError> {
    Ok(AccountStatus { id, is_active: true })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A mirrored debit/credit pair always validates, and the resolved
    /// lines preserve the amounts on the correct side.
    #[test]
    fn prop_mirrored_pair_always_balances(amount in amount_strategy()) {
        let input = make_input(vec![
            make_line(EntryType::Debit, amount),
            make_line(EntryType::Credit, amount),
        ]);

        let (resolved, totals) = validate_and_resolve(&input, ok_lookup).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(resolved[0].debit, amount);
        prop_assert_eq!(resolved[0].credit, Decimal::ZERO);
        prop_assert_eq!(resolved[1].credit, amount);
    }

    /// Any pair differing by at least one cent is rejected and the
    /// error carries both totals.
    #[test]
    fn prop_imbalance_rejected(
        amount in amount_strategy(),
        offset in 1i64..1_000_000i64,
    ) {
        let skewed = amount + Decimal::new(offset, 2);
        let input = make_input(vec![
            make_line(EntryType::Debit, skewed),
            make_line(EntryType::Credit, amount),
        ]);

        match validate_and_resolve(&input, ok_lookup) {
            Err(LedgerError::Unbalanced { debit, credit }) => {
                prop_assert_eq!(debit, skewed);
                prop_assert_eq!(credit, amount);
            }
            other => prop_assert!(false, "expected Unbalanced, got {other:?}"),
        }
    }

    /// Splitting one side across many lines never changes the verdict:
    /// totals are a pure sum of lines.
    #[test]
    fn prop_split_side_still_balances(
        amount in amount_strategy(),
        parts in 2usize..8,
    ) {
        let parts_dec = Decimal::from(parts as u64);
        let unit = amount / parts_dec;
        let mut lines: Vec<JournalLineInput> = (0..parts - 1)
            .map(|_| make_line(EntryType::Debit, unit))
            .collect();
        // final part takes whatever remains of the total
        let covered: Decimal = unit * Decimal::from((parts - 1) as u64);
        lines.push(make_line(EntryType::Debit, amount - covered));
        lines.push(make_line(EntryType::Credit, amount));

        let result = validate_and_resolve(&input_from(lines), ok_lookup);
        prop_assert!(result.is_ok(), "split sides should balance: {result:?}");
    }
}

fn input_from(lines: Vec<JournalLineInput>) -> PostEntryInput {
    make_input(lines)
}
