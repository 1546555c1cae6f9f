//! Business rule validation for ledger posting.
//!
//! Validation runs to completion before any row is written; a failed
//! check rejects the whole entry with no partial state.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{
    AccountStatus, EntryTotals, EntryType, JournalLineInput, PostEntryInput, ResolvedLine,
};
use saldo_shared::types::AccountId;

/// Validates a posting input and resolves each line to its
/// debit/credit pair.
///
/// Checks, in order:
/// 1. At least one line
/// 2. Every amount positive and non-zero
/// 3. Every account exists and is active
/// 4. Debit and credit sums agree within the balance tolerance
///
/// # Errors
///
/// Returns `LedgerError` on the first violated rule; nothing is
/// persisted by this function, so the caller can surface the error
/// with no cleanup.
pub fn validate_and_resolve<A>(
    input: &PostEntryInput,
    account_lookup: A,
) -> Result<(Vec<ResolvedLine>, EntryTotals), LedgerError>
where
    A: Fn(AccountId) -> Result<AccountStatus, LedgerError>,
{
    if input.lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    let mut resolved = Vec::with_capacity(input.lines.len());

    for line in &input.lines {
        resolved.push(resolve_line(line, &account_lookup)?);
    }

    let totals = calculate_totals(&resolved);

    if !totals.is_balanced {
        return Err(LedgerError::Unbalanced {
            debit: totals.total_debit,
            credit: totals.total_credit,
        });
    }

    Ok((resolved, totals))
}

/// Resolves a single line, validating amount and account.
fn resolve_line<A>(
    line: &JournalLineInput,
    account_lookup: &A,
) -> Result<ResolvedLine, LedgerError>
where
    A: Fn(AccountId) -> Result<AccountStatus, LedgerError>,
{
    if line.amount == Decimal::ZERO {
        return Err(LedgerError::ZeroAmount);
    }
    if line.amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }

    let account = account_lookup(line.account_id)?;
    if !account.is_active {
        return Err(LedgerError::AccountInactive(line.account_id));
    }

    let (debit, credit) = match line.entry_type {
        EntryType::Debit => (line.amount, Decimal::ZERO),
        EntryType::Credit => (Decimal::ZERO, line.amount),
    };

    Ok(ResolvedLine {
        account_id: line.account_id,
        debit,
        credit,
        memo: line.memo.clone(),
        customer_id: line.customer_id,
        supplier_id: line.supplier_id,
        batch_id: line.batch_id,
    })
}

/// Calculates entry totals from resolved lines.
///
/// This is the single formula behind the store's recompute contract:
/// totals are always a sum over lines, never a caller-supplied value.
#[must_use]
pub fn calculate_totals(lines: &[ResolvedLine]) -> EntryTotals {
    let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
    let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();

    EntryTotals::new(total_debit, total_credit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::SourceModule;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use saldo_shared::types::UserId;

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
            source_module: SourceModule::Expenses,
            reference_id: None,
            reference_number: None,
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
            description: "Test entry".to_string(),
            lines,
            created_by: UserId::new(),
        }
    }

    fn ok_lookup(id: AccountId) -> Result<AccountStatus, LedgerError> {
        Ok(AccountStatus { id, is_active: true })
    }

    #[test]
    fn test_balanced_entry() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(525000)),
            make_line(EntryType::Credit, dec!(525000)),
        ]);

        let (resolved, totals) = validate_and_resolve(&input, ok_lookup).unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(totals.is_balanced);
        assert_eq!(resolved[0].debit, dec!(525000));
        assert_eq!(resolved[0].credit, Decimal::ZERO);
        assert_eq!(resolved[1].credit, dec!(525000));
    }

    #[test]
    fn test_unbalanced_entry_rejected() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(100)),
            make_line(EntryType::Credit, dec!(50)),
        ]);

        assert!(matches!(
            validate_and_resolve(&input, ok_lookup),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_dust_within_tolerance_accepted() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(100.005)),
            make_line(EntryType::Credit, dec!(100.00)),
        ]);

        let (_, totals) = validate_and_resolve(&input, ok_lookup).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), dec!(0.005));
    }

    #[test]
    fn test_exactly_one_cent_off_rejected() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(100.01)),
            make_line(EntryType::Credit, dec!(100.00)),
        ]);

        assert!(matches!(
            validate_and_resolve(&input, ok_lookup),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_no_lines_rejected() {
        let input = make_input(vec![]);
        assert!(matches!(
            validate_and_resolve(&input, ok_lookup),
            Err(LedgerError::NoLines)
        ));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(0)),
            make_line(EntryType::Credit, dec!(100)),
        ]);
        assert!(matches!(
            validate_and_resolve(&input, ok_lookup),
            Err(LedgerError::ZeroAmount)
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(-100)),
            make_line(EntryType::Credit, dec!(100)),
        ]);
        assert!(matches!(
            validate_and_resolve(&input, ok_lookup),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_inactive_account_rejected() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(100)),
            make_line(EntryType::Credit, dec!(100)),
        ]);

        let inactive_lookup = |id: AccountId| -> Result<AccountStatus, LedgerError> {
            Ok(AccountStatus {
                id,
                is_active: false,
            })
        };

        assert!(matches!(
            validate_and_resolve(&input, inactive_lookup),
            Err(LedgerError::AccountInactive(_))
        ));
    }

    #[test]
    fn test_missing_account_rejected() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(100)),
            make_line(EntryType::Credit, dec!(100)),
        ]);

        let missing_lookup =
            |id: AccountId| -> Result<AccountStatus, LedgerError> {
                Err(LedgerError::AccountNotFound(id))
            };

        assert!(matches!(
            validate_and_resolve(&input, missing_lookup),
            Err(LedgerError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_multi_line_totals() {
        let input = make_input(vec![
            make_line(EntryType::Debit, dec!(30000)),
            make_line(EntryType::Debit, dec!(20000)),
            make_line(EntryType::Credit, dec!(50000)),
        ]);

        let (resolved, totals) = validate_and_resolve(&input, ok_lookup).unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(totals.total_debit, dec!(50000));
        assert_eq!(totals.total_credit, dec!(50000));
    }
}
