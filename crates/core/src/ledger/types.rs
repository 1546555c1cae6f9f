//! Ledger domain types for entry creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo_shared::types::{
    AccountId, BatchId, CustomerId, SupplierId, UserId,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entry type: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

/// Source module that owns the transaction behind a journal entry.
///
/// Every entry is posted on behalf of exactly one source record; the
/// tag plus the reference id locate that record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceModule {
    /// Purchase of goods (import or local).
    Purchases,
    /// Sales invoice or delivery.
    Sales,
    /// Operating or import expense.
    Expenses,
    /// Transfer between company accounts.
    Transfers,
    /// Cash movement (receipt, payment, petty cash).
    CashMovements,
    /// Manual correction entry.
    Adjustments,
}

/// Input for a single journal line.
///
/// The amount is always positive; the side is carried by `entry_type`.
/// The store resolves this into a debit-xor-credit pair.
#[derive(Debug, Clone)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// The amount (must be positive).
    pub amount: Decimal,
    /// Whether this is a debit or credit line.
    pub entry_type: EntryType,
    /// Optional memo for this line.
    pub memo: Option<String>,
    /// Optional customer dimension.
    pub customer_id: Option<CustomerId>,
    /// Optional supplier dimension.
    pub supplier_id: Option<SupplierId>,
    /// Optional batch dimension.
    pub batch_id: Option<BatchId>,
}

/// Input for posting a new journal entry.
#[derive(Debug, Clone)]
pub struct PostEntryInput {
    /// The module posting the entry.
    pub source_module: SourceModule,
    /// Id of the owning source record, if any.
    pub reference_id: Option<Uuid>,
    /// Human-readable reference number (e.g. invoice number).
    pub reference_number: Option<String>,
    /// The entry date.
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub description: String,
    /// The journal lines (non-empty, balanced).
    pub lines: Vec<JournalLineInput>,
    /// The user posting the entry.
    pub created_by: UserId,
}

/// Account facts needed to validate a line.
#[derive(Debug, Clone)]
pub struct AccountStatus {
    /// The account ID.
    pub id: AccountId,
    /// Whether the account is active.
    pub is_active: bool,
}

/// A validated line resolved to its debit/credit pair.
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// The debit amount (0 if credit).
    pub debit: Decimal,
    /// The credit amount (0 if debit).
    pub credit: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
    /// Optional customer dimension.
    pub customer_id: Option<CustomerId>,
    /// Optional supplier dimension.
    pub supplier_id: Option<SupplierId>,
    /// Optional batch dimension.
    pub batch_id: Option<BatchId>,
}

/// Entry totals, the derived aggregate of an entry's lines.
///
/// Only the store's recompute operation may persist these values.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the totals agree within the balance tolerance.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates entry totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: saldo_shared::types::is_balanced(total_debit, total_credit),
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_within_tolerance() {
        // floating-sourced rounding dust under a cent still balances
        let totals = EntryTotals::new(dec!(100.005), dec!(100.00));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }
}
