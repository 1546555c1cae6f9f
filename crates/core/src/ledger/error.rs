//! Ledger error types for validation and posting failures.

use rust_decimal::Decimal;
use saldo_shared::types::AccountId;
use saldo_shared::AppError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry has no lines.
    #[error("Entry must have at least one line")]
    NoLines,

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Entry is not balanced within tolerance.
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unbalanced { .. } => Self::Consistency(err.to_string()),
            LedgerError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::NoLines
            | LedgerError::ZeroAmount
            | LedgerError::NegativeAmount
            | LedgerError::AccountInactive(_) => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unbalanced_maps_to_consistency() {
        let err: AppError = LedgerError::Unbalanced {
            debit: dec!(100),
            credit: dec!(50),
        }
        .into();
        assert_eq!(err.error_code(), "CONSISTENCY_ERROR");
    }

    #[test]
    fn test_validation_mapping() {
        let err: AppError = LedgerError::ZeroAmount.into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err: AppError = LedgerError::AccountNotFound(AccountId::new()).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
