//! Cash movement error types.

use rust_decimal::Decimal;
use saldo_shared::AppError;
use thiserror::Error;

use super::CashChannel;

/// Errors that can occur when recording or moving cash movements.
#[derive(Debug, Error)]
pub enum CashError {
    /// Amount must be positive.
    #[error("Cash movement amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Import-category movements must name their container.
    #[error("Import-category cash movement requires a container link")]
    ImportRequiresContainer,

    /// The movement is already tracked in the requested channel.
    #[error("Cash movement is already tracked in the {0:?} channel")]
    AlreadyInChannel(CashChannel),
}

impl From<CashError> for AppError {
    fn from(err: CashError) -> Self {
        match err {
            CashError::NonPositiveAmount(_) | CashError::ImportRequiresContainer => {
                Self::Validation(err.to_string())
            }
            CashError::AlreadyInChannel(_) => Self::ConcurrencyConflict(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_rule_maps_to_validation() {
        let err: AppError = CashError::ImportRequiresContainer.into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_double_move_maps_to_conflict() {
        let err: AppError = CashError::AlreadyInChannel(CashChannel::Bank).into();
        assert_eq!(err.error_code(), "CONCURRENCY_CONFLICT");
    }
}
