//! Reservation error types.

use rust_decimal::Decimal;
use saldo_shared::AppError;
use thiserror::Error;

use super::types::ReservationStatus;

/// Errors that can occur in the reservation manager.
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Reservation quantity must be positive.
    #[error("Reservation quantity must be positive, got {0}")]
    InvalidQuantity(Decimal),

    /// Requested quantity exceeds free stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// The quantity requested.
        requested: Decimal,
        /// Free stock at the time of the check.
        available: Decimal,
    },

    /// The requested status change is not allowed.
    #[error("Invalid reservation transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current status.
        from: ReservationStatus,
        /// Requested status.
        to: ReservationStatus,
    },
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::InvalidQuantity(_) => Self::Validation(err.to_string()),
            ReservationError::InsufficientStock { .. } => Self::Consistency(err.to_string()),
            // two writers raced on the same reservation
            ReservationError::InvalidTransition { .. } => {
                Self::ConcurrencyConflict(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_stock_maps_to_consistency() {
        let err: AppError = ReservationError::InsufficientStock {
            requested: dec!(100),
            available: dec!(90),
        }
        .into();
        assert_eq!(err.error_code(), "CONSISTENCY_ERROR");
    }

    #[test]
    fn test_double_release_maps_to_conflict() {
        let err: AppError = ReservationError::InvalidTransition {
            from: ReservationStatus::Released,
            to: ReservationStatus::Released,
        }
        .into();
        assert_eq!(err.error_code(), "CONCURRENCY_CONFLICT");
    }
}
