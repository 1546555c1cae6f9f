//! Allocation error types.

use rust_decimal::Decimal;
use saldo_shared::AppError;
use thiserror::Error;

/// Errors that can occur during cost allocation.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The container's allocable total is negative.
    #[error("Allocable total cannot be negative: {0}")]
    NegativeAllocableTotal(Decimal),
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::NegativeAllocableTotal(_) => Self::Consistency(err.to_string()),
        }
    }
}
