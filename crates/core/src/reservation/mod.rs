//! Stock reservation state machine.
//!
//! A reservation claims a quantity of a batch's stock on behalf of a
//! sales order. Active reservations reduce free stock without moving
//! physical stock; terminal reservations (released, cancelled) do not
//! count. Terminal states never transition back to active except
//! through the explicit administrative restore operation, which also
//! restores the owning order's status.

pub mod error;
pub mod types;

pub use error::ReservationError;
pub use types::{OrderStatus, ReservationStatus};

use rust_decimal::Decimal;

/// Checks whether `qty` can be reserved against a batch.
///
/// Free stock is `current_stock - reserved_stock`; the request must
/// fit entirely within it.
///
/// # Errors
///
/// Returns [`ReservationError::InvalidQuantity`] for a non-positive
/// request and [`ReservationError::InsufficientStock`] when the
/// request exceeds free stock.
pub fn check_availability(
    current_stock: Decimal,
    reserved_stock: Decimal,
    qty: Decimal,
) -> Result<(), ReservationError> {
    if qty <= Decimal::ZERO {
        return Err(ReservationError::InvalidQuantity(qty));
    }

    let free = current_stock - reserved_stock;
    if qty > free {
        return Err(ReservationError::InsufficientStock {
            requested: qty,
            available: free,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reserve_within_free_stock() {
        assert!(check_availability(dec!(150), dec!(60), dec!(90)).is_ok());
    }

    #[test]
    fn test_reserve_exceeding_free_stock() {
        // free = 150 - 60 = 90, so 100 must fail
        let err = check_availability(dec!(150), dec!(60), dec!(100)).unwrap_err();
        match err {
            ReservationError::InsufficientStock {
                requested,
                available,
            } => {
                assert_eq!(requested, dec!(100));
                assert_eq!(available, dec!(90));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn test_reserve_exactly_free_stock() {
        assert!(check_availability(dec!(150), dec!(60), dec!(90)).is_ok());
    }

    #[test]
    fn test_zero_and_negative_qty_rejected() {
        assert!(matches!(
            check_availability(dec!(100), dec!(0), dec!(0)),
            Err(ReservationError::InvalidQuantity(_))
        ));
        assert!(matches!(
            check_availability(dec!(100), dec!(0), dec!(-5)),
            Err(ReservationError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_fully_reserved_batch() {
        assert!(matches!(
            check_availability(dec!(100), dec!(100), dec!(1)),
            Err(ReservationError::InsufficientStock { .. })
        ));
    }
}
