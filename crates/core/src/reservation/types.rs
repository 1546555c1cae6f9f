//! Reservation and order status types.

use serde::{Deserialize, Serialize};

use super::error::ReservationError;

/// Reservation status.
///
/// `active → released` and `active → cancelled` are one-way; the
/// terminal states only return to active via the administrative
/// restore operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// The reservation holds stock against its order.
    Active,
    /// The reserved stock was delivered or freed normally.
    Released,
    /// The owning order was cancelled.
    Cancelled,
}

impl ReservationStatus {
    /// Returns true if the reservation counts toward reserved stock.
    #[must_use]
    pub fn holds_stock(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if the reservation is in a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released | Self::Cancelled)
    }

    /// Validates an ordinary (non-restore) transition.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidTransition`] unless the
    /// transition is `active → released` or `active → cancelled`.
    pub fn transition_to(self, target: Self) -> Result<Self, ReservationError> {
        match (self, target) {
            (Self::Active, Self::Released) | (Self::Active, Self::Cancelled) => Ok(target),
            (from, to) => Err(ReservationError::InvalidTransition { from, to }),
        }
    }

    /// Validates the administrative restore transition.
    ///
    /// Restore is the only path back to active; it requires a terminal
    /// state, so restoring an already-active reservation is rejected
    /// (the second restorer lost the race).
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidTransition`] when the
    /// reservation is not in a terminal state.
    pub fn restore(self) -> Result<Self, ReservationError> {
        if self.is_terminal() {
            Ok(Self::Active)
        } else {
            Err(ReservationError::InvalidTransition {
                from: self,
                to: Self::Active,
            })
        }
    }
}

/// Sales order status, as far as the reservation manager needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order is open and may hold active reservations.
    Open,
    /// Order was delivered; its reservations are released.
    Delivered,
    /// Order was cancelled; its reservations are cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Status the order returns to when a reservation is restored.
    #[must_use]
    pub const fn restored() -> Self {
        Self::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_transitions() {
        assert_eq!(
            ReservationStatus::Active
                .transition_to(ReservationStatus::Released)
                .unwrap(),
            ReservationStatus::Released
        );
        assert_eq!(
            ReservationStatus::Active
                .transition_to(ReservationStatus::Cancelled)
                .unwrap(),
            ReservationStatus::Cancelled
        );
    }

    #[test]
    fn test_terminal_states_do_not_transition() {
        for terminal in [ReservationStatus::Released, ReservationStatus::Cancelled] {
            for target in [
                ReservationStatus::Active,
                ReservationStatus::Released,
                ReservationStatus::Cancelled,
            ] {
                assert!(terminal.transition_to(target).is_err());
            }
        }
    }

    #[test]
    fn test_double_release_rejected() {
        let released = ReservationStatus::Active
            .transition_to(ReservationStatus::Released)
            .unwrap();
        assert!(matches!(
            released.transition_to(ReservationStatus::Released),
            Err(ReservationError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_restore_from_terminal() {
        assert_eq!(
            ReservationStatus::Released.restore().unwrap(),
            ReservationStatus::Active
        );
        assert_eq!(
            ReservationStatus::Cancelled.restore().unwrap(),
            ReservationStatus::Active
        );
    }

    #[test]
    fn test_restore_of_active_rejected() {
        assert!(ReservationStatus::Active.restore().is_err());
    }

    #[test]
    fn test_only_active_holds_stock() {
        assert!(ReservationStatus::Active.holds_stock());
        assert!(!ReservationStatus::Released.holds_stock());
        assert!(!ReservationStatus::Cancelled.holds_stock());
    }

    #[test]
    fn test_restored_order_status() {
        assert_eq!(OrderStatus::restored(), OrderStatus::Open);
    }
}
