//! Cash movement domain model.
//!
//! A cash movement is one tagged union covering expenses, petty cash,
//! receipt and payment vouchers, and fund transfers. The `channel`
//! discriminant says which cash-tracking representation the movement
//! currently lives in; moving between representations is a flip of
//! that discriminant on the one row, so a movement can never exist in
//! both at once and never vanishes mid-move.

pub mod error;

pub use error::CashError;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo_shared::types::{BankAccountId, ChallanId, ContainerId, UserId};
use serde::{Deserialize, Serialize};

/// Kind of cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashKind {
    /// Operating or import expense.
    Expense,
    /// Petty cash transaction.
    PettyCash,
    /// Receipt voucher (cash inflow).
    Receipt,
    /// Payment voucher (cash outflow).
    Payment,
    /// Transfer between company funds.
    FundTransfer,
}

impl CashKind {
    /// Returns true for kinds that record money leaving the company.
    #[must_use]
    pub fn is_outflow(&self) -> bool {
        matches!(self, Self::Expense | Self::PettyCash | Self::Payment | Self::FundTransfer)
    }
}

/// Which cash-tracking representation the movement lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashChannel {
    /// Tracked against a bank account.
    Bank,
    /// Tracked in the petty-cash book.
    Cash,
}

impl CashChannel {
    /// The other representation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Bank => Self::Cash,
            Self::Cash => Self::Bank,
        }
    }
}

/// Business category of the movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementCategory {
    /// Misc import cost; must name its container and rolls up into
    /// that container's allocable total.
    Import,
    /// Day-to-day operating cost.
    Operating,
    /// Local logistics and delivery cost.
    Logistics,
    /// Anything else.
    Other,
}

/// Input for recording a new cash movement.
#[derive(Debug, Clone)]
pub struct NewCashMovement {
    /// Movement kind.
    pub kind: CashKind,
    /// Cash-tracking channel.
    pub channel: CashChannel,
    /// Business category.
    pub category: MovementCategory,
    /// Amount (must be positive).
    pub amount: Decimal,
    /// Movement date.
    pub movement_date: NaiveDate,
    /// Description.
    pub description: String,
    /// Container link, required for import-category movements.
    pub container_id: Option<ContainerId>,
    /// Delivery challan link, if any.
    pub challan_id: Option<ChallanId>,
    /// Bank account reference, if any.
    pub bank_account_id: Option<BankAccountId>,
    /// The user recording the movement.
    pub created_by: UserId,
}

/// Validates a movement before any persistence.
///
/// The import-category rule is enforced here, synchronously, instead
/// of inside a storage hook: a missing container link is rejected with
/// a typed error and is never silently defaulted.
///
/// # Errors
///
/// Returns `CashError` on the first violated rule.
pub fn validate_movement(input: &NewCashMovement) -> Result<(), CashError> {
    if input.amount <= Decimal::ZERO {
        return Err(CashError::NonPositiveAmount(input.amount));
    }

    if input.category == MovementCategory::Import && input.container_id.is_none() {
        return Err(CashError::ImportRequiresContainer);
    }

    Ok(())
}

/// Validates a channel move request against the movement's current
/// channel.
///
/// # Errors
///
/// Returns [`CashError::AlreadyInChannel`] when the movement is
/// already tracked in the requested channel — the historical
/// double-move failure.
pub fn validate_channel_move(
    current: CashChannel,
    target: CashChannel,
) -> Result<CashChannel, CashError> {
    if current == target {
        return Err(CashError::AlreadyInChannel(target));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn movement(category: MovementCategory, container: Option<ContainerId>) -> NewCashMovement {
        NewCashMovement {
            kind: CashKind::Expense,
            channel: CashChannel::Bank,
            category,
            amount: dec!(250_000),
            movement_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            description: "Port storage fee".to_string(),
            container_id: container,
            challan_id: None,
            bank_account_id: None,
            created_by: UserId::new(),
        }
    }

    #[test]
    fn test_import_without_container_rejected() {
        let input = movement(MovementCategory::Import, None);
        assert!(matches!(
            validate_movement(&input),
            Err(CashError::ImportRequiresContainer)
        ));
    }

    #[test]
    fn test_import_with_container_accepted() {
        let input = movement(MovementCategory::Import, Some(ContainerId::new()));
        assert!(validate_movement(&input).is_ok());
    }

    #[test]
    fn test_operating_without_container_accepted() {
        let input = movement(MovementCategory::Operating, None);
        assert!(validate_movement(&input).is_ok());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut input = movement(MovementCategory::Operating, None);
        input.amount = dec!(0);
        assert!(matches!(
            validate_movement(&input),
            Err(CashError::NonPositiveAmount(_))
        ));

        input.amount = dec!(-10);
        assert!(matches!(
            validate_movement(&input),
            Err(CashError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_channel_flip() {
        assert_eq!(CashChannel::Bank.flipped(), CashChannel::Cash);
        assert_eq!(CashChannel::Cash.flipped(), CashChannel::Bank);
    }

    #[test]
    fn test_channel_move_validation() {
        assert_eq!(
            validate_channel_move(CashChannel::Bank, CashChannel::Cash).unwrap(),
            CashChannel::Cash
        );
        assert!(matches!(
            validate_channel_move(CashChannel::Cash, CashChannel::Cash),
            Err(CashError::AlreadyInChannel(CashChannel::Cash))
        ));
    }

    #[test]
    fn test_outflow_kinds() {
        assert!(CashKind::Expense.is_outflow());
        assert!(CashKind::Payment.is_outflow());
        assert!(!CashKind::Receipt.is_outflow());
    }
}
