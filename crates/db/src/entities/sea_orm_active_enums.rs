//! `SeaORM` active enums mapped to Postgres enum types.
//!
//! Conversions to and from the `saldo-core` domain enums live here so
//! repositories can hand rows to the pure logic without string
//! plumbing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl AccountType {
    /// Normal balance side for this account type.
    #[must_use]
    pub fn normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

/// Which side increases an account.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "normal_balance")]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Increases are debits (assets, expenses).
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Increases are credits (liabilities, equity, revenue).
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// Source module tag on journal entries.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "source_module")]
#[serde(rename_all = "snake_case")]
pub enum SourceModule {
    /// Purchase of goods.
    #[sea_orm(string_value = "purchases")]
    Purchases,
    /// Sales invoice or delivery.
    #[sea_orm(string_value = "sales")]
    Sales,
    /// Operating or import expense.
    #[sea_orm(string_value = "expenses")]
    Expenses,
    /// Transfer between company accounts.
    #[sea_orm(string_value = "transfers")]
    Transfers,
    /// Cash movement.
    #[sea_orm(string_value = "cash_movements")]
    CashMovements,
    /// Manual correction entry.
    #[sea_orm(string_value = "adjustments")]
    Adjustments,
}

impl From<saldo_core::ledger::SourceModule> for SourceModule {
    fn from(value: saldo_core::ledger::SourceModule) -> Self {
        use saldo_core::ledger::SourceModule as Core;
        match value {
            Core::Purchases => Self::Purchases,
            Core::Sales => Self::Sales,
            Core::Expenses => Self::Expenses,
            Core::Transfers => Self::Transfers,
            Core::CashMovements => Self::CashMovements,
            Core::Adjustments => Self::Adjustments,
        }
    }
}

/// Reservation status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reservation_status")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// The reservation holds stock.
    #[sea_orm(string_value = "active")]
    Active,
    /// Delivered or freed normally.
    #[sea_orm(string_value = "released")]
    Released,
    /// Owning order was cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<saldo_core::reservation::ReservationStatus> for ReservationStatus {
    fn from(value: saldo_core::reservation::ReservationStatus) -> Self {
        use saldo_core::reservation::ReservationStatus as Core;
        match value {
            Core::Active => Self::Active,
            Core::Released => Self::Released,
            Core::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ReservationStatus> for saldo_core::reservation::ReservationStatus {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Active => Self::Active,
            ReservationStatus::Released => Self::Released,
            ReservationStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Sales order status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order is open.
    #[sea_orm(string_value = "open")]
    Open,
    /// Order was delivered.
    #[sea_orm(string_value = "delivered")]
    Delivered,
    /// Order was cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<saldo_core::reservation::OrderStatus> for OrderStatus {
    fn from(value: saldo_core::reservation::OrderStatus) -> Self {
        use saldo_core::reservation::OrderStatus as Core;
        match value {
            Core::Open => Self::Open,
            Core::Delivered => Self::Delivered,
            Core::Cancelled => Self::Cancelled,
        }
    }
}

/// Stock movement transaction type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "stock_tx_type")]
#[serde(rename_all = "lowercase")]
pub enum StockTxType {
    /// Incoming purchase.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Outgoing delivery.
    #[sea_orm(string_value = "delivery")]
    Delivery,
    /// Manual correction.
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    /// Customer return.
    #[sea_orm(string_value = "return")]
    Return,
}

/// Cash movement kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cash_kind")]
#[serde(rename_all = "snake_case")]
pub enum CashKind {
    /// Operating or import expense.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Petty cash transaction.
    #[sea_orm(string_value = "petty_cash")]
    PettyCash,
    /// Receipt voucher.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Payment voucher.
    #[sea_orm(string_value = "payment")]
    Payment,
    /// Fund transfer.
    #[sea_orm(string_value = "fund_transfer")]
    FundTransfer,
}

impl From<saldo_core::cash::CashKind> for CashKind {
    fn from(value: saldo_core::cash::CashKind) -> Self {
        use saldo_core::cash::CashKind as Core;
        match value {
            Core::Expense => Self::Expense,
            Core::PettyCash => Self::PettyCash,
            Core::Receipt => Self::Receipt,
            Core::Payment => Self::Payment,
            Core::FundTransfer => Self::FundTransfer,
        }
    }
}

impl From<CashKind> for saldo_core::cash::CashKind {
    fn from(value: CashKind) -> Self {
        match value {
            CashKind::Expense => Self::Expense,
            CashKind::PettyCash => Self::PettyCash,
            CashKind::Receipt => Self::Receipt,
            CashKind::Payment => Self::Payment,
            CashKind::FundTransfer => Self::FundTransfer,
        }
    }
}

/// Cash tracking channel.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cash_channel")]
#[serde(rename_all = "lowercase")]
pub enum CashChannel {
    /// Tracked against a bank account.
    #[sea_orm(string_value = "bank")]
    Bank,
    /// Tracked in the petty-cash book.
    #[sea_orm(string_value = "cash")]
    Cash,
}

impl From<saldo_core::cash::CashChannel> for CashChannel {
    fn from(value: saldo_core::cash::CashChannel) -> Self {
        use saldo_core::cash::CashChannel as Core;
        match value {
            Core::Bank => Self::Bank,
            Core::Cash => Self::Cash,
        }
    }
}

impl From<CashChannel> for saldo_core::cash::CashChannel {
    fn from(value: CashChannel) -> Self {
        match value {
            CashChannel::Bank => Self::Bank,
            CashChannel::Cash => Self::Cash,
        }
    }
}

/// Cash movement business category.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_category")]
#[serde(rename_all = "snake_case")]
pub enum MovementCategory {
    /// Misc import cost linked to a container.
    #[sea_orm(string_value = "import")]
    Import,
    /// Day-to-day operating cost.
    #[sea_orm(string_value = "operating")]
    Operating,
    /// Local logistics cost.
    #[sea_orm(string_value = "logistics")]
    Logistics,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<saldo_core::cash::MovementCategory> for MovementCategory {
    fn from(value: saldo_core::cash::MovementCategory) -> Self {
        use saldo_core::cash::MovementCategory as Core;
        match value {
            Core::Import => Self::Import,
            Core::Operating => Self::Operating,
            Core::Logistics => Self::Logistics,
            Core::Other => Self::Other,
        }
    }
}

impl From<MovementCategory> for saldo_core::cash::MovementCategory {
    fn from(value: MovementCategory) -> Self {
        match value {
            MovementCategory::Import => Self::Import,
            MovementCategory::Operating => Self::Operating,
            MovementCategory::Logistics => Self::Logistics,
            MovementCategory::Other => Self::Other,
        }
    }
}

/// Bank statement line reconciliation status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recon_status")]
#[serde(rename_all = "snake_case")]
pub enum ReconStatus {
    /// Not yet considered or no confident candidate.
    #[sea_orm(string_value = "unmatched")]
    Unmatched,
    /// A candidate was suggested automatically.
    #[sea_orm(string_value = "suggested")]
    Suggested,
    /// A candidate needs human review.
    #[sea_orm(string_value = "needs_review")]
    NeedsReview,
    /// Committed pairing.
    #[sea_orm(string_value = "matched")]
    Matched,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_balance_per_type() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(
            AccountType::Liability.normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_reservation_status_roundtrip() {
        use saldo_core::reservation::ReservationStatus as Core;
        for status in [Core::Active, Core::Released, Core::Cancelled] {
            let db: ReservationStatus = status.into();
            let back: Core = db.into();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_cash_channel_roundtrip() {
        use saldo_core::cash::CashChannel as Core;
        for channel in [Core::Bank, Core::Cash] {
            let db: CashChannel = channel.into();
            let back: Core = db.into();
            assert_eq!(back, channel);
        }
    }
}
