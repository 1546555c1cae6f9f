//! `SeaORM` Entity for the cash_movements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{CashChannel, CashKind, MovementCategory};

/// One cash movement in the tagged-union representation.
///
/// The `channel` discriminant says which cash-tracking book the row
/// currently lives in; there is no second table to move rows between.
/// `matched_bank_line_id` is the reconciliation matcher's claim and is
/// only ever written by its conditional update.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_movements")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Movement kind.
    pub kind: CashKind,
    /// Cash-tracking channel.
    pub channel: CashChannel,
    /// Business category.
    pub category: MovementCategory,
    /// Amount (positive).
    pub amount: Decimal,
    /// Movement date.
    pub movement_date: Date,
    /// Description.
    pub description: String,
    /// Linked container (required for import category).
    pub container_id: Option<Uuid>,
    /// Linked delivery challan, if any.
    pub challan_id: Option<Uuid>,
    /// Referenced company bank account, if any.
    pub bank_account_id: Option<Uuid>,
    /// Journal entry posted for this movement.
    pub journal_entry_id: Option<Uuid>,
    /// Bank statement line that claimed this movement.
    pub matched_bank_line_id: Option<Uuid>,
    /// User who recorded the movement.
    pub created_by: Uuid,
    /// Row creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Row update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Linked container.
    #[sea_orm(
        belongs_to = "super::containers::Entity",
        from = "Column::ContainerId",
        to = "super::containers::Column::Id"
    )]
    Containers,
    /// Posted journal entry.
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id"
    )]
    JournalEntries,
}

impl Related<super::containers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
