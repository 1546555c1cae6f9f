//! `SeaORM` Entity for the journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::SourceModule;

/// A balanced double-entry journal record.
///
/// `total_debit` / `total_credit` are derived from the entry's lines;
/// only the ledger repository's recompute writes them. The schema
/// enforces the same balance bound with a CHECK constraint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Entry date.
    pub entry_date: Date,
    /// Module that posted the entry.
    pub source_module: SourceModule,
    /// Id of the owning source record, if any.
    pub reference_id: Option<Uuid>,
    /// Human-readable reference number.
    pub reference_number: Option<String>,
    /// Description.
    pub description: String,
    /// Derived sum of line debits.
    pub total_debit: Decimal,
    /// Derived sum of line credits.
    pub total_credit: Decimal,
    /// Whether the entry is posted.
    pub is_posted: bool,
    /// User who posted the entry.
    pub created_by: Uuid,
    /// Row creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Row update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Lines belonging to this entry.
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
