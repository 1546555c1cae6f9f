//! `SeaORM` Entity for the bank_statement_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReconStatus;

/// One imported bank statement line.
///
/// The matched-target columns are mutually exclusive; the schema
/// CHECKs that at most one is populated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_statement_lines")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Bank account the statement belongs to, if known.
    pub bank_account_id: Option<Uuid>,
    /// Statement transaction date.
    pub txn_date: Date,
    /// Outflow amount as reported by the bank (0 for inflows).
    pub debit_amount: Decimal,
    /// Inflow amount as reported by the bank (0 for outflows).
    pub credit_amount: Decimal,
    /// Statement narration.
    pub description: Option<String>,
    /// Reconciliation status.
    pub recon_status: ReconStatus,
    /// Matched cash movement (exclusive with `matched_entry_id`).
    pub matched_movement_id: Option<Uuid>,
    /// Matched journal entry (exclusive with `matched_movement_id`).
    pub matched_entry_id: Option<Uuid>,
    /// Row creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Row update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
