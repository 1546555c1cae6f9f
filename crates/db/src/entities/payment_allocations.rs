//! `SeaORM` Entity for the payment_allocations table.
//!
//! This is the single authoritative record of how payments settle
//! invoices. No parallel legacy table exists; `invoice_balance`
//! aggregates only these rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One payment amount applied to one invoice.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_allocations")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Settled invoice.
    pub invoice_id: Uuid,
    /// Cash movement the money came from, if tracked.
    pub movement_id: Option<Uuid>,
    /// Allocated amount.
    pub amount: Decimal,
    /// Row creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Settled invoice.
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
