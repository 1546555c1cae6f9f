//! `SeaORM` Entity for the stock_movements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::StockTxType;

/// Immutable audit record of one stock adjustment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Adjusted batch.
    pub batch_id: Uuid,
    /// Signed quantity change.
    pub delta: Decimal,
    /// Kind of adjustment.
    pub tx_type: StockTxType,
    /// Id of the source record (delivery, purchase), if any.
    pub reference_id: Option<Uuid>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Stock level after the adjustment.
    pub resulting_stock: Decimal,
    /// User who made the adjustment.
    pub created_by: Uuid,
    /// Row creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Adjusted batch.
    #[sea_orm(
        belongs_to = "super::batches::Entity",
        from = "Column::BatchId",
        to = "super::batches::Column::Id"
    )]
    Batches,
}

impl Related<super::batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
