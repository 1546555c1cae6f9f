//! `SeaORM` Entity for the reservations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReservationStatus;

/// A claim on a batch's stock on behalf of a sales order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning sales order.
    pub order_id: Uuid,
    /// Reserved batch.
    pub batch_id: Uuid,
    /// Reserved quantity.
    pub quantity: Decimal,
    /// Reservation status.
    pub status: ReservationStatus,
    /// Reason recorded on release/cancel.
    pub release_reason: Option<String>,
    /// When the reservation left the active state.
    pub released_at: Option<DateTimeWithTimeZone>,
    /// Who restored the reservation, if it was restored.
    pub restored_by: Option<Uuid>,
    /// When the reservation was restored.
    pub restored_at: Option<DateTimeWithTimeZone>,
    /// Row creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Row update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning order.
    #[sea_orm(
        belongs_to = "super::sales_orders::Entity",
        from = "Column::OrderId",
        to = "super::sales_orders::Column::Id"
    )]
    SalesOrders,
    /// Reserved batch.
    #[sea_orm(
        belongs_to = "super::batches::Entity",
        from = "Column::BatchId",
        to = "super::batches::Column::Id"
    )]
    Batches,
}

impl Related<super::sales_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrders.def()
    }
}

impl Related<super::batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
