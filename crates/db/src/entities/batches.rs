//! `SeaORM` Entity for the batches table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An inventory batch, optionally linked to an import container.
///
/// `allocated_cost`, `landed_cost`, and `landed_cost_per_unit` are
/// derived by the allocator; `reserved_stock` is derived by the
/// reservation repository. The schema CHECKs
/// `0 <= reserved_stock <= current_stock`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Linked container, if any.
    pub container_id: Option<Uuid>,
    /// Product code the batch belongs to.
    pub product_code: String,
    /// Import unit price.
    pub import_price: Decimal,
    /// Import quantity.
    pub import_qty: Decimal,
    /// Duty recorded at batch level.
    pub own_duty: Decimal,
    /// Freight recorded at batch level.
    pub own_freight: Decimal,
    /// Other charges recorded at batch level.
    pub own_other: Decimal,
    /// Derived: share of the container's allocable cost.
    pub allocated_cost: Decimal,
    /// Derived: batch value + allocated cost + batch-own charges.
    pub landed_cost: Decimal,
    /// Derived: landed cost per imported unit.
    pub landed_cost_per_unit: Decimal,
    /// Physical stock on hand.
    pub current_stock: Decimal,
    /// Derived: sum of active reservation quantities.
    pub reserved_stock: Decimal,
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
    /// Reservations against this batch.
    #[sea_orm(has_many = "super::reservations::Entity")]
    Reservations,
    /// Stock movements recorded for this batch.
    #[sea_orm(has_many = "super::stock_movements::Entity")]
    StockMovements,
}

impl Related<super::containers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Containers.def()
    }
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::stock_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
