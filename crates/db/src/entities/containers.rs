//! `SeaORM` Entity for the containers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An import container with its landed cost fields.
///
/// `misc_costs` and `total_allocable_cost` are derived; only the
/// container repository's rollup/reallocate writes them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "containers")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Container code (e.g. shipping line reference).
    #[sea_orm(unique)]
    pub code: String,
    /// Customs duty (excluded from allocation).
    pub duty: Decimal,
    /// Ocean/air freight.
    pub freight: Decimal,
    /// Handling charges.
    pub handling: Decimal,
    /// Port charges.
    pub port_charges: Decimal,
    /// Other container-level fees.
    pub other_fees: Decimal,
    /// Import VAT (excluded from allocation).
    pub import_vat: Decimal,
    /// Import withholding tax (excluded from allocation).
    pub import_wht: Decimal,
    /// Derived: misc import costs rolled up from cash movements.
    pub misc_costs: Decimal,
    /// Derived: total cost eligible for allocation.
    pub total_allocable_cost: Decimal,
    /// Row creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Row update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Batches linked to this container.
    #[sea_orm(has_many = "super::batches::Entity")]
    Batches,
}

impl Related<super::batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
