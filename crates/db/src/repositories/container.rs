//! Container repository: cost rollup and landed-cost reallocation.
//!
//! Every path that can change a container's allocable total funnels
//! into one reallocation routine executed inside the triggering
//! transaction: cost-field edits, batch reassignment (both the old and
//! the new container), and misc-import cash movement changes. The
//! derived columns on containers and batches are only ever written
//! here; an allocator failure rolls the whole trigger back.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use saldo_core::allocation::{allocate_costs, AllocationError, BatchCostInput, ContainerCosts};
use saldo_shared::types::{BatchId, ContainerId};

use crate::entities::{batches, cash_movements, containers, sea_orm_active_enums::MovementCategory};

/// Error types for container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Container not found.
    #[error("Container not found: {0}")]
    ContainerNotFound(Uuid),

    /// Batch not found.
    #[error("Batch not found: {0}")]
    BatchNotFound(Uuid),

    /// The allocation computation failed.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Editable cost fields of a container.
///
/// Derived columns (`misc_costs`, `total_allocable_cost`) are written
/// only by the rollup and are not part of this input.
#[derive(Debug, Clone)]
pub struct ContainerCostFields {
    /// Customs duty.
    pub duty: Decimal,
    /// Ocean/air freight.
    pub freight: Decimal,
    /// Handling charges.
    pub handling: Decimal,
    /// Port charges.
    pub port_charges: Decimal,
    /// Other container-level fees.
    pub other_fees: Decimal,
    /// Import VAT.
    pub import_vat: Decimal,
    /// Import withholding tax.
    pub import_wht: Decimal,
}

/// Container repository.
#[derive(Debug, Clone)]
pub struct ContainerRepository {
    db: DatabaseConnection,
}

impl ContainerRepository {
    /// Creates a new container repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Recomputes a container's allocable total and redistributes it
    /// across the linked batches.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is missing or the database
    /// fails.
    pub async fn reallocate(&self, container_id: ContainerId) -> Result<(), ContainerError> {
        let txn = self.db.begin().await?;
        reallocate_within(&txn, container_id.into_inner()).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Updates a container's cost fields and reallocates in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is missing or the database
    /// fails.
    pub async fn set_costs(
        &self,
        container_id: ContainerId,
        costs: ContainerCostFields,
    ) -> Result<(), ContainerError> {
        let txn = self.db.begin().await?;

        let updated = containers::Entity::update_many()
            .col_expr(containers::Column::Duty, Expr::value(costs.duty))
            .col_expr(containers::Column::Freight, Expr::value(costs.freight))
            .col_expr(containers::Column::Handling, Expr::value(costs.handling))
            .col_expr(
                containers::Column::PortCharges,
                Expr::value(costs.port_charges),
            )
            .col_expr(containers::Column::OtherFees, Expr::value(costs.other_fees))
            .col_expr(containers::Column::ImportVat, Expr::value(costs.import_vat))
            .col_expr(containers::Column::ImportWht, Expr::value(costs.import_wht))
            .col_expr(containers::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(containers::Column::Id.eq(container_id.into_inner()))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            return Err(ContainerError::ContainerNotFound(container_id.into_inner()));
        }

        reallocate_within(&txn, container_id.into_inner()).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Moves a batch to a different container (or detaches it) and
    /// reallocates both affected containers in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch or target container is missing or
    /// the database fails.
    pub async fn move_batch(
        &self,
        batch_id: BatchId,
        new_container_id: Option<ContainerId>,
    ) -> Result<(), ContainerError> {
        let txn = self.db.begin().await?;

        let batch = batches::Entity::find_by_id(batch_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(ContainerError::BatchNotFound(batch_id.into_inner()))?;

        let old_container_id = batch.container_id;
        let new_id = new_container_id.map(ContainerId::into_inner);

        if let Some(target) = new_id {
            containers::Entity::find_by_id(target)
                .one(&txn)
                .await?
                .ok_or(ContainerError::ContainerNotFound(target))?;
        }

        batches::Entity::update_many()
            .col_expr(batches::Column::ContainerId, Expr::value(new_id))
            .col_expr(batches::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(batches::Column::Id.eq(batch.id))
            .exec(&txn)
            .await?;

        // both sides of the move see their batch set change
        if let Some(old) = old_container_id {
            reallocate_within(&txn, old).await?;
        }
        if let Some(new) = new_id {
            if Some(new) != old_container_id {
                reallocate_within(&txn, new).await?;
            }
        }

        txn.commit().await?;

        info!(
            batch_id = %batch_id,
            from = ?old_container_id,
            to = ?new_id,
            "batch moved between containers"
        );
        Ok(())
    }

    /// Fetches a container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is missing or the database
    /// fails.
    pub async fn get(
        &self,
        container_id: ContainerId,
    ) -> Result<containers::Model, ContainerError> {
        containers::Entity::find_by_id(container_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ContainerError::ContainerNotFound(container_id.into_inner()))
    }
}

/// Rolls up misc import costs and reallocates a container's allocable
/// total across its batches, inside an existing transaction.
pub(crate) async fn reallocate_within<C: ConnectionTrait>(
    conn: &C,
    container_id: Uuid,
) -> Result<(), ContainerError> {
    let container = containers::Entity::find_by_id(container_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(ContainerError::ContainerNotFound(container_id))?;

    // roll up misc import costs from linked cash movements first
    let misc: Option<Decimal> = cash_movements::Entity::find()
        .select_only()
        .column_as(cash_movements::Column::Amount.sum(), "total")
        .filter(cash_movements::Column::ContainerId.eq(container_id))
        .filter(cash_movements::Column::Category.eq(MovementCategory::Import))
        .into_tuple()
        .one(conn)
        .await?
        .flatten();
    let misc_costs = misc.unwrap_or(Decimal::ZERO);

    let costs = ContainerCosts {
        duty: container.duty,
        freight: container.freight,
        handling: container.handling,
        port_charges: container.port_charges,
        other_fees: container.other_fees,
        import_vat: container.import_vat,
        import_wht: container.import_wht,
        misc_costs,
    };
    let total_allocable = costs.allocable_total();

    containers::Entity::update_many()
        .col_expr(containers::Column::MiscCosts, Expr::value(misc_costs))
        .col_expr(
            containers::Column::TotalAllocableCost,
            Expr::value(total_allocable),
        )
        .col_expr(containers::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(containers::Column::Id.eq(container_id))
        .exec(conn)
        .await?;

    let batch_models = batches::Entity::find()
        .filter(batches::Column::ContainerId.eq(container_id))
        .all(conn)
        .await?;

    let inputs: Vec<BatchCostInput> = batch_models
        .iter()
        .map(|b| BatchCostInput {
            batch_id: BatchId::from_uuid(b.id),
            import_price: b.import_price,
            import_qty: b.import_qty,
            own_duty: b.own_duty,
            own_freight: b.own_freight,
            own_other: b.own_other,
        })
        .collect();

    let allocations = allocate_costs(total_allocable, &inputs)?;

    for allocation in &allocations {
        batches::Entity::update_many()
            .col_expr(
                batches::Column::AllocatedCost,
                Expr::value(allocation.allocated_cost),
            )
            .col_expr(
                batches::Column::LandedCost,
                Expr::value(allocation.landed_cost),
            )
            .col_expr(
                batches::Column::LandedCostPerUnit,
                Expr::value(allocation.landed_cost_per_unit),
            )
            .col_expr(batches::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(batches::Column::Id.eq(allocation.batch_id.into_inner()))
            .exec(conn)
            .await?;
    }

    info!(
        container_id = %container_id,
        %total_allocable,
        batches = allocations.len(),
        "container costs reallocated"
    );
    Ok(())
}
