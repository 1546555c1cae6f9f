//! Stock repository: atomic adjustments with an immutable audit trail.
//!
//! `adjust_stock` never computes the new stock level on the caller
//! side. The update is a single statement of the form
//! `current_stock = current_stock + delta`, guarded so the result can
//! neither go negative nor fall below the reserved quantity, which
//! makes concurrent adjustments to the same batch serialize in the
//! database instead of overwriting each other.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use saldo_core::collab::ActorContext;
use saldo_shared::types::{BatchId, StockMovementId};

use crate::entities::{batches, sea_orm_active_enums::StockTxType, stock_movements};

/// Error types for stock operations.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    /// Batch not found.
    #[error("Batch not found: {0}")]
    BatchNotFound(Uuid),

    /// The adjustment would leave the batch below zero or below its
    /// reserved quantity.
    #[error(
        "Stock adjustment of {delta} rejected: current {current}, reserved {reserved}"
    )]
    WouldViolateStock {
        /// Requested change.
        delta: Decimal,
        /// Stock at the time of the check.
        current: Decimal,
        /// Reserved stock at the time of the check.
        reserved: Decimal,
    },

    /// Zero delta is meaningless.
    #[error("Stock adjustment delta cannot be zero")]
    ZeroDelta,

    /// The acting user is read-only.
    #[error("Read-only users cannot adjust stock")]
    ReadOnlyActor,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of a stock adjustment.
#[derive(Debug, Clone)]
pub struct StockAdjustment {
    /// Stock level after the adjustment.
    pub new_stock: Decimal,
    /// The recorded movement.
    pub movement_id: StockMovementId,
}

/// Stock repository.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
}

impl StockRepository {
    /// Creates a new stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Atomically adjusts a batch's stock and records the movement.
    ///
    /// The new value is expressed as a function of the stored value in
    /// one statement; two concurrent adjustments to the same batch
    /// both apply, in either order, with no lost update. The movement
    /// row is written in the same transaction and is immutable.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is read-only, the batch is
    /// missing, the adjustment would violate the stock bounds, or the
    /// database fails.
    pub async fn adjust_stock(
        &self,
        batch_id: BatchId,
        delta: Decimal,
        tx_type: StockTxType,
        reference_id: Option<Uuid>,
        notes: Option<String>,
        actor: &dyn ActorContext,
    ) -> Result<StockAdjustment, StockError> {
        if actor.is_read_only() {
            return Err(StockError::ReadOnlyActor);
        }
        if delta == Decimal::ZERO {
            return Err(StockError::ZeroDelta);
        }

        let txn = self.db.begin().await?;

        let update = batches::Entity::update_many()
            .col_expr(
                batches::Column::CurrentStock,
                Expr::col(batches::Column::CurrentStock).add(delta),
            )
            .col_expr(batches::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(batches::Column::Id.eq(batch_id.into_inner()))
            .filter(
                Expr::col(batches::Column::CurrentStock)
                    .add(delta)
                    .gte(Decimal::ZERO),
            )
            .filter(
                Expr::col(batches::Column::CurrentStock)
                    .add(delta)
                    .gte(Expr::col(batches::Column::ReservedStock)),
            )
            .exec(&txn)
            .await?;

        if update.rows_affected == 0 {
            // distinguish a missing batch from a rejected adjustment
            let batch = batches::Entity::find_by_id(batch_id.into_inner())
                .one(&txn)
                .await?
                .ok_or(StockError::BatchNotFound(batch_id.into_inner()))?;

            return Err(StockError::WouldViolateStock {
                delta,
                current: batch.current_stock,
                reserved: batch.reserved_stock,
            });
        }

        let batch = batches::Entity::find_by_id(batch_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(StockError::BatchNotFound(batch_id.into_inner()))?;

        let movement_id = StockMovementId::new();
        stock_movements::ActiveModel {
            id: Set(movement_id.into_inner()),
            batch_id: Set(batch.id),
            delta: Set(delta),
            tx_type: Set(tx_type),
            reference_id: Set(reference_id),
            notes: Set(notes),
            resulting_stock: Set(batch.current_stock),
            created_by: Set(actor.actor_id().into_inner()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            batch_id = %batch_id,
            %delta,
            new_stock = %batch.current_stock,
            "stock adjusted"
        );

        Ok(StockAdjustment {
            new_stock: batch.current_stock,
            movement_id,
        })
    }

    /// Lists a batch's movement history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_movements(
        &self,
        batch_id: BatchId,
    ) -> Result<Vec<stock_movements::Model>, StockError> {
        let movements = stock_movements::Entity::find()
            .filter(stock_movements::Column::BatchId.eq(batch_id.into_inner()))
            .order_by_desc(stock_movements::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(movements)
    }
}
