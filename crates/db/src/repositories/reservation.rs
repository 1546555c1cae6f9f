//! Reservation repository: reserve, release, cancel, restore.
//!
//! A batch's `reserved_stock` is always recomputed as the live sum of
//! its still-active reservations inside the mutating transaction,
//! never by incrementing or decrementing the stored value. A missed or
//! duplicated release therefore cannot make the aggregate drift; the
//! duplicate simply fails its conditional status update.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use saldo_core::collab::ActorContext;
use saldo_core::reservation::{check_availability, ReservationError};
use saldo_shared::types::{BatchId, ReservationId, SalesOrderId};

use crate::entities::{
    batches, reservations, sales_orders,
    sea_orm_active_enums::{OrderStatus, ReservationStatus},
};

/// Error types for reservation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReservationRepoError {
    /// Batch not found.
    #[error("Batch not found: {0}")]
    BatchNotFound(Uuid),

    /// Sales order not found.
    #[error("Sales order not found: {0}")]
    OrderNotFound(Uuid),

    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(Uuid),

    /// Reservations require an open order.
    #[error("Sales order {0} is not open")]
    OrderNotOpen(Uuid),

    /// A reservation rule was violated.
    #[error(transparent)]
    Domain(#[from] ReservationError),

    /// The reservation was already moved by another writer.
    #[error("Reservation {0} was already moved to a terminal state")]
    AlreadyTerminal(Uuid),

    /// The acting user is read-only.
    #[error("Read-only users cannot modify reservations")]
    ReadOnlyActor,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Reservation repository.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    db: DatabaseConnection,
}

impl ReservationRepository {
    /// Creates a new reservation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reserves stock from a batch for a sales order.
    ///
    /// Runs under an exclusive lock on the batch row: the availability
    /// check, the insert, and the reserved-stock recompute are one
    /// transaction, so two concurrent reserves cannot both claim the
    /// last units.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch or order is missing, the order is
    /// not open, free stock is insufficient, or the database fails.
    pub async fn reserve(
        &self,
        batch_id: BatchId,
        order_id: SalesOrderId,
        qty: Decimal,
    ) -> Result<ReservationId, ReservationRepoError> {
        let txn = self.db.begin().await?;

        let batch = batches::Entity::find_by_id(batch_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ReservationRepoError::BatchNotFound(batch_id.into_inner()))?;

        let order = sales_orders::Entity::find_by_id(order_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(ReservationRepoError::OrderNotFound(order_id.into_inner()))?;

        if order.status != OrderStatus::Open {
            return Err(ReservationRepoError::OrderNotOpen(order.id));
        }

        check_availability(batch.current_stock, batch.reserved_stock, qty)?;

        let reservation_id = ReservationId::new();
        let now = Utc::now();
        reservations::ActiveModel {
            id: Set(reservation_id.into_inner()),
            order_id: Set(order.id),
            batch_id: Set(batch.id),
            quantity: Set(qty),
            status: Set(ReservationStatus::Active),
            release_reason: Set(None),
            released_at: Set(None),
            restored_by: Set(None),
            restored_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        recompute_reserved_within(&txn, batch.id).await?;
        txn.commit().await?;

        info!(
            reservation_id = %reservation_id,
            batch_id = %batch_id,
            order_id = %order_id,
            %qty,
            "stock reserved"
        );
        Ok(reservation_id)
    }

    /// Releases an active reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing, was already
    /// moved to a terminal state, or the database fails.
    pub async fn release(
        &self,
        reservation_id: ReservationId,
        reason: &str,
    ) -> Result<(), ReservationRepoError> {
        self.finish(reservation_id, ReservationStatus::Released, reason)
            .await
    }

    /// Cancels an active reservation (owning order cancelled).
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing, was already
    /// moved to a terminal state, or the database fails.
    pub async fn cancel(
        &self,
        reservation_id: ReservationId,
        reason: &str,
    ) -> Result<(), ReservationRepoError> {
        self.finish(reservation_id, ReservationStatus::Cancelled, reason)
            .await
    }

    /// Moves an active reservation to a terminal state and recomputes
    /// the batch aggregate.
    async fn finish(
        &self,
        reservation_id: ReservationId,
        target: ReservationStatus,
        reason: &str,
    ) -> Result<(), ReservationRepoError> {
        let txn = self.db.begin().await?;

        let reservation = reservations::Entity::find_by_id(reservation_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(ReservationRepoError::ReservationNotFound(
                reservation_id.into_inner(),
            ))?;

        // conditional transition: only an active reservation moves;
        // rows_affected == 0 means another writer got there first
        let update = reservations::Entity::update_many()
            .col_expr(reservations::Column::Status, Expr::value(target.clone()))
            .col_expr(
                reservations::Column::ReleaseReason,
                Expr::value(Some(reason.to_string())),
            )
            .col_expr(reservations::Column::ReleasedAt, Expr::value(Utc::now()))
            .col_expr(reservations::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reservations::Column::Id.eq(reservation.id))
            .filter(reservations::Column::Status.eq(ReservationStatus::Active))
            .exec(&txn)
            .await?;

        if update.rows_affected == 0 {
            warn!(reservation_id = %reservation_id, "double release/cancel rejected");
            return Err(ReservationRepoError::AlreadyTerminal(reservation.id));
        }

        recompute_reserved_within(&txn, reservation.batch_id).await?;
        txn.commit().await?;

        info!(
            reservation_id = %reservation_id,
            status = ?target,
            "reservation finished"
        );
        Ok(())
    }

    /// Administrative restore of a released or cancelled reservation.
    ///
    /// Re-checks availability under the batch lock, returns the
    /// reservation to active, reopens the owning order, and recomputes
    /// the batch aggregate, all in one auditable transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is read-only, the reservation is
    /// missing or still active, restored stock no longer fits, or the
    /// database fails.
    pub async fn restore(
        &self,
        reservation_id: ReservationId,
        actor: &dyn ActorContext,
    ) -> Result<(), ReservationRepoError> {
        if actor.is_read_only() {
            return Err(ReservationRepoError::ReadOnlyActor);
        }

        let txn = self.db.begin().await?;

        let reservation = reservations::Entity::find_by_id(reservation_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(ReservationRepoError::ReservationNotFound(
                reservation_id.into_inner(),
            ))?;

        let batch = batches::Entity::find_by_id(reservation.batch_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ReservationRepoError::BatchNotFound(reservation.batch_id))?;

        // the reservation is terminal, so reserved_stock excludes it;
        // the restored quantity must fit in what is free right now
        check_availability(batch.current_stock, batch.reserved_stock, reservation.quantity)?;

        let update = reservations::Entity::update_many()
            .col_expr(
                reservations::Column::Status,
                Expr::value(ReservationStatus::Active),
            )
            .col_expr(
                reservations::Column::RestoredBy,
                Expr::value(Some(actor.actor_id().into_inner())),
            )
            .col_expr(reservations::Column::RestoredAt, Expr::value(Utc::now()))
            .col_expr(reservations::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reservations::Column::Id.eq(reservation.id))
            .filter(
                reservations::Column::Status
                    .is_in([ReservationStatus::Released, ReservationStatus::Cancelled]),
            )
            .exec(&txn)
            .await?;

        if update.rows_affected == 0 {
            return Err(ReservationError::InvalidTransition {
                from: reservation.status.into(),
                to: saldo_core::reservation::ReservationStatus::Active,
            }
            .into());
        }

        // restoring the reservation also restores the owning order
        sales_orders::Entity::update_many()
            .col_expr(
                sales_orders::Column::Status,
                Expr::value(OrderStatus::from(
                    saldo_core::reservation::OrderStatus::restored(),
                )),
            )
            .col_expr(sales_orders::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(sales_orders::Column::Id.eq(reservation.order_id))
            .exec(&txn)
            .await?;

        recompute_reserved_within(&txn, reservation.batch_id).await?;
        txn.commit().await?;

        info!(
            reservation_id = %reservation_id,
            restored_by = %actor.actor_id(),
            "reservation restored"
        );
        Ok(())
    }

    /// Fetches a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing or the database
    /// fails.
    pub async fn get(
        &self,
        reservation_id: ReservationId,
    ) -> Result<reservations::Model, ReservationRepoError> {
        reservations::Entity::find_by_id(reservation_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ReservationRepoError::ReservationNotFound(
                reservation_id.into_inner(),
            ))
    }
}

/// Recomputes a batch's `reserved_stock` as the live sum of its active
/// reservations, under an exclusive lock on the batch row.
///
/// Must run inside the same transaction as the reservation mutation.
pub(crate) async fn recompute_reserved_within<C: ConnectionTrait>(
    conn: &C,
    batch_id: Uuid,
) -> Result<Decimal, ReservationRepoError> {
    // lock the batch row so concurrent recomputes serialize
    batches::Entity::find_by_id(batch_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(ReservationRepoError::BatchNotFound(batch_id))?;

    let total: Option<Decimal> = reservations::Entity::find()
        .select_only()
        .column_as(reservations::Column::Quantity.sum(), "total")
        .filter(reservations::Column::BatchId.eq(batch_id))
        .filter(reservations::Column::Status.eq(ReservationStatus::Active))
        .into_tuple()
        .one(conn)
        .await?
        .flatten();

    let reserved = total.unwrap_or(Decimal::ZERO);

    batches::Entity::update_many()
        .col_expr(batches::Column::ReservedStock, Expr::value(reserved))
        .col_expr(batches::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(batches::Column::Id.eq(batch_id))
        .exec(conn)
        .await?;

    Ok(reserved)
}
