//! Cash movement repository.
//!
//! Movements are validated before any persistence, post their journal
//! entry through the ledger poster inside the same transaction, and —
//! for import-category movements — trigger the container rollup and
//! reallocation before commit. The channel move is an atomic flip of
//! the tagged-union discriminant; there is no second table for a row
//! to get lost between.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use saldo_core::cash::{validate_channel_move, validate_movement, CashChannel, CashError, NewCashMovement};
use saldo_core::ledger::{JournalLineInput, PostEntryInput, SourceModule};
use saldo_shared::types::{CashMovementId, ContainerId};

use super::container::{reallocate_within, ContainerError};
use super::ledger::{post_entry_within, void_entry_within, LedgerRepoError};
use crate::entities::cash_movements;

/// Error types for cash movement operations.
#[derive(Debug, thiserror::Error)]
pub enum CashRepoError {
    /// Cash movement not found.
    #[error("Cash movement not found: {0}")]
    MovementNotFound(Uuid),

    /// The movement is reconciled against a bank line and cannot be
    /// deleted or relinked.
    #[error("Cash movement {0} is reconciled against a bank line")]
    MovementReconciled(Uuid),

    /// A cash movement rule was violated.
    #[error(transparent)]
    Domain(#[from] CashError),

    /// The posted journal entry was rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerRepoError),

    /// Container rollup or reallocation failed.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Cash movement repository.
#[derive(Debug, Clone)]
pub struct CashMovementRepository {
    db: DatabaseConnection,
}

impl CashMovementRepository {
    /// Creates a new cash movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a cash movement, posts its balanced journal entry, and
    /// rolls up the linked container when the movement is an import
    /// cost — all in one transaction.
    ///
    /// The caller supplies the journal lines (the account mapping
    /// belongs to the application layer); the poster enforces balance.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any write for an invalid
    /// movement (e.g. import category without container), a ledger
    /// error for unbalanced lines, or a database error.
    pub async fn create_movement(
        &self,
        input: NewCashMovement,
        journal_lines: Vec<JournalLineInput>,
    ) -> Result<CashMovementId, CashRepoError> {
        validate_movement(&input)?;

        let txn = self.db.begin().await?;
        let movement_id = CashMovementId::new();

        let entry_id = post_entry_within(
            &txn,
            &PostEntryInput {
                source_module: SourceModule::CashMovements,
                reference_id: Some(movement_id.into_inner()),
                reference_number: None,
                entry_date: input.movement_date,
                description: input.description.clone(),
                lines: journal_lines,
                created_by: input.created_by,
            },
        )
        .await?;

        let now = Utc::now();
        cash_movements::ActiveModel {
            id: Set(movement_id.into_inner()),
            kind: Set(input.kind.into()),
            channel: Set(input.channel.into()),
            category: Set(input.category.into()),
            amount: Set(input.amount),
            movement_date: Set(input.movement_date),
            description: Set(input.description.clone()),
            container_id: Set(input.container_id.map(ContainerId::into_inner)),
            challan_id: Set(input.challan_id.map(saldo_shared::types::ChallanId::into_inner)),
            bank_account_id: Set(input
                .bank_account_id
                .map(saldo_shared::types::BankAccountId::into_inner)),
            journal_entry_id: Set(Some(entry_id.into_inner())),
            matched_bank_line_id: Set(None),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        // an import cost changes its container's allocable total
        if let Some(container_id) = input.container_id {
            if input.category == saldo_core::cash::MovementCategory::Import {
                reallocate_within(&txn, container_id.into_inner()).await?;
            }
        }

        txn.commit().await?;

        info!(
            movement_id = %movement_id,
            kind = ?input.kind,
            amount = %input.amount,
            "cash movement recorded"
        );
        Ok(movement_id)
    }

    /// Moves a movement between the two cash-tracking representations.
    ///
    /// Atomic flip of the channel discriminant under a row lock; the
    /// journal link is untouched. Returns the movement's id — with the
    /// tagged-union model there is no new row to create.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the movement is already in the
    /// requested channel (the historical double-move), or a database
    /// error.
    pub async fn move_channel(
        &self,
        movement_id: CashMovementId,
        target: CashChannel,
    ) -> Result<CashMovementId, CashRepoError> {
        let txn = self.db.begin().await?;

        let movement = cash_movements::Entity::find_by_id(movement_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(CashRepoError::MovementNotFound(movement_id.into_inner()))?;

        let new_channel = validate_channel_move(movement.channel.into(), target)?;

        cash_movements::Entity::update_many()
            .col_expr(
                cash_movements::Column::Channel,
                Expr::value(crate::entities::sea_orm_active_enums::CashChannel::from(
                    new_channel,
                )),
            )
            .col_expr(cash_movements::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(cash_movements::Column::Id.eq(movement.id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(movement_id = %movement_id, channel = ?new_channel, "cash movement channel moved");
        Ok(movement_id)
    }

    /// Relinks an import movement to a different container and
    /// reallocates both containers in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the movement is missing or reconciled, the
    /// rollup fails, or the database fails.
    pub async fn relink_container(
        &self,
        movement_id: CashMovementId,
        new_container_id: ContainerId,
    ) -> Result<(), CashRepoError> {
        let txn = self.db.begin().await?;

        let movement = cash_movements::Entity::find_by_id(movement_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(CashRepoError::MovementNotFound(movement_id.into_inner()))?;

        if movement.matched_bank_line_id.is_some() {
            return Err(CashRepoError::MovementReconciled(movement.id));
        }

        let old_container_id = movement.container_id;

        cash_movements::Entity::update_many()
            .col_expr(
                cash_movements::Column::ContainerId,
                Expr::value(Some(new_container_id.into_inner())),
            )
            .col_expr(cash_movements::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(cash_movements::Column::Id.eq(movement.id))
            .exec(&txn)
            .await?;

        if let Some(old) = old_container_id {
            if old != new_container_id.into_inner() {
                reallocate_within(&txn, old).await?;
            }
        }
        reallocate_within(&txn, new_container_id.into_inner()).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Deletes a movement, voids its journal entry, and rolls up the
    /// linked container, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the movement is missing or already
    /// reconciled, or the database fails.
    pub async fn delete_movement(
        &self,
        movement_id: CashMovementId,
    ) -> Result<(), CashRepoError> {
        let txn = self.db.begin().await?;

        let movement = cash_movements::Entity::find_by_id(movement_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(CashRepoError::MovementNotFound(movement_id.into_inner()))?;

        if movement.matched_bank_line_id.is_some() {
            return Err(CashRepoError::MovementReconciled(movement.id));
        }

        cash_movements::Entity::delete_by_id(movement.id)
            .exec(&txn)
            .await?;

        if let Some(entry_id) = movement.journal_entry_id {
            void_entry_within(&txn, entry_id).await?;
        }

        if let Some(container_id) = movement.container_id {
            reallocate_within(&txn, container_id).await?;
        }

        txn.commit().await?;

        info!(movement_id = %movement_id, "cash movement deleted");
        Ok(())
    }

    /// Fetches a movement.
    ///
    /// # Errors
    ///
    /// Returns an error if the movement is missing or the database
    /// fails.
    pub async fn get(
        &self,
        movement_id: CashMovementId,
    ) -> Result<cash_movements::Model, CashRepoError> {
        cash_movements::Entity::find_by_id(movement_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(CashRepoError::MovementNotFound(movement_id.into_inner()))
    }
}
