//! Invoice repository: the single authoritative payment-allocation
//! aggregate.
//!
//! `invoice_balance` reads exactly one table, `payment_allocations`.
//! There is deliberately no second allocation path: a parallel legacy
//! table is how the source system double-counted settlements.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use saldo_shared::types::{CashMovementId, InvoiceId, PaymentAllocationId};

use crate::entities::{invoices, payment_allocations};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),

    /// Allocation amount must be positive.
    #[error("Allocation amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Allocating more than the open balance.
    #[error("Allocation of {amount} exceeds open balance {balance}")]
    OverAllocation {
        /// Requested allocation.
        amount: Decimal,
        /// Open balance at the time of the check.
        balance: Decimal,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Balance aggregate for one invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceBalance {
    /// Invoice total.
    pub total_amount: Decimal,
    /// Sum of payment allocations.
    pub paid_amount: Decimal,
    /// Remaining open balance.
    pub balance_amount: Decimal,
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Read-only balance aggregate over the authoritative allocation
    /// table.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is missing or the database
    /// fails.
    pub async fn invoice_balance(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<InvoiceBalance, InvoiceError> {
        let invoice = invoices::Entity::find_by_id(invoice_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::InvoiceNotFound(invoice_id.into_inner()))?;

        let paid = self.paid_amount(&self.db, invoice.id).await?;

        Ok(InvoiceBalance {
            total_amount: invoice.total_amount,
            paid_amount: paid,
            balance_amount: invoice.total_amount - paid,
        })
    }

    /// Allocates a payment amount against an invoice.
    ///
    /// The open-balance check and the insert run under an exclusive
    /// lock on the invoice row, so two allocations cannot both consume
    /// the same remaining balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is missing, the amount is
    /// non-positive or exceeds the open balance, or the database
    /// fails.
    pub async fn allocate_payment(
        &self,
        invoice_id: InvoiceId,
        movement_id: Option<CashMovementId>,
        amount: Decimal,
    ) -> Result<PaymentAllocationId, InvoiceError> {
        if amount <= Decimal::ZERO {
            return Err(InvoiceError::NonPositiveAmount(amount));
        }

        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(invoice_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoiceError::InvoiceNotFound(invoice_id.into_inner()))?;

        let paid = self.paid_amount(&txn, invoice.id).await?;
        let balance = invoice.total_amount - paid;
        if amount > balance {
            return Err(InvoiceError::OverAllocation { amount, balance });
        }

        let allocation_id = PaymentAllocationId::new();
        payment_allocations::ActiveModel {
            id: Set(allocation_id.into_inner()),
            invoice_id: Set(invoice.id),
            movement_id: Set(movement_id.map(CashMovementId::into_inner)),
            amount: Set(amount),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        debug!(invoice_id = %invoice_id, %amount, "payment allocated");
        Ok(allocation_id)
    }

    /// Sums the allocations recorded against an invoice.
    async fn paid_amount<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        invoice_id: Uuid,
    ) -> Result<Decimal, InvoiceError> {
        let paid: Option<Decimal> = payment_allocations::Entity::find()
            .select_only()
            .column_as(payment_allocations::Column::Amount.sum(), "total")
            .filter(payment_allocations::Column::InvoiceId.eq(invoice_id))
            .into_tuple()
            .one(conn)
            .await?
            .flatten();

        Ok(paid.unwrap_or(Decimal::ZERO))
    }
}
