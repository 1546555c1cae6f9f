//! Ledger repository: posting, recompute, and void.
//!
//! The poster validates through `saldo-core` before anything is
//! written, creates the entry and its lines in one transaction, and
//! recomputes the entry totals from the inserted lines before commit.
//! Totals are never trusted from a caller after the fact: every line
//! mutation reruns the recompute inside its own transaction, and the
//! schema's CHECK constraint backs the same bound independently.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use saldo_core::ledger::{
    validate_and_resolve, AccountStatus, EntryTotals, JournalLineInput, LedgerError,
    PostEntryInput, ResolvedLine,
};
use saldo_shared::types::{is_balanced, AccountId, JournalEntryId, JournalLineId};

use crate::entities::{accounts, journal_entries, journal_lines};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerRepoError {
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Journal line not found.
    #[error("Journal line not found: {0}")]
    LineNotFound(Uuid),

    /// A domain rule was violated.
    #[error(transparent)]
    Domain(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// An entry together with its lines.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// Entry header.
    pub entry: journal_entries::Model,
    /// Journal lines.
    pub lines: Vec<journal_lines::Model>,
}

/// Ledger repository for posting and maintaining journal entries.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a ledger account with its normal balance derived from
    /// the account type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database rejects the insert (e.g. a
    /// duplicate code).
    pub async fn create_account(
        &self,
        code: &str,
        name: &str,
        account_type: crate::entities::sea_orm_active_enums::AccountType,
    ) -> Result<AccountId, LedgerRepoError> {
        let id = AccountId::new();
        let now = Utc::now();
        let normal_balance = account_type.normal_balance();

        accounts::ActiveModel {
            id: Set(id.into_inner()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            account_type: Set(account_type),
            normal_balance: Set(normal_balance),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        info!(account_id = %id, code, "account created");
        Ok(id)
    }

    /// Deactivates an account. Accounts are never physically deleted;
    /// an inactive account simply rejects new postings.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or the database
    /// fails.
    pub async fn deactivate_account(&self, account_id: AccountId) -> Result<(), LedgerRepoError> {
        let updated = accounts::Entity::update_many()
            .col_expr(accounts::Column::IsActive, Expr::value(false))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(account_id.into_inner()))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 0 {
            return Err(LedgerError::AccountNotFound(account_id).into());
        }

        info!(account_id = %account_id, "account deactivated");
        Ok(())
    }

    /// Posts a balanced journal entry on behalf of a source record.
    ///
    /// All-or-nothing: validation failures reject the call before any
    /// write, and the entry plus its lines commit in one transaction.
    ///
    /// # Errors
    ///
    /// Returns a domain error for unbalanced or invalid input, or a
    /// database error.
    pub async fn post_entry(
        &self,
        input: PostEntryInput,
    ) -> Result<JournalEntryId, LedgerRepoError> {
        let txn = self.db.begin().await?;
        let entry_id = post_entry_within(&txn, &input).await?;
        txn.commit().await?;

        info!(
            entry_id = %entry_id,
            source = ?input.source_module,
            lines = input.lines.len(),
            "journal entry posted"
        );
        Ok(entry_id)
    }

    /// Recomputes an entry's totals from its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing, the recomputed totals
    /// violate the balance invariant for a posted entry, or the
    /// database fails.
    pub async fn recompute_totals(
        &self,
        entry_id: JournalEntryId,
    ) -> Result<EntryTotals, LedgerRepoError> {
        let txn = self.db.begin().await?;
        let totals = recompute_totals_within(&txn, entry_id.into_inner()).await?;
        txn.commit().await?;
        Ok(totals)
    }

    /// Adds lines to an existing entry and recomputes its totals in
    /// the same transaction.
    ///
    /// For a posted entry the added lines must keep it balanced, so
    /// corrections come in debit/credit pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing, a line is invalid,
    /// the entry would become unbalanced, or the database fails.
    pub async fn add_lines(
        &self,
        entry_id: JournalEntryId,
        lines: Vec<JournalLineInput>,
    ) -> Result<EntryTotals, LedgerRepoError> {
        if lines.is_empty() {
            return Err(LedgerError::NoLines.into());
        }

        let txn = self.db.begin().await?;

        let entry = journal_entries::Entity::find_by_id(entry_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(LedgerRepoError::EntryNotFound(entry_id.into_inner()))?;

        let resolved = resolve_lines(&txn, &lines).await?;
        insert_lines(&txn, entry.id, &resolved).await?;

        let totals = recompute_totals_within(&txn, entry.id).await?;
        txn.commit().await?;

        debug!(entry_id = %entry_id, added = lines.len(), "journal lines added");
        Ok(totals)
    }

    /// Changes a line's amount on its existing side and recomputes the
    /// owning entry's totals in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is missing, the amount is not
    /// positive, the entry would become unbalanced, or the database
    /// fails.
    pub async fn update_line_amount(
        &self,
        line_id: JournalLineId,
        amount: rust_decimal::Decimal,
    ) -> Result<EntryTotals, LedgerRepoError> {
        if amount == rust_decimal::Decimal::ZERO {
            return Err(LedgerError::ZeroAmount.into());
        }
        if amount < rust_decimal::Decimal::ZERO {
            return Err(LedgerError::NegativeAmount.into());
        }

        let txn = self.db.begin().await?;

        let line = journal_lines::Entity::find_by_id(line_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(LedgerRepoError::LineNotFound(line_id.into_inner()))?;

        // keep the side the line already has
        let (debit, credit) = if line.debit > rust_decimal::Decimal::ZERO {
            (amount, rust_decimal::Decimal::ZERO)
        } else {
            (rust_decimal::Decimal::ZERO, amount)
        };

        journal_lines::Entity::update_many()
            .col_expr(journal_lines::Column::Debit, Expr::value(debit))
            .col_expr(journal_lines::Column::Credit, Expr::value(credit))
            .filter(journal_lines::Column::Id.eq(line.id))
            .exec(&txn)
            .await?;

        let totals = recompute_totals_within(&txn, line.entry_id).await?;
        txn.commit().await?;

        debug!(entry_id = %line.entry_id, line_id = %line_id, %amount, "journal line updated");
        Ok(totals)
    }

    /// Removes a line and recomputes the owning entry's totals in the
    /// same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is missing, the entry would become
    /// unbalanced, or the database fails.
    pub async fn remove_line(
        &self,
        line_id: JournalLineId,
    ) -> Result<EntryTotals, LedgerRepoError> {
        let txn = self.db.begin().await?;

        let line = journal_lines::Entity::find_by_id(line_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(LedgerRepoError::LineNotFound(line_id.into_inner()))?;

        journal_lines::Entity::delete_by_id(line.id).exec(&txn).await?;

        let totals = recompute_totals_within(&txn, line.entry_id).await?;
        txn.commit().await?;

        debug!(entry_id = %line.entry_id, line_id = %line_id, "journal line removed");
        Ok(totals)
    }

    /// Voids an entry by deleting its lines and then the entry itself,
    /// in one transaction.
    ///
    /// Dangling lines are impossible by construction: the two deletes
    /// either both commit or neither does.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or the database fails.
    pub async fn void_entry(&self, entry_id: JournalEntryId) -> Result<(), LedgerRepoError> {
        let txn = self.db.begin().await?;
        void_entry_within(&txn, entry_id.into_inner()).await?;
        txn.commit().await?;

        info!(entry_id = %entry_id, "journal entry voided");
        Ok(())
    }

    /// Fetches an entry with all its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or the database fails.
    pub async fn get_entry(
        &self,
        entry_id: JournalEntryId,
    ) -> Result<EntryWithLines, LedgerRepoError> {
        let entry = journal_entries::Entity::find_by_id(entry_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(LedgerRepoError::EntryNotFound(entry_id.into_inner()))?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::EntryId.eq(entry.id))
            .all(&self.db)
            .await?;

        Ok(EntryWithLines { entry, lines })
    }
}

/// Posts an entry inside an existing transaction.
///
/// Used by the public poster and by writers (cash movements) that post
/// their entry as part of a larger transaction.
pub(crate) async fn post_entry_within<C: ConnectionTrait>(
    conn: &C,
    input: &PostEntryInput,
) -> Result<JournalEntryId, LedgerRepoError> {
    // Resolve account facts up front so validation is pure.
    let account_ids: Vec<Uuid> = input
        .lines
        .iter()
        .map(|l| l.account_id.into_inner())
        .collect();

    let account_map = load_accounts(conn, &account_ids).await?;

    let (resolved, totals) = validate_and_resolve(input, |id: AccountId| {
        account_map
            .get(&id.into_inner())
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id))
    })?;

    let now = Utc::now();
    let entry_id = JournalEntryId::new();

    journal_entries::ActiveModel {
        id: Set(entry_id.into_inner()),
        entry_date: Set(input.entry_date),
        source_module: Set(input.source_module.into()),
        reference_id: Set(input.reference_id),
        reference_number: Set(input.reference_number.clone()),
        description: Set(input.description.clone()),
        total_debit: Set(totals.total_debit),
        total_credit: Set(totals.total_credit),
        is_posted: Set(true),
        created_by: Set(input.created_by.into_inner()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(conn)
    .await?;

    insert_lines(conn, entry_id.into_inner(), &resolved).await?;

    // persisted totals always come from the recompute formula
    recompute_totals_within(conn, entry_id.into_inner()).await?;

    Ok(entry_id)
}

/// Deletes an entry's lines and then the entry, inside an existing
/// transaction.
pub(crate) async fn void_entry_within<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
) -> Result<(), LedgerRepoError> {
    let entry = journal_entries::Entity::find_by_id(entry_id)
        .one(conn)
        .await?
        .ok_or(LedgerRepoError::EntryNotFound(entry_id))?;

    journal_lines::Entity::delete_many()
        .filter(journal_lines::Column::EntryId.eq(entry.id))
        .exec(conn)
        .await?;

    journal_entries::Entity::delete_by_id(entry.id)
        .exec(conn)
        .await?;

    Ok(())
}

/// Recomputes and persists an entry's totals from its stored lines.
///
/// Must run inside the same transaction as the line mutation that
/// invalidated the totals.
async fn recompute_totals_within<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
) -> Result<EntryTotals, LedgerRepoError> {
    let entry = journal_entries::Entity::find_by_id(entry_id)
        .one(conn)
        .await?
        .ok_or(LedgerRepoError::EntryNotFound(entry_id))?;

    let lines = journal_lines::Entity::find()
        .filter(journal_lines::Column::EntryId.eq(entry_id))
        .all(conn)
        .await?;

    let total_debit = lines.iter().map(|l| l.debit).sum();
    let total_credit = lines.iter().map(|l| l.credit).sum();
    let totals = EntryTotals::new(total_debit, total_credit);

    if entry.is_posted && !is_balanced(totals.total_debit, totals.total_credit) {
        // failing here rolls back the whole triggering transaction
        return Err(LedgerError::Unbalanced {
            debit: totals.total_debit,
            credit: totals.total_credit,
        }
        .into());
    }

    journal_entries::Entity::update_many()
        .col_expr(
            journal_entries::Column::TotalDebit,
            Expr::value(totals.total_debit),
        )
        .col_expr(
            journal_entries::Column::TotalCredit,
            Expr::value(totals.total_credit),
        )
        .col_expr(journal_entries::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(journal_entries::Column::Id.eq(entry_id))
        .exec(conn)
        .await?;

    Ok(totals)
}

/// Loads account facts for validation.
async fn load_accounts<C: ConnectionTrait>(
    conn: &C,
    account_ids: &[Uuid],
) -> Result<HashMap<Uuid, AccountStatus>, LedgerRepoError> {
    let models = accounts::Entity::find()
        .filter(accounts::Column::Id.is_in(account_ids.iter().copied()))
        .all(conn)
        .await?;

    Ok(models
        .into_iter()
        .map(|a| {
            (
                a.id,
                AccountStatus {
                    id: AccountId::from_uuid(a.id),
                    is_active: a.is_active,
                },
            )
        })
        .collect())
}

/// Resolves raw line inputs against stored accounts.
async fn resolve_lines<C: ConnectionTrait>(
    conn: &C,
    lines: &[JournalLineInput],
) -> Result<Vec<ResolvedLine>, LedgerRepoError> {
    // reuse the posting validator minus the balance check: balance is
    // re-established by the recompute that follows
    let account_ids: Vec<Uuid> = lines.iter().map(|l| l.account_id.into_inner()).collect();
    let account_map = load_accounts(conn, &account_ids).await?;

    let mut resolved = Vec::with_capacity(lines.len());
    for line in lines {
        let status = account_map
            .get(&line.account_id.into_inner())
            .cloned()
            .ok_or(LedgerError::AccountNotFound(line.account_id))?;
        if !status.is_active {
            return Err(LedgerError::AccountInactive(line.account_id).into());
        }
        if line.amount == rust_decimal::Decimal::ZERO {
            return Err(LedgerError::ZeroAmount.into());
        }
        if line.amount < rust_decimal::Decimal::ZERO {
            return Err(LedgerError::NegativeAmount.into());
        }

        let (debit, credit) = match line.entry_type {
            saldo_core::ledger::EntryType::Debit => (line.amount, rust_decimal::Decimal::ZERO),
            saldo_core::ledger::EntryType::Credit => (rust_decimal::Decimal::ZERO, line.amount),
        };
        resolved.push(ResolvedLine {
            account_id: line.account_id,
            debit,
            credit,
            memo: line.memo.clone(),
            customer_id: line.customer_id,
            supplier_id: line.supplier_id,
            batch_id: line.batch_id,
        });
    }

    Ok(resolved)
}

/// Inserts resolved lines for an entry.
async fn insert_lines<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
    lines: &[ResolvedLine],
) -> Result<(), LedgerRepoError> {
    let now = Utc::now();

    for line in lines {
        journal_lines::ActiveModel {
            id: Set(JournalLineId::new().into_inner()),
            entry_id: Set(entry_id),
            account_id: Set(line.account_id.into_inner()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            memo: Set(line.memo.clone()),
            customer_id: Set(line.customer_id.map(saldo_shared::types::CustomerId::into_inner)),
            supplier_id: Set(line.supplier_id.map(saldo_shared::types::SupplierId::into_inner)),
            batch_id: Set(line.batch_id.map(saldo_shared::types::BatchId::into_inner)),
            created_at: Set(now.into()),
        }
        .insert(conn)
        .await?;
    }

    Ok(())
}
