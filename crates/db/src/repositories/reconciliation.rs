//! Reconciliation repository: automatic bank line matching.
//!
//! Candidate selection is a plain read; the commit is a conditional
//! claim re-checked at write time (`matched_bank_line_id IS NULL`), so
//! the race between selecting a movement and another line claiming it
//! resolves safely: the loser counts the line as skipped and moves on.
//! A failure on one line never aborts the run.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde_json::json;
use tracing::{debug, info, warn};

use saldo_core::collab::{NotificationSink, NullSink};
use saldo_core::reconciliation::{
    decide, score_candidate, CandidateFacts, LineFacts, MatchDecision, MatchPolicy,
    MatchRunSummary,
};
use saldo_shared::types::{BankAccountId, UserId};

use crate::entities::{
    bank_statement_lines, cash_movements,
    sea_orm_active_enums::{CashKind, ReconStatus},
};

/// Error types for reconciliation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Reconciliation repository.
#[derive(Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
    policy: MatchPolicy,
    notifier: Arc<dyn NotificationSink>,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository with the given policy.
    #[must_use]
    pub fn new(db: DatabaseConnection, policy: MatchPolicy) -> Self {
        Self {
            db,
            policy,
            notifier: Arc::new(NullSink),
        }
    }

    /// Attaches a notification sink for needs-review suggestions.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Runs the auto-matcher over all unmatched bank lines.
    ///
    /// Idempotent: lines that already carry a status or a matched
    /// target are excluded from candidate selection up front, so a
    /// second run with no new data reports zero matches and zero
    /// suggestions. Per-line failures increment the skip counter and
    /// processing continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial line query fails; per-line
    /// database errors are absorbed into the skip counter.
    pub async fn run_auto_match(&self) -> Result<MatchRunSummary, ReconcileError> {
        let lines = bank_statement_lines::Entity::find()
            .filter(bank_statement_lines::Column::ReconStatus.eq(ReconStatus::Unmatched))
            .filter(bank_statement_lines::Column::MatchedMovementId.is_null())
            .filter(bank_statement_lines::Column::MatchedEntryId.is_null())
            .order_by_asc(bank_statement_lines::Column::TxnDate)
            .all(&self.db)
            .await?;

        let mut summary = MatchRunSummary::default();

        for line in lines {
            match self.match_line(&line).await {
                Ok(Some(decision)) => summary.record(decision),
                // no candidate inside tolerance and window: no action
                Ok(None) => {}
                Err(err) => {
                    warn!(line_id = %line.id, error = %err, "bank line match failed, skipping");
                    summary.record(MatchDecision::Skip);
                }
            }
        }

        info!(
            matched = summary.matched,
            suggested = summary.suggested,
            skipped = summary.skipped,
            "auto-match run finished"
        );
        Ok(summary)
    }

    /// Matches a single line. Returns `None` when no candidate existed.
    async fn match_line(
        &self,
        line: &bank_statement_lines::Model,
    ) -> Result<Option<MatchDecision>, ReconcileError> {
        // a bank debit is money out, matched against outflow kinds;
        // a bank credit is money in, matched against receipts
        let (amount, kinds): (Decimal, Vec<CashKind>) = if line.debit_amount > Decimal::ZERO {
            (
                line.debit_amount,
                vec![
                    CashKind::Expense,
                    CashKind::PettyCash,
                    CashKind::Payment,
                    CashKind::FundTransfer,
                ],
            )
        } else {
            (line.credit_amount, vec![CashKind::Receipt])
        };

        let candidates = self.find_candidates(line, amount, &kinds).await?;
        if candidates.is_empty() {
            return Ok(None);
        }

        // score only unclaimed movements, but remember that claimed
        // ones existed: a line whose candidate was taken by another
        // line counts as skipped, not as "no candidate"
        let (unclaimed, claimed): (Vec<_>, Vec<_>) = candidates
            .iter()
            .partition(|m| m.matched_bank_line_id.is_none());

        if unclaimed.is_empty() {
            debug!(
                line_id = %line.id,
                claimed = claimed.len(),
                "all candidates already claimed"
            );
            return Ok(Some(MatchDecision::Skip));
        }

        let line_facts = LineFacts {
            amount,
            txn_date: line.txn_date,
            bank_account_id: line.bank_account_id.map(BankAccountId::from_uuid),
        };

        let mut best: Option<(&cash_movements::Model, u32)> = None;
        for movement in unclaimed {
            let facts = CandidateFacts {
                amount: movement.amount,
                movement_date: movement.movement_date,
                bank_account_id: movement.bank_account_id.map(BankAccountId::from_uuid),
            };
            if let Some(score) = score_candidate(&line_facts, &facts, &self.policy) {
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((movement, score));
                }
            }
        }

        let Some((movement, score)) = best else {
            // candidates existed but every one was excluded by
            // affinity; treat like a weak candidate
            return Ok(Some(MatchDecision::Skip));
        };

        let decision = decide(score, &self.policy);
        debug!(
            line_id = %line.id,
            movement_id = %movement.id,
            score,
            ?decision,
            "best candidate scored"
        );

        match decision {
            MatchDecision::Match => self.commit_match(line, movement).await,
            MatchDecision::Review => self.commit_suggestion(line, movement, score).await,
            MatchDecision::Skip => Ok(Some(MatchDecision::Skip)),
        }
    }

    /// Selects movements inside the amount tolerance and date window,
    /// honoring bank-account affinity. Claimed movements are included
    /// so the caller can tell "candidate taken" apart from "no
    /// candidate".
    async fn find_candidates(
        &self,
        line: &bank_statement_lines::Model,
        amount: Decimal,
        kinds: &[CashKind],
    ) -> Result<Vec<cash_movements::Model>, ReconcileError> {
        let lo = amount - self.policy.amount_tolerance;
        let hi = amount + self.policy.amount_tolerance;
        let from = line.txn_date - Duration::days(self.policy.date_window_days);
        let to = line.txn_date + Duration::days(self.policy.date_window_days);

        let mut query = cash_movements::Entity::find()
            .filter(cash_movements::Column::Kind.is_in(kinds.iter().cloned()))
            .filter(cash_movements::Column::Amount.between(lo, hi))
            .filter(cash_movements::Column::MovementDate.between(from, to));

        // same or unspecified bank-account affinity
        if let Some(account) = line.bank_account_id {
            query = query.filter(
                Condition::any()
                    .add(cash_movements::Column::BankAccountId.is_null())
                    .add(cash_movements::Column::BankAccountId.eq(account)),
            );
        }

        Ok(query.all(&self.db).await?)
    }

    /// Commits a confident match: claims the movement with a
    /// conditional update and marks the line matched.
    async fn commit_match(
        &self,
        line: &bank_statement_lines::Model,
        movement: &cash_movements::Model,
    ) -> Result<Option<MatchDecision>, ReconcileError> {
        let txn = self.db.begin().await?;

        // re-check the claim at commit time, not only at selection
        let claim = cash_movements::Entity::update_many()
            .col_expr(
                cash_movements::Column::MatchedBankLineId,
                Expr::value(Some(line.id)),
            )
            .col_expr(cash_movements::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(cash_movements::Column::Id.eq(movement.id))
            .filter(cash_movements::Column::MatchedBankLineId.is_null())
            .exec(&txn)
            .await?;

        if claim.rows_affected == 0 {
            warn!(
                line_id = %line.id,
                movement_id = %movement.id,
                "candidate already claimed by another line"
            );
            return Ok(Some(MatchDecision::Skip));
        }

        bank_statement_lines::Entity::update_many()
            .col_expr(
                bank_statement_lines::Column::ReconStatus,
                Expr::value(ReconStatus::Matched),
            )
            .col_expr(
                bank_statement_lines::Column::MatchedMovementId,
                Expr::value(Some(movement.id)),
            )
            .col_expr(
                bank_statement_lines::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(bank_statement_lines::Column::Id.eq(line.id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(Some(MatchDecision::Match))
    }

    /// Records a needs-review suggestion without claiming the
    /// movement; human review confirms or rejects it later.
    async fn commit_suggestion(
        &self,
        line: &bank_statement_lines::Model,
        movement: &cash_movements::Model,
        score: u32,
    ) -> Result<Option<MatchDecision>, ReconcileError> {
        bank_statement_lines::Entity::update_many()
            .col_expr(
                bank_statement_lines::Column::ReconStatus,
                Expr::value(ReconStatus::NeedsReview),
            )
            .col_expr(
                bank_statement_lines::Column::MatchedMovementId,
                Expr::value(Some(movement.id)),
            )
            .col_expr(
                bank_statement_lines::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(bank_statement_lines::Column::Id.eq(line.id))
            .exec(&self.db)
            .await?;

        self.notifier.notify(
            UserId::from_uuid(movement.created_by),
            "reconciliation.needs_review",
            &json!({
                "bank_line_id": line.id,
                "movement_id": movement.id,
                "score": score,
            }),
        );

        Ok(Some(MatchDecision::Review))
    }
}

impl std::fmt::Debug for ReconciliationRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconciliationRepository")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
