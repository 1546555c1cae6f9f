//! Candidate scoring for bank line reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo_shared::types::BankAccountId;

use super::policy::MatchPolicy;

/// Facts about the bank statement line being matched.
#[derive(Debug, Clone)]
pub struct LineFacts {
    /// Line amount (the side being matched, always positive).
    pub amount: Decimal,
    /// Statement transaction date.
    pub txn_date: NaiveDate,
    /// Bank account the statement belongs to, if known.
    pub bank_account_id: Option<BankAccountId>,
}

/// Facts about a candidate cash movement.
#[derive(Debug, Clone)]
pub struct CandidateFacts {
    /// Movement amount (always positive).
    pub amount: Decimal,
    /// Movement date.
    pub movement_date: NaiveDate,
    /// Bank account the movement references, if any.
    pub bank_account_id: Option<BankAccountId>,
}

/// Scores a candidate pairing under the given policy.
///
/// Returns `None` when the candidate falls outside the amount
/// tolerance or the date window; such a pair is not a candidate at
/// all. Otherwise the score is the sum of the amount tier, the date
/// tier, and the bank-account bonus when both sides name the same
/// account. A candidate naming a *different* account than the line is
/// excluded: affinity must be same or unspecified.
#[must_use]
pub fn score_candidate(
    line: &LineFacts,
    candidate: &CandidateFacts,
    policy: &MatchPolicy,
) -> Option<u32> {
    let amount_diff = (line.amount - candidate.amount).abs();
    if amount_diff > policy.amount_tolerance {
        return None;
    }

    let date_distance = (line.txn_date - candidate.movement_date).num_days().abs();
    if date_distance > policy.date_window_days {
        return None;
    }

    let same_account = match (line.bank_account_id, candidate.bank_account_id) {
        (Some(a), Some(b)) if a != b => return None,
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    let amount_score = amount_tier(amount_diff, policy);
    let date_score = date_tier(date_distance, policy);
    let bonus = if same_account {
        policy.bank_account_bonus
    } else {
        0
    };

    Some(amount_score + date_score + bonus)
}

fn amount_tier(diff: Decimal, policy: &MatchPolicy) -> u32 {
    let tiers = &policy.amount_tiers;
    if diff == Decimal::ZERO {
        tiers.exact
    } else if diff <= tiers.near_band {
        tiers.near
    } else if diff <= tiers.close_band {
        tiers.close
    } else {
        tiers.within_tolerance
    }
}

fn date_tier(distance_days: i64, policy: &MatchPolicy) -> u32 {
    let tiers = &policy.date_tiers;
    match distance_days {
        0 => tiers.same_day,
        1 => tiers.one_day,
        2..=3 => tiers.three_days,
        _ => tiers.within_window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::{decide, MatchDecision};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn line(amount: Decimal, date: NaiveDate) -> LineFacts {
        LineFacts {
            amount,
            txn_date: date,
            bank_account_id: None,
        }
    }

    fn candidate(amount: Decimal, date: NaiveDate) -> CandidateFacts {
        CandidateFacts {
            amount,
            movement_date: date,
            bank_account_id: None,
        }
    }

    #[test]
    fn test_exact_amount_same_day_is_top_tier() {
        let policy = MatchPolicy::default();
        // bank line 525,000 on day D against an expense of 525,000 on day D
        let score = score_candidate(
            &line(dec!(525_000), day(14)),
            &candidate(dec!(525_000), day(14)),
            &policy,
        )
        .unwrap();

        assert_eq!(score, policy.amount_tiers.exact + policy.date_tiers.same_day);
        assert_eq!(decide(score, &policy), MatchDecision::Match);
    }

    #[test]
    fn test_outside_amount_tolerance_is_not_a_candidate() {
        let policy = MatchPolicy::default();
        assert!(score_candidate(
            &line(dec!(525_000), day(14)),
            &candidate(dec!(540_000), day(14)),
            &policy,
        )
        .is_none());
    }

    #[test]
    fn test_outside_date_window_is_not_a_candidate() {
        let policy = MatchPolicy::default();
        assert!(score_candidate(
            &line(dec!(525_000), day(1)),
            &candidate(dec!(525_000), day(20)),
            &policy,
        )
        .is_none());
    }

    #[test]
    fn test_conflicting_bank_accounts_excluded() {
        let policy = MatchPolicy::default();
        let mut l = line(dec!(100_000), day(10));
        let mut c = candidate(dec!(100_000), day(10));
        l.bank_account_id = Some(BankAccountId::new());
        c.bank_account_id = Some(BankAccountId::new());

        assert!(score_candidate(&l, &c, &policy).is_none());
    }

    #[test]
    fn test_shared_bank_account_bonus() {
        let policy = MatchPolicy::default();
        let account = BankAccountId::new();
        let mut l = line(dec!(100_000), day(10));
        let mut c = candidate(dec!(100_000), day(10));
        l.bank_account_id = Some(account);
        c.bank_account_id = Some(account);

        let with_bonus = score_candidate(&l, &c, &policy).unwrap();
        let without = score_candidate(
            &line(dec!(100_000), day(10)),
            &candidate(dec!(100_000), day(10)),
            &policy,
        )
        .unwrap();

        assert_eq!(with_bonus, without + policy.bank_account_bonus);
        assert_eq!(with_bonus, policy.max_score());
    }

    #[rstest]
    #[case(dec!(0), 50)]
    #[case(dec!(50), 40)]
    #[case(dec!(100), 40)]
    #[case(dec!(500), 30)]
    #[case(dec!(1_000), 30)]
    #[case(dec!(9_999), 15)]
    fn test_amount_tiers_descend(#[case] diff: Decimal, #[case] expected: u32) {
        let policy = MatchPolicy::default();
        let score = score_candidate(
            &line(dec!(500_000), day(10)),
            &candidate(dec!(500_000) - diff, day(10)),
            &policy,
        )
        .unwrap();
        assert_eq!(score, expected + policy.date_tiers.same_day);
    }

    #[rstest]
    #[case(0, 50)]
    #[case(1, 40)]
    #[case(2, 30)]
    #[case(3, 30)]
    #[case(4, 20)]
    #[case(7, 20)]
    fn test_date_tiers_decay(#[case] distance: u32, #[case] expected: u32) {
        let policy = MatchPolicy::default();
        let score = score_candidate(
            &line(dec!(500_000), day(10 + distance)),
            &candidate(dec!(500_000), day(10)),
            &policy,
        )
        .unwrap();
        assert_eq!(score, policy.amount_tiers.exact + expected);
    }

    #[test]
    fn test_near_amount_same_day_needs_review() {
        let policy = MatchPolicy::default();
        // a close-but-not-exact amount on the same day lands between
        // the review and auto-match cutoffs
        let score = score_candidate(
            &line(dec!(525_000), day(14)),
            &candidate(dec!(524_500), day(14)),
            &policy,
        )
        .unwrap();
        assert_eq!(decide(score, &policy), MatchDecision::Review);
    }

    #[test]
    fn test_weak_candidate_skipped() {
        let policy = MatchPolicy::default();
        // barely inside tolerance and a week away: below review cutoff
        let score = score_candidate(
            &line(dec!(525_000), day(21)),
            &candidate(dec!(520_000), day(14)),
            &policy,
        )
        .unwrap();
        assert_eq!(decide(score, &policy), MatchDecision::Skip);
    }
}
