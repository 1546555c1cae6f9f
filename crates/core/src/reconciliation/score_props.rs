//! Property tests for reconciliation scoring.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::policy::MatchPolicy;
use super::score::{score_candidate, CandidateFacts, LineFacts};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every candidate inside the tolerance and window scores within
    /// the policy's score range, and closer amounts never score lower
    /// than farther ones on the same date.
    #[test]
    fn prop_scores_bounded_and_monotone(
        amount in 1i64..1_000_000_000i64,
        diff_small in 0i64..10_000i64,
        diff_large in 0i64..10_000i64,
    ) {
        let policy = MatchPolicy::default();
        let amount = Decimal::from(amount);
        let (small, large) = if diff_small <= diff_large {
            (diff_small, diff_large)
        } else {
            (diff_large, diff_small)
        };

        let line = LineFacts {
            amount,
            txn_date: base_date(),
            bank_account_id: None,
        };
        let closer = CandidateFacts {
            amount: amount - Decimal::from(small),
            movement_date: base_date(),
            bank_account_id: None,
        };
        let farther = CandidateFacts {
            amount: amount - Decimal::from(large),
            movement_date: base_date(),
            bank_account_id: None,
        };

        let closer_score = score_candidate(&line, &closer, &policy).unwrap();
        let farther_score = score_candidate(&line, &farther, &policy).unwrap();

        prop_assert!(closer_score <= policy.max_score());
        prop_assert!(closer_score >= farther_score);
    }

    /// Outside the date window there is never a score, no matter how
    /// exact the amount.
    #[test]
    fn prop_window_is_hard_boundary(
        amount in 1i64..1_000_000_000i64,
        extra_days in 8i64..400i64,
    ) {
        let policy = MatchPolicy::default();
        let amount = Decimal::from(amount);

        let line = LineFacts {
            amount,
            txn_date: base_date(),
            bank_account_id: None,
        };
        let candidate = CandidateFacts {
            amount,
            movement_date: base_date() - chrono::Duration::days(extra_days),
            bank_account_id: None,
        };

        prop_assert!(score_candidate(&line, &candidate, &policy).is_none());
    }
}
