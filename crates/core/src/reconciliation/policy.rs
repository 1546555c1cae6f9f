//! Matching policy: tolerances, thresholds, and score weights.

use rust_decimal::Decimal;
use saldo_shared::config::MatchingConfig;
use serde::{Deserialize, Serialize};

/// Policy governing candidate selection and match decisions.
///
/// Defaults reproduce the values observed in production: candidates
/// within 10,000 minor units and ±7 days, auto-match at 90 and review
/// at 60 on a 110-point scale. The two cutoffs were inherited without
/// a documented rationale and remain an open question for product
/// owners; deployments tune them through `MatchingConfig` instead of
/// editing code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Maximum absolute amount difference for a candidate.
    pub amount_tolerance: Decimal,
    /// Maximum date distance for a candidate, in days.
    pub date_window_days: i64,
    /// Minimum score for an automatic match.
    pub auto_match_threshold: u32,
    /// Minimum score for a needs-review suggestion.
    pub review_threshold: u32,
    /// Score awarded per amount tier, closest first.
    pub amount_tiers: AmountTiers,
    /// Score awarded per date tier, closest first.
    pub date_tiers: DateTiers,
    /// Bonus when both records carry the same bank account reference.
    pub bank_account_bonus: u32,
}

/// Amount-closeness tiers: finer bands score higher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountTiers {
    /// Score for an exact amount match.
    pub exact: u32,
    /// Band and score for a near match (difference up to the band).
    pub near_band: Decimal,
    /// Score for a near match.
    pub near: u32,
    /// Band and score for a close match.
    pub close_band: Decimal,
    /// Score for a close match.
    pub close: u32,
    /// Score for any difference inside the tolerance.
    pub within_tolerance: u32,
}

/// Date-closeness tiers: same day scores highest, decaying outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateTiers {
    /// Score for the same day.
    pub same_day: u32,
    /// Score for 1 day apart.
    pub one_day: u32,
    /// Score for 2-3 days apart.
    pub three_days: u32,
    /// Score for anything else inside the window.
    pub within_window: u32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            amount_tolerance: Decimal::new(10_000, 0),
            date_window_days: 7,
            auto_match_threshold: 90,
            review_threshold: 60,
            amount_tiers: AmountTiers {
                exact: 50,
                near_band: Decimal::new(100, 0),
                near: 40,
                close_band: Decimal::new(1_000, 0),
                close: 30,
                within_tolerance: 15,
            },
            date_tiers: DateTiers {
                same_day: 50,
                one_day: 40,
                three_days: 30,
                within_window: 20,
            },
            bank_account_bonus: 10,
        }
    }
}

impl MatchPolicy {
    /// Maximum achievable score under this policy.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.amount_tiers.exact + self.date_tiers.same_day + self.bank_account_bonus
    }
}

impl From<&MatchingConfig> for MatchPolicy {
    /// Overlays deployment configuration on the default tier weights.
    fn from(config: &MatchingConfig) -> Self {
        Self {
            amount_tolerance: config.amount_tolerance,
            date_window_days: config.date_window_days,
            auto_match_threshold: config.auto_match_threshold,
            review_threshold: config.review_threshold,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy_shape() {
        let policy = MatchPolicy::default();
        assert_eq!(policy.amount_tolerance, dec!(10000));
        assert_eq!(policy.date_window_days, 7);
        assert!(policy.auto_match_threshold > policy.review_threshold);
        // exact amount + same day must clear the auto-match bar even
        // without the bank-account bonus
        assert!(policy.amount_tiers.exact + policy.date_tiers.same_day
            >= policy.auto_match_threshold);
        assert_eq!(policy.max_score(), 110);
    }

    #[test]
    fn test_from_config_overrides_thresholds() {
        let config = MatchingConfig {
            amount_tolerance: dec!(5000),
            date_window_days: 3,
            auto_match_threshold: 95,
            review_threshold: 70,
        };
        let policy = MatchPolicy::from(&config);
        assert_eq!(policy.amount_tolerance, dec!(5000));
        assert_eq!(policy.date_window_days, 3);
        assert_eq!(policy.auto_match_threshold, 95);
        assert_eq!(policy.review_threshold, 70);
        // tier weights keep their defaults
        assert_eq!(policy.amount_tiers.exact, 50);
    }
}
