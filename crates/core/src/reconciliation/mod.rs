//! Bank statement matching policy and scoring.
//!
//! Pairs unmatched bank statement lines with recorded cash movements.
//! Scoring is a weighted sum of an amount-closeness tier and a
//! date-closeness tier plus a bank-account affinity bonus; the cutoffs
//! separating auto-match from needs-review live in [`MatchPolicy`]
//! rather than in code.

pub mod policy;
pub mod score;

#[cfg(test)]
mod score_props;

pub use policy::MatchPolicy;
pub use score::{score_candidate, CandidateFacts, LineFacts};

use serde::{Deserialize, Serialize};

/// Outcome of scoring one candidate pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDecision {
    /// Confident pairing: commit as matched.
    Match,
    /// Plausible pairing: record for human review.
    Review,
    /// Not confident enough: leave the line alone.
    Skip,
}

/// Decides what to do with a scored candidate.
#[must_use]
pub fn decide(score: u32, policy: &MatchPolicy) -> MatchDecision {
    if score >= policy.auto_match_threshold {
        MatchDecision::Match
    } else if score >= policy.review_threshold {
        MatchDecision::Review
    } else {
        MatchDecision::Skip
    }
}

/// Counters returned by an auto-match run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRunSummary {
    /// Lines committed as matched.
    pub matched: u64,
    /// Lines recorded as needs-review suggestions.
    pub suggested: u64,
    /// Lines skipped (no candidate, weak score, or lost claim race).
    pub skipped: u64,
}

impl MatchRunSummary {
    /// Records the outcome of one line.
    pub fn record(&mut self, decision: MatchDecision) {
        match decision {
            MatchDecision::Match => self.matched += 1,
            MatchDecision::Review => self.suggested += 1,
            MatchDecision::Skip => self.skipped += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_thresholds() {
        let policy = MatchPolicy::default();
        assert_eq!(decide(policy.auto_match_threshold, &policy), MatchDecision::Match);
        assert_eq!(
            decide(policy.auto_match_threshold - 1, &policy),
            MatchDecision::Review
        );
        assert_eq!(decide(policy.review_threshold, &policy), MatchDecision::Review);
        assert_eq!(
            decide(policy.review_threshold - 1, &policy),
            MatchDecision::Skip
        );
        assert_eq!(decide(0, &policy), MatchDecision::Skip);
    }

    #[test]
    fn test_summary_record() {
        let mut summary = MatchRunSummary::default();
        summary.record(MatchDecision::Match);
        summary.record(MatchDecision::Match);
        summary.record(MatchDecision::Review);
        summary.record(MatchDecision::Skip);

        assert_eq!(summary.matched, 2);
        assert_eq!(summary.suggested, 1);
        assert_eq!(summary.skipped, 1);
    }
}
