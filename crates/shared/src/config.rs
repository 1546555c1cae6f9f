//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Bank reconciliation matching configuration.
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Bank reconciliation matching configuration.
///
/// The defaults mirror the values observed in production: candidates
/// within 10,000 minor units and ±7 days. The score cutoffs separating
/// auto-match from review remain an open product question; deployments
/// override them here rather than in code.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Maximum absolute amount difference for a candidate pairing,
    /// in minor currency units.
    #[serde(default = "default_amount_tolerance")]
    pub amount_tolerance: Decimal,
    /// Maximum date distance for a candidate pairing, in days.
    #[serde(default = "default_date_window_days")]
    pub date_window_days: i64,
    /// Minimum score for an automatic match.
    #[serde(default = "default_auto_match_threshold")]
    pub auto_match_threshold: u32,
    /// Minimum score for a needs-review suggestion.
    #[serde(default = "default_review_threshold")]
    pub review_threshold: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: default_amount_tolerance(),
            date_window_days: default_date_window_days(),
            auto_match_threshold: default_auto_match_threshold(),
            review_threshold: default_review_threshold(),
        }
    }
}

fn default_amount_tolerance() -> Decimal {
    Decimal::new(10_000, 0)
}

fn default_date_window_days() -> i64 {
    7
}

fn default_auto_match_threshold() -> u32 {
    90
}

fn default_review_threshold() -> u32 {
    60
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SALDO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_matching_defaults() {
        let matching = MatchingConfig::default();
        assert_eq!(matching.amount_tolerance, dec!(10000));
        assert_eq!(matching.date_window_days, 7);
        assert!(matching.auto_match_threshold > matching.review_threshold);
    }
}
