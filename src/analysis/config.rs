//! Scoring configuration.
//!
//! Every rule delta and threshold the scoring engine applies lives here
//! rather than in code, so deployments can retune weights without a
//! release. Defaults are the reference values the rule table documents.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{AnalysisError, Result};

/// Full rule table for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score every wallet starts from, before any rule fires.
    pub base_score: f64,
    /// Lower clamp bound for the final score.
    pub score_floor: f64,
    /// Upper clamp bound for the final score.
    pub score_ceiling: f64,

    pub age: AgeRules,
    pub behavior: BehaviorRules,
    pub activity: ActivityRules,
    pub reputation: ReputationRules,
}

/// Wallet-age thresholds and deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRules {
    /// Age, in days, at which a wallet counts as established.
    pub established_days: u64,
    /// Age, in days, at which a wallet counts as moderately established.
    pub moderate_days: u64,
    /// Age, in days, below which a wallet counts as newly created.
    pub new_wallet_days: u64,
    pub established_bonus: f64,
    pub moderate_bonus: f64,
    pub new_wallet_penalty: f64,
}

/// Deltas for behavioral red flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorRules {
    pub outbound_only_penalty: f64,
    pub single_contract_penalty: f64,
    pub unverified_contract_penalty: f64,
    /// Applied once per detected anomaly.
    pub anomaly_penalty: f64,
}

/// Deltas and thresholds for activity-shape rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRules {
    pub verified_contracts_bonus: f64,
    pub token_diversity_bonus: f64,
    /// Distinct tokens required for the diversity bonus.
    pub token_diversity_min: usize,
    pub low_activity_penalty: f64,
    /// Transaction count below which the low-activity penalty applies.
    pub low_activity_threshold: usize,
}

/// Deltas for externally supplied reputation signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationRules {
    pub flagged_entity_penalty: f64,
    pub established_funder_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::reference()
    }
}

impl Default for AgeRules {
    fn default() -> Self {
        Self {
            established_days: 180,
            moderate_days: 30,
            new_wallet_days: 7,
            established_bonus: 10.0,
            moderate_bonus: 5.0,
            new_wallet_penalty: -15.0,
        }
    }
}

impl Default for BehaviorRules {
    fn default() -> Self {
        Self {
            outbound_only_penalty: -10.0,
            single_contract_penalty: -8.0,
            unverified_contract_penalty: -20.0,
            anomaly_penalty: -5.0,
        }
    }
}

impl Default for ActivityRules {
    fn default() -> Self {
        Self {
            verified_contracts_bonus: 10.0,
            token_diversity_bonus: 8.0,
            token_diversity_min: 5,
            low_activity_penalty: -10.0,
            low_activity_threshold: 3,
        }
    }
}

impl Default for ReputationRules {
    fn default() -> Self {
        Self {
            flagged_entity_penalty: -40.0,
            established_funder_bonus: 5.0,
        }
    }
}

impl ScoringConfig {
    /// Reference configuration on the 0-100 scale.
    pub fn reference() -> Self {
        Self {
            base_score: 50.0,
            score_floor: 0.0,
            score_ceiling: 100.0,
            age: AgeRules::default(),
            behavior: BehaviorRules::default(),
            activity: ActivityRules::default(),
            reputation: ReputationRules::default(),
        }
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration consistency.
    pub fn validate(&self) -> Result<()> {
        if self.score_floor >= self.score_ceiling {
            return Err(AnalysisError::Configuration(
                "Score floor must be below score ceiling".to_string(),
            ));
        }
        if self.base_score < self.score_floor || self.base_score > self.score_ceiling {
            return Err(AnalysisError::Configuration(
                "Base score must lie within the clamp bounds".to_string(),
            ));
        }
        if self.age.new_wallet_days >= self.age.moderate_days
            || self.age.moderate_days >= self.age.established_days
        {
            return Err(AnalysisError::Configuration(
                "Age thresholds must be strictly increasing: new < moderate < established"
                    .to_string(),
            ));
        }
        let bonuses = [
            self.age.established_bonus,
            self.age.moderate_bonus,
            self.activity.verified_contracts_bonus,
            self.activity.token_diversity_bonus,
            self.reputation.established_funder_bonus,
        ];
        if bonuses.iter().any(|b| *b < 0.0) {
            return Err(AnalysisError::Configuration(
                "Bonus deltas must be non-negative".to_string(),
            ));
        }
        let penalties = [
            self.age.new_wallet_penalty,
            self.behavior.outbound_only_penalty,
            self.behavior.single_contract_penalty,
            self.behavior.unverified_contract_penalty,
            self.behavior.anomaly_penalty,
            self.activity.low_activity_penalty,
            self.reputation.flagged_entity_penalty,
        ];
        if penalties.iter().any(|p| *p > 0.0) {
            return Err(AnalysisError::Configuration(
                "Penalty deltas must be non-positive".to_string(),
            ));
        }
        Ok(())
    }
}
