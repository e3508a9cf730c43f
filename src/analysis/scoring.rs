//! Weighted rule evaluation and final-score computation.

use serde::{Deserialize, Serialize};

use crate::analysis::config::ScoringConfig;
use crate::analysis::types::{BehavioralPatterns, ScoreBreakdownEntry, WalletMetadata};
use crate::core::errors::Result;

/// Identifier of one scoring rule.
///
/// Serialized as the human-readable criteria label; the labels are part of
/// the persisted-record contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCriteria {
    #[serde(rename = "Wallet age bonus")]
    WalletAgeBonus,
    #[serde(rename = "Wallet age bonus (moderate)")]
    WalletAgeModerateBonus,
    #[serde(rename = "New wallet penalty")]
    NewWalletPenalty,
    #[serde(rename = "Outbound-only penalty")]
    OutboundOnlyPenalty,
    #[serde(rename = "Single contract usage penalty")]
    SingleContractUsagePenalty,
    #[serde(rename = "Unverified contract usage penalty")]
    UnverifiedContractUsagePenalty,
    #[serde(rename = "All contracts verified bonus")]
    AllContractsVerifiedBonus,
    #[serde(rename = "Token diversity bonus")]
    TokenDiversityBonus,
    #[serde(rename = "Low transaction count penalty")]
    LowTransactionCountPenalty,
    #[serde(rename = "Flagged entity penalty")]
    FlaggedEntityPenalty,
    #[serde(rename = "Established funder bonus")]
    EstablishedFunderBonus,
    #[serde(rename = "Anomaly penalty")]
    AnomalyPenalty,
}

impl ScoreCriteria {
    pub fn label(&self) -> &'static str {
        match self {
            Self::WalletAgeBonus => "Wallet age bonus",
            Self::WalletAgeModerateBonus => "Wallet age bonus (moderate)",
            Self::NewWalletPenalty => "New wallet penalty",
            Self::OutboundOnlyPenalty => "Outbound-only penalty",
            Self::SingleContractUsagePenalty => "Single contract usage penalty",
            Self::UnverifiedContractUsagePenalty => "Unverified contract usage penalty",
            Self::AllContractsVerifiedBonus => "All contracts verified bonus",
            Self::TokenDiversityBonus => "Token diversity bonus",
            Self::LowTransactionCountPenalty => "Low transaction count penalty",
            Self::FlaggedEntityPenalty => "Flagged entity penalty",
            Self::EstablishedFunderBonus => "Established funder bonus",
            Self::AnomalyPenalty => "Anomaly penalty",
        }
    }
}

impl std::fmt::Display for ScoreCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Applies the configured rule table to derived metadata and behavior
/// signals.
///
/// Rules are evaluated in the fixed order of the table and each fires at
/// most once per analysis (the anomaly rule emits one entry per detected
/// anomaly). The order exists for reproducible audit output; the deltas are
/// commutative, so it never affects the final sum.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self { config: ScoringConfig::reference() }
    }
}

impl ScoringEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Evaluate every rule, returning the ordered breakdown of deltas that
    /// fired. Each reason restates the rule's condition together with the
    /// observed value, so an auditor can reconstruct it from the inputs.
    pub fn score(
        &self,
        metadata: &WalletMetadata,
        behavior: &BehavioralPatterns,
    ) -> Vec<ScoreBreakdownEntry> {
        let cfg = &self.config;
        let mut entries = Vec::new();
        let mut push = |criteria: ScoreCriteria, delta: f64, reason: String| {
            entries.push(ScoreBreakdownEntry { criteria, delta, reason });
        };

        let age = metadata.age_days;
        if age >= cfg.age.established_days {
            push(
                ScoreCriteria::WalletAgeBonus,
                cfg.age.established_bonus,
                format!("Wallet age: {} days (established wallet)", age),
            );
        } else if age >= cfg.age.moderate_days {
            push(
                ScoreCriteria::WalletAgeModerateBonus,
                cfg.age.moderate_bonus,
                format!("Wallet age: {} days (moderately established wallet)", age),
            );
        }
        if age < cfg.age.new_wallet_days {
            push(
                ScoreCriteria::NewWalletPenalty,
                cfg.age.new_wallet_penalty,
                format!("Wallet age: {} days (newly created wallet)", age),
            );
        }

        if behavior.outbound_only {
            push(
                ScoreCriteria::OutboundOnlyPenalty,
                cfg.behavior.outbound_only_penalty,
                format!(
                    "Activity is outbound-only: {} sent, 0 received",
                    metadata.outbound_count
                ),
            );
        }
        if behavior.single_contract_usage {
            push(
                ScoreCriteria::SingleContractUsagePenalty,
                cfg.behavior.single_contract_penalty,
                "All contract activity depends on exactly 1 distinct contract".to_string(),
            );
        }
        if behavior.unverified_contract_usage {
            push(
                ScoreCriteria::UnverifiedContractUsagePenalty,
                cfg.behavior.unverified_contract_penalty,
                "Wallet interacted with at least one unverified contract".to_string(),
            );
        }

        if metadata.all_contracts_verified && metadata.unique_contracts_interacted > 0 {
            push(
                ScoreCriteria::AllContractsVerifiedBonus,
                cfg.activity.verified_contracts_bonus,
                format!(
                    "All {} interacted contracts are verified",
                    metadata.unique_contracts_interacted
                ),
            );
        }
        if metadata.unique_tokens_used >= cfg.activity.token_diversity_min {
            push(
                ScoreCriteria::TokenDiversityBonus,
                cfg.activity.token_diversity_bonus,
                format!("Wallet used {} distinct tokens", metadata.unique_tokens_used),
            );
        }
        if metadata.total_transactions < cfg.activity.low_activity_threshold {
            push(
                ScoreCriteria::LowTransactionCountPenalty,
                cfg.activity.low_activity_penalty,
                format!("Only {} transactions on record", metadata.total_transactions),
            );
        }

        if metadata.linked_to_flagged_entity {
            push(
                ScoreCriteria::FlaggedEntityPenalty,
                cfg.reputation.flagged_entity_penalty,
                "Reputation lookup links this wallet to a flagged entity".to_string(),
            );
        }
        if metadata.funded_by_established_wallet {
            push(
                ScoreCriteria::EstablishedFunderBonus,
                cfg.reputation.established_funder_bonus,
                "Wallet was funded by an established wallet".to_string(),
            );
        }

        for anomaly in &behavior.transaction_anomalies {
            push(
                ScoreCriteria::AnomalyPenalty,
                cfg.behavior.anomaly_penalty,
                format!("Detected anomaly: {}", anomaly),
            );
        }

        entries
    }

    /// Sum the breakdown onto the base score and clamp once.
    ///
    /// Clamping is not itself a breakdown entry; the entries always reflect
    /// the raw deltas.
    pub fn final_score(&self, entries: &[ScoreBreakdownEntry]) -> f64 {
        let sum: f64 = entries.iter().map(|entry| entry.delta).sum();
        (self.config.base_score + sum).clamp(self.config.score_floor, self.config.score_ceiling)
    }
}
