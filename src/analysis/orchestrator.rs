//! Analysis pipeline orchestration.

use tracing::{debug, info, warn};

use crate::analysis::classifier::{RiskClassifier, RiskLevel};
use crate::analysis::config::ScoringConfig;
use crate::analysis::patterns::BehaviorPatternDetector;
use crate::analysis::scoring::ScoringEngine;
use crate::analysis::summarizer::WalletMetadataSummarizer;
use crate::analysis::types::{
    AiWalletAnalysis, ReputationSignals, TokenHolding, Transaction,
};
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::{AnalysisError, Result};
use crate::core::validation::validate_wallet_address;

/// Composes the analysis stages into one pass over a wallet's data.
///
/// Holds no mutable state: one orchestrator can be shared across a worker
/// pool analyzing different wallets concurrently. Input validation happens
/// before any stage runs; on failure no partial record exists. Retries,
/// timeouts and cancellation are the caller's concern.
pub struct AnalysisOrchestrator<C: Clock = SystemClock> {
    summarizer: WalletMetadataSummarizer,
    detector: BehaviorPatternDetector,
    engine: ScoringEngine,
    classifier: RiskClassifier,
    clock: C,
}

impl AnalysisOrchestrator<SystemClock> {
    /// Orchestrator with the reference rule table and the system clock.
    pub fn new() -> Self {
        Self {
            summarizer: WalletMetadataSummarizer,
            detector: BehaviorPatternDetector,
            engine: ScoringEngine::default(),
            classifier: RiskClassifier,
            clock: SystemClock,
        }
    }

    /// Orchestrator with a custom rule table, validated up front.
    pub fn with_config(config: ScoringConfig) -> Result<Self> {
        Ok(Self { engine: ScoringEngine::new(config)?, ..Self::new() })
    }
}

impl Default for AnalysisOrchestrator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AnalysisOrchestrator<C> {
    /// Orchestrator with an injected clock, for deterministic timestamps.
    pub fn with_clock(config: ScoringConfig, clock: C) -> Result<Self> {
        Ok(Self {
            summarizer: WalletMetadataSummarizer,
            detector: BehaviorPatternDetector,
            engine: ScoringEngine::new(config)?,
            classifier: RiskClassifier,
            clock,
        })
    }

    /// Run one full analysis and return the immutable record.
    ///
    /// Reputation signals must already be resolved by the caller's lookup
    /// collaborator; the pipeline itself is synchronous end to end. Zero
    /// transactions is a valid, fully-scored state, not an error.
    pub fn analyze(
        &self,
        wallet_address: &str,
        network: &str,
        transactions: Vec<Transaction>,
        token_holdings: Vec<TokenHolding>,
        signals: ReputationSignals,
    ) -> Result<AiWalletAnalysis> {
        if network.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Network identifier cannot be empty".to_string(),
            ));
        }
        validate_wallet_address(wallet_address, network)
            .map_err(|err| AnalysisError::InvalidInput(err.to_string()))?;
        validate_transactions(&transactions)?;
        validate_holdings(&token_holdings)?;

        let analysis_timestamp = self.clock.now();
        debug!(wallet = wallet_address, tx_count = transactions.len(), "starting wallet analysis");

        let metadata = self.summarizer.summarize(
            wallet_address,
            &transactions,
            &token_holdings,
            signals,
            analysis_timestamp,
        );
        let behavioral_patterns = self.detector.detect(&transactions, &metadata);
        debug!(
            age_days = metadata.age_days,
            anomalies = behavioral_patterns.transaction_anomalies.len(),
            "derived metadata and behavior signals"
        );

        let scoring_breakdown = self.engine.score(&metadata, &behavioral_patterns);
        let final_score = self.engine.final_score(&scoring_breakdown);
        let risk_level = self.classifier.classify(final_score);

        info!(
            wallet = wallet_address,
            network,
            score = final_score,
            level = %risk_level,
            rules_fired = scoring_breakdown.len(),
            "wallet analysis completed"
        );
        if risk_level == RiskLevel::High {
            warn!(wallet = wallet_address, score = final_score, "wallet classified as high risk");
        }

        Ok(AiWalletAnalysis {
            wallet_address: wallet_address.to_string(),
            network: network.to_string(),
            analysis_timestamp,
            metadata,
            behavioral_patterns,
            scoring_breakdown,
            final_score,
            risk_level,
            transactions,
            token_holdings,
            comments: None,
        })
    }
}

fn validate_transactions(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        if tx.hash.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Transaction record is missing its hash".to_string(),
            ));
        }
        if tx.from_address.is_empty() || tx.to_address.is_empty() {
            return Err(AnalysisError::InvalidInput(format!(
                "Transaction {} is missing a from/to address",
                tx.hash
            )));
        }
        if !tx.value.is_finite() || tx.value < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Transaction {} carries an invalid value",
                tx.hash
            )));
        }
        if tx.gas_used > tx.gas_limit {
            return Err(AnalysisError::InvalidInput(format!(
                "Transaction {} reports gas usage above its limit",
                tx.hash
            )));
        }
        if let Some(token) = &tx.token {
            if token.address.is_empty() {
                return Err(AnalysisError::InvalidInput(format!(
                    "Transaction {} references a token without an address",
                    tx.hash
                )));
            }
        }
    }
    Ok(())
}

fn validate_holdings(holdings: &[TokenHolding]) -> Result<()> {
    for holding in holdings {
        if holding.token.address.is_empty() || holding.token.symbol.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Token holding is missing its token address or symbol".to_string(),
            ));
        }
        if !holding.balance.is_finite() || holding.balance < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Token holding {} carries an invalid balance",
                holding.token.address
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::TokenDescriptor;
    use crate::core::clock::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};

    const WALLET: &str = "0x1111111111111111111111111111111111111111";
    const OTHER: &str = "0x2222222222222222222222222222222222222222";

    fn analysis_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn orchestrator() -> AnalysisOrchestrator<FixedClock> {
        AnalysisOrchestrator::with_clock(
            ScoringConfig::reference(),
            FixedClock(analysis_time()),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_malformed_address() {
        let err = orchestrator()
            .analyze("not-an-address", "eth", vec![], vec![], ReputationSignals::default())
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_rejects_empty_network() {
        let err = orchestrator()
            .analyze(WALLET, "", vec![], vec![], ReputationSignals::default())
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_rejects_transaction_without_hash() {
        let tx = Transaction::transfer("", analysis_time(), OTHER, WALLET, 1.0);
        let err = orchestrator()
            .analyze(WALLET, "eth", vec![tx], vec![], ReputationSignals::default())
            .unwrap_err();
        assert!(err.to_string().contains("missing its hash"));
    }

    #[test]
    fn test_rejects_gas_usage_above_limit() {
        let tx = Transaction::transfer("0xa", analysis_time(), OTHER, WALLET, 1.0)
            .with_gas(30_000, 21_000);
        let err = orchestrator()
            .analyze(WALLET, "eth", vec![tx], vec![], ReputationSignals::default())
            .unwrap_err();
        assert!(err.to_string().contains("gas usage above its limit"));
    }

    #[test]
    fn test_rejects_negative_holding_balance() {
        let holding = TokenHolding::new(TokenDescriptor::new("0xtoken", "USDC", 6), -1.0);
        let err = orchestrator()
            .analyze(WALLET, "eth", vec![], vec![holding], ReputationSignals::default())
            .unwrap_err();
        assert!(err.to_string().contains("invalid balance"));
    }

    #[test]
    fn test_empty_wallet_is_scored_not_rejected() {
        let analysis = orchestrator()
            .analyze(WALLET, "eth", vec![], vec![], ReputationSignals::default())
            .unwrap();
        assert_eq!(analysis.analysis_timestamp, analysis_time());
        assert_eq!(analysis.metadata.total_transactions, 0);
        // 50 - 15 (new wallet) - 10 (low activity)
        assert_eq!(analysis.final_score, 25.0);
        assert_eq!(analysis.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_record_retains_inputs_for_audit() {
        let txs = vec![Transaction::transfer("0xa", analysis_time(), OTHER, WALLET, 1.0)];
        let holdings = vec![TokenHolding::new(TokenDescriptor::new("0xtoken", "USDC", 6), 10.0)];
        let analysis = orchestrator()
            .analyze(WALLET, "eth", txs.clone(), holdings.clone(), ReputationSignals::default())
            .unwrap();
        assert_eq!(analysis.transactions, txs);
        assert_eq!(analysis.token_holdings, holdings);
        assert_eq!(analysis.comments, None);
    }

    #[test]
    fn test_with_comments_preserves_analysis() {
        let analysis = orchestrator()
            .analyze(WALLET, "eth", vec![], vec![], ReputationSignals::default())
            .unwrap();
        let score = analysis.final_score;
        let annotated = analysis.with_comments("reviewed manually");
        assert_eq!(annotated.comments.as_deref(), Some("reviewed manually"));
        assert_eq!(annotated.final_score, score);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let mut config = ScoringConfig::reference();
        config.score_floor = 200.0;
        assert!(AnalysisOrchestrator::with_config(config).is_err());
    }

    #[test]
    fn test_orchestrator_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisOrchestrator<SystemClock>>();
    }
}
