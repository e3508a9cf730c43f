//! Wallet risk analysis pipeline.
//!
//! Raw wallet data flows one way through the stages: the summarizer and the
//! pattern detector derive metadata and behavior signals, the scoring engine
//! turns both into an ordered breakdown of weighted deltas, the classifier
//! maps the clamped final score to a risk level, and the orchestrator
//! assembles the immutable analysis record.

pub mod classifier;
pub mod config;
pub mod orchestrator;
pub mod patterns;
pub mod scoring;
pub mod summarizer;
pub mod types;

pub use classifier::{RiskClassifier, RiskLevel};
pub use config::ScoringConfig;
pub use orchestrator::AnalysisOrchestrator;
pub use patterns::BehaviorPatternDetector;
pub use scoring::{ScoreCriteria, ScoringEngine};
pub use summarizer::WalletMetadataSummarizer;
pub use types::{
    AiWalletAnalysis, BehavioralPatterns, ReputationSignals, ScoreBreakdownEntry,
    TokenDescriptor, TokenHolding, Transaction, TxStatus, WalletMetadata,
};
