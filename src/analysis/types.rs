//! Data model for wallet analysis.
//!
//! Field names on the public records are a stable serialized contract:
//! persisted analyses and presentation layers depend on them, so they must
//! not change across releases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::RiskLevel;
use crate::analysis::scoring::ScoreCriteria;

/// Execution status of an on-chain transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Ok,
    Failed,
    Pending,
}

/// Token contract descriptor attached to transfers and holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    pub verified: bool,
    pub total_supply: Option<String>,
    pub holder_count: Option<u64>,
}

impl TokenDescriptor {
    pub fn new(address: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            address: address.to_string(),
            symbol: symbol.to_string(),
            decimals,
            verified: false,
            total_supply: None,
            holder_count: None,
        }
    }

    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }
}

/// One on-chain call or transfer, immutable once recorded.
///
/// Supplied in roughly chronological order by explorers, but consumers
/// re-sort by timestamp before deriving anything order-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub from_address: String,
    pub to_address: String,
    pub from_is_contract: bool,
    pub to_is_contract: bool,
    pub to_is_verified: bool,
    /// Four-byte method selector of a contract call; `None` for a plain
    /// value transfer.
    pub method_selector: Option<String>,
    pub status: TxStatus,
    pub gas_used: u64,
    pub gas_limit: u64,
    /// Transferred native value, in native token units.
    pub value: f64,
    pub token: Option<TokenDescriptor>,
}

impl Transaction {
    /// Create a plain value transfer with sane defaults.
    pub fn transfer(
        hash: &str,
        timestamp: DateTime<Utc>,
        from_address: &str,
        to_address: &str,
        value: f64,
    ) -> Self {
        Self {
            hash: hash.to_string(),
            timestamp,
            from_address: from_address.to_string(),
            to_address: to_address.to_string(),
            from_is_contract: false,
            to_is_contract: false,
            to_is_verified: false,
            method_selector: None,
            status: TxStatus::Ok,
            gas_used: 21_000,
            gas_limit: 21_000,
            value,
            token: None,
        }
    }

    /// Mark the recipient as a contract, with its verification status.
    pub fn to_contract(mut self, verified: bool) -> Self {
        self.to_is_contract = true;
        self.to_is_verified = verified;
        self
    }

    pub fn with_method(mut self, selector: &str) -> Self {
        self.method_selector = Some(selector.to_string());
        self
    }

    pub fn with_status(mut self, status: TxStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_token(mut self, token: TokenDescriptor) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_gas(mut self, gas_used: u64, gas_limit: u64) -> Self {
        self.gas_used = gas_used;
        self.gas_limit = gas_limit;
        self
    }
}

/// A wallet's balance in one token contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub token: TokenDescriptor,
    pub balance: f64,
}

impl TokenHolding {
    pub fn new(token: TokenDescriptor, balance: f64) -> Self {
        Self { token, balance }
    }
}

/// Externally resolved reputation facts about a wallet.
///
/// Looked up by a watchlist/heuristic collaborator before analysis is
/// invoked; both default to `false` when the lookup is unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationSignals {
    pub funded_by_established_wallet: bool,
    pub linked_to_flagged_entity: bool,
}

/// Aggregate statistics derived from a wallet's raw activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletMetadata {
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub age_days: u64,
    /// Always equals `inbound_count + outbound_count`.
    pub total_transactions: usize,
    pub inbound_count: usize,
    pub outbound_count: usize,
    pub unique_tokens_used: usize,
    pub unique_contracts_interacted: usize,
    pub uses_only_transfers: bool,
    pub all_contracts_verified: bool,
    pub funded_by_established_wallet: bool,
    pub linked_to_flagged_entity: bool,
}

/// Qualitative red flags derived from transaction history.
///
/// `transaction_anomalies` holds entries from the fixed vocabulary in
/// [`crate::analysis::patterns`]; new kinds are additive and existing
/// strings are never renamed once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralPatterns {
    pub outbound_only: bool,
    pub single_contract_usage: bool,
    pub unverified_contract_usage: bool,
    pub transaction_anomalies: Vec<String>,
}

/// One scoring rule's outcome: which rule fired, by how much it moved the
/// score, and a reason restating the observed condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdownEntry {
    pub criteria: ScoreCriteria,
    pub delta: f64,
    pub reason: String,
}

/// The immutable result of one analysis run.
///
/// Input transaction and token collections are retained verbatim so the
/// breakdown stays auditable against the data that produced it. A new run
/// produces a new record with a new timestamp; nothing here is updated in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiWalletAnalysis {
    pub wallet_address: String,
    pub network: String,
    pub analysis_timestamp: DateTime<Utc>,
    pub metadata: WalletMetadata,
    pub behavioral_patterns: BehavioralPatterns,
    pub scoring_breakdown: Vec<ScoreBreakdownEntry>,
    pub final_score: f64,
    pub risk_level: RiskLevel,
    pub transactions: Vec<Transaction>,
    pub token_holdings: Vec<TokenHolding>,
    pub comments: Option<String>,
}

impl AiWalletAnalysis {
    /// Attach free-text commentary, consuming the record. Used by callers
    /// annotating a result before persisting it; the analysis content is
    /// unchanged.
    pub fn with_comments(mut self, comments: &str) -> Self {
        self.comments = Some(comments.to_string());
        self
    }
}
