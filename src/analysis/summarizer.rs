//! Aggregate metadata derived from raw wallet activity.

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::analysis::types::{ReputationSignals, TokenHolding, Transaction, WalletMetadata};

const SECONDS_PER_DAY: i64 = 86_400;

/// Derives [`WalletMetadata`] from raw transaction and token-holding lists.
///
/// Pure and deterministic: the same inputs always produce the same metadata.
/// Address comparisons are case-insensitive since EVM addresses arrive in
/// mixed EIP-55 casing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalletMetadataSummarizer;

impl WalletMetadataSummarizer {
    /// Summarize a wallet's activity.
    ///
    /// `now` is the orchestration clock value, used only as the
    /// first/last-seen sentinel when the wallet has no transactions.
    /// Reputation signals are passed through untouched; they are resolved
    /// by an external collaborator, not computed here.
    pub fn summarize(
        &self,
        wallet_address: &str,
        transactions: &[Transaction],
        tokens: &[TokenHolding],
        signals: ReputationSignals,
        now: DateTime<Utc>,
    ) -> WalletMetadata {
        let wallet = wallet_address.to_ascii_lowercase();

        // Explorers promise chronological order; do not rely on it.
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|tx| tx.timestamp);

        let (first_seen, last_seen) = match (ordered.first(), ordered.last()) {
            (Some(first), Some(last)) => (first.timestamp, last.timestamp),
            _ => (now, now),
        };
        let age_days = ((last_seen - first_seen).num_seconds().max(0) / SECONDS_PER_DAY) as u64;

        let mut inbound_count = 0;
        let mut outbound_count = 0;
        for tx in &ordered {
            let from = tx.from_address.to_ascii_lowercase();
            let to = tx.to_address.to_ascii_lowercase();
            if from == wallet {
                // Self-transfers count as outbound only.
                outbound_count += 1;
            } else if to == wallet {
                inbound_count += 1;
            }
        }

        let unique_tokens_used = ordered
            .iter()
            .filter_map(|tx| tx.token.as_ref())
            .map(|token| token.address.to_ascii_lowercase())
            .chain(tokens.iter().map(|holding| holding.token.address.to_ascii_lowercase()))
            .unique()
            .count();

        let unique_contracts_interacted = ordered
            .iter()
            .filter(|tx| tx.to_is_contract)
            .map(|tx| tx.to_address.to_ascii_lowercase())
            .unique()
            .count();

        let uses_only_transfers = ordered.iter().all(|tx| tx.method_selector.is_none());
        let all_contracts_verified = ordered
            .iter()
            .filter(|tx| tx.to_is_contract)
            .all(|tx| tx.to_is_verified);

        WalletMetadata {
            first_seen,
            last_seen,
            age_days,
            total_transactions: inbound_count + outbound_count,
            inbound_count,
            outbound_count,
            unique_tokens_used,
            unique_contracts_interacted,
            uses_only_transfers,
            all_contracts_verified,
            funded_by_established_wallet: signals.funded_by_established_wallet,
            linked_to_flagged_entity: signals.linked_to_flagged_entity,
        }
    }
}
