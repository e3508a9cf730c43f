//! Behavioral red-flag detection over transaction history.

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::analysis::types::{BehavioralPatterns, Transaction, TxStatus, WalletMetadata};

/// Anomaly vocabulary. Consumers match on these literal strings, so entries
/// are additive only and never renamed once published.
pub const ANOMALY_HIGH_FAILURE_RATE: &str = "High rate of failed transactions";
pub const ANOMALY_RAPID_BURSTS: &str = "Abnormally rapid transaction bursts";
pub const ANOMALY_VALUE_OUTLIER: &str = "Transaction value outlier detected";

const FAILURE_RATE_THRESHOLD: f64 = 0.3;
const FAILURE_RATE_MIN_SAMPLE: usize = 5;
const BURST_WINDOW_SECS: i64 = 60;
const BURST_TX_COUNT: usize = 5;
const OUTLIER_MULTIPLIER: f64 = 10.0;
const OUTLIER_MIN_SAMPLE: usize = 5;

/// Scans transaction history for qualitative red flags.
///
/// The anomaly checks are independent and evaluated in a fixed priority
/// order, so the output list is deterministic for identical input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BehaviorPatternDetector;

impl BehaviorPatternDetector {
    pub fn detect(
        &self,
        transactions: &[Transaction],
        metadata: &WalletMetadata,
    ) -> BehavioralPatterns {
        let mut anomalies = Vec::new();
        if Self::has_high_failure_rate(transactions) {
            anomalies.push(ANOMALY_HIGH_FAILURE_RATE.to_string());
        }
        if Self::has_burst_activity(transactions) {
            anomalies.push(ANOMALY_RAPID_BURSTS.to_string());
        }
        if Self::has_value_outlier(transactions) {
            anomalies.push(ANOMALY_VALUE_OUTLIER.to_string());
        }

        BehavioralPatterns {
            outbound_only: metadata.inbound_count == 0 && metadata.outbound_count > 0,
            single_contract_usage: metadata.unique_contracts_interacted == 1,
            unverified_contract_usage: transactions
                .iter()
                .any(|tx| tx.to_is_contract && !tx.to_is_verified),
            transaction_anomalies: anomalies,
        }
    }

    /// More than 30% of at least 5 transactions failed.
    fn has_high_failure_rate(transactions: &[Transaction]) -> bool {
        let total = transactions.len();
        if total < FAILURE_RATE_MIN_SAMPLE {
            return false;
        }
        let failed = transactions
            .iter()
            .filter(|tx| tx.status == TxStatus::Failed)
            .count();
        failed as f64 / total as f64 > FAILURE_RATE_THRESHOLD
    }

    /// At least 5 transactions inside any 60-second window.
    fn has_burst_activity(transactions: &[Transaction]) -> bool {
        if transactions.len() < BURST_TX_COUNT {
            return false;
        }
        let timestamps: Vec<DateTime<Utc>> =
            transactions.iter().map(|tx| tx.timestamp).sorted().collect();
        timestamps
            .windows(BURST_TX_COUNT)
            .any(|window| (window[BURST_TX_COUNT - 1] - window[0]).num_seconds() <= BURST_WINDOW_SECS)
    }

    /// Largest value exceeds 10x the median of at least 5 non-zero values.
    fn has_value_outlier(transactions: &[Transaction]) -> bool {
        let mut values: Vec<f64> = transactions
            .iter()
            .map(|tx| tx.value)
            .filter(|value| *value > 0.0)
            .collect();
        if values.len() < OUTLIER_MIN_SAMPLE {
            return false;
        }
        values.sort_by(f64::total_cmp);
        let mid = values.len() / 2;
        let median = if values.len() % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };
        values[values.len() - 1] > OUTLIER_MULTIPLIER * median
    }
}
