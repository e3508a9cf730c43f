//! Property tests for the documented scoring invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use wallet_risk_engine::analysis::{
    BehavioralPatterns, ReputationSignals, RiskLevel, ScoringEngine, Transaction, WalletMetadata,
    WalletMetadataSummarizer,
};

const WALLET: &str = "0x1111111111111111111111111111111111111111";
const OTHER: &str = "0x2222222222222222222222222222222222222222";

const ANOMALIES: [&str; 3] = [
    "High rate of failed transactions",
    "Abnormally rapid transaction bursts",
    "Transaction value outlier detected",
];

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn metadata_strategy() -> impl Strategy<Value = WalletMetadata> {
    (
        0u64..4000,
        0usize..200,
        0usize..200,
        0usize..20,
        0usize..20,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(
                age_days,
                inbound_count,
                outbound_count,
                unique_tokens_used,
                unique_contracts_interacted,
                uses_only_transfers,
                all_contracts_verified,
                funded_by_established_wallet,
                linked_to_flagged_entity,
            )| WalletMetadata {
                first_seen: base_time(),
                last_seen: base_time() + Duration::days(age_days as i64),
                age_days,
                total_transactions: inbound_count + outbound_count,
                inbound_count,
                outbound_count,
                unique_tokens_used,
                unique_contracts_interacted,
                uses_only_transfers,
                all_contracts_verified,
                funded_by_established_wallet,
                linked_to_flagged_entity,
            },
        )
}

fn behavior_strategy() -> impl Strategy<Value = BehavioralPatterns> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        proptest::collection::vec(proptest::sample::select(ANOMALIES.to_vec()), 0..3),
    )
        .prop_map(|(outbound_only, single, unverified, anomalies)| BehavioralPatterns {
            outbound_only,
            single_contract_usage: single,
            unverified_contract_usage: unverified,
            transaction_anomalies: anomalies.into_iter().map(str::to_string).collect(),
        })
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (0u8..3, 0i64..1_000_000, 0.0f64..100.0).prop_map(|(direction, offset, value)| {
        let (from, to) = match direction {
            0 => (OTHER, WALLET),
            1 => (WALLET, OTHER),
            // Self-transfer: must count as outbound only.
            _ => (WALLET, WALLET),
        };
        Transaction::transfer(
            &format!("0x{offset:x}{direction}"),
            base_time() + Duration::seconds(offset),
            from,
            to,
            value,
        )
    })
}

proptest! {
    // Clamp invariant: the final score never leaves [0, 100], even when the
    // raw delta sum is far outside the scale.
    #[test]
    fn prop_final_score_is_always_clamped(
        metadata in metadata_strategy(),
        behavior in behavior_strategy(),
    ) {
        let engine = ScoringEngine::default();
        let entries = engine.score(&metadata, &behavior);
        let score = engine.final_score(&entries);
        prop_assert!((0.0..=100.0).contains(&score), "score {score} out of range");
    }

    // Each rule fires at most once per analysis; anomalies account for any
    // surplus entries.
    #[test]
    fn prop_rules_fire_at_most_once(
        metadata in metadata_strategy(),
        behavior in behavior_strategy(),
    ) {
        let engine = ScoringEngine::default();
        let entries = engine.score(&metadata, &behavior);
        let anomaly_count = behavior.transaction_anomalies.len();
        let mut seen = std::collections::HashMap::new();
        for entry in &entries {
            *seen.entry(entry.criteria).or_insert(0usize) += 1;
        }
        for (criteria, count) in seen {
            let limit = if criteria == wallet_risk_engine::analysis::ScoreCriteria::AnomalyPenalty {
                anomaly_count
            } else {
                1
            };
            prop_assert!(count <= limit, "{criteria} fired {count} times");
        }
    }

    // Risk classification is total over the score range and never skips a
    // band: higher scores never classify as higher risk.
    #[test]
    fn prop_classifier_is_total_and_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        fn rank(level: RiskLevel) -> u8 {
            match level {
                RiskLevel::Low => 0,
                RiskLevel::Medium => 1,
                RiskLevel::High => 2,
            }
        }
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(RiskLevel::from_score(high)) <= rank(RiskLevel::from_score(low)));
    }

    // Derived metadata always satisfies total == inbound + outbound,
    // whatever mix of directions and self-transfers arrives.
    #[test]
    fn prop_transaction_counts_are_consistent(
        txs in proptest::collection::vec(transaction_strategy(), 0..60),
    ) {
        let metadata = WalletMetadataSummarizer.summarize(
            WALLET,
            &txs,
            &[],
            ReputationSignals::default(),
            base_time(),
        );
        prop_assert_eq!(
            metadata.total_transactions,
            metadata.inbound_count + metadata.outbound_count
        );
        prop_assert!(metadata.total_transactions <= txs.len());
    }

    // Holding everything else fixed, a wallet never scores lower for being
    // older.
    #[test]
    fn prop_score_is_monotonic_in_age(
        metadata in metadata_strategy(),
        behavior in behavior_strategy(),
        younger in 0u64..4000,
        older in 0u64..4000,
    ) {
        prop_assume!(younger <= older);
        let engine = ScoringEngine::default();
        let mut young_meta = metadata.clone();
        young_meta.age_days = younger;
        let mut old_meta = metadata;
        old_meta.age_days = older;
        let young_score = engine.final_score(&engine.score(&young_meta, &behavior));
        let old_score = engine.final_score(&engine.score(&old_meta, &behavior));
        prop_assert!(old_score >= young_score);
    }

    // Permuting independent rule entries never changes the final sum; only
    // the documented breakdown order is fixed.
    #[test]
    fn prop_final_score_is_permutation_invariant(
        metadata in metadata_strategy(),
        behavior in behavior_strategy(),
        seed in any::<u64>(),
    ) {
        let engine = ScoringEngine::default();
        let entries = engine.score(&metadata, &behavior);
        let expected = engine.final_score(&entries);

        // Deterministic Fisher-Yates driven by the seed.
        let mut shuffled = entries;
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }
        prop_assert_eq!(engine.final_score(&shuffled), expected);
    }
}

#[test]
fn test_age_five_to_two_hundred_never_decreases_score() {
    let engine = ScoringEngine::default();
    let behavior = BehavioralPatterns {
        outbound_only: false,
        single_contract_usage: false,
        unverified_contract_usage: false,
        transaction_anomalies: Vec::new(),
    };
    let mut metadata = WalletMetadata {
        first_seen: base_time(),
        last_seen: base_time(),
        age_days: 0,
        total_transactions: 10,
        inbound_count: 5,
        outbound_count: 5,
        unique_tokens_used: 0,
        unique_contracts_interacted: 0,
        uses_only_transfers: true,
        all_contracts_verified: true,
        funded_by_established_wallet: false,
        linked_to_flagged_entity: false,
    };
    let mut previous = f64::MIN;
    for age in 5..=200 {
        metadata.age_days = age;
        let score = engine.final_score(&engine.score(&metadata, &behavior));
        assert!(score >= previous, "score dropped from {previous} to {score} at age {age}");
        previous = score;
    }
}
