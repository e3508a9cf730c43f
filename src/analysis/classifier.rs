//! Risk-level classification.

use serde::{Deserialize, Serialize};

/// Discrete risk classification derived from the final score.
///
/// Serialized as the literal strings `"Low"`, `"Medium"`, `"High"`; these
/// are part of the persisted-record contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a final score on the 0-100 scale to a risk level.
    ///
    /// Boundary values belong to the lower-risk side: 70 is Low, 40 is
    /// Medium. The three ranges partition [0, 100] exactly.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::Low
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{}", label)
    }
}

/// Classification stage of the analysis pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn classify(&self, final_score: f64) -> RiskLevel {
        RiskLevel::from_score(final_score)
    }
}
