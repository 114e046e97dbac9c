//! Impact evaluation — how the current opt-outs affect decision accuracy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::settings::{ConsentCategory, ConsentSettings};

/// Expected decision-accuracy tier for a given consent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactTier {
    /// All five categories enabled.
    Full,
    /// Three or four categories enabled.
    Reduced,
    /// Two or fewer categories enabled.
    Degraded,
}

impl fmt::Display for ImpactTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Reduced => write!(f, "reduced"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// Result of evaluating the current consent state.
///
/// Carries only the classification and the customer-facing message;
/// rendering (CSS class, DOM text) is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentImpact {
    pub tier: ImpactTier,
    #[serde(rename = "enabledCount")]
    pub enabled_count: usize,
    pub message: String,
}

impl ConsentSettings {
    /// Classify the current consent state.
    ///
    /// Pure function of the settings value: identical settings always
    /// produce an identical impact, and evaluation has no side effects.
    pub fn impact(&self) -> ConsentImpact {
        let enabled = self.enabled_count();
        let total = ConsentCategory::all().len();

        let (tier, message) = if enabled == total {
            (
                ImpactTier::Full,
                "All data categories enabled. AI will have maximum accuracy in decisions."
                    .to_string(),
            )
        } else if enabled >= 3 {
            (
                ImpactTier::Reduced,
                format!(
                    "{} categories disabled. AI accuracy may be slightly reduced.",
                    total - enabled
                ),
            )
        } else {
            (
                ImpactTier::Degraded,
                format!(
                    "Only {enabled} categories enabled. AI decisions may be significantly less accurate."
                ),
            )
        };

        ConsentImpact {
            tier,
            enabled_count: enabled,
            message,
        }
    }
}
