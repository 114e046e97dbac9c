//! Row types for applications, reviews, and correction requests.

use serde::{Deserialize, Serialize};

use trustbank_lending::Decision;

/// Outcome of a human governance review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    /// The automated decision stands.
    Approved,
    /// A human overturned the automated decision.
    Overridden,
    /// More information was requested from the customer.
    InfoRequested,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Overridden => "overridden",
            Self::InfoRequested => "info_requested",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(Self::Approved),
            "overridden" => Some(Self::Overridden),
            "info_requested" => Some(Self::InfoRequested),
            _ => None,
        }
    }
}

/// An application row from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i64,
    pub applicant: String,
    pub amount: f64,
    pub income: f64,
    pub credit_score: i64,
    pub employment_years: f64,
    pub debt_to_income: f64,
    pub decision: Decision,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_outcome: Option<ReviewOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
    pub submitted_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<i64>,
}

/// Lifecycle of a profile correction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionStatus {
    Pending,
    Resolved,
}

impl CorrectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

/// A profile correction ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub id: String,
    pub field: String,
    pub requested_by: String,
    pub status: CorrectionStatus,
    pub submitted_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<i64>,
}

/// Store-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_applications: i64,
    pub approved: i64,
    pub rejected: i64,
    pub pending_reviews: i64,
    pub pending_corrections: i64,
    pub db_path: String,
    pub db_size_mb: f64,
}
