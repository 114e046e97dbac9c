//! Decision assembly — the model verdict behind the hard eligibility gate.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::LoanRequest;
use crate::model::{DecisionModel, ModelPrediction};
use crate::rules;

/// How many findings the customer-facing explanation surfaces.
pub const MAX_EXPLANATION_REASONS: usize = 3;

/// Risk score shown before any application exists.
pub const DEFAULT_RISK_SCORE: i64 = 750;

/// Automated decision outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "APPROVE" => Some(Self::Approve),
            "REJECT" => Some(Self::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full decision with confidence and customer-facing reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDecision {
    pub decision: Decision,
    pub confidence: f64,
    /// Underwriting findings, in check order.
    pub reasons: Vec<String>,
    /// Rejection summary (first few reasons), absent on approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelPrediction>,
}

/// Applies the scoring model behind the rule gate.
///
/// With a model: approve only when the model approves AND the critical
/// eligibility checks pass. When the model rejects an eligible profile
/// that raised no findings, the rule ladder gets the final word — it can
/// still approve, and a ladder reject synthesizes the reasons the model
/// could not give. Without a model, the ladder decides alone.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    model: Option<DecisionModel>,
}

impl DecisionEngine {
    /// Engine with the shipped baseline model.
    pub fn with_baseline_model() -> Self {
        Self {
            model: Some(DecisionModel::default()),
        }
    }

    /// Engine without a model: the rule ladder decides alone.
    pub fn rules_only() -> Self {
        Self { model: None }
    }

    /// Decide an already-validated application.
    pub fn decide(&self, request: &LoanRequest) -> LoanDecision {
        let mut reasons = rules::advisory_reasons(request);
        let eligible = rules::critical_eligibility(request);

        let (decision, confidence, prediction) = match &self.model {
            Some(model) => {
                let prediction = model.predict(request);
                if prediction.approve && eligible {
                    (
                        Decision::Approve,
                        prediction.confidence.min(0.95),
                        Some(prediction),
                    )
                } else {
                    if !eligible {
                        reasons.push("Failed critical eligibility checks".to_string());
                    }
                    if reasons.is_empty() {
                        // Model rejected a clean, eligible profile: the rule
                        // ladder gets the final word and always leaves reasons
                        // behind on a reject.
                        let (approve, confidence) = rules::rule_ladder(request, &mut reasons);
                        let decision = if approve {
                            Decision::Approve
                        } else {
                            Decision::Reject
                        };
                        (decision, confidence, Some(prediction))
                    } else {
                        (Decision::Reject, 1.0 - prediction.confidence, Some(prediction))
                    }
                }
            }
            None => {
                let (approve, confidence) = rules::rule_ladder(request, &mut reasons);
                let decision = if approve {
                    Decision::Approve
                } else {
                    Decision::Reject
                };
                (decision, confidence, None)
            }
        };

        let explanation = explanation(decision, &reasons);
        debug!(
            "Application decided: {} (confidence {:.2})",
            decision, confidence
        );

        LoanDecision {
            decision,
            confidence,
            reasons,
            explanation,
            model: prediction,
        }
    }
}

fn explanation(decision: Decision, reasons: &[String]) -> Option<String> {
    if decision == Decision::Reject && !reasons.is_empty() {
        let shown: Vec<&str> = reasons
            .iter()
            .take(MAX_EXPLANATION_REASONS)
            .map(String::as_str)
            .collect();
        Some(format!("Reasons: {}", shown.join("; ")))
    } else {
        None
    }
}

/// Dashboard risk score: the bureau score adjusted by debt load.
pub fn risk_score(credit_score: i64, debt_to_income: f64) -> i64 {
    if debt_to_income < 0.3 {
        (credit_score + 30).min(850)
    } else if debt_to_income < 0.4 {
        credit_score
    } else {
        (credit_score - 50).max(300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        income: f64,
        credit_score: i64,
        employment_years: f64,
        debt_to_income: f64,
        amount: f64,
    ) -> LoanRequest {
        LoanRequest {
            applicant: "Test Applicant".to_string(),
            amount,
            income,
            credit_score,
            employment_years,
            debt_to_income,
        }
    }

    #[test]
    fn test_model_approval_capped_at_095() {
        let engine = DecisionEngine::with_baseline_model();
        let decision = engine.decide(&request(120_000.0, 800, 10.0, 0.10, 150_000.0));
        assert_eq!(decision.decision, Decision::Approve);
        assert_eq!(decision.confidence, 0.95);
        assert!(decision.explanation.is_none());
        assert!(decision.model.is_some());
    }

    #[test]
    fn test_eligibility_gate_overrides_model_approval() {
        // Strong profile the model approves, but under a year of employment.
        let engine = DecisionEngine::with_baseline_model();
        let decision = engine.decide(&request(100_000.0, 780, 0.5, 0.20, 50_000.0));
        assert_eq!(decision.decision, Decision::Reject);
        assert!(decision
            .reasons
            .iter()
            .any(|r| r == "Failed critical eligibility checks"));
        assert!(decision
            .reasons
            .iter()
            .any(|r| r.starts_with("Insufficient employment history")));
    }

    #[test]
    fn test_model_rejection_keeps_advisory_reasons() {
        let engine = DecisionEngine::with_baseline_model();
        let decision = engine.decide(&request(30_000.0, 600, 1.0, 0.50, 15_000.0));
        assert_eq!(decision.decision, Decision::Reject);
        assert!(decision
            .reasons
            .iter()
            .any(|r| r.starts_with("Debt-to-income ratio too high")));
        let explanation = decision.explanation.unwrap();
        assert!(explanation.starts_with("Reasons: "));
    }

    #[test]
    fn test_explanation_limited_to_three_reasons() {
        // Trips every check: five advisory reasons plus the eligibility one.
        let engine = DecisionEngine::with_baseline_model();
        let decision = engine.decide(&request(20_000.0, 280, 0.5, 0.50, 90_000.0));
        assert_eq!(decision.decision, Decision::Reject);
        assert!(decision.reasons.len() > MAX_EXPLANATION_REASONS);

        let explanation = decision.explanation.unwrap();
        let shown = explanation.trim_start_matches("Reasons: ").split("; ").count();
        assert_eq!(shown, MAX_EXPLANATION_REASONS);
    }

    #[test]
    fn test_ladder_overrides_model_rejection_of_clean_profile() {
        // No advisory findings, eligible, but the model scores it poorly.
        // The strict tier (650 / <0.36 / <=2.5 / 2y / 30k) takes over.
        let engine = DecisionEngine::with_baseline_model();
        let decision = engine.decide(&request(30_000.0, 650, 2.0, 0.35, 75_000.0));
        assert_eq!(decision.decision, Decision::Approve);
        assert_eq!(decision.confidence, 0.85);
        assert!(decision.reasons.is_empty());
        assert!(decision.model.is_some());
    }

    #[test]
    fn test_ladder_reject_of_clean_profile_synthesizes_reasons() {
        // Clean and eligible, model rejects, and no ladder tier fits
        // (loan-to-income 2.8 misses strict and modest alike).
        let engine = DecisionEngine::with_baseline_model();
        let decision = engine.decide(&request(25_000.0, 600, 2.5, 0.30, 70_000.0));
        assert_eq!(decision.decision, Decision::Reject);
        assert_eq!(decision.confidence, 0.70);
        assert!(decision
            .reasons
            .iter()
            .any(|r| r == "Loan amount too high relative to income"));
        assert!(decision.explanation.is_some());
    }

    #[test]
    fn test_rules_only_ladder_approves() {
        let engine = DecisionEngine::rules_only();
        let decision = engine.decide(&request(50_000.0, 700, 3.0, 0.25, 100_000.0));
        assert_eq!(decision.decision, Decision::Approve);
        assert_eq!(decision.confidence, 0.85);
        assert!(decision.model.is_none());
    }

    #[test]
    fn test_rules_only_reject_explains() {
        let engine = DecisionEngine::rules_only();
        let decision = engine.decide(&request(20_000.0, 450, 0.5, 0.45, 80_000.0));
        assert_eq!(decision.decision, Decision::Reject);
        assert_eq!(decision.confidence, 0.70);
        assert!(decision.explanation.is_some());
    }

    #[test]
    fn test_decide_is_deterministic() {
        let engine = DecisionEngine::with_baseline_model();
        let req = request(50_000.0, 680, 3.0, 0.30, 25_000.0);
        let a = engine.decide(&req);
        let b = engine.decide(&req);
        assert_eq!(a.decision, b.decision);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.reasons, b.reasons);
    }

    #[test]
    fn test_risk_score_adjustments() {
        assert_eq!(risk_score(700, 0.25), 730);
        assert_eq!(risk_score(840, 0.10), 850); // capped
        assert_eq!(risk_score(700, 0.30), 700); // boundary: second band
        assert_eq!(risk_score(700, 0.39), 700);
        assert_eq!(risk_score(700, 0.40), 650);
        assert_eq!(risk_score(320, 0.55), 300); // floored
    }

    #[test]
    fn test_decision_round_trips_as_text() {
        assert_eq!(Decision::parse("APPROVE"), Some(Decision::Approve));
        assert_eq!(Decision::parse(Decision::Reject.as_str()), Some(Decision::Reject));
        assert_eq!(Decision::parse("MAYBE"), None);
    }
}
