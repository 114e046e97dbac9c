//! Baseline loan scoring model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::LoanRequest;

/// Feature order used by the model, weights, and contribution map.
pub const FEATURE_NAMES: [&str; 5] = [
    "income",
    "credit_score",
    "employment_years",
    "debt_to_income",
    "amount",
];

/// Model verdict on a single application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub approve: bool,
    /// Probability of the predicted class.
    pub confidence: f64,
    /// `[P(reject), P(approve)]`.
    pub probabilities: [f64; 2],
    /// Linear contribution (weight x value) per feature.
    pub contributions: HashMap<String, f64>,
}

/// Logistic scorer over the five application features.
///
/// The default coefficients are the shipped baseline calibration: positive
/// weight on income, credit score, and tenure; negative weight on debt load
/// and requested amount. The model is advisory — rule checks gate every
/// approval downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionModel {
    /// Weights in [`FEATURE_NAMES`] order.
    pub weights: [f64; 5],
    pub bias: f64,
}

impl Default for DecisionModel {
    fn default() -> Self {
        Self {
            weights: [5.0e-5, 8.0e-3, 0.15, -6.0, -2.0e-5],
            bias: -6.0,
        }
    }
}

impl DecisionModel {
    /// Score one application. Pure and deterministic.
    pub fn predict(&self, request: &LoanRequest) -> ModelPrediction {
        let features = [
            request.income,
            request.credit_score as f64,
            request.employment_years,
            request.debt_to_income,
            request.amount,
        ];

        let z: f64 = self.bias
            + self
                .weights
                .iter()
                .zip(features.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p_approve = 1.0 / (1.0 + (-z).exp());

        let approve = p_approve >= 0.5;
        let confidence = if approve { p_approve } else { 1.0 - p_approve };

        let contributions = FEATURE_NAMES
            .iter()
            .zip(features.iter().zip(self.weights.iter()))
            .map(|(name, (x, w))| ((*name).to_string(), w * x))
            .collect();

        ModelPrediction {
            approve,
            confidence,
            probabilities: [1.0 - p_approve, p_approve],
            contributions,
        }
    }
}
