//! Loan decisioning — intake validation, rule checks, baseline model scoring.

pub mod application;
pub mod engine;
pub mod model;
pub mod rules;

pub use application::{LoanRequest, MIN_LOAN_AMOUNT};
pub use engine::{risk_score, Decision, DecisionEngine, LoanDecision, DEFAULT_RISK_SCORE};
pub use model::{DecisionModel, ModelPrediction};
