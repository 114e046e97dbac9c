//! API shape tests — validates that the JSON surface matches what the
//! server-rendered pages and their scripts expect.
//!
//! These tests serialize the real domain types (no HTTP server needed) to
//! verify response field names and types.

use trustbank_consent::{ConsentCategory, ConsentSettings};
use trustbank_lending::{DecisionEngine, LoanRequest};

fn sample_request() -> LoanRequest {
    LoanRequest {
        applicant: "John Smith".to_string(),
        amount: 50_000.0,
        income: 60_000.0,
        credit_score: 700,
        employment_years: 3.0,
        debt_to_income: 0.25,
    }
}

/// Consent settings serialize as exactly the five lowercase category
/// booleans the consent page checkboxes bind to.
#[test]
fn test_consent_settings_shape() {
    let json = serde_json::to_value(ConsentSettings::default()).unwrap();

    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 5);
    for key in ["income", "location", "demographics", "spending", "credit"] {
        assert!(json[key].is_boolean(), "missing category {key}");
    }
}

/// Impact responses carry { tier, enabledCount, message } for the
/// consent-impact banner.
#[test]
fn test_consent_impact_shape() {
    let mut settings = ConsentSettings::default();
    settings.set(ConsentCategory::Credit, false);

    let json = serde_json::to_value(settings.impact()).unwrap();
    assert_eq!(json["tier"], "reduced");
    assert!(json["enabledCount"].is_number());
    assert!(json["message"].is_string());
}

/// Decision responses expose decision/confidence/reasons plus the model
/// breakdown used by the explanation page.
#[test]
fn test_loan_decision_shape() {
    let decision = DecisionEngine::with_baseline_model().decide(&sample_request());
    let json = serde_json::to_value(&decision).unwrap();

    assert!(json["decision"].is_string());
    assert!(json["confidence"].is_number());
    assert!(json["reasons"].is_array());
    assert!(json["model"]["probabilities"].is_array());
    assert!(json["model"]["contributions"].is_object());
    assert!(json["model"]["contributions"]["credit_score"].is_number());
}

/// Rejections carry the customer-facing explanation string.
#[test]
fn test_rejection_explanation_shape() {
    let mut request = sample_request();
    request.credit_score = 280;
    request.debt_to_income = 0.50;
    request.employment_years = 0.5;

    let decision = DecisionEngine::with_baseline_model().decide(&request);
    let json = serde_json::to_value(&decision).unwrap();

    assert_eq!(json["decision"], "REJECT");
    assert!(json["explanation"].as_str().unwrap().starts_with("Reasons: "));
}

/// The decision enum serializes in the uppercase form stored and displayed
/// everywhere ("APPROVE"/"REJECT").
#[test]
fn test_decision_serializes_uppercase() {
    let decision = DecisionEngine::rules_only().decide(&sample_request());
    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["decision"], "APPROVE");
}

/// Dashboard payload shape: risk score, credit line text, consent banner.
#[test]
fn test_dashboard_response_shape() {
    let response = serde_json::json!({
        "riskScore": 730,
        "latestLoan": {
            "id": 1,
            "applicant": "John Smith",
            "amount": 50000.0,
            "decision": "APPROVE",
            "confidence": 0.85,
            "submitted_at": 1754000000000i64,
        },
        "creditLine": "\u{20b9}50,000 Credit Line",
        "avatar": "JS",
        "monthlySpending": 3240.0,
        "consentImpact": {
            "tier": "full",
            "enabledCount": 5,
            "message": "All data categories enabled. AI will have maximum accuracy in decisions.",
        },
    });

    assert!(response["riskScore"].is_number());
    assert!(response["latestLoan"].is_object());
    assert!(response["creditLine"].is_string());
    assert!(response["monthlySpending"].is_number());
    assert!(response["consentImpact"]["tier"].is_string());
    assert!(response["consentImpact"]["message"].is_string());
}

/// Pending-review listing shape used by the governance table.
#[test]
fn test_pending_reviews_shape() {
    let response = serde_json::json!({
        "cases": [
            {
                "id": 8492,
                "applicant": "John Smith",
                "amount": 50000.0,
                "decision": "REJECT",
                "confidence": 0.70,
                "explanation": "Reasons: Credit score 450 below minimum threshold (500)",
                "submitted_at": 1754000000000i64,
            }
        ],
        "total": 1,
    });

    assert!(response["cases"].is_array());
    assert!(response["total"].is_number());

    let case = &response["cases"][0];
    assert!(case["id"].is_number());
    assert!(case["applicant"].is_string());
    assert!(case["decision"].is_string());
}

/// Correction ticket shape used by the profile page.
#[test]
fn test_correction_request_shape() {
    let response = serde_json::json!({
        "request": {
            "id": "4b4d9c8e-0000-0000-0000-000000000000",
            "field": "employment_years",
            "requested_by": "John Smith",
            "status": "pending",
            "submitted_at": 1754000000000i64,
        },
        "message": "Correction request submitted for employment_years. Our team will review within 2 business days.",
    });

    assert!(response["request"]["id"].is_string());
    assert!(response["request"]["status"].is_string());
    assert!(response["message"].is_string());
}

/// Error bodies are `{ "error": ... }` everywhere.
#[test]
fn test_error_body_shape() {
    let err = "biometrics".parse::<ConsentCategory>().unwrap_err();
    let body = serde_json::json!({ "error": err.to_string() });
    assert_eq!(
        body["error"],
        "Unknown consent category: biometrics"
    );
}
