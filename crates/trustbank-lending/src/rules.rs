//! Underwriting rule checks and the fallback approval ladder.

use trustbank_core::format::format_currency;

use crate::application::LoanRequest;

/// Advisory findings for the five underwriting checks, in check order.
///
/// These accumulate regardless of the final decision; rejection surfaces
/// the first few of them to the customer.
pub fn advisory_reasons(request: &LoanRequest) -> Vec<String> {
    let mut reasons = Vec::new();

    if request.credit_score < 300 {
        reasons.push(format!(
            "Credit score too low ({}). Minimum required: 300",
            request.credit_score
        ));
    } else if request.credit_score < 500 {
        reasons.push(format!(
            "Credit score is borderline ({}). Recommended: 500+",
            request.credit_score
        ));
    }

    if request.debt_to_income >= 0.43 {
        reasons.push(format!(
            "Debt-to-income ratio too high ({:.1}%). Maximum allowed: 43%",
            request.debt_to_income * 100.0
        ));
    } else if request.debt_to_income >= 0.36 {
        reasons.push(format!(
            "Debt-to-income ratio is high ({:.1}%). Recommended: below 36%",
            request.debt_to_income * 100.0
        ));
    }

    if request.loan_to_income() > 3.0 {
        reasons.push(format!(
            "Loan amount too high relative to income ({} vs {} annual income)",
            format_currency(request.amount),
            format_currency(request.income)
        ));
    }

    if request.employment_years < 1.0 {
        reasons.push(format!(
            "Insufficient employment history ({} years). Minimum: 1 year",
            request.employment_years
        ));
    } else if request.employment_years < 2.0 {
        reasons.push(format!(
            "Limited employment history ({} years). Recommended: 2+ years",
            request.employment_years
        ));
    }

    if request.income < 25_000.0 {
        reasons.push(format!(
            "Income too low ({}). Minimum required: \u{20b9}25,000",
            format_currency(request.income)
        ));
    }

    reasons
}

/// Hard eligibility gate: every automated approval must pass all five.
pub fn critical_eligibility(request: &LoanRequest) -> bool {
    request.credit_score >= 300
        && request.debt_to_income < 0.43
        && request.loan_to_income() <= 3.0
        && request.employment_years >= 1.0
        && request.income >= 25_000.0
}

/// Fallback approval ladder used when no model verdict is available.
///
/// Three approval tiers (strict, standard, modest), otherwise a reject that
/// synthesizes its own reasons. Returns `(approve, confidence)`.
pub fn rule_ladder(request: &LoanRequest, reasons: &mut Vec<String>) -> (bool, f64) {
    let lti = request.loan_to_income();

    if request.credit_score >= 650
        && request.debt_to_income < 0.36
        && lti <= 2.5
        && request.employment_years >= 2.0
        && request.income >= 30_000.0
    {
        (true, 0.85)
    } else if request.credit_score >= 700
        && request.debt_to_income < 0.30
        && lti <= 3.0
        && request.employment_years >= 1.0
        && request.income >= 25_000.0
    {
        (true, 0.80)
    } else if request.credit_score >= 300
        && request.debt_to_income < 0.40
        && lti <= 2.0
        && request.employment_years >= 1.0
        && request.income >= 25_000.0
    {
        (true, 0.75)
    } else {
        if request.credit_score < 500 {
            reasons.push(format!(
                "Credit score {} below minimum threshold (500)",
                request.credit_score
            ));
        }
        if request.debt_to_income >= 0.36 {
            reasons.push(format!(
                "Debt-to-income ratio {:.1}% too high (max 36%)",
                request.debt_to_income * 100.0
            ));
        }
        if lti > 2.5 {
            reasons.push("Loan amount too high relative to income".to_string());
        }
        if request.employment_years < 2.0 {
            reasons.push(format!(
                "Employment history too short ({} years)",
                request.employment_years
            ));
        }
        if request.income < 30_000.0 {
            reasons.push(format!("Income too low ({})", format_currency(request.income)));
        }
        (false, 0.70)
    }
}
