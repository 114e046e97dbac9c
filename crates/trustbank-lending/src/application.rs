//! Loan application intake.

use serde::{Deserialize, Serialize};

use trustbank_core::format::format_currency;
use trustbank_core::{Error, Result};

/// Smallest loan the bank will consider.
pub const MIN_LOAN_AMOUNT: f64 = 1_000.0;

/// A loan application as submitted by the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Applicant display name.
    pub applicant: String,
    /// Requested loan amount.
    pub amount: f64,
    /// Annual income.
    pub income: f64,
    /// Credit bureau score.
    pub credit_score: i64,
    /// Years in current employment.
    pub employment_years: f64,
    /// Debt-to-income ratio (0.36 = 36%).
    pub debt_to_income: f64,
}

impl LoanRequest {
    /// Validate the raw submission before decisioning.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite()
            || !self.income.is_finite()
            || !self.employment_years.is_finite()
            || !self.debt_to_income.is_finite()
        {
            return Err(Error::Validation(
                "Application figures must be finite numbers".to_string(),
            ));
        }
        if self.amount < MIN_LOAN_AMOUNT {
            return Err(Error::Validation(format!(
                "Minimum loan amount is {}",
                format_currency(MIN_LOAN_AMOUNT)
            )));
        }
        if self.income <= 0.0 {
            return Err(Error::Validation(
                "Annual income must be positive".to_string(),
            ));
        }
        if self.employment_years < 0.0 {
            return Err(Error::Validation(
                "Employment years cannot be negative".to_string(),
            ));
        }
        if self.debt_to_income < 0.0 {
            return Err(Error::Validation(
                "Debt-to-income ratio cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Loan amount relative to annual income.
    pub fn loan_to_income(&self) -> f64 {
        if self.income > 0.0 {
            self.amount / self.income
        } else {
            f64::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LoanRequest {
        LoanRequest {
            applicant: "John Smith".to_string(),
            amount: 25_000.0,
            income: 50_000.0,
            credit_score: 680,
            employment_years: 3.0,
            debt_to_income: 0.30,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_minimum_amount_enforced() {
        let mut req = request();
        req.amount = 999.0;
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("Minimum loan amount"));
    }

    #[test]
    fn test_non_finite_figures_rejected() {
        let mut req = request();
        req.debt_to_income = f64::NAN;
        assert!(req.validate().is_err());

        let mut req = request();
        req.income = f64::INFINITY;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_loan_to_income() {
        let req = request();
        assert!((req.loan_to_income() - 0.5).abs() < 1e-9);
    }
}
