//! Loan terms supplied to the amortization engine

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CalcError, CalcResult};

/// Fixed-rate loan terms for a single schedule request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: f64,

    /// Number of monthly payments
    pub term_months: i32,

    /// Nominal annual interest rate as a decimal (0.05 = 5%)
    pub annual_rate: f64,
}

impl LoanInput {
    pub fn new(principal: f64, term_months: i32, annual_rate: f64) -> Self {
        Self {
            principal,
            term_months,
            annual_rate,
        }
    }

    /// Periodic (monthly) rate
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    /// Check sign and positivity preconditions
    pub fn validate(&self) -> CalcResult<()> {
        ensure_finite("annual_rate", self.annual_rate)?;
        ensure_finite("principal", self.principal)?;

        if self.annual_rate < 0.0 {
            return Err(CalcError::invalid("annual_rate", "cannot be negative"));
        }
        if self.principal < 0.0 {
            return Err(CalcError::invalid("principal", "cannot be negative"));
        }
        if self.term_months <= 0 {
            return Err(CalcError::invalid("term_months", "must be positive"));
        }

        Ok(())
    }
}
