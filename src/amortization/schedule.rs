//! Schedule output structures for amortization runs

use serde::{Deserialize, Serialize};

use super::loan::LoanInput;

/// A single row of the amortization table for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Payment number (1-indexed)
    pub period: u32,

    // Balances
    pub beginning_balance: f64,
    pub ending_balance: f64,

    // Payment split
    pub payment: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
}

/// Complete amortization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Loan terms the schedule was built from
    pub loan: LoanInput,

    /// Level monthly payment
    pub payment: f64,

    /// Monthly rows in period order
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn new(loan: LoanInput, payment: f64) -> Self {
        Self {
            loan,
            payment,
            rows: Vec::with_capacity(loan.term_months.max(0) as usize),
        }
    }

    /// Add a schedule row
    pub fn add_row(&mut self, row: AmortizationRow) {
        self.rows.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_paid: f64 = self.rows.iter().map(|r| r.payment).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest_paid).sum();
        let total_principal: f64 = self.rows.iter().map(|r| r.principal_paid).sum();

        let final_balance = self.rows.last().map(|r| r.ending_balance).unwrap_or(self.loan.principal);

        ScheduleSummary {
            total_months: self.rows.len() as u32,
            monthly_payment: self.payment,
            total_paid,
            total_interest,
            total_principal,
            final_balance,
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: f64,
}
