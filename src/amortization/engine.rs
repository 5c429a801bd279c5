//! Core amortization engine for level-payment, fixed-rate loans

use log::{debug, trace};

use crate::error::{CalcError, CalcResult};
use super::loan::LoanInput;
use super::schedule::{AmortizationRow, AmortizationSchedule};

/// Level payment from the annuity formula
///
/// `payment = P * i / (1 - (1 + i)^-n)`
///
/// Returns `DegenerateInput` when the denominator is zero, which is always the
/// case for a zero-interest loan, or when the result is not finite.
pub fn level_payment(principal: f64, monthly_rate: f64, term_months: i32) -> CalcResult<f64> {
    let denominator = 1.0 - (1.0 + monthly_rate).powf(-(term_months as f64));
    if denominator == 0.0 {
        return Err(CalcError::degenerate(format!(
            "payment denominator 1 - (1 + {})^-{} is zero",
            monthly_rate, term_months
        )));
    }

    let payment = (principal * monthly_rate) / denominator;
    if !payment.is_finite() {
        return Err(CalcError::degenerate(format!(
            "payment evaluated to {} for monthly rate {} over {} months",
            payment, monthly_rate, term_months
        )));
    }

    Ok(payment)
}

/// Compute the full amortization table for the given loan terms
pub fn compute_schedule(principal: f64, term_months: i32, annual_rate: f64) -> CalcResult<Vec<AmortizationRow>> {
    let loan = LoanInput::new(principal, term_months, annual_rate);
    AmortizationEngine::new().schedule(&loan).map(|s| s.rows)
}

/// Running balance while stepping through the schedule
#[derive(Debug, Clone, Copy)]
struct BalanceState {
    period: u32,
    remaining_balance: f64,
}

/// Stateless amortization engine
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationEngine;

impl AmortizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build the schedule for a single loan
    ///
    /// Inputs are validated and the payment derived before any row is produced,
    /// so a failure never leaves a partial schedule behind.
    pub fn schedule(&self, loan: &LoanInput) -> CalcResult<AmortizationSchedule> {
        loan.validate()?;

        let monthly_rate = loan.monthly_rate();
        let payment = level_payment(loan.principal, monthly_rate, loan.term_months)?;
        debug!(
            "Amortizing {:.2} over {} months at {} monthly: payment {:.6}",
            loan.principal, loan.term_months, monthly_rate, payment
        );

        let mut schedule = AmortizationSchedule::new(*loan, payment);
        let mut state = BalanceState {
            period: 0,
            remaining_balance: loan.principal,
        };

        for _ in 0..loan.term_months {
            let row = self.calculate_period(&mut state, monthly_rate, payment);
            trace!("Period {}: ending balance {:.6}", row.period, row.ending_balance);
            schedule.add_row(row);
        }

        Ok(schedule)
    }

    /// Apply one month's payment to the running balance
    fn calculate_period(&self, state: &mut BalanceState, monthly_rate: f64, payment: f64) -> AmortizationRow {
        state.period += 1;

        let interest_paid = monthly_rate * state.remaining_balance;
        let principal_paid = payment - interest_paid;
        state.remaining_balance -= principal_paid;

        AmortizationRow {
            period: state.period,
            // Reconstructed after the deduction so the figure matches the printed table
            beginning_balance: state.remaining_balance + principal_paid,
            ending_balance: state.remaining_balance,
            payment,
            interest_paid,
            principal_paid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_reference_loan() {
        // 12% annual over a year: 1% monthly
        let rows = compute_schedule(1200.0, 12, 0.12).unwrap();
        assert_eq!(rows.len(), 12);

        let first = &rows[0];
        assert_eq!(first.period, 1);
        assert_abs_diff_eq!(first.payment, 106.6185, epsilon = 1e-4);
        assert_abs_diff_eq!(first.interest_paid, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(first.principal_paid, 94.6185, epsilon = 1e-4);
        assert_abs_diff_eq!(first.beginning_balance, 1200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_schedule_invariants() {
        for &(principal, months, rate) in &[
            (250_000.0, 360, 0.065),
            (1200.0, 12, 0.12),
            (50_000.0, 60, 0.0399),
            (10.0, 1, 0.2),
        ] {
            let rows = compute_schedule(principal, months, rate).unwrap();
            assert_eq!(rows.len(), months as usize);

            for pair in rows.windows(2) {
                assert_abs_diff_eq!(pair[0].ending_balance, pair[1].beginning_balance, epsilon = 1e-9 * principal);
                assert_eq!(pair[0].period + 1, pair[1].period);
            }
            for row in &rows {
                assert_relative_eq!(row.principal_paid + row.interest_paid, row.payment, max_relative = 1e-12);
            }

            let final_balance = rows.last().unwrap().ending_balance;
            assert!(
                final_balance.abs() <= 1e-6 * principal,
                "final balance {} for {} over {} at {}",
                final_balance, principal, months, rate
            );
        }
    }

    #[test]
    fn test_zero_principal() {
        let rows = compute_schedule(0.0, 6, 0.05).unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.payment == 0.0 && r.ending_balance == 0.0));
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = compute_schedule(-1.0, 12, 0.05).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { field: "principal", .. }));
    }

    #[test]
    fn test_invalid_rate_and_term_rejected() {
        assert!(matches!(
            compute_schedule(1000.0, 12, -0.05),
            Err(CalcError::InvalidInput { field: "annual_rate", .. })
        ));
        assert!(matches!(
            compute_schedule(1000.0, 0, 0.05),
            Err(CalcError::InvalidInput { field: "term_months", .. })
        ));
    }

    #[test]
    fn test_zero_rate_is_degenerate() {
        // (1 + 0)^-5 = 1, so the annuity denominator vanishes
        let err = compute_schedule(1000.0, 5, 0.0).unwrap_err();
        assert!(matches!(err, CalcError::DegenerateInput { .. }));

        // 20% monthly on a near-maximal principal overflows the payment
        let err = compute_schedule(1e308, 12, 240.0).unwrap_err();
        assert!(matches!(err, CalcError::DegenerateInput { .. }));
        assert!(level_payment(1e308, 20.0, 12).is_err());
    }

    #[test]
    fn test_engine_schedule_summary() {
        let loan = LoanInput::new(1200.0, 12, 0.12);
        let schedule = AmortizationEngine::new().schedule(&loan).unwrap();
        let summary = schedule.summary();

        assert_eq!(summary.total_months, 12);
        assert_abs_diff_eq!(summary.total_principal, 1200.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.total_paid, 12.0 * schedule.payment, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.total_interest, summary.total_paid - 1200.0, epsilon = 1e-6);
    }
}
