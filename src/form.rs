//! Text form layer
//!
//! Turns user-entered field text into engine inputs and engine output into
//! display strings. Nothing here draws widgets; a front end (the CLI, or any
//! GUI) feeds strings in and shows the strings that come back.

use thiserror::Error;

use crate::amortization::{AmortizationEngine, LoanInput};
use crate::error::CalcError;
use crate::npv::{NpvEngine, NpvInput};

/// Column headings of the amortization table, in display order
pub const AMORTIZATION_COLUMNS: [&str; 6] = [
    "Month",
    "Beginning Balance",
    "Monthly Payment",
    "Interest Paid",
    "Principal Paid",
    "Ending Balance",
];

/// Which form a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Amortization,
    Npv,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// Field text could not be read as a number
    #[error("{field}: '{value}' is not a valid number")]
    Parse {
        form: FormKind,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Message shown to the user for a failed calculation
pub fn error_message(err: &FormError) -> &'static str {
    match err {
        FormError::Parse { form: FormKind::Amortization, .. } => {
            "Invalid input. Please enter numeric values."
        }
        FormError::Parse { form: FormKind::Npv, .. } => {
            "Invalid input. Please enter a numeric discount rate and comma-separated cash flows."
        }
        FormError::Calc(e) if e.is_non_finite() => {
            "Invalid input. Please enter finite numeric values."
        }
        FormError::Calc(CalcError::InvalidInput { field: "discount_rate", .. }) => {
            "Discount rate cannot be negative."
        }
        FormError::Calc(CalcError::InvalidInput { .. }) => {
            "Invalid input. Loan amount and interest rate cannot be negative, and the number of months must be positive."
        }
        FormError::Calc(CalcError::DegenerateInput { .. }) => {
            "Invalid input resulting in division by zero. Please check your inputs."
        }
    }
}

fn parse_field<T: std::str::FromStr>(form: FormKind, field: &'static str, text: &str) -> Result<T, FormError> {
    text.trim().parse().map_err(|_| FormError::Parse {
        form,
        field,
        value: text.to_string(),
    })
}

/// Read the amortization form fields
pub fn parse_loan_form(principal: &str, term_months: &str, annual_rate: &str) -> Result<LoanInput, FormError> {
    let form = FormKind::Amortization;
    Ok(LoanInput::new(
        parse_field(form, "principal", principal)?,
        parse_field(form, "term_months", term_months)?,
        parse_field(form, "annual_rate", annual_rate)?,
    ))
}

/// Read the NPV form fields; cash flows are comma-separated
pub fn parse_npv_form(discount_rate: &str, cash_flows: &str) -> Result<NpvInput, FormError> {
    let form = FormKind::Npv;
    let discount_rate = parse_field(form, "discount_rate", discount_rate)?;
    let cash_flows = cash_flows
        .split(',')
        .map(|cf| parse_field(form, "cash_flows", cf))
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(NpvInput::new(discount_rate, cash_flows))
}

/// Format a monetary amount to two decimals
pub fn format_money(value: f64) -> String {
    format_fixed(value, 2)
}

/// Fixed-point formatting that never prints "-0.00" for residual balances
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let half_unit = 0.5 * 10f64.powi(-(decimals as i32));
    let value = if value.abs() < half_unit { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

/// Compute a schedule and format each row for display
pub fn amortization_table(loan: &LoanInput) -> Result<Vec<[String; 6]>, FormError> {
    let schedule = AmortizationEngine::new().schedule(loan)?;

    Ok(schedule
        .rows
        .iter()
        .map(|row| {
            [
                row.period.to_string(),
                format_money(row.beginning_balance),
                format_money(row.payment),
                format_money(row.interest_paid),
                format_money(row.principal_paid),
                format_money(row.ending_balance),
            ]
        })
        .collect())
}

/// Compute NPV and format the result label
pub fn npv_label(input: &NpvInput) -> Result<String, FormError> {
    let result = NpvEngine::new().evaluate(input)?;
    Ok(format!("NPV: {}", format_money(result.npv)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loan_form() {
        let loan = parse_loan_form(" 250000 ", "360", "0.065").unwrap();
        assert_eq!(loan, LoanInput::new(250_000.0, 360, 0.065));
    }

    #[test]
    fn test_parse_loan_form_rejects_text() {
        let err = parse_loan_form("abc", "12", "0.05").unwrap_err();
        assert!(matches!(err, FormError::Parse { field: "principal", .. }));

        // Month count must be a whole number
        let err = parse_loan_form("1000", "12.5", "0.05").unwrap_err();
        assert!(matches!(err, FormError::Parse { field: "term_months", .. }));
        assert_eq!(error_message(&err), "Invalid input. Please enter numeric values.");
    }

    #[test]
    fn test_parse_npv_form() {
        let input = parse_npv_form("0.1", "-1000, 500,  600 ").unwrap();
        assert_eq!(input.discount_rate, 0.1);
        assert_eq!(input.cash_flows, vec![-1000.0, 500.0, 600.0]);
    }

    #[test]
    fn test_parse_npv_form_rejects_blank_entries() {
        assert!(parse_npv_form("0.1", "").is_err());
        let err = parse_npv_form("0.1", "100,,200").unwrap_err();
        assert!(matches!(err, FormError::Parse { form: FormKind::Npv, field: "cash_flows", .. }));
        assert_eq!(
            error_message(&err),
            "Invalid input. Please enter a numeric discount rate and comma-separated cash flows."
        );
    }

    #[test]
    fn test_amortization_table_formatting() {
        let rows = amortization_table(&LoanInput::new(1200.0, 12, 0.12)).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(
            rows[0],
            ["1", "1200.00", "106.62", "12.00", "94.62", "1105.38"].map(String::from)
        );
        assert_eq!(rows[11][0], "12");
        assert_eq!(rows[11][5], "0.00");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_money(-1e-9), "0.00");
        assert_eq!(format_money(-0.01), "-0.01");
        assert_eq!(format_fixed(106.61854641, 4), "106.6185");
    }

    #[test]
    fn test_npv_label() {
        let input = NpvInput::new(0.0, vec![100.0, 100.0, 100.0]);
        assert_eq!(npv_label(&input).unwrap(), "NPV: 300.00");
    }

    #[test]
    fn test_error_messages() {
        let err = amortization_table(&LoanInput::new(-5.0, 12, 0.05)).unwrap_err();
        assert_eq!(
            error_message(&err),
            "Invalid input. Loan amount and interest rate cannot be negative, and the number of months must be positive."
        );

        let err = amortization_table(&LoanInput::new(1000.0, 5, 0.0)).unwrap_err();
        assert_eq!(
            error_message(&err),
            "Invalid input resulting in division by zero. Please check your inputs."
        );

        let err = npv_label(&NpvInput::new(-0.05, vec![1.0])).unwrap_err();
        assert_eq!(error_message(&err), "Discount rate cannot be negative.");
    }

    #[test]
    fn test_non_finite_input_message() {
        // "nan" and "inf" parse as floats, so rejection happens in the engines
        let input = parse_npv_form("nan", "100").unwrap();
        let err = npv_label(&input).unwrap_err();
        assert_eq!(error_message(&err), "Invalid input. Please enter finite numeric values.");

        let input = parse_npv_form("0.05", "100, inf").unwrap();
        let err = npv_label(&input).unwrap_err();
        assert_eq!(error_message(&err), "Invalid input. Please enter finite numeric values.");

        let loan = parse_loan_form("NaN", "12", "0.05").unwrap();
        let err = amortization_table(&loan).unwrap_err();
        assert_eq!(error_message(&err), "Invalid input. Please enter finite numeric values.");
    }
}
