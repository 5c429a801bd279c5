//! Presentation of schedules and NPV results as table, CSV or JSON text

use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

use crate::amortization::{AmortizationRow, AmortizationSchedule, ScheduleSummary};
use crate::batch::BatchOutcome;
use crate::config::{OutputFormat, RenderConfig};
use crate::form::{format_fixed, AMORTIZATION_COLUMNS};
use crate::npv::NpvResult;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Round for presentation only; engine values stay at full precision
///
/// Values whose scaled form would overflow are returned unrounded.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals.min(i32::MAX as usize) as i32);
    let scaled = value * scale;
    if !scale.is_finite() || !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / scale;
    // Avoid emitting -0.0
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[derive(Serialize)]
struct RowView {
    month: u32,
    beginning_balance: f64,
    monthly_payment: f64,
    interest_paid: f64,
    principal_paid: f64,
    ending_balance: f64,
}

impl RowView {
    fn new(row: &AmortizationRow, decimals: usize) -> Self {
        Self {
            month: row.period,
            beginning_balance: round_to(row.beginning_balance, decimals),
            monthly_payment: round_to(row.payment, decimals),
            interest_paid: round_to(row.interest_paid, decimals),
            principal_paid: round_to(row.principal_paid, decimals),
            ending_balance: round_to(row.ending_balance, decimals),
        }
    }
}

#[derive(Serialize)]
struct SummaryView {
    total_months: u32,
    monthly_payment: f64,
    total_paid: f64,
    total_interest: f64,
    total_principal: f64,
    final_balance: f64,
}

impl SummaryView {
    fn new(summary: &ScheduleSummary, decimals: usize) -> Self {
        Self {
            total_months: summary.total_months,
            monthly_payment: round_to(summary.monthly_payment, decimals),
            total_paid: round_to(summary.total_paid, decimals),
            total_interest: round_to(summary.total_interest, decimals),
            total_principal: round_to(summary.total_principal, decimals),
            final_balance: round_to(summary.final_balance, decimals),
        }
    }
}

#[derive(Serialize)]
struct ScheduleView {
    principal: f64,
    term_months: i32,
    annual_rate: f64,
    summary: SummaryView,
    rows: Vec<RowView>,
}

/// Write an amortization schedule in the configured format
pub fn write_schedule<W: Write>(
    out: &mut W,
    schedule: &AmortizationSchedule,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    match config.format {
        OutputFormat::Table => write_schedule_table(out, schedule, config),
        OutputFormat::Csv => write_schedule_csv(out, schedule, config.decimals),
        OutputFormat::Json => {
            let view = ScheduleView {
                principal: schedule.loan.principal,
                term_months: schedule.loan.term_months,
                annual_rate: schedule.loan.annual_rate,
                summary: SummaryView::new(&schedule.summary(), config.decimals),
                rows: schedule.rows.iter().map(|r| RowView::new(r, config.decimals)).collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_schedule_table<W: Write>(
    out: &mut W,
    schedule: &AmortizationSchedule,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let d = config.decimals;

    writeln!(
        out,
        "{:>5} {:>18} {:>16} {:>14} {:>15} {:>15}",
        AMORTIZATION_COLUMNS[0],
        AMORTIZATION_COLUMNS[1],
        AMORTIZATION_COLUMNS[2],
        AMORTIZATION_COLUMNS[3],
        AMORTIZATION_COLUMNS[4],
        AMORTIZATION_COLUMNS[5],
    )?;
    writeln!(out, "{}", "-".repeat(88))?;

    let shown = config.preview_rows.unwrap_or(schedule.rows.len());
    for row in schedule.rows.iter().take(shown) {
        writeln!(
            out,
            "{:>5} {:>18} {:>16} {:>14} {:>15} {:>15}",
            row.period,
            format_fixed(row.beginning_balance, d),
            format_fixed(row.payment, d),
            format_fixed(row.interest_paid, d),
            format_fixed(row.principal_paid, d),
            format_fixed(row.ending_balance, d),
        )?;
    }

    if schedule.rows.len() > shown {
        writeln!(out, "... ({} more months)", schedule.rows.len() - shown)?;
    }

    let summary = schedule.summary();
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "  Monthly Payment: {}", format_fixed(summary.monthly_payment, d))?;
    writeln!(out, "  Total Paid:      {}", format_fixed(summary.total_paid, d))?;
    writeln!(out, "  Total Interest:  {}", format_fixed(summary.total_interest, d))?;
    writeln!(out, "  Final Balance:   {}", format_fixed(summary.final_balance, d))?;

    Ok(())
}

fn write_schedule_csv<W: Write>(
    out: &mut W,
    schedule: &AmortizationSchedule,
    decimals: usize,
) -> Result<(), RenderError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(AMORTIZATION_COLUMNS)?;

    for row in &schedule.rows {
        wtr.write_record([
            row.period.to_string(),
            format_fixed(row.beginning_balance, decimals),
            format_fixed(row.payment, decimals),
            format_fixed(row.interest_paid, decimals),
            format_fixed(row.principal_paid, decimals),
            format_fixed(row.ending_balance, decimals),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write an NPV result in the configured format
pub fn write_npv<W: Write>(out: &mut W, result: &NpvResult, config: &RenderConfig) -> Result<(), RenderError> {
    let d = config.decimals;

    match config.format {
        OutputFormat::Table => {
            writeln!(out, "NPV: {}", format_fixed(result.npv, d))?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            wtr.write_record(["discount_rate", "periods", "npv"])?;
            wtr.write_record([
                result.discount_rate.to_string(),
                result.periods.to_string(),
                format_fixed(result.npv, d),
            ])?;
            wtr.flush()?;
        }
        OutputFormat::Json => {
            let view = NpvResult {
                npv: round_to(result.npv, d),
                ..result.clone()
            };
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Column headings of the batch summary, in display order
pub const BATCH_COLUMNS: [&str; 8] = [
    "LoanID",
    "Status",
    "Months",
    "MonthlyPayment",
    "TotalPaid",
    "TotalInterest",
    "FinalBalance",
    "Error",
];

#[derive(Serialize)]
struct BatchView<'a> {
    loan_id: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn batch_cells(outcome: &BatchOutcome, decimals: usize) -> [String; 8] {
    match &outcome.result {
        Ok(summary) => [
            outcome.loan_id.clone(),
            "ok".to_string(),
            summary.total_months.to_string(),
            format_fixed(summary.monthly_payment, decimals),
            format_fixed(summary.total_paid, decimals),
            format_fixed(summary.total_interest, decimals),
            format_fixed(summary.final_balance, decimals),
            String::new(),
        ],
        Err(e) => [
            outcome.loan_id.clone(),
            "error".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            e.to_string(),
        ],
    }
}

/// Write one summary line per batch loan in the configured format
pub fn write_batch<W: Write>(
    out: &mut W,
    outcomes: &[BatchOutcome],
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let d = config.decimals;

    match config.format {
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<12} {:<6} {:>6} {:>16} {:>18} {:>18} {:>14}  {}",
                BATCH_COLUMNS[0],
                BATCH_COLUMNS[1],
                BATCH_COLUMNS[2],
                BATCH_COLUMNS[3],
                BATCH_COLUMNS[4],
                BATCH_COLUMNS[5],
                BATCH_COLUMNS[6],
                BATCH_COLUMNS[7],
            )?;
            writeln!(out, "{}", "-".repeat(100))?;
            for outcome in outcomes {
                let c = batch_cells(outcome, d);
                writeln!(
                    out,
                    "{:<12} {:<6} {:>6} {:>16} {:>18} {:>18} {:>14}  {}",
                    c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            wtr.write_record(BATCH_COLUMNS)?;
            for outcome in outcomes {
                wtr.write_record(batch_cells(outcome, d))?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            let views: Vec<BatchView> = outcomes
                .iter()
                .map(|o| match &o.result {
                    Ok(summary) => BatchView {
                        loan_id: &o.loan_id,
                        status: "ok",
                        summary: Some(SummaryView::new(summary, d)),
                        error: None,
                    },
                    Err(e) => BatchView {
                        loan_id: &o.loan_id,
                        status: "error",
                        summary: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &views)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
