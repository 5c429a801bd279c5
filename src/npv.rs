//! Net present value of a periodic cash flow stream
//!
//! Period 0 is undiscounted; period `t` is divided by `(1 + rate)^t`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CalcError, CalcResult};

/// Discount rate and cash flows for a single NPV request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvInput {
    /// Per-period discount rate as a decimal
    pub discount_rate: f64,

    /// Cash flows indexed by period (positive = inflow, negative = outflow)
    pub cash_flows: Vec<f64>,
}

impl NpvInput {
    pub fn new(discount_rate: f64, cash_flows: Vec<f64>) -> Self {
        Self { discount_rate, cash_flows }
    }

    /// Check the rate is a finite non-negative number and every cash flow is finite
    pub fn validate(&self) -> CalcResult<()> {
        validate_npv(self.discount_rate, &self.cash_flows)
    }
}

fn validate_npv(discount_rate: f64, cash_flows: &[f64]) -> CalcResult<()> {
    ensure_finite("discount_rate", discount_rate)?;
    if discount_rate < 0.0 {
        return Err(CalcError::invalid("discount_rate", "cannot be negative"));
    }
    cash_flows
        .iter()
        .try_for_each(|&cf| ensure_finite("cash_flows", cf))
}

fn discounted_sum(discount_rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + discount_rate).powi(t as i32))
        .sum()
}

/// Computed NPV alongside the input that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvResult {
    pub discount_rate: f64,
    pub periods: usize,
    pub npv: f64,
}

/// Net present value of `cash_flows` at `discount_rate`
///
/// An empty stream is worth zero.
pub fn compute_npv(discount_rate: f64, cash_flows: &[f64]) -> CalcResult<f64> {
    validate_npv(discount_rate, cash_flows)?;
    Ok(discounted_sum(discount_rate, cash_flows))
}

/// Stateless NPV engine
#[derive(Debug, Clone, Copy, Default)]
pub struct NpvEngine;

impl NpvEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, input: &NpvInput) -> CalcResult<NpvResult> {
        input.validate()?;
        let npv = discounted_sum(input.discount_rate, &input.cash_flows);
        debug!(
            "NPV of {} cash flows at {}: {:.6}",
            input.cash_flows.len(),
            input.discount_rate,
            npv
        );

        Ok(NpvResult {
            discount_rate: input.discount_rate,
            periods: input.cash_flows.len(),
            npv,
        })
    }
}
