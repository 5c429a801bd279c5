//! Real Estate Financial Calculator - loan amortization and net present value
//!
//! This library provides:
//! - Level-payment amortization schedules for fixed-rate loans
//! - Net present value of periodic cash flow streams
//! - A text form layer that parses field input and formats results
//! - Table, CSV and JSON rendering
//! - Parallel batch amortization over a CSV file of loans

pub mod error;
pub mod amortization;
pub mod npv;
pub mod form;
pub mod config;
pub mod render;
pub mod batch;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use amortization::{AmortizationEngine, AmortizationRow, AmortizationSchedule, LoanInput, compute_schedule};
pub use npv::{NpvEngine, NpvInput, NpvResult, compute_npv};
pub use form::FormError;
pub use config::{OutputFormat, RenderConfig};
pub use batch::BatchRunner;
