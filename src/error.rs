//! Error types for the calculation core

use thiserror::Error;

/// Errors raised by the amortization and NPV engines
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A sign or positivity precondition on an input was violated
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The level payment formula divides by zero (e.g. a zero-interest loan)
    #[error("Degenerate input: {context}")]
    DegenerateInput { context: String },
}

/// Reason attached to `InvalidInput` for NaN or infinite values
pub const NOT_FINITE: &str = "must be a finite number";

impl CalcError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True when the input was rejected for being NaN or infinite
    pub fn is_non_finite(&self) -> bool {
        matches!(self, CalcError::InvalidInput { reason, .. } if reason == NOT_FINITE)
    }

    pub(crate) fn degenerate(context: impl Into<String>) -> Self {
        CalcError::DegenerateInput {
            context: context.into(),
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Reject NaN and infinities, which would otherwise slip through sign checks
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid(field, NOT_FINITE))
    }
}
