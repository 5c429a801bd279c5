//! Parallel batch runner
//!
//! Each loan is independent, so schedules are computed with rayon and only the
//! summary of each is kept.

use log::{info, trace, warn};
use rayon::prelude::*;

use crate::amortization::{AmortizationEngine, ScheduleSummary};
use crate::error::CalcError;
use super::loader::LoanRecord;

/// Result of one loan in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub loan_id: String,
    pub result: Result<ScheduleSummary, CalcError>,
}

/// Runs amortization for many loans
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: AmortizationEngine,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute every loan; output order matches input order
    pub fn run(&self, loans: &[LoanRecord]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = loans
            .par_iter()
            .map(|record| {
                trace!("Amortizing loan {}", record.loan_id);
                let result = self.engine.schedule(&record.loan).map(|s| s.summary());
                if let Err(ref e) = result {
                    warn!("Loan {} skipped: {}", record.loan_id, e);
                }
                BatchOutcome {
                    loan_id: record.loan_id.clone(),
                    result,
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!("Batch complete: {} loans, {} failed", outcomes.len(), failed);

        outcomes
    }
}
