//! Loan amortization: level payment derivation and period-by-period schedules

mod loan;
mod engine;
mod schedule;

pub use loan::LoanInput;
pub use engine::{AmortizationEngine, compute_schedule, level_payment};
pub use schedule::{AmortizationRow, AmortizationSchedule, ScheduleSummary};
