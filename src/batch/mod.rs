//! Batch amortization runs over a file of loans

mod loader;
mod runner;

pub use loader::{load_loans, load_loans_from_reader, BatchError, LoanRecord};
pub use runner::{BatchOutcome, BatchRunner};
