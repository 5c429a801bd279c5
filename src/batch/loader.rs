//! Load loan records from CSV
//!
//! Expected header: `LoanID,Principal,TermMonths,AnnualRate`

use csv::Reader;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::amortization::LoanInput;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to open loan file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed loan record: {0}")]
    Record(#[from] csv::Error),
}

/// Raw CSV row matching the loan file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "LoanID")]
    loan_id: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "TermMonths")]
    term_months: i32,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
}

/// One loan from a batch file
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRecord {
    pub loan_id: String,
    pub loan: LoanInput,
}

impl From<CsvRow> for LoanRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            loan_id: row.loan_id,
            loan: LoanInput::new(row.principal, row.term_months, row.annual_rate),
        }
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRecord>, BatchError> {
    let path = path.as_ref();
    let reader = Reader::from_path(path).map_err(|source| BatchError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    collect_records(reader)
}

/// Load loans from any reader (e.g., string buffer, stdin)
pub fn load_loans_from_reader<R: Read>(reader: R) -> Result<Vec<LoanRecord>, BatchError> {
    collect_records(Reader::from_reader(reader))
}

fn collect_records<R: Read>(mut reader: Reader<R>) -> Result<Vec<LoanRecord>, BatchError> {
    let mut loans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(LoanRecord::from(row));
    }

    Ok(loans)
}
