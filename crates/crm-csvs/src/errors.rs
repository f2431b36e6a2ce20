use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

/// Plumbing failures while reading or writing CRM tables.
///
/// Rule violations are never reported through this type; they are plain
/// findings collected in a [`crate::ValidationReport`].
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
