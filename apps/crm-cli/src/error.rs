use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
}
