use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] std::num::ParseFloatError),
    #[error("Date parse error: {0}")]
    Date(#[from] chrono::ParseError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
}
