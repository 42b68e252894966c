use thiserror::Error;

use crate::data::model::Sex;

/// Failures raised by the data pipeline. All of them are terminal for the
/// operation that produced them; the UI decides how to present them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NamesError {
    #[error("Name archive unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed name archive: {0}")]
    MalformedSource(String),

    #[error("Zero total births for sex {sex} in {year}")]
    DivideByZero { year: i32, sex: Sex },

    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },
}

pub type Result<T> = std::result::Result<T, NamesError>;

impl From<reqwest::Error> for NamesError {
    fn from(err: reqwest::Error) -> Self {
        NamesError::SourceUnavailable(err.to_string())
    }
}

impl From<zip::result::ZipError> for NamesError {
    fn from(err: zip::result::ZipError) -> Self {
        NamesError::MalformedSource(err.to_string())
    }
}
