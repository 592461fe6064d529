use thiserror::Error;

/// The tagged error kinds produced at the library boundary.
///
/// Structural errors (`InvalidIndex`, `InvalidDelimiter`) fail the
/// operation immediately and leave state unchanged. `ConversionFailure` is
/// only ever returned by a type-converter getter in strict mode; lax mode
/// swallows it and returns the neutral value instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Hl7Error {
    #[error("invalid index {index}: {reason}")]
    InvalidIndex { index: i64, reason: String },

    #[error("invalid delimiter {delimiter:?}: {reason}")]
    InvalidDelimiter { delimiter: char, reason: String },

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("conversion failed: {0}")]
    ConversionFailure(String),
}

pub type Result<T> = std::result::Result<T, Hl7Error>;
