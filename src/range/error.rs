use thiserror::Error;

/// Contract violations raised by the parser.
///
/// These are bugs in the calling code, not per-request conditions. Data-level
/// failures (malformed or unsatisfiable headers) are reported through
/// [`ParseOutcome`](super::ParseOutcome) instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("argument header must be a string")]
    InvalidHeader,
}
