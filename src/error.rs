use thiserror::Error;

/// Errors raised while building a filter or decoding its inputs.
///
/// Evaluating an alert never fails: malformed alerts are rejected with a
/// diagnostic reason instead (see [`crate::Rejection`]).
#[derive(Error, Debug)]
pub enum FilterError {
    /// A threshold is out of its admissible range.
    #[error("config error: {0}")]
    Config(String),

    /// A configuration or alert document could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type FilterResult<T> = Result<T, FilterError>;
