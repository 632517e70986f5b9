use thiserror::Error;

/// Convenience result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error type returned by the loader.
///
/// Every variant is fatal to a run: ingestion stops at the first error and whatever was flushed
/// before it stays in the index.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Underlying I/O error (e.g. input file not found).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the CSV reader.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A data line does not split into the expected number of fields.
    #[error("malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A value could not be parsed (currently only timestamps are parsed).
    #[error("failed to parse value at line {line} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        line: u64,
        column: String,
        raw: String,
        message: String,
    },

    /// A `key=value` option could not be interpreted.
    #[error("invalid option: {message}")]
    InvalidOption { message: String },

    /// The loader configuration is unusable.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    /// The remote service answered with a non-2xx status.
    #[error("{method} {url} => {status}\n{body}")]
    RemoteService {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// Network or connection failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
