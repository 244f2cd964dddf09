use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Parser Error: {0}")]
    ParserError(String),

    #[error("Extraction Error: {0}")]
    ExtractionError(String),

    #[error("Corpus Unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic failure surfaced to callers of `TickerResolver::resolve`. The wrapped error
    /// carries the underlying cause.
    #[error("Failed to extract tickers")]
    TickerExtractionFailed(#[source] Box<Error>),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::ParserError(err.to_string())
    }
}
