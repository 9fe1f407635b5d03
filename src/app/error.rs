use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuakeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Feed returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("Feed decode error: {0}")]
    Decode(String),

    #[error("Invalid earthquake record: {0}")]
    InvalidRecord(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid feed query: {0}")]
    InvalidQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl QuakeError {
    /// Unreachable host, timeout or a non-success HTTP status.
    pub fn is_network(&self) -> bool {
        matches!(self, QuakeError::Network(_) | QuakeError::HttpStatus(_))
    }

    /// The response body could not be read as a feature collection.
    pub fn is_decode(&self) -> bool {
        matches!(self, QuakeError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, QuakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_network() {
        let err = QuakeError::HttpStatus(503);
        assert!(err.is_network());
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "Feed returned HTTP status 503");
    }

    #[test]
    fn test_decode_is_not_network() {
        let err = QuakeError::Decode("expected value".into());
        assert!(err.is_decode());
        assert!(!err.is_network());
    }
}
