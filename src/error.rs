use thiserror::Error;

/// Failure kinds surfaced to callers of every query and prediction operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Species or model absent.
    #[error("{0}")]
    NotFound(String),

    /// Malformed caller input, e.g. an unparseable date bound.
    #[error("{0}")]
    BadInput(String),

    /// The data cannot answer this kind of query.
    #[error("{0}")]
    Unavailable(String),

    /// Load failure or unexpected condition. The message is for logs only.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadInput(_) => "bad_input",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal",
        }
    }
    /// Message safe to hand to an external caller.
    /// Internal details may name files on disk, so they stay in the logs.
    pub fn public(&self) -> String {
        match self {
            Self::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Internal(format!("read occurrence table: {}", e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(format!("io: {}", e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(format!("decode model artifact: {}", e))
    }
}

/// Result type for query and prediction operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_details_stay_private() {
        let e = Error::Internal("open /srv/models/x_rf.json: denied".into());
        assert_eq!(e.public(), "internal error");
        assert!(e.to_string().contains("/srv/models"));
    }

    #[test]
    fn caller_errors_are_public() {
        let e = Error::NotFound("species not found".into());
        assert_eq!(e.public(), "species not found");
        assert_eq!(e.kind(), "not_found");
    }
}
