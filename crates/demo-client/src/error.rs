/// Errors from record client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No live record exists at this identifier.
    ///
    /// `status` is set when an HTTP service reported the absence.
    #[error("resource not found: {id}")]
    NotFound { id: String, status: Option<u16> },

    /// The identifier cannot name a record in this backend.
    #[error("invalid record identifier: {id:?}")]
    InvalidId { id: String },

    /// I/O error from the filesystem backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request could not be sent or its response not received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status the operation does not accept.
    #[error("unexpected status code: {status}. Message: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The service response did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The service endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl ClientError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            id: id.into(),
            status: None,
        }
    }

    /// Absence reported by an HTTP service with `status`.
    pub fn not_found_with_status(id: impl Into<String>, status: u16) -> Self {
        Self::NotFound {
            id: id.into(),
            status: Some(status),
        }
    }

    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    /// Returns `true` for the distinguished absence condition.
    ///
    /// Callers use this to treat a missing record as already reconciled.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::NotFound { status, .. } => *status,
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished() {
        let err = ClientError::not_found("abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "resource not found: abc");

        assert_eq!(err.status_code(), None);

        let io = ClientError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!io.is_not_found());
    }

    #[test]
    fn http_not_found_keeps_status() {
        let err = ClientError::not_found_with_status("7", 404);
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "resource not found: 7");
    }

    #[test]
    fn invalid_id_is_not_absence() {
        let err = ClientError::invalid_id("../x");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), r#"invalid record identifier: "../x""#);
    }

    #[test]
    fn unexpected_status_message_includes_body() {
        let err = ClientError::UnexpectedStatus {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "unexpected status code: 500. Message: boom");
        assert_eq!(err.status_code(), Some(500));
        assert!(!err.is_not_found());
    }
}
