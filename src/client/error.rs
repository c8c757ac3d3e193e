//! Errors raised by the API client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never got a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A body was expected but the server sent 204
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    /// The base URL or endpoint could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Status code of an HTTP error, `None` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_server_message() {
        let err = ClientError::Http {
            status: 404,
            message: "Duty not found".to_string(),
        };
        assert_eq!(err.to_string(), "Duty not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_non_http_error_has_no_status() {
        assert_eq!(ClientError::EmptyResponse("/duties".into()).status(), None);
    }
}
