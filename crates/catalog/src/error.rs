//! Errors raised at the adapter boundary.

use thiserror::Error;

/// Failure of a single upstream call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, or a non-success status with no dedicated variant
    #[error("request to {url} failed: {message}")]
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("rate limited by upstream: {url}")]
    RateLimited { url: String },

    #[error("malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    #[error("request cancelled")]
    Cancelled,
}

/// Flat classification of [`ApiError`] for callers that only need to branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    NotFound,
    RateLimited,
    Malformed,
    Cancelled,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::RateLimited { .. } => ErrorKind::RateLimited,
            ApiError::Malformed { .. } => ErrorKind::Malformed,
            ApiError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// HTTP status that produced this error, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::Malformed { .. } | ApiError::Cancelled => None,
        }
    }

    /// Classify a non-success HTTP status
    pub fn from_status(url: &str, status: u16, body: String) -> Self {
        match status {
            404 => ApiError::NotFound {
                url: url.to_string(),
            },
            429 => ApiError::RateLimited {
                url: url.to_string(),
            },
            _ => ApiError::Transport {
                url: url.to_string(),
                status: Some(status),
                message: if body.is_empty() {
                    format!("status {}", status)
                } else {
                    format!("status {}: {}", status, body)
                },
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let url = "https://api.jikan.moe/v4/anime/1";

        assert_eq!(ApiError::from_status(url, 404, String::new()).kind(), ErrorKind::NotFound);
        assert_eq!(ApiError::from_status(url, 429, String::new()).kind(), ErrorKind::RateLimited);

        let server_error = ApiError::from_status(url, 503, "maintenance".to_string());
        assert_eq!(server_error.kind(), ErrorKind::Transport);
        assert_eq!(server_error.status(), Some(503));
        assert!(server_error.to_string().contains("maintenance"));
    }

    #[test]
    fn test_status_of_non_http_failures() {
        let malformed = ApiError::Malformed {
            url: "u".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(malformed.status(), None);
        assert_eq!(ApiError::Cancelled.status(), None);
        assert_eq!(ApiError::Cancelled.kind(), ErrorKind::Cancelled);
    }
}
