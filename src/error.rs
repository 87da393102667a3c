use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid page parameter: {0}")]
    InvalidPageParameter(String),

    #[error("GitHub API error ({}): {message}", display_status(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "no status".to_string(), |s| s.to_string())
}

/// Coarse classification used by the view layer to pick a failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedResponse,
    InvalidPageParameter,
    TransportFailure,
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Error::InvalidPageParameter(_) => ErrorKind::InvalidPageParameter,
            Error::Transport { .. } | Error::Http(_) => ErrorKind::TransportFailure,
            _ => ErrorKind::Other,
        }
    }

    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // reqwest errors carry the full request URL
            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Transport { status, .. } => match status {
                Some(401) => "GitHub authentication failed".to_string(),
                Some(code) => format!("GitHub API error: HTTP {code}"),
                None => "GitHub API error".to_string(),
            },

            Error::Io(_) => "Terminal IO failed".to_string(),

            Error::Internal(msg) | Error::Config(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("secret") || lower.contains("token") || lower.contains("key") {
                    "Internal error (details redacted)".to_string()
                } else {
                    self.to_string()
                }
            }

            Error::MalformedResponse(_)
            | Error::InvalidPageParameter(_)
            | Error::InvalidUrl(_)
            | Error::Serialization(_)
            | Error::Validation(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_share_a_kind() {
        let err = Error::Transport {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert_eq!(
            Error::MalformedResponse("null".into()).kind(),
            ErrorKind::MalformedResponse
        );
        assert_eq!(
            Error::InvalidPageParameter("\"2\"".into()).kind(),
            ErrorKind::InvalidPageParameter
        );
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Other);
    }

    #[test]
    fn test_log_safe_redacts_tokens() {
        let err = Error::Config("GITHUB_TOKEN is not set".to_string());
        assert_eq!(err.log_safe(), "Internal error (details redacted)");

        let err = Error::Transport {
            status: Some(401),
            message: "Bad credentials for token ghp_123".to_string(),
        };
        assert_eq!(err.log_safe(), "GitHub authentication failed");
    }

    #[test]
    fn test_transport_display() {
        let err = Error::Transport {
            status: Some(404),
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error (404): Not Found");

        let err = Error::Transport {
            status: None,
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error (no status): connection reset");
    }
}
