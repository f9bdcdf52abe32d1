use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("End number must be greater than or equal to start number (start={start}, end={end}).")]
pub struct InvalidRangeError {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields ({field} is empty).")]
pub struct MissingFieldError {
    pub field: &'static str,
}

/// Operator input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("HTTP {status} - {body}")]
    Rejected { status: u16, body: String },
    #[error("Empty token received")]
    EmptyToken,
    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeleteError {
    pub message: String,
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Transport(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError {
            message: e.to_string(),
        }
    }
}

impl From<reqwest::Error> for DeleteError {
    fn from(e: reqwest::Error) -> Self {
        DeleteError {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_rejection_renders_status_and_body() {
        let err = AuthError::Rejected {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500 - Internal Server Error");
    }

    #[test]
    fn connect_error_keeps_inner_message() {
        let err: ConnectError = InvalidRangeError { start: 3, end: 1 }.into();
        assert!(err.to_string().starts_with("End number must be greater"));
    }
}
