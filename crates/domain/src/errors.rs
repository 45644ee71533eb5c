use thiserror::Error;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Server responded with status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid response payload: {0}")]
    Decode(String),

    #[error("Response for a superseded query was discarded")]
    StaleResponseDiscarded,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    /// Message shown to the user: the server-supplied message when there is
    /// one, otherwise the error's own description.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            DomainError::StaleResponseDiscarded => GENERIC_ERROR_MESSAGE.to_string(),
            other => {
                let text = other.to_string();
                if text.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    text
                }
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            DomainError::Network(_) | DomainError::Timeout(_) => true,
            DomainError::Server { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
