use common::types::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server failure: HTTP {status}")]
    Server { status: u16 },
    #[error("undecodable response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response missing {0}")]
    Incomplete(&'static str),
    #[error("server reported {0}")]
    Remote(ErrorCode),
}

impl ClientError {
    /// Stable short label for CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::NotFound => "not_found",
            ClientError::Transport(_) => "transport",
            ClientError::Server { .. } => "server",
            ClientError::Decode(_) | ClientError::Incomplete(_) => "decode",
            ClientError::Remote(_) => "remote",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound)
    }
}

impl From<ErrorCode> for ClientError {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::NotFound => ClientError::NotFound,
            other => ClientError::Remote(other),
        }
    }
}
