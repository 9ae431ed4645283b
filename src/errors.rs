use axum::http::StatusCode;
use thiserror::Error;

/// Failures a user must see. `Display` is the message shown to them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Informe um nome para o humor.")]
    EmptyName,
    #[error("Esse humor já existe!")]
    DuplicateName { name: String },
    #[error("Esse nome já existe em outro humor!")]
    DuplicateWhileEditing { name: String },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("mood {id} not found")]
    NotFound { id: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("another action is still in progress")]
    Busy,
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type of the reference store's HTTP handlers.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("mood {id} not found"),
        }
    }

    pub fn conflict(name: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: format!("mood named {name:?} already exists"),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
