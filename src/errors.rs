use axum::http::StatusCode;
use thiserror::Error;

/// Rejection of a single user action. Never affects anything beyond that action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("No copy credits left.")]
    NoCredits,
    #[error("Not enough coins to make a call: {balance} available, {cost} needed.")]
    InsufficientFunds { balance: u64, cost: u64 },
    #[error("Could not copy to clipboard: {0}")]
    Clipboard(String),
    #[error("Unknown service: {0}")]
    UnknownService(String),
    #[error("Services are still loading.")]
    CatalogNotReady,
}

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
}

impl From<ActionError> for AppError {
    fn from(err: ActionError) -> Self {
        let status = match err {
            ActionError::NoCredits | ActionError::InsufficientFunds { .. } => StatusCode::CONFLICT,
            ActionError::Clipboard(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ActionError::UnknownService(_) => StatusCode::NOT_FOUND,
            ActionError::CatalogNotReady => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
