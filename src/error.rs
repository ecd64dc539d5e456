use poem::http::StatusCode;
use poem::Error as PoemError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Item {index} failed: {message}")]
    ItemFailed { index: usize, message: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ItemFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for PoemError {
    fn from(err: AppError) -> Self {
        PoemError::from_string(err.to_string(), err.status_code())
    }
}

impl From<crate::node::ItemFailure> for AppError {
    fn from(failure: crate::node::ItemFailure) -> Self {
        AppError::ItemFailed {
            index: failure.index,
            message: failure.source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ItemFailure, NodeError};

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_item_failure_maps_to_unprocessable() {
        let failure = ItemFailure {
            index: 2,
            source: NodeError::MissingField("Order ID is required".to_string()),
        };
        let error = AppError::from(failure);
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.to_string(), "Item 2 failed: Order ID is required");

        let poem_error: PoemError = error.into();
        assert_eq!(poem_error.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
