use crate::biteship::BiteshipError;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    /// A required input is empty; raised before any request is sent
    #[error("{0}")]
    MissingField(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Api(#[from] BiteshipError),
}

impl NodeError {
    /// Remote payload attached to the failure, `null` when there is none
    pub fn details(&self) -> Value {
        match self {
            NodeError::Api(e) => e.details().cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Whether the failure happened before contacting the API
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            NodeError::MissingField(_) | NodeError::UnknownOperation(_) | NodeError::InvalidParameter(_)
        )
    }
}
