use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiteshipError {
    #[error("Biteship API error (HTTP {status}): {message}")]
    ApiError {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl BiteshipError {
    /// Build an error from a non-success response. The remote payload is kept
    /// as `details`; 4xx and 5xx are treated alike.
    pub fn from_status_code(status: u16, body: String) -> Self {
        let details = if body.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&body).unwrap_or(Value::String(body.clone())))
        };

        let message = details
            .as_ref()
            .and_then(|d| d.get("error").or_else(|| d.get("message")))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("request failed with status code {}", status)
                } else {
                    body
                }
            });

        BiteshipError::ApiError {
            status,
            message,
            details,
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            BiteshipError::ApiError { status, .. } => Some(*status),
            BiteshipError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Remote error payload, surfaced as-is
    pub fn details(&self) -> Option<&Value> {
        match self {
            BiteshipError::ApiError { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_status_code_uses_error_field() {
        let body = json!({"success": false, "error": "Order not found", "code": 40002012});
        let error = BiteshipError::from_status_code(404, body.to_string());

        match &error {
            BiteshipError::ApiError { status, message, details } => {
                assert_eq!(*status, 404);
                assert_eq!(message, "Order not found");
                assert_eq!(details.as_ref().unwrap()["code"], 40002012);
            }
            _ => panic!("Expected ApiError"),
        }
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_from_status_code_message_field() {
        let error = BiteshipError::from_status_code(
            400,
            json!({"message": "Bad request"}).to_string(),
        );
        assert!(error.to_string().contains("Bad request"));
        assert!(error.to_string().contains("400"));
    }

    #[test]
    fn test_from_status_code_plain_text() {
        let error = BiteshipError::from_status_code(502, "Bad Gateway".to_string());
        match error {
            BiteshipError::ApiError { message, details, .. } => {
                assert_eq!(message, "Bad Gateway");
                assert_eq!(details, Some(Value::String("Bad Gateway".to_string())));
            }
            _ => panic!("Expected ApiError"),
        }
    }

    #[test]
    fn test_from_status_code_empty_body() {
        let error = BiteshipError::from_status_code(500, String::new());
        assert!(error.details().is_none());
        assert!(error.to_string().contains("status code 500"));
    }

    #[test]
    fn test_non_api_errors_have_no_details() {
        let error = BiteshipError::AuthenticationError("missing key".to_string());
        assert!(error.details().is_none());
        assert!(error.status().is_none());
    }
}
