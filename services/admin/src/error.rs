//! Custom error types for the admin client

use thiserror::Error;

/// Failure of a call to the catalog backend
///
/// The three variants mirror what the caller can know about the exchange:
/// the server answered with an error status, the request went out but nothing
/// came back, or something else broke.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// A response arrived with a non-2xx status
    #[error("Request failed with status {status}")]
    Response { status: u16, body: String },

    /// A request was sent but no response was received
    #[error("No response from server: {0}")]
    Request(String),

    /// Any other failure
    #[error("{0}")]
    Unknown(String),
}

impl ApiError {
    /// HTTP status of the response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body, when present
    pub fn server_message(&self) -> Option<String> {
        let ApiError::Response { body, .. } = self else {
            return None;
        };

        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_string)
            .filter(|message| !message.trim().is_empty())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ApiError::Request(e.to_string())
        } else {
            ApiError::Unknown(e.to_string())
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_from_json_body() {
        let error = ApiError::Response {
            status: 400,
            body: r#"{"message":"Product name already exists"}"#.to_string(),
        };
        assert_eq!(error.status(), Some(400));
        assert_eq!(
            error.server_message().as_deref(),
            Some("Product name already exists")
        );
    }

    #[test]
    fn test_server_message_absent() {
        let plain = ApiError::Response {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(plain.server_message(), None);

        let blank = ApiError::Response {
            status: 422,
            body: r#"{"message":"  "}"#.to_string(),
        };
        assert_eq!(blank.server_message(), None);

        let request = ApiError::Request("connection refused".to_string());
        assert_eq!(request.status(), None);
        assert_eq!(request.server_message(), None);
    }
}
