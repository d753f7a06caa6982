use serde::Deserialize;
use tftags::ServiceError;
use thiserror::Error;

/// Error codes AWS services return when the resource, or its tagging
/// sub-resource, does not exist
pub const NOT_FOUND_CODES: &[&str] = &[
    "NoSuchBucket",
    "NoSuchEntity",
    "NoSuchKey",
    "NoSuchTagSet",
    "NoSuchTagSetError",
    "ResourceNotFoundException",
];

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("API returned error {code} (HTTP {status}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Too many requests, rate limited")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON error body returned by the JSON-protocol services
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", alias = "code", alias = "Code")]
    code: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl ApiError {
    pub fn service(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Service {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Build from a JSON error response body, for transport clients that
    /// implement the `*Api` traits. The `__type` field may carry a
    /// namespace prefix (`com.amazonaws.workspaces#ResourceNotFoundException`).
    pub fn from_json_body(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Failed to parse error response: {}, body: {}", e, body);
                return ApiError::ParseError(e.to_string());
            }
        };

        let code = parsed
            .code
            .as_deref()
            .map(|c| c.rsplit('#').next().unwrap_or(c))
            .unwrap_or("Unknown")
            .to_string();

        if status == 429 || code == "ThrottlingException" || code == "Throttling" {
            return ApiError::RateLimited;
        }

        ApiError::Service {
            status,
            code,
            message: parsed.message.unwrap_or_default(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code().is_some_and(|c| NOT_FOUND_CODES.contains(&c))
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        if err.is_not_found() {
            return ServiceError::NotFound(err.to_string());
        }

        match err {
            ApiError::Service { code, message, .. } => ServiceError::Api { code, message },
            ApiError::RateLimited => ServiceError::api("Throttling", "rate limited"),
            ApiError::Transport(msg) | ApiError::ParseError(msg) => ServiceError::Transport(msg),
        }
    }
}
