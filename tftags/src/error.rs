//! Error types for tftags

use std::fmt;

/// Error type for tag construction, configuration and reconciliation
#[derive(Debug, thiserror::Error)]
pub enum TagsError {
    #[error("Type mismatch for tag {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("{phase} resource ({identifier}): {source}")]
    Tagging {
        identifier: String,
        phase: TagPhase,
        #[source]
        source: ServiceError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Provider not configured")]
    ProviderNotConfigured,

    #[error("Unsupported resource type for tagging: {0}")]
    UnsupportedResource(String),
}

impl TagsError {
    pub fn tagging(identifier: impl Into<String>, phase: TagPhase, source: ServiceError) -> Self {
        TagsError::Tagging {
            identifier: identifier.into(),
            phase,
            source,
        }
    }

    /// The reconciliation phase that failed, if this is a tagging error
    pub fn phase(&self) -> Option<TagPhase> {
        match self {
            TagsError::Tagging { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

/// Result type alias for tftags operations
pub type Result<T> = std::result::Result<T, TagsError>;

/// Which outbound step of a reconciliation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPhase {
    /// Reading back the currently applied remote tags
    List,
    /// Removing tag keys
    Remove,
    /// Adding or updating tags
    Apply,
}

impl fmt::Display for TagPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagPhase::List => f.write_str("listing tags for"),
            TagPhase::Remove => f.write_str("untagging"),
            TagPhase::Apply => f.write_str("tagging"),
        }
    }
}

/// Error reported by a per-service tagging API
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("API returned error {code}: {message}")]
    Api { code: String, message: String },

    #[error("invalid resource identifier: {0}")]
    InvalidIdentifier(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

/// Result type alias for per-service tagging calls
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
