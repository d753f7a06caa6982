//! tftags - key-value tag reconciliation for Terraform providers
//!
//! Diffs a resource's desired tag set against the previously applied one and
//! drives a per-service adapter with the minimal set of remove/apply calls,
//! honouring provider-wide default tags, ignore rules and reserved key
//! namespaces such as `aws:`.

// Core modules
pub mod error;
pub mod key_value_tags;
pub mod source;
pub mod tag_data;
pub mod types;

// Policy and configuration
pub mod config;
pub mod reserved;

// Reconciliation
pub mod reconciler;

// Helper modules
pub mod diag;
pub mod naming;

// Re-exports for convenience
pub use config::{DefaultConfig, IgnoreConfig};
pub use diag::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use error::{Result, ServiceError, ServiceResult, TagPhase, TagsError};
pub use key_value_tags::{ReconciliationDelta, TagSet};
pub use naming::to_snake_case;
pub use reconciler::{Reconciler, TagAdapter, UpdateMode};
pub use reserved::ReservedKeys;
pub use source::TagSource;
pub use tag_data::TagData;
pub use types::Dynamic;
