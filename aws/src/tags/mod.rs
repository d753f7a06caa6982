//! Per-service tag adapters
//!
//! Each adapter maps the reconciler's remove/apply contract onto one
//! service's tagging calls. The diff itself always comes from the reconciler.

pub mod autoscaling;
pub mod iam;
pub mod inspector;
pub mod s3;
pub mod s3control;
pub mod servicecatalog;
pub mod workspaces;

pub use autoscaling::AutoScalingGroupTags;
pub use iam::IamTags;
pub use inspector::InspectorTags;
pub use s3::{S3BucketTags, S3ObjectTags};
pub use s3control::S3ControlBucketTags;
pub use servicecatalog::ServiceCatalogTags;
pub use workspaces::WorkspacesTags;

use crate::api::Tag;
use tftags::TagSet;

/// Service tags from a TagSet. Null values are sent as empty strings.
pub fn api_tags(tags: &TagSet) -> Vec<Tag> {
    tags.iter()
        .map(|(k, v)| Tag::new(k, v.value_or_empty()))
        .collect()
}

/// TagSet from service tags
pub fn key_value_tags(tags: Vec<Tag>) -> TagSet {
    TagSet::from_pairs(tags.into_iter().map(|t| (t.key, t.value)))
}
