//! Narrow per-service client interfaces for the tagging calls
//!
//! Transport, signing and retries live behind these traits.

pub mod autoscaling;
pub mod error;
pub mod iam;
pub mod inspector;
pub mod s3;
pub mod s3control;
pub mod servicecatalog;
pub mod types;
pub mod workspaces;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use autoscaling::AutoScalingApi;
pub use error::{ApiError, ApiResult};
pub use iam::IamApi;
pub use inspector::InspectorApi;
pub use s3::S3Api;
pub use s3control::S3ControlApi;
pub use servicecatalog::{ServiceCatalogApi, TagUpdate};
pub use types::{AutoScalingTag, Tag, AUTOSCALING_GROUP_RESOURCE_TYPE};
pub use workspaces::WorkspacesApi;

use std::sync::Arc;

/// The service clients a provider hands to its tag adapters
#[derive(Clone, Default)]
pub struct AwsClients {
    pub iam: Option<Arc<dyn IamApi>>,
    pub s3: Option<Arc<dyn S3Api>>,
    pub s3control: Option<Arc<dyn S3ControlApi>>,
    pub workspaces: Option<Arc<dyn WorkspacesApi>>,
    pub inspector: Option<Arc<dyn InspectorApi>>,
    pub servicecatalog: Option<Arc<dyn ServiceCatalogApi>>,
    pub autoscaling: Option<Arc<dyn AutoScalingApi>>,
}

impl AwsClients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iam(mut self, client: Arc<dyn IamApi>) -> Self {
        self.iam = Some(client);
        self
    }

    pub fn with_s3(mut self, client: Arc<dyn S3Api>) -> Self {
        self.s3 = Some(client);
        self
    }

    pub fn with_s3control(mut self, client: Arc<dyn S3ControlApi>) -> Self {
        self.s3control = Some(client);
        self
    }

    pub fn with_workspaces(mut self, client: Arc<dyn WorkspacesApi>) -> Self {
        self.workspaces = Some(client);
        self
    }

    pub fn with_inspector(mut self, client: Arc<dyn InspectorApi>) -> Self {
        self.inspector = Some(client);
        self
    }

    pub fn with_servicecatalog(mut self, client: Arc<dyn ServiceCatalogApi>) -> Self {
        self.servicecatalog = Some(client);
        self
    }

    pub fn with_autoscaling(mut self, client: Arc<dyn AutoScalingApi>) -> Self {
        self.autoscaling = Some(client);
        self
    }
}
