//! aws-tags - AWS service tag adapters and the provider tag pipeline

pub mod api;
pub mod logging;
pub mod provider_data;
pub mod tags;

pub use api::AwsClients;
pub use provider_data::{ProviderData, StateTags};

use std::sync::Arc;
use tftags::{
    DefaultConfig, Diagnostics, Dynamic, IgnoreConfig, Reconciler, TagAdapter, TagsError,
};

/// Resource types whose tags this provider reconciles
pub const TAGGED_RESOURCE_TYPES: &[&str] = &[
    "aws_autoscaling_group",
    "aws_iam_role",
    "aws_iam_user",
    "aws_inspector_assessment_template",
    "aws_s3_bucket",
    "aws_s3_object",
    "aws_s3control_bucket",
    "aws_servicecatalog_portfolio",
    "aws_servicecatalog_product",
    "aws_workspaces_workspace",
];

pub struct AwsProvider {
    clients: AwsClients,
    data: Option<ProviderData>,
}

impl Default for AwsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsProvider {
    pub fn new() -> Self {
        Self::with_clients(AwsClients::new())
    }

    pub fn with_clients(clients: AwsClients) -> Self {
        Self {
            clients,
            data: None,
        }
    }

    /// Read `default_tags` and `ignore_tags` from the provider configuration,
    /// falling back to the `TF_AWS_*` environment variables
    pub fn configure(&mut self, config: &Dynamic) -> Diagnostics {
        let mut diags = Diagnostics::new();

        let default_tags = match DefaultConfig::from_provider_config(config.get("default_tags")) {
            Ok(default_tags) => default_tags,
            Err(e) => {
                diags.add_error("Invalid default_tags configuration", Some(e.to_string()));
                None
            }
        };

        let ignore_tags = match IgnoreConfig::from_provider_config(config.get("ignore_tags")) {
            Ok(ignore_tags) => ignore_tags,
            Err(e) => {
                diags.add_error("Invalid ignore_tags configuration", Some(e.to_string()));
                None
            }
        };

        if diags.has_errors() {
            return diags;
        }

        tracing::debug!(
            "Provider configured: default_tags={}, ignore_tags={}",
            default_tags.is_some(),
            ignore_tags.is_some()
        );
        self.data = Some(ProviderData::new(default_tags, ignore_tags));

        diags
    }

    pub fn provider_data(&self) -> Option<&ProviderData> {
        self.data.as_ref()
    }

    /// Reconciler for the tags of one resource type
    pub fn tag_reconciler(
        &self,
        resource_type: &str,
    ) -> tftags::Result<Reconciler<Box<dyn TagAdapter>>> {
        if self.data.is_none() {
            return Err(TagsError::ProviderNotConfigured);
        }

        let adapter: Box<dyn TagAdapter> = match resource_type {
            "aws_iam_role" => Box::new(tags::IamTags::role(required(&self.clients.iam, "IAM")?)),
            "aws_iam_user" => Box::new(tags::IamTags::user(required(&self.clients.iam, "IAM")?)),
            "aws_s3_bucket" => Box::new(tags::S3BucketTags::new(
                required(&self.clients.s3, "S3")?,
            )),
            "aws_s3_object" => Box::new(tags::S3ObjectTags::new(
                required(&self.clients.s3, "S3")?,
            )),
            "aws_s3control_bucket" => Box::new(tags::S3ControlBucketTags::new(
                required(&self.clients.s3control, "S3 Control")?,
            )),
            "aws_workspaces_workspace" => Box::new(tags::WorkspacesTags::new(
                required(&self.clients.workspaces, "WorkSpaces")?,
            )),
            "aws_inspector_assessment_template" => Box::new(tags::InspectorTags::new(
                required(&self.clients.inspector, "Inspector")?,
            )),
            "aws_servicecatalog_portfolio" => Box::new(tags::ServiceCatalogTags::portfolio(
                required(&self.clients.servicecatalog, "Service Catalog")?,
            )),
            "aws_servicecatalog_product" => Box::new(tags::ServiceCatalogTags::product(
                required(&self.clients.servicecatalog, "Service Catalog")?,
            )),
            "aws_autoscaling_group" => Box::new(tags::AutoScalingGroupTags::new(
                required(&self.clients.autoscaling, "AutoScaling")?,
            )),
            _ => return Err(TagsError::UnsupportedResource(resource_type.to_string())),
        };

        tracing::debug!("Created tag reconciler for {}", resource_type);
        Ok(Reconciler::new(adapter))
    }
}

fn required<T: ?Sized>(client: &Option<Arc<T>>, service: &str) -> tftags::Result<Arc<T>> {
    client
        .clone()
        .ok_or_else(|| TagsError::InvalidConfiguration(format!("{} client not configured", service)))
}
