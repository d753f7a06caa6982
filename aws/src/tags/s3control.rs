use super::{api_tags, key_value_tags};
use crate::api::S3ControlApi;
use async_trait::async_trait;
use std::sync::Arc;
use tftags::{ServiceError, ServiceResult, TagAdapter, TagSet, UpdateMode};

/// Full-replace adapter for S3 on Outposts buckets, identified by bucket ARN.
/// The account id the API also needs is taken from the ARN.
pub struct S3ControlBucketTags {
    client: Arc<dyn S3ControlApi>,
}

impl S3ControlBucketTags {
    pub fn new(client: Arc<dyn S3ControlApi>) -> Self {
        Self { client }
    }
}

/// Account id field of `arn:partition:service:region:account-id:resource`
pub fn arn_account_id(arn: &str) -> ServiceResult<&str> {
    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    match parts.as_slice() {
        ["arn", partition, service, _region, account_id, resource]
            if !partition.is_empty()
                && !service.is_empty()
                && !account_id.is_empty()
                && !resource.is_empty() =>
        {
            Ok(*account_id)
        }
        _ => Err(ServiceError::InvalidIdentifier(format!(
            "error parsing S3 Control Bucket ARN ({})",
            arn
        ))),
    }
}

#[async_trait]
impl TagAdapter for S3ControlBucketTags {
    async fn remove_tags(&self, identifier: &str, _keys: &[String]) -> ServiceResult<()> {
        let account_id = arn_account_id(identifier)?;
        self.client
            .delete_bucket_tagging(account_id, identifier)
            .await?;
        Ok(())
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        let account_id = arn_account_id(identifier)?;
        self.client
            .put_bucket_tagging(account_id, identifier, api_tags(tags))
            .await?;
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::FullReplace
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        let account_id = arn_account_id(identifier)?;
        let tags = self
            .client
            .get_bucket_tagging(account_id, identifier)
            .await?;
        Ok(key_value_tags(tags))
    }
}
