//! S3 bucket and object tagging
//!
//! S3 only replaces the whole tag set. The reconciler reads the remote set
//! first so tags applied outside Terraform survive the replace.

use super::{api_tags, key_value_tags};
use crate::api::S3Api;
use async_trait::async_trait;
use std::sync::Arc;
use tftags::{ServiceError, ServiceResult, TagAdapter, TagSet, UpdateMode};

/// Full-replace adapter for buckets, identified by bucket name
pub struct S3BucketTags {
    client: Arc<dyn S3Api>,
}

impl S3BucketTags {
    pub fn new(client: Arc<dyn S3Api>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagAdapter for S3BucketTags {
    async fn remove_tags(&self, identifier: &str, _keys: &[String]) -> ServiceResult<()> {
        self.client.delete_bucket_tagging(identifier).await?;
        Ok(())
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        self.client
            .put_bucket_tagging(identifier, api_tags(tags))
            .await?;
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::FullReplace
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        let tags = self.client.get_bucket_tagging(identifier).await?;
        Ok(key_value_tags(tags))
    }
}

/// Full-replace adapter for objects, identified as `bucket/key`
pub struct S3ObjectTags {
    client: Arc<dyn S3Api>,
}

impl S3ObjectTags {
    pub fn new(client: Arc<dyn S3Api>) -> Self {
        Self { client }
    }

    /// The object key may itself contain `/`; the bucket name never does
    pub fn parse_identifier(identifier: &str) -> ServiceResult<(&str, &str)> {
        match identifier.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok((bucket, key)),
            _ => Err(ServiceError::InvalidIdentifier(format!(
                "expected bucket/key, got {}",
                identifier
            ))),
        }
    }

    /// Value for the `x-amz-tagging` header used when uploading an object
    pub fn tagging_header(tags: &TagSet) -> String {
        tags.ignore_aws().url_encode()
    }
}

#[async_trait]
impl TagAdapter for S3ObjectTags {
    async fn remove_tags(&self, identifier: &str, _keys: &[String]) -> ServiceResult<()> {
        let (bucket, key) = Self::parse_identifier(identifier)?;
        self.client.delete_object_tagging(bucket, key).await?;
        Ok(())
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        let (bucket, key) = Self::parse_identifier(identifier)?;
        self.client
            .put_object_tagging(bucket, key, api_tags(tags))
            .await?;
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::FullReplace
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        let (bucket, key) = Self::parse_identifier(identifier)?;
        let tags = self.client.get_object_tagging(bucket, key).await?;
        Ok(key_value_tags(tags))
    }
}
