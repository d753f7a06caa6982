use super::error::ApiResult;
use super::types::Tag;
use async_trait::async_trait;

#[async_trait]
pub trait InspectorApi: Send + Sync {
    async fn list_tags_for_resource(&self, resource_arn: &str) -> ApiResult<Vec<Tag>>;

    /// Replaces every tag on the resource. An empty list removes them all.
    async fn set_tags_for_resource(&self, resource_arn: &str, tags: Vec<Tag>) -> ApiResult<()>;
}
