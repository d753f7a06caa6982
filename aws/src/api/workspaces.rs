use super::error::ApiResult;
use super::types::Tag;
use async_trait::async_trait;

#[async_trait]
pub trait WorkspacesApi: Send + Sync {
    async fn describe_tags(&self, resource_id: &str) -> ApiResult<Vec<Tag>>;

    async fn create_tags(&self, resource_id: &str, tags: Vec<Tag>) -> ApiResult<()>;

    async fn delete_tags(&self, resource_id: &str, tag_keys: Vec<String>) -> ApiResult<()>;
}
