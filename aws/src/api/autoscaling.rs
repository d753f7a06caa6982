use super::error::ApiResult;
use super::types::AutoScalingTag;
use async_trait::async_trait;

#[async_trait]
pub trait AutoScalingApi: Send + Sync {
    async fn describe_tags(&self, group_name: &str) -> ApiResult<Vec<AutoScalingTag>>;

    async fn create_or_update_tags(&self, tags: Vec<AutoScalingTag>) -> ApiResult<()>;

    async fn delete_tags(&self, tags: Vec<AutoScalingTag>) -> ApiResult<()>;
}
