use super::error::ApiResult;
use super::types::Tag;
use async_trait::async_trait;

/// IAM tagging calls for roles and users
#[async_trait]
pub trait IamApi: Send + Sync {
    async fn tag_role(&self, role_name: &str, tags: Vec<Tag>) -> ApiResult<()>;

    async fn untag_role(&self, role_name: &str, tag_keys: Vec<String>) -> ApiResult<()>;

    async fn list_role_tags(&self, role_name: &str) -> ApiResult<Vec<Tag>>;

    async fn tag_user(&self, user_name: &str, tags: Vec<Tag>) -> ApiResult<()>;

    async fn untag_user(&self, user_name: &str, tag_keys: Vec<String>) -> ApiResult<()>;

    async fn list_user_tags(&self, user_name: &str) -> ApiResult<Vec<Tag>>;
}
