use super::error::ApiResult;
use super::types::Tag;
use async_trait::async_trait;

/// S3 bucket and object tagging. Every put replaces the whole tag set.
#[async_trait]
pub trait S3Api: Send + Sync {
    /// Fails with `NoSuchTagSet` when the bucket has never been tagged
    async fn get_bucket_tagging(&self, bucket: &str) -> ApiResult<Vec<Tag>>;

    async fn put_bucket_tagging(&self, bucket: &str, tags: Vec<Tag>) -> ApiResult<()>;

    async fn delete_bucket_tagging(&self, bucket: &str) -> ApiResult<()>;

    async fn get_object_tagging(&self, bucket: &str, key: &str) -> ApiResult<Vec<Tag>>;

    async fn put_object_tagging(&self, bucket: &str, key: &str, tags: Vec<Tag>) -> ApiResult<()>;

    async fn delete_object_tagging(&self, bucket: &str, key: &str) -> ApiResult<()>;
}
