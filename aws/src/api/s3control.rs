use super::error::ApiResult;
use super::types::Tag;
use async_trait::async_trait;

/// S3 Control (Outposts) bucket tagging, addressed by account id and bucket ARN
#[async_trait]
pub trait S3ControlApi: Send + Sync {
    async fn get_bucket_tagging(&self, account_id: &str, bucket_arn: &str) -> ApiResult<Vec<Tag>>;

    async fn put_bucket_tagging(
        &self,
        account_id: &str,
        bucket_arn: &str,
        tags: Vec<Tag>,
    ) -> ApiResult<()>;

    async fn delete_bucket_tagging(&self, account_id: &str, bucket_arn: &str) -> ApiResult<()>;
}
