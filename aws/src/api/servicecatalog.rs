use super::error::ApiResult;
use super::types::Tag;
use async_trait::async_trait;

/// Tag changes ride along the Service Catalog update calls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagUpdate {
    pub add_tags: Vec<Tag>,
    pub remove_tags: Vec<String>,
}

#[async_trait]
pub trait ServiceCatalogApi: Send + Sync {
    async fn update_portfolio(&self, portfolio_id: &str, update: TagUpdate) -> ApiResult<()>;

    async fn update_product(&self, product_id: &str, update: TagUpdate) -> ApiResult<()>;
}
