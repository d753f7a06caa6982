use super::api_tags;
use crate::api::{ServiceCatalogApi, TagUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use tftags::{ServiceResult, TagAdapter, TagSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCatalogResource {
    Portfolio,
    Product,
}

/// Partial-update adapter for Service Catalog portfolios and products.
/// Tag changes are sent through the resource's own update call.
pub struct ServiceCatalogTags {
    client: Arc<dyn ServiceCatalogApi>,
    resource: ServiceCatalogResource,
}

impl ServiceCatalogTags {
    pub fn portfolio(client: Arc<dyn ServiceCatalogApi>) -> Self {
        Self {
            client,
            resource: ServiceCatalogResource::Portfolio,
        }
    }

    pub fn product(client: Arc<dyn ServiceCatalogApi>) -> Self {
        Self {
            client,
            resource: ServiceCatalogResource::Product,
        }
    }

    async fn update(&self, identifier: &str, update: TagUpdate) -> ServiceResult<()> {
        match self.resource {
            ServiceCatalogResource::Portfolio => {
                self.client.update_portfolio(identifier, update).await?
            }
            ServiceCatalogResource::Product => self.client.update_product(identifier, update).await?,
        }
        Ok(())
    }
}

#[async_trait]
impl TagAdapter for ServiceCatalogTags {
    async fn remove_tags(&self, identifier: &str, keys: &[String]) -> ServiceResult<()> {
        let update = TagUpdate {
            remove_tags: keys.to_vec(),
            ..Default::default()
        };
        self.update(identifier, update).await
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        let update = TagUpdate {
            add_tags: api_tags(tags),
            ..Default::default()
        };
        self.update(identifier, update).await
    }
}
