use super::{api_tags, key_value_tags};
use crate::api::InspectorApi;
use async_trait::async_trait;
use std::sync::Arc;
use tftags::{ServiceResult, TagAdapter, TagSet, UpdateMode};

/// Binary-presence adapter for Inspector assessment templates, identified by
/// ARN. One replace-all call covers both directions.
pub struct InspectorTags {
    client: Arc<dyn InspectorApi>,
}

impl InspectorTags {
    pub fn new(client: Arc<dyn InspectorApi>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagAdapter for InspectorTags {
    async fn remove_tags(&self, identifier: &str, _keys: &[String]) -> ServiceResult<()> {
        self.client
            .set_tags_for_resource(identifier, Vec::new())
            .await?;
        Ok(())
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        self.client
            .set_tags_for_resource(identifier, api_tags(tags))
            .await?;
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::BinaryPresence
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        let tags = self.client.list_tags_for_resource(identifier).await?;
        Ok(key_value_tags(tags))
    }
}
