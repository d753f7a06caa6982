use super::{api_tags, key_value_tags};
use crate::api::WorkspacesApi;
use async_trait::async_trait;
use std::sync::Arc;
use tftags::{ServiceResult, TagAdapter, TagSet, UpdateMode};

/// Binary-presence adapter for WorkSpaces resources, identified by resource id.
///
/// `create_tags` only adds or overwrites, so keys dropped from a non-empty
/// desired set stay on the workspace until every tag is removed.
pub struct WorkspacesTags {
    client: Arc<dyn WorkspacesApi>,
}

impl WorkspacesTags {
    pub fn new(client: Arc<dyn WorkspacesApi>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagAdapter for WorkspacesTags {
    async fn remove_tags(&self, identifier: &str, keys: &[String]) -> ServiceResult<()> {
        self.client.delete_tags(identifier, keys.to_vec()).await?;
        Ok(())
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        self.client.create_tags(identifier, api_tags(tags)).await?;
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::BinaryPresence
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        let tags = self.client.describe_tags(identifier).await?;
        Ok(key_value_tags(tags))
    }
}
