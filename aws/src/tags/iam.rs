use super::{api_tags, key_value_tags};
use crate::api::IamApi;
use async_trait::async_trait;
use std::sync::Arc;
use tftags::{ServiceResult, TagAdapter, TagSet, UpdateMode};

/// IAM accepts at most 50 tags or tag keys per call
pub const IAM_TAGS_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IamResource {
    Role,
    User,
}

/// Partial-update adapter for IAM roles and users, identified by name
pub struct IamTags {
    client: Arc<dyn IamApi>,
    resource: IamResource,
}

impl IamTags {
    pub fn role(client: Arc<dyn IamApi>) -> Self {
        Self {
            client,
            resource: IamResource::Role,
        }
    }

    pub fn user(client: Arc<dyn IamApi>) -> Self {
        Self {
            client,
            resource: IamResource::User,
        }
    }

    pub fn resource(&self) -> IamResource {
        self.resource
    }
}

#[async_trait]
impl TagAdapter for IamTags {
    async fn remove_tags(&self, identifier: &str, keys: &[String]) -> ServiceResult<()> {
        let keys = keys.to_vec();
        match self.resource {
            IamResource::Role => self.client.untag_role(identifier, keys).await?,
            IamResource::User => self.client.untag_user(identifier, keys).await?,
        }
        Ok(())
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        let tags = api_tags(tags);
        match self.resource {
            IamResource::Role => self.client.tag_role(identifier, tags).await?,
            IamResource::User => self.client.tag_user(identifier, tags).await?,
        }
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Partial
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        let tags = match self.resource {
            IamResource::Role => self.client.list_role_tags(identifier).await?,
            IamResource::User => self.client.list_user_tags(identifier).await?,
        };
        Ok(key_value_tags(tags))
    }

    fn batch_size(&self) -> Option<usize> {
        Some(IAM_TAGS_BATCH_SIZE)
    }
}
