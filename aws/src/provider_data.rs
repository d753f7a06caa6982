//! Provider data shared by every resource's tag handling

use tftags::{DefaultConfig, IgnoreConfig, TagSet};

/// Tags as stored in Terraform state after a read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateTags {
    /// Tags the resource configuration manages itself
    pub tags: TagSet,
    /// Every visible tag, provider defaults included
    pub tags_all: TagSet,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderData {
    pub default_tags: Option<DefaultConfig>,
    pub ignore_tags: Option<IgnoreConfig>,
}

impl ProviderData {
    pub fn new(default_tags: Option<DefaultConfig>, ignore_tags: Option<IgnoreConfig>) -> Self {
        Self {
            default_tags,
            ignore_tags,
        }
    }

    /// Effective tags to write: provider defaults overlaid by the resource's
    /// own tags
    pub fn desired_tags(&self, resource_tags: &TagSet) -> TagSet {
        match &self.default_tags {
            Some(defaults) => defaults.merge_tags(resource_tags),
            None => resource_tags.clone(),
        }
    }

    /// What Terraform state sees after reading `remote` back from the service
    pub fn state_tags(&self, remote: &TagSet) -> StateTags {
        let tags_all = remote
            .ignore_aws()
            .ignore_config(self.ignore_tags.as_ref());
        let tags = tags_all.remove_default_config(self.default_tags.as_ref());

        StateTags { tags, tags_all }
    }
}
