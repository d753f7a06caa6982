//! AutoScaling group tags
//!
//! Every group tag carries a `PropagateAtLaunch` flag next to its value. The
//! flag lives in the TagData auxiliary fields, so flipping it alone counts as
//! an update. Terraform exposes these tags as `tag` blocks with `key`,
//! `value` and `propagate_at_launch` attributes.

use crate::api::{AutoScalingApi, AutoScalingTag, AUTOSCALING_GROUP_RESOURCE_TYPE};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tftags::{
    to_snake_case, Dynamic, ServiceResult, TagAdapter, TagData, TagSet, TagsError, UpdateMode,
};

pub const PROPAGATE_AT_LAUNCH: &str = "PropagateAtLaunch";
pub const RESOURCE_ID: &str = "ResourceId";
pub const RESOURCE_TYPE: &str = "ResourceType";

/// Partial-update adapter for AutoScaling groups, identified by group name
pub struct AutoScalingGroupTags {
    client: Arc<dyn AutoScalingApi>,
}

impl AutoScalingGroupTags {
    pub fn new(client: Arc<dyn AutoScalingApi>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagAdapter for AutoScalingGroupTags {
    async fn remove_tags(&self, identifier: &str, keys: &[String]) -> ServiceResult<()> {
        let tags = keys
            .iter()
            .map(|k| AutoScalingTag::for_group(identifier, k.as_str()))
            .collect();
        self.client.delete_tags(tags).await?;
        Ok(())
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        self.client
            .create_or_update_tags(api_tags(identifier, tags))
            .await?;
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Partial
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        let tags = self.client.describe_tags(identifier).await?;
        Ok(key_value_tags(&tags, identifier))
    }
}

fn group_tag_data(identifier: &str, value: Option<String>, propagate: Option<bool>) -> TagData {
    TagData {
        value,
        ..Default::default()
    }
    .with_bool_field(PROPAGATE_AT_LAUNCH, propagate)
    .with_string_field(RESOURCE_ID, Some(identifier.to_string()))
    .with_string_field(
        RESOURCE_TYPE,
        Some(AUTOSCALING_GROUP_RESOURCE_TYPE.to_string()),
    )
}

/// TagSet from group tags, scoped to the group `identifier`
pub fn key_value_tags(tags: &[AutoScalingTag], identifier: &str) -> TagSet {
    tags.iter()
        .map(|t| {
            (
                t.key.clone(),
                group_tag_data(identifier, t.value.clone(), t.propagate_at_launch),
            )
        })
        .collect()
}

/// Group tags for `identifier` from a TagSet
pub fn api_tags(identifier: &str, tags: &TagSet) -> Vec<AutoScalingTag> {
    tags.iter()
        .map(|(k, v)| {
            AutoScalingTag::for_group(identifier, k)
                .with_value(Some(v.value_or_empty().to_string()))
                .with_propagate_at_launch(Some(
                    tags.key_additional_bool_value(k, PROPAGATE_AT_LAUNCH)
                        .unwrap_or(false),
                ))
        })
        .collect()
}

/// TagSet from Terraform `tag` blocks
pub fn tags_from_list_of_map(list: &Dynamic, identifier: &str) -> tftags::Result<TagSet> {
    let items = match list {
        Dynamic::Null => return Ok(TagSet::empty()),
        Dynamic::List(items) => items,
        other => {
            return Err(TagsError::TypeMismatch {
                key: "tag".to_string(),
                expected: "list".to_string(),
                actual: other.type_name().to_string(),
            })
        }
    };

    let mut tags = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let key = item
            .get("key")
            .and_then(Dynamic::as_string)
            .ok_or_else(|| TagsError::TypeMismatch {
                key: format!("tag[{}].key", idx),
                expected: "string".to_string(),
                actual: item
                    .get("key")
                    .map(Dynamic::type_name)
                    .unwrap_or("null")
                    .to_string(),
            })?;

        let value = item.get("value").and_then(Dynamic::coerce_string);

        let propagate = match item.get("propagate_at_launch") {
            None | Some(Dynamic::Null) => None,
            Some(Dynamic::Bool(b)) => Some(*b),
            Some(Dynamic::String(s)) if s == "true" || s == "false" => Some(s == "true"),
            Some(other) => {
                return Err(TagsError::TypeMismatch {
                    key: format!("tag[{}].propagate_at_launch", idx),
                    expected: "bool".to_string(),
                    actual: other.type_name().to_string(),
                })
            }
        };

        tags.push((key.to_string(), group_tag_data(identifier, value, propagate)));
    }

    Ok(tags.into_iter().collect())
}

/// Terraform `tag` blocks from a TagSet. Auxiliary flags are exposed under
/// their snake_case names, defaulting to false.
pub fn list_of_map(tags: &TagSet) -> Dynamic {
    let blocks = tags
        .iter()
        .map(|(key, data)| {
            let mut block = HashMap::new();
            block.insert("key".to_string(), Dynamic::from(key));
            block.insert("value".to_string(), Dynamic::from(data.value_or_empty()));
            for (field, flag) in &data.additional_bool_fields {
                block.insert(to_snake_case(field), Dynamic::Bool(flag.unwrap_or(false)));
            }
            Dynamic::Map(block)
        })
        .collect();

    Dynamic::List(blocks)
}
