//! Provider-wide tag configuration
//!
//! `default_tags` are merged into every resource's desired tags before the
//! diff (merge-before-write). `ignore_tags` filter what is read back from the
//! service before it reaches Terraform state (filter-after-read). Both can be
//! set in the provider block and through environment variables.

use crate::error::{Result, TagsError};
use crate::key_value_tags::TagSet;
use crate::types::Dynamic;
use std::collections::HashMap;

/// Each `TF_AWS_DEFAULT_TAGS_<key>=<value>` variable adds one default tag
pub const DEFAULT_TAGS_ENV_VAR_PREFIX: &str = "TF_AWS_DEFAULT_TAGS_";
/// Comma-separated tag keys to ignore
pub const IGNORE_TAGS_KEYS_ENV_VAR: &str = "TF_AWS_IGNORE_TAGS_KEYS";
/// Comma-separated tag key prefixes to ignore
pub const IGNORE_TAGS_KEY_PREFIXES_ENV_VAR: &str = "TF_AWS_IGNORE_TAGS_KEY_PREFIXES";

/// Tags applied to every resource the provider manages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultConfig {
    pub tags: TagSet,
}

impl DefaultConfig {
    /// Effective desired tags: defaults overlaid by the resource's own tags
    pub fn merge_tags(&self, tags: &TagSet) -> TagSet {
        self.tags.merge(tags)
    }

    pub fn tags_equal(&self, tags: &TagSet) -> bool {
        self.tags == *tags
    }

    /// Build from the provider's `default_tags` block and the process environment
    pub fn from_provider_config(block: Option<&Dynamic>) -> Result<Option<Self>> {
        Self::from_sources(block, utf8_env_vars())
    }

    /// Build from a `default_tags` block and an explicit set of environment
    /// variables. Configured tags win over environment tags.
    pub fn from_sources<E>(block: Option<&Dynamic>, env: E) -> Result<Option<Self>>
    where
        E: IntoIterator<Item = (String, String)>,
    {
        let env_tags: HashMap<String, String> = env
            .into_iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(DEFAULT_TAGS_ENV_VAR_PREFIX)
                    .filter(|key| !key.is_empty())
                    .map(|key| (key.to_string(), v))
            })
            .collect();

        let mut tags = TagSet::from(env_tags);

        if let Some(block) = block_object(block, "default_tags")? {
            if let Some(cfg_tags) = block.get("tags").filter(|v| !v.is_null()) {
                if cfg_tags.as_map().is_none() {
                    return Err(TagsError::InvalidConfiguration(format!(
                        "default_tags.tags must be a map, got {}",
                        cfg_tags.type_name()
                    )));
                }
                tags = tags.merge(&TagSet::new(cfg_tags.clone())?);
            }
        }

        if tags.is_empty() {
            return Ok(None);
        }

        tracing::debug!("Configured {} default tags", tags.len());
        Ok(Some(Self { tags }))
    }
}

/// Tags the provider must never report as drift
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgnoreConfig {
    /// Exact keys to ignore
    pub keys: Option<TagSet>,
    /// Key prefixes to ignore, stored as valueless keys
    pub key_prefixes: Option<TagSet>,
}

impl IgnoreConfig {
    /// Build from the provider's `ignore_tags` block and the process environment
    pub fn from_provider_config(block: Option<&Dynamic>) -> Result<Option<Self>> {
        Self::from_sources(
            block,
            std::env::var(IGNORE_TAGS_KEYS_ENV_VAR).ok(),
            std::env::var(IGNORE_TAGS_KEY_PREFIXES_ENV_VAR).ok(),
        )
    }

    /// Build from an `ignore_tags` block plus the raw values of the two
    /// environment variables. Both sources are unioned.
    pub fn from_sources(
        block: Option<&Dynamic>,
        keys_env: Option<String>,
        key_prefixes_env: Option<String>,
    ) -> Result<Option<Self>> {
        let mut keys = TagSet::empty();
        let mut key_prefixes = TagSet::empty();

        if let Some(block) = block_object(block, "ignore_tags")? {
            if let Some(v) = block.get("keys").filter(|v| !v.is_null()) {
                keys = keys.merge(&key_list("ignore_tags.keys", v)?);
            }
            if let Some(v) = block.get("key_prefixes").filter(|v| !v.is_null()) {
                key_prefixes = key_prefixes.merge(&key_list("ignore_tags.key_prefixes", v)?);
            }
        }

        keys = keys.merge(&split_env_list(keys_env.as_deref()));
        key_prefixes = key_prefixes.merge(&split_env_list(key_prefixes_env.as_deref()));

        if keys.is_empty() && key_prefixes.is_empty() {
            return Ok(None);
        }

        tracing::debug!(
            "Configured {} ignored tag keys and {} ignored tag key prefixes",
            keys.len(),
            key_prefixes.len()
        );

        Ok(Some(Self {
            keys: (!keys.is_empty()).then_some(keys),
            key_prefixes: (!key_prefixes.is_empty()).then_some(key_prefixes),
        }))
    }
}

/// Resolve a nested configuration block. Blocks arrive either as an object or
/// as a single-element list of objects.
fn block_object<'a>(
    block: Option<&'a Dynamic>,
    name: &str,
) -> Result<Option<&'a HashMap<String, Dynamic>>> {
    match block {
        None | Some(Dynamic::Null) => Ok(None),
        Some(Dynamic::Map(m)) => Ok(Some(m)),
        Some(Dynamic::List(items)) => match items.as_slice() {
            [] => Ok(None),
            [Dynamic::Map(m)] => Ok(Some(m)),
            [Dynamic::Null] => Ok(None),
            _ => Err(TagsError::InvalidConfiguration(format!(
                "{} must contain at most one object",
                name
            ))),
        },
        Some(other) => Err(TagsError::InvalidConfiguration(format!(
            "{} must be an object, got {}",
            name,
            other.type_name()
        ))),
    }
}

fn key_list(name: &str, value: &Dynamic) -> Result<TagSet> {
    if value.as_list().is_none() {
        return Err(TagsError::InvalidConfiguration(format!(
            "{} must be a set of strings, got {}",
            name,
            value.type_name()
        )));
    }
    TagSet::new(value.clone())
}

/// Process environment, skipping variables whose name or value is not UTF-8
fn utf8_env_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

fn split_env_list(value: Option<&str>) -> TagSet {
    TagSet::from_keys(
        value
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty()),
    )
}
