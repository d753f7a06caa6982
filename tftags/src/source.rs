//! Input shapes a TagSet can be constructed from
//!
//! Callers hand over tags in whatever shape their configuration or API
//! response uses. Each shape is one variant; all of them resolve to the same
//! canonical `key -> TagData` representation.

use crate::error::{Result, TagsError};
use crate::key_value_tags::TagSet;
use crate::tag_data::TagData;
use crate::types::Dynamic;
use std::collections::{BTreeMap, HashMap};

/// TagSource is one of the supported construction inputs
#[derive(Debug, Clone, PartialEq)]
pub enum TagSource {
    /// Flat string to string mapping
    StringMap(HashMap<String, String>),
    /// String to optional string mapping; `None` is a valueless tag
    OptionalStringMap(HashMap<String, Option<String>>),
    /// Loosely-typed mapping; values must be string-coercible
    DynamicMap(HashMap<String, Dynamic>),
    /// Bare keys, each assigned a null value
    KeyList(Vec<String>),
    /// Fully described tags, auxiliary fields included
    TagDataMap(BTreeMap<String, TagData>),
    /// A value whose shape is only known at runtime
    Dynamic(Dynamic),
}

impl TagSource {
    /// Resolve into the canonical representation
    pub(crate) fn resolve(self) -> Result<BTreeMap<String, TagData>> {
        match self {
            TagSource::StringMap(m) => Ok(m
                .into_iter()
                .map(|(k, v)| (k, TagData::new(v)))
                .collect()),
            TagSource::OptionalStringMap(m) => Ok(m
                .into_iter()
                .map(|(k, v)| (k, TagData::from(v)))
                .collect()),
            TagSource::DynamicMap(m) => resolve_dynamic_map(&m),
            TagSource::KeyList(keys) => Ok(keys.into_iter().map(|k| (k, TagData::null())).collect()),
            TagSource::TagDataMap(m) => Ok(m),
            TagSource::Dynamic(value) => match value {
                Dynamic::Map(m) => resolve_dynamic_map(&m),
                Dynamic::List(items) => resolve_dynamic_list(&items),
                other => {
                    tracing::trace!(
                        "Unrecognized tag source shape {}, treating as no tags",
                        other.type_name()
                    );
                    Ok(BTreeMap::new())
                }
            },
        }
    }
}

fn resolve_dynamic_map(m: &HashMap<String, Dynamic>) -> Result<BTreeMap<String, TagData>> {
    let mut tags = BTreeMap::new();

    for (k, v) in m {
        let data = match v {
            Dynamic::Null => TagData::null(),
            Dynamic::List(_) | Dynamic::Map(_) => {
                return Err(TagsError::TypeMismatch {
                    key: k.clone(),
                    expected: "string".to_string(),
                    actual: v.type_name().to_string(),
                })
            }
            scalar => TagData::from(scalar.coerce_string()),
        };
        tags.insert(k.clone(), data);
    }

    Ok(tags)
}

fn resolve_dynamic_list(items: &[Dynamic]) -> Result<BTreeMap<String, TagData>> {
    let mut tags = BTreeMap::new();

    for (idx, item) in items.iter().enumerate() {
        let key = item.as_string().ok_or_else(|| TagsError::TypeMismatch {
            key: format!("[{}]", idx),
            expected: "string".to_string(),
            actual: item.type_name().to_string(),
        })?;
        tags.insert(key.to_string(), TagData::null());
    }

    Ok(tags)
}

impl From<HashMap<String, String>> for TagSource {
    fn from(m: HashMap<String, String>) -> Self {
        TagSource::StringMap(m)
    }
}

impl From<HashMap<String, Option<String>>> for TagSource {
    fn from(m: HashMap<String, Option<String>>) -> Self {
        TagSource::OptionalStringMap(m)
    }
}

impl From<HashMap<String, Dynamic>> for TagSource {
    fn from(m: HashMap<String, Dynamic>) -> Self {
        TagSource::DynamicMap(m)
    }
}

impl From<Vec<String>> for TagSource {
    fn from(keys: Vec<String>) -> Self {
        TagSource::KeyList(keys)
    }
}

impl From<Vec<&str>> for TagSource {
    fn from(keys: Vec<&str>) -> Self {
        TagSource::KeyList(keys.into_iter().map(String::from).collect())
    }
}

impl From<BTreeMap<String, TagData>> for TagSource {
    fn from(m: BTreeMap<String, TagData>) -> Self {
        TagSource::TagDataMap(m)
    }
}

impl From<Dynamic> for TagSource {
    fn from(value: Dynamic) -> Self {
        TagSource::Dynamic(value)
    }
}

impl From<&TagSet> for TagSource {
    fn from(tags: &TagSet) -> Self {
        TagSource::TagDataMap(
            tags.iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }
}
