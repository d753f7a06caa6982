//! TagSet: the key/value tag collection and its query and transform operations
//!
//! A TagSet is never mutated in place. Every transformation returns a new
//! TagSet, so callers can hold on to the old and new sets of a reconciliation
//! without cloning them first.

use crate::config::{DefaultConfig, IgnoreConfig};
use crate::error::Result;
use crate::reserved::{
    ReservedKeys, AWS_TAG_KEY_PREFIX, ELASTICBEANSTALK_TAG_KEY_PREFIX, NAME_TAG_KEY,
    RDS_TAG_KEY_PREFIX,
};
use crate::source::TagSource;
use crate::tag_data::TagData;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

/// TagSet maps case-sensitive, unique tag keys to their values
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: BTreeMap<String, TagData>,
}

/// The difference needed to move remote tags from an old TagSet to a new one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationDelta {
    /// Keys present in old and absent from new, with their old values
    pub removed: TagSet,
    /// Keys absent from old, or present with a different TagData, with their new values
    pub updated: TagSet,
}

impl ReconciliationDelta {
    /// True when applying the delta would not change anything
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty()
    }
}

impl TagSet {
    /// Construct a TagSet from any supported source shape.
    ///
    /// Fails only when a loosely-typed mapping holds a value that cannot be
    /// coerced to a string. Unrecognized dynamic shapes yield an empty set.
    pub fn new(source: impl Into<TagSource>) -> Result<Self> {
        Ok(Self {
            tags: source.into().resolve()?,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a TagSet of valued tags from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| {
                let key: String = k.into();
                (key, TagData::new(v))
            })
            .collect()
    }

    /// Build a TagSet of valueless tags from bare keys
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        keys.into_iter()
            .map(|k| {
                let key: String = k.into();
                (key, TagData::null())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate tags in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagData)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The set of keys. Sorted, although callers should not rely on order.
    pub fn keys(&self) -> Vec<String> {
        self.tags.keys().cloned().collect()
    }

    /// Plain string mapping; null values become the empty string
    pub fn map(&self) -> HashMap<String, String> {
        self.tags
            .iter()
            .map(|(k, v)| (k.clone(), v.value_or_empty().to_string()))
            .collect()
    }

    /// Drop every key starting with one of `prefixes`
    pub fn ignore_prefixes<I, S>(&self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes: Vec<S> = prefixes.into_iter().collect();
        self.filter(|k, _| !prefixes.iter().any(|p| k.starts_with(p.as_ref())))
    }

    /// Drop every key equal to one of `keys`
    pub fn ignore_keys<I, S>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<S> = keys.into_iter().collect();
        self.filter(|k, _| !keys.iter().any(|i| k == i.as_ref()))
    }

    /// Drop every key the given policy reserves
    pub fn ignore_reserved(&self, reserved: &ReservedKeys) -> Self {
        self.filter(|k, _| !reserved.is_reserved(k))
    }

    /// Drop keys in the `aws:` namespace
    pub fn ignore_aws(&self) -> Self {
        self.ignore_prefixes([AWS_TAG_KEY_PREFIX])
    }

    /// Drop keys Elastic Beanstalk manages
    pub fn ignore_elasticbeanstalk(&self) -> Self {
        self.ignore_prefixes([AWS_TAG_KEY_PREFIX, ELASTICBEANSTALK_TAG_KEY_PREFIX])
            .ignore_keys([NAME_TAG_KEY])
    }

    /// Drop keys RDS manages
    pub fn ignore_rds(&self) -> Self {
        self.ignore_prefixes([AWS_TAG_KEY_PREFIX, RDS_TAG_KEY_PREFIX])
    }

    /// Drop every key present in `other`, regardless of value
    pub fn ignore(&self, other: &TagSet) -> Self {
        self.filter(|k, _| !other.tags.contains_key(k))
    }

    /// Apply the provider's ignore_tags configuration
    pub fn ignore_config(&self, config: Option<&IgnoreConfig>) -> Self {
        let Some(config) = config else {
            return self.clone();
        };

        let mut result = self.clone();
        if let Some(keys) = &config.keys {
            result = result.ignore(keys);
        }
        if let Some(prefixes) = &config.key_prefixes {
            result = result.ignore_prefixes(prefixes.tags.keys());
        }
        result
    }

    /// Keep only keys present in `other`
    pub fn only(&self, other: &TagSet) -> Self {
        self.filter(|k, _| other.tags.contains_key(k))
    }

    /// Union with right bias: on key collision `other` wins
    pub fn merge(&self, other: &TagSet) -> Self {
        let mut tags = self.tags.clone();
        for (k, v) in &other.tags {
            tags.insert(k.clone(), v.clone());
        }
        Self { tags }
    }

    /// Tags in `self` whose keys are absent from `new`
    pub fn removed(&self, new: &TagSet) -> Self {
        self.filter(|k, _| !new.tags.contains_key(k))
    }

    /// Tags in `new` that are absent from `self` or carry different TagData
    pub fn updated(&self, new: &TagSet) -> Self {
        new.filter(|k, v| self.tags.get(k) != Some(v))
    }

    /// Compute the reconciliation delta from `self` (old) to `new`
    pub fn diff(&self, new: &TagSet) -> ReconciliationDelta {
        ReconciliationDelta {
            removed: self.removed(new),
            updated: self.updated(new),
        }
    }

    /// Whether every tag in `target` is present here with equal TagData
    pub fn contains_all(&self, target: &TagSet) -> bool {
        target
            .tags
            .iter()
            .all(|(k, v)| self.tags.get(k) == Some(v))
    }

    /// Split into TagSets of at most `size` tags each
    pub fn chunks(&self, size: usize) -> Vec<TagSet> {
        let size = size.max(1);
        let entries: Vec<(&String, &TagData)> = self.tags.iter().collect();

        entries
            .chunks(size)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|&(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect()
    }

    /// Order-independent hash of keys and values; zero only for the empty set
    pub fn hash_code(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }

        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        match hasher.finish() {
            0 => 1,
            code => code,
        }
    }

    /// URL query encoding (`k1=v%201&k2=v2`), sorted by key; null values skipped
    pub fn url_encode(&self) -> String {
        self.query_pairs(|s| urlencoding::encode(s).replace("%20", "+"))
    }

    /// Unescaped query string (`k1=v 1&k2=v2`), sorted by key; null values skipped
    pub fn url_query_string(&self) -> String {
        self.query_pairs(|s| s.to_string())
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    pub fn key_value(&self, key: &str) -> Option<&str> {
        self.tags.get(key).and_then(|v| v.value.as_deref())
    }

    pub fn key_tag_data(&self, key: &str) -> Option<&TagData> {
        self.tags.get(key)
    }

    pub fn key_additional_bool_value(&self, key: &str, field: &str) -> Option<bool> {
        self.tags
            .get(key)
            .and_then(|v| v.additional_bool_fields.get(field).copied().flatten())
    }

    pub fn key_additional_string_value(&self, key: &str, field: &str) -> Option<&str> {
        self.tags
            .get(key)
            .and_then(|v| v.additional_string_fields.get(field))
            .and_then(|v| v.as_deref())
    }

    /// Drop tags whose key and value both match a provider default tag.
    /// A resource-level override of a default keeps its own value.
    pub fn remove_default_config(&self, config: Option<&DefaultConfig>) -> Self {
        match config {
            Some(config) if !config.tags.is_empty() => {
                self.filter(|k, v| config.tags.tags.get(k) != Some(v))
            }
            _ => self.clone(),
        }
    }

    fn filter<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str, &TagData) -> bool,
    {
        self.tags
            .iter()
            .filter(|(k, v)| keep(k.as_str(), *v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn query_pairs<F>(&self, escape: F) -> String
    where
        F: Fn(&str) -> String,
    {
        self.tags
            .iter()
            .filter_map(|(k, v)| {
                v.value
                    .as_deref()
                    .map(|value| format!("{}={}", escape(k.as_str()), escape(value)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FromIterator<(String, TagData)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (String, TagData)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, String>> for TagSet {
    fn from(m: HashMap<String, String>) -> Self {
        TagSet::from_pairs(m)
    }
}

impl From<HashMap<String, Option<String>>> for TagSet {
    fn from(m: HashMap<String, Option<String>>) -> Self {
        m.into_iter().map(|(k, v)| (k, TagData::from(v))).collect()
    }
}

impl From<BTreeMap<String, TagData>> for TagSet {
    fn from(tags: BTreeMap<String, TagData>) -> Self {
        Self { tags }
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .tags
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect();
        write!(f, "map[{}]", entries.join(" "))
    }
}
