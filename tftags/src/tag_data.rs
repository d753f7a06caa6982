//! Per-key tag value

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// TagData is the value side of one tag.
///
/// Most services only carry `value`. Some attach auxiliary per-tag fields
/// (AutoScaling's `PropagateAtLaunch`, for instance); those live in the
/// additional field maps and take part in equality, so a change to an
/// auxiliary field alone is a change to the tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagData {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_bool_fields: BTreeMap<String, Option<bool>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_string_fields: BTreeMap<String, Option<String>>,
    pub value: Option<String>,
}

impl TagData {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// A tag with no value
    pub fn null() -> Self {
        Self::default()
    }

    pub fn with_bool_field(mut self, name: impl Into<String>, value: Option<bool>) -> Self {
        self.additional_bool_fields.insert(name.into(), value);
        self
    }

    pub fn with_string_field(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.additional_string_fields.insert(name.into(), value);
        self
    }

    /// Value with null coerced to the empty string
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// True when neither a value nor any auxiliary field is set
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
            && self.additional_bool_fields.is_empty()
            && self.additional_string_fields.is_empty()
    }
}

impl From<&str> for TagData {
    fn from(value: &str) -> Self {
        TagData::new(value)
    }
}

impl From<String> for TagData {
    fn from(value: String) -> Self {
        TagData::new(value)
    }
}

impl From<Option<String>> for TagData {
    fn from(value: Option<String>) -> Self {
        TagData {
            value,
            ..Default::default()
        }
    }
}

impl fmt::Display for TagData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        let mut fields = Vec::new();

        if !self.additional_bool_fields.is_empty() {
            let entries: Vec<String> = self
                .additional_bool_fields
                .iter()
                .map(|(k, v)| format!("{}:{}", k, v.unwrap_or(false)))
                .collect();
            fields.push(format!("AdditionalBoolFields: map[{}]", entries.join(" ")));
        }

        if !self.additional_string_fields.is_empty() {
            let entries: Vec<String> = self
                .additional_string_fields
                .iter()
                .map(|(k, v)| format!("{}:{}", k, v.as_deref().unwrap_or_default()))
                .collect();
            fields.push(format!("AdditionalStringFields: map[{}]", entries.join(" ")));
        }

        if let Some(value) = &self.value {
            fields.push(format!("Value: {}", value));
        }

        write!(f, "TagData{{{}}}", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_data_equality_covers_value_and_auxiliary_fields() {
        let cases = vec![
            ("same value", TagData::new("value1"), TagData::new("value1"), true),
            ("differing value", TagData::new("value1"), TagData::new("value2"), false),
            (
                "differing additional bool fields",
                TagData::new("value1").with_bool_field("field1", Some(true)),
                TagData::new("value1").with_bool_field("field2", Some(true)),
                false,
            ),
            (
                "differing additional bool field values",
                TagData::new("value1").with_bool_field("field1", Some(true)),
                TagData::new("value1").with_bool_field("field1", Some(false)),
                false,
            ),
            (
                "differing additional string field values",
                TagData::new("value1").with_string_field("field1", Some("a".into())),
                TagData::new("value1").with_string_field("field1", Some("b".into())),
                false,
            ),
            (
                "same additional bool fields",
                TagData::new("value1").with_bool_field("field1", Some(true)),
                TagData::new("value1").with_bool_field("field1", Some(true)),
                true,
            ),
            ("both null", TagData::null(), TagData::null(), true),
            ("null versus empty", TagData::null(), TagData::new(""), false),
        ];

        for (name, a, b, want) in cases {
            assert_eq!(a == b, want, "{}", name);
        }
    }

    #[test]
    fn tag_data_display() {
        assert_eq!(TagData::null().to_string(), "");
        assert_eq!(TagData::new("value1").to_string(), "TagData{Value: value1}");
        assert_eq!(
            TagData::new("value1")
                .with_bool_field("field1", Some(true))
                .to_string(),
            "TagData{AdditionalBoolFields: map[field1:true], Value: value1}"
        );
        assert_eq!(
            TagData::new("value1")
                .with_string_field("field1", Some("field1value".into()))
                .to_string(),
            "TagData{AdditionalStringFields: map[field1:field1value], Value: value1}"
        );
    }

    #[test]
    fn value_or_empty_coerces_null() {
        assert_eq!(TagData::null().value_or_empty(), "");
        assert_eq!(TagData::new("v").value_or_empty(), "v");
    }
}
