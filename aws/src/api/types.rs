//! Wire shapes shared by the service clients

use serde::{Deserialize, Serialize};

/// A plain Key/Value tag as most AWS APIs accept it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Resource type AutoScaling expects on every group tag
pub const AUTOSCALING_GROUP_RESOURCE_TYPE: &str = "auto-scaling-group";

/// AutoScaling group tag. Identifies its resource and carries the
/// propagate-at-launch flag alongside the key and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingTag {
    pub resource_id: String,
    pub resource_type: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagate_at_launch: Option<bool>,
}

impl AutoScalingTag {
    pub fn for_group(group_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            resource_id: group_name.into(),
            resource_type: AUTOSCALING_GROUP_RESOURCE_TYPE.to_string(),
            key: key.into(),
            value: None,
            propagate_at_launch: None,
        }
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn with_propagate_at_launch(mut self, propagate: Option<bool>) -> Self {
        self.propagate_at_launch = propagate;
        self
    }
}
