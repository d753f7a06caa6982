//! Loosely-typed configuration values
//!
//! Provider and resource configuration reaches the tag engine as dynamically
//! typed values whose shape was validated earlier in the pipeline. `Dynamic`
//! is that value model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dynamic represents a configuration value of any Terraform type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dynamic {
    /// Explicit null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (all numbers are f64 to match Terraform)
    Number(f64),
    /// String value
    String(String),
    /// List or set of values
    List(Vec<Dynamic>),
    /// Map of string keys to values (objects are represented as maps)
    Map(HashMap<String, Dynamic>),
}

impl Dynamic {
    /// Parse a JSON document into a dynamic value
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Dynamic>> {
        match self {
            Dynamic::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up an attribute of an object value
    pub fn get(&self, name: &str) -> Option<&Dynamic> {
        self.as_map().and_then(|m| m.get(name))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
        }
    }

    /// String form of a scalar, following Terraform's primitive conversions.
    /// Returns `None` for null and for collections.
    pub fn coerce_string(&self) -> Option<String> {
        match self {
            Dynamic::String(s) => Some(s.clone()),
            Dynamic::Bool(b) => Some(b.to_string()),
            Dynamic::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            Dynamic::Number(n) => Some(n.to_string()),
            Dynamic::Null | Dynamic::List(_) | Dynamic::Map(_) => None,
        }
    }
}

impl From<&str> for Dynamic {
    fn from(s: &str) -> Self {
        Dynamic::String(s.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(s: String) -> Self {
        Dynamic::String(s)
    }
}

impl From<bool> for Dynamic {
    fn from(b: bool) -> Self {
        Dynamic::Bool(b)
    }
}
