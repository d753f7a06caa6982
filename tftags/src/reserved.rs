//! Reserved tag key namespaces
//!
//! Some key namespaces are managed by the platform and are rejected (or
//! silently owned) by the service APIs. They must never be sent in an
//! add/update call. The policy is a plain value handed to the reconciler so
//! each service, and each test, can pick its own.

/// Namespace AWS reserves for its own tags on every service
pub const AWS_TAG_KEY_PREFIX: &str = "aws:";
/// Namespace Elastic Beanstalk manages on environment resources
pub const ELASTICBEANSTALK_TAG_KEY_PREFIX: &str = "elasticbeanstalk:";
/// Namespace RDS manages on database resources
pub const RDS_TAG_KEY_PREFIX: &str = "rds:";
/// Literal key some services set and own themselves
pub const NAME_TAG_KEY: &str = "Name";

/// ReservedKeys is a set of excluded key prefixes plus excluded literal keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedKeys {
    prefixes: Vec<String>,
    keys: Vec<String>,
}

impl ReservedKeys {
    pub fn new<P, K>(prefixes: P, keys: K) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// No reserved keys at all
    pub fn none() -> Self {
        Self {
            prefixes: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// The `aws:` namespace, reserved on every AWS service
    pub fn aws() -> Self {
        Self::new([AWS_TAG_KEY_PREFIX], Vec::<String>::new())
    }

    pub fn elasticbeanstalk() -> Self {
        Self::new(
            [AWS_TAG_KEY_PREFIX, ELASTICBEANSTALK_TAG_KEY_PREFIX],
            [NAME_TAG_KEY],
        )
    }

    pub fn rds() -> Self {
        Self::new([AWS_TAG_KEY_PREFIX, RDS_TAG_KEY_PREFIX], Vec::<String>::new())
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_reserved(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key) || self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self::aws()
    }
}
