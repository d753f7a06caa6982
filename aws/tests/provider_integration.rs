//! Provider tag lifecycle: configure, write desired tags, read them back

#![allow(clippy::disallowed_methods)] // Allow unwrap() in tests for clarity

use async_trait::async_trait;
use aws_tags::api::{ApiError, ApiResult, IamApi, S3Api, Tag};
use aws_tags::tags::key_value_tags;
use aws_tags::{AwsClients, AwsProvider};
use serial_test::serial;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tftags::{Dynamic, TagAdapter, TagSet};
use tokio_test::{assert_err, assert_ok};

/// Bucket and role tags kept in memory, keyed by name
#[derive(Default)]
struct MemoryTags {
    buckets: Mutex<HashMap<String, BTreeMap<String, String>>>,
    roles: Mutex<HashMap<String, BTreeMap<String, String>>>,
}

impl MemoryTags {
    fn bucket(&self, name: &str) -> Option<BTreeMap<String, String>> {
        self.buckets.lock().unwrap().get(name).cloned()
    }

    fn set_bucket(&self, name: &str, pairs: &[(&str, &str)]) {
        let tags = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.buckets.lock().unwrap().insert(name.to_string(), tags);
    }
}

fn to_tags(map: &BTreeMap<String, String>) -> Vec<Tag> {
    map.iter().map(|(k, v)| Tag::new(k.clone(), v.clone())).collect()
}

#[async_trait]
impl S3Api for MemoryTags {
    async fn get_bucket_tagging(&self, bucket: &str) -> ApiResult<Vec<Tag>> {
        self.bucket(bucket)
            .map(|m| to_tags(&m))
            .ok_or_else(|| ApiError::service(404, "NoSuchTagSet", "The TagSet does not exist"))
    }

    async fn put_bucket_tagging(&self, bucket: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let tags = tags.into_iter().map(|t| (t.key, t.value)).collect();
        self.buckets.lock().unwrap().insert(bucket.to_string(), tags);
        Ok(())
    }

    async fn delete_bucket_tagging(&self, bucket: &str) -> ApiResult<()> {
        self.buckets.lock().unwrap().remove(bucket);
        Ok(())
    }

    async fn get_object_tagging(&self, _bucket: &str, _key: &str) -> ApiResult<Vec<Tag>> {
        Err(ApiError::Transport("objects not supported".to_string()))
    }

    async fn put_object_tagging(&self, _bucket: &str, _key: &str, _tags: Vec<Tag>) -> ApiResult<()> {
        Err(ApiError::Transport("objects not supported".to_string()))
    }

    async fn delete_object_tagging(&self, _bucket: &str, _key: &str) -> ApiResult<()> {
        Err(ApiError::Transport("objects not supported".to_string()))
    }
}

#[async_trait]
impl IamApi for MemoryTags {
    async fn tag_role(&self, role_name: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let mut roles = self.roles.lock().unwrap();
        let role = roles
            .get_mut(role_name)
            .ok_or_else(|| ApiError::service(404, "NoSuchEntity", "role not found"))?;
        for tag in tags {
            role.insert(tag.key, tag.value);
        }
        Ok(())
    }

    async fn untag_role(&self, role_name: &str, tag_keys: Vec<String>) -> ApiResult<()> {
        let mut roles = self.roles.lock().unwrap();
        let role = roles
            .get_mut(role_name)
            .ok_or_else(|| ApiError::service(404, "NoSuchEntity", "role not found"))?;
        for key in tag_keys {
            role.remove(&key);
        }
        Ok(())
    }

    async fn list_role_tags(&self, role_name: &str) -> ApiResult<Vec<Tag>> {
        self.roles
            .lock()
            .unwrap()
            .get(role_name)
            .map(to_tags)
            .ok_or_else(|| ApiError::service(404, "NoSuchEntity", "role not found"))
    }

    async fn tag_user(&self, _user_name: &str, _tags: Vec<Tag>) -> ApiResult<()> {
        Err(ApiError::service(403, "AccessDenied", "users are off limits"))
    }

    async fn untag_user(&self, _user_name: &str, _tag_keys: Vec<String>) -> ApiResult<()> {
        Err(ApiError::service(403, "AccessDenied", "users are off limits"))
    }

    async fn list_user_tags(&self, _user_name: &str) -> ApiResult<Vec<Tag>> {
        Err(ApiError::service(403, "AccessDenied", "users are off limits"))
    }
}

fn configured_provider(memory: &Arc<MemoryTags>) -> AwsProvider {
    let clients = AwsClients::new()
        .with_s3(memory.clone())
        .with_iam(memory.clone());
    let mut provider = AwsProvider::with_clients(clients);

    let config = Dynamic::from_json(
        r#"{
            "default_tags": [{"tags": {"env": "prod", "owner": "platform"}}],
            "ignore_tags": [{"key_prefixes": ["kubernetes.io/"]}]
        }"#,
    )
    .unwrap();
    let diags = provider.configure(&config);
    assert!(!diags.has_errors(), "{:?}", diags.errors);
    provider
}

fn tags(pairs: &[(&str, &str)]) -> TagSet {
    TagSet::from_pairs(pairs.iter().copied())
}

#[tokio::test]
#[serial]
async fn bucket_lifecycle_without_drift() {
    let memory = Arc::new(MemoryTags::default());
    let provider = configured_provider(&memory);
    let data = provider.provider_data().unwrap().clone();
    let reconciler = provider.tag_reconciler("aws_s3_bucket").unwrap();

    // Another tool tags the bucket before Terraform touches it
    memory.set_bucket("logs", &[("kubernetes.io/cluster/main", "owned")]);

    // Create
    let configured = tags(&[("app", "web"), ("env", "dev")]);
    let desired = data.desired_tags(&configured);
    assert_ok!(reconciler.reconcile("logs", &TagSet::empty(), &desired).await);

    let remote = memory.bucket("logs").unwrap();
    assert_eq!(remote["env"], "dev");
    assert_eq!(remote["owner"], "platform");
    assert_eq!(remote["kubernetes.io/cluster/main"], "owned");

    // Read
    let listed = reconciler.adapter().list_tags("logs").await.unwrap();
    let state = data.state_tags(&listed);
    assert_eq!(state.tags, configured);
    assert_eq!(state.tags_all, desired);

    // Update: drop app
    let configured = tags(&[("env", "dev")]);
    let new_desired = data.desired_tags(&configured);
    let delta = assert_ok!(
        reconciler
            .reconcile("logs", &state.tags_all, &new_desired)
            .await
    );
    assert_eq!(delta.removed.keys(), vec!["app".to_string()]);
    assert!(!memory.bucket("logs").unwrap().contains_key("app"));
    assert!(memory
        .bucket("logs")
        .unwrap()
        .contains_key("kubernetes.io/cluster/main"));

    // Unchanged plan makes no calls and leaves remote tags alone
    let before = memory.bucket("logs");
    assert_ok!(
        reconciler
            .reconcile("logs", &new_desired, &new_desired)
            .await
    );
    assert_eq!(memory.bucket("logs"), before);
}

#[tokio::test]
#[serial]
async fn untagged_bucket_is_read_as_empty() {
    let memory = Arc::new(MemoryTags::default());
    let provider = configured_provider(&memory);
    let reconciler = provider.tag_reconciler("aws_s3_bucket").unwrap();

    let err = reconciler
        .adapter()
        .list_tags("never-tagged")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // The reconciler treats the missing tag set as empty and deletes nothing extra
    assert_ok!(
        reconciler
            .reconcile("never-tagged", &tags(&[("a", "1")]), &TagSet::empty())
            .await
    );
    assert!(memory.bucket("never-tagged").is_none());
}

#[tokio::test]
#[serial]
async fn role_tags_surface_service_errors() {
    let memory = Arc::new(MemoryTags::default());
    memory
        .roles
        .lock()
        .unwrap()
        .insert("app".to_string(), BTreeMap::new());
    let provider = configured_provider(&memory);

    let roles = provider.tag_reconciler("aws_iam_role").unwrap();
    assert_ok!(
        roles
            .reconcile("app", &TagSet::empty(), &tags(&[("team", "core")]))
            .await
    );
    let listed = key_value_tags(memory.list_role_tags("app").await.unwrap());
    assert_eq!(listed, tags(&[("team", "core")]));

    let users = provider.tag_reconciler("aws_iam_user").unwrap();
    let err = assert_err!(
        users
            .reconcile("bob", &TagSet::empty(), &tags(&[("team", "core")]))
            .await
    );
    assert!(err.to_string().contains("tagging resource (bob)"));
    assert!(err.to_string().contains("users are off limits"));
}
