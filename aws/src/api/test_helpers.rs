//! In-memory service fakes for adapter tests

#![allow(dead_code)]

use super::*;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// One fake standing in for every tagging client. Tags are stored per
/// namespaced resource identifier (`iam:role/app`, `s3:bucket`, ...) and
/// every call is recorded as `"<operation> <identifier>"`.
#[derive(Default)]
pub struct FakeAws {
    tags: Mutex<HashMap<String, BTreeMap<String, String>>>,
    asg_tags: Mutex<Vec<AutoScalingTag>>,
    calls: Mutex<Vec<String>>,
}

impl FakeAws {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn clients(self: &Arc<Self>) -> AwsClients {
        AwsClients::new()
            .with_iam(self.clone())
            .with_s3(self.clone())
            .with_s3control(self.clone())
            .with_workspaces(self.clone())
            .with_inspector(self.clone())
            .with_servicecatalog(self.clone())
            .with_autoscaling(self.clone())
    }

    pub fn seed(&self, id: &str, pairs: &[(&str, &str)]) {
        let tags = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.tags.lock().unwrap().insert(id.to_string(), tags);
    }

    pub fn seed_asg(&self, tags: Vec<AutoScalingTag>) {
        *self.asg_tags.lock().unwrap() = tags;
    }

    pub fn tags_of(&self, id: &str) -> Option<BTreeMap<String, String>> {
        self.tags.lock().unwrap().get(id).cloned()
    }

    pub fn asg_tags(&self) -> Vec<AutoScalingTag> {
        self.asg_tags.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &str, id: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", operation, id));
    }

    fn merge(&self, id: &str, tags: Vec<Tag>) {
        let mut all = self.tags.lock().unwrap();
        let entry = all.entry(id.to_string()).or_default();
        for tag in tags {
            entry.insert(tag.key, tag.value);
        }
    }

    fn replace(&self, id: &str, tags: Vec<Tag>) {
        let tags = tags.into_iter().map(|t| (t.key, t.value)).collect();
        self.tags.lock().unwrap().insert(id.to_string(), tags);
    }

    fn remove(&self, id: &str, keys: &[String]) {
        if let Some(entry) = self.tags.lock().unwrap().get_mut(id) {
            for key in keys {
                entry.remove(key);
            }
        }
    }

    fn clear(&self, id: &str) {
        self.tags.lock().unwrap().remove(id);
    }

    fn list(&self, id: &str) -> Option<Vec<Tag>> {
        self.tags_of(id)
            .map(|tags| tags.into_iter().map(|(k, v)| Tag::new(k, v)).collect())
    }
}

#[async_trait]
impl IamApi for FakeAws {
    async fn tag_role(&self, role_name: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let id = format!("iam:role/{}", role_name);
        self.record("tag_role", &id);
        self.merge(&id, tags);
        Ok(())
    }

    async fn untag_role(&self, role_name: &str, tag_keys: Vec<String>) -> ApiResult<()> {
        let id = format!("iam:role/{}", role_name);
        self.record("untag_role", &id);
        self.remove(&id, &tag_keys);
        Ok(())
    }

    async fn list_role_tags(&self, role_name: &str) -> ApiResult<Vec<Tag>> {
        let id = format!("iam:role/{}", role_name);
        self.record("list_role_tags", &id);
        self.list(&id)
            .ok_or_else(|| ApiError::service(404, "NoSuchEntity", "role not found"))
    }

    async fn tag_user(&self, user_name: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let id = format!("iam:user/{}", user_name);
        self.record("tag_user", &id);
        self.merge(&id, tags);
        Ok(())
    }

    async fn untag_user(&self, user_name: &str, tag_keys: Vec<String>) -> ApiResult<()> {
        let id = format!("iam:user/{}", user_name);
        self.record("untag_user", &id);
        self.remove(&id, &tag_keys);
        Ok(())
    }

    async fn list_user_tags(&self, user_name: &str) -> ApiResult<Vec<Tag>> {
        let id = format!("iam:user/{}", user_name);
        self.record("list_user_tags", &id);
        self.list(&id)
            .ok_or_else(|| ApiError::service(404, "NoSuchEntity", "user not found"))
    }
}

#[async_trait]
impl S3Api for FakeAws {
    async fn get_bucket_tagging(&self, bucket: &str) -> ApiResult<Vec<Tag>> {
        let id = format!("s3:{}", bucket);
        self.record("get_bucket_tagging", &id);
        self.list(&id)
            .ok_or_else(|| ApiError::service(404, "NoSuchTagSet", "The TagSet does not exist"))
    }

    async fn put_bucket_tagging(&self, bucket: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let id = format!("s3:{}", bucket);
        self.record("put_bucket_tagging", &id);
        self.replace(&id, tags);
        Ok(())
    }

    async fn delete_bucket_tagging(&self, bucket: &str) -> ApiResult<()> {
        let id = format!("s3:{}", bucket);
        self.record("delete_bucket_tagging", &id);
        self.clear(&id);
        Ok(())
    }

    async fn get_object_tagging(&self, bucket: &str, key: &str) -> ApiResult<Vec<Tag>> {
        let id = format!("s3:{}/{}", bucket, key);
        self.record("get_object_tagging", &id);
        Ok(self.list(&id).unwrap_or_default())
    }

    async fn put_object_tagging(&self, bucket: &str, key: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let id = format!("s3:{}/{}", bucket, key);
        self.record("put_object_tagging", &id);
        self.replace(&id, tags);
        Ok(())
    }

    async fn delete_object_tagging(&self, bucket: &str, key: &str) -> ApiResult<()> {
        let id = format!("s3:{}/{}", bucket, key);
        self.record("delete_object_tagging", &id);
        self.clear(&id);
        Ok(())
    }
}

#[async_trait]
impl S3ControlApi for FakeAws {
    async fn get_bucket_tagging(&self, account_id: &str, bucket_arn: &str) -> ApiResult<Vec<Tag>> {
        let id = format!("s3control:{}:{}", account_id, bucket_arn);
        self.record("get_bucket_tagging", &id);
        self.list(&id)
            .ok_or_else(|| ApiError::service(404, "NoSuchTagSet", "The TagSet does not exist"))
    }

    async fn put_bucket_tagging(
        &self,
        account_id: &str,
        bucket_arn: &str,
        tags: Vec<Tag>,
    ) -> ApiResult<()> {
        let id = format!("s3control:{}:{}", account_id, bucket_arn);
        self.record("put_bucket_tagging", &id);
        self.replace(&id, tags);
        Ok(())
    }

    async fn delete_bucket_tagging(&self, account_id: &str, bucket_arn: &str) -> ApiResult<()> {
        let id = format!("s3control:{}:{}", account_id, bucket_arn);
        self.record("delete_bucket_tagging", &id);
        self.clear(&id);
        Ok(())
    }
}

#[async_trait]
impl WorkspacesApi for FakeAws {
    async fn describe_tags(&self, resource_id: &str) -> ApiResult<Vec<Tag>> {
        let id = format!("workspaces:{}", resource_id);
        self.record("describe_tags", &id);
        Ok(self.list(&id).unwrap_or_default())
    }

    async fn create_tags(&self, resource_id: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let id = format!("workspaces:{}", resource_id);
        self.record("create_tags", &id);
        self.merge(&id, tags);
        Ok(())
    }

    async fn delete_tags(&self, resource_id: &str, tag_keys: Vec<String>) -> ApiResult<()> {
        let id = format!("workspaces:{}", resource_id);
        self.record("delete_tags", &id);
        self.remove(&id, &tag_keys);
        Ok(())
    }
}

#[async_trait]
impl InspectorApi for FakeAws {
    async fn list_tags_for_resource(&self, resource_arn: &str) -> ApiResult<Vec<Tag>> {
        let id = format!("inspector:{}", resource_arn);
        self.record("list_tags_for_resource", &id);
        Ok(self.list(&id).unwrap_or_default())
    }

    async fn set_tags_for_resource(&self, resource_arn: &str, tags: Vec<Tag>) -> ApiResult<()> {
        let id = format!("inspector:{}", resource_arn);
        self.record("set_tags_for_resource", &id);
        self.replace(&id, tags);
        Ok(())
    }
}

#[async_trait]
impl ServiceCatalogApi for FakeAws {
    async fn update_portfolio(&self, portfolio_id: &str, update: TagUpdate) -> ApiResult<()> {
        let id = format!("servicecatalog:portfolio/{}", portfolio_id);
        self.record("update_portfolio", &id);
        self.remove(&id, &update.remove_tags);
        self.merge(&id, update.add_tags);
        Ok(())
    }

    async fn update_product(&self, product_id: &str, update: TagUpdate) -> ApiResult<()> {
        let id = format!("servicecatalog:product/{}", product_id);
        self.record("update_product", &id);
        self.remove(&id, &update.remove_tags);
        self.merge(&id, update.add_tags);
        Ok(())
    }
}

#[async_trait]
impl AutoScalingApi for FakeAws {
    async fn describe_tags(&self, group_name: &str) -> ApiResult<Vec<AutoScalingTag>> {
        self.record("describe_tags", &format!("autoscaling:{}", group_name));
        Ok(self
            .asg_tags()
            .into_iter()
            .filter(|t| t.resource_id == group_name)
            .collect())
    }

    async fn create_or_update_tags(&self, tags: Vec<AutoScalingTag>) -> ApiResult<()> {
        let mut all = self.asg_tags.lock().unwrap();
        for tag in tags {
            self.record(
                "create_or_update_tags",
                &format!("autoscaling:{}", tag.resource_id),
            );
            all.retain(|t| !(t.resource_id == tag.resource_id && t.key == tag.key));
            all.push(tag);
        }
        Ok(())
    }

    async fn delete_tags(&self, tags: Vec<AutoScalingTag>) -> ApiResult<()> {
        let mut all = self.asg_tags.lock().unwrap();
        for tag in tags {
            self.record("delete_tags", &format!("autoscaling:{}", tag.resource_id));
            all.retain(|t| !(t.resource_id == tag.resource_id && t.key == tag.key));
        }
        Ok(())
    }
}
