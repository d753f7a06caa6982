//! Reconciler - drives a per-service tag adapter from an old/new TagSet pair
//!
//! The diff is computed once; at most one remove step and one apply step
//! follow, always in that order. How those steps map onto service calls
//! depends on the adapter's [`UpdateMode`].

use crate::error::{Result, ServiceError, ServiceResult, TagPhase, TagsError};
use crate::key_value_tags::{ReconciliationDelta, TagSet};
use crate::reserved::ReservedKeys;
use async_trait::async_trait;
use std::sync::Arc;

/// How a service accepts tag changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Dedicated untag-by-keys and tag-with-pairs calls
    #[default]
    Partial,
    /// Only "set the entire tag set" and "delete all tags" are available
    FullReplace,
    /// Only "create tags" and "delete all tags" are available
    BinaryPresence,
}

/// Per-service tagging calls the reconciler drives.
///
/// Both calls must be idempotent: removing absent keys or applying a set
/// identical to the remote one succeeds.
#[async_trait]
pub trait TagAdapter: Send + Sync {
    /// Remove tags by key. FullReplace and BinaryPresence adapters treat this
    /// as the delete-all call and receive every previously applied key.
    async fn remove_tags(&self, identifier: &str, keys: &[String]) -> ServiceResult<()>;

    /// Add or overwrite the given tags
    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()>;

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Partial
    }

    /// Read back the tags currently applied remotely. Required by FullReplace.
    async fn list_tags(&self, _identifier: &str) -> ServiceResult<TagSet> {
        Ok(TagSet::empty())
    }

    /// Maximum number of tags per call, if the service has one
    fn batch_size(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
impl<A: TagAdapter + ?Sized> TagAdapter for Box<A> {
    async fn remove_tags(&self, identifier: &str, keys: &[String]) -> ServiceResult<()> {
        (**self).remove_tags(identifier, keys).await
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        (**self).apply_tags(identifier, tags).await
    }

    fn update_mode(&self) -> UpdateMode {
        (**self).update_mode()
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        (**self).list_tags(identifier).await
    }

    fn batch_size(&self) -> Option<usize> {
        (**self).batch_size()
    }
}

#[async_trait]
impl<A: TagAdapter + ?Sized> TagAdapter for Arc<A> {
    async fn remove_tags(&self, identifier: &str, keys: &[String]) -> ServiceResult<()> {
        (**self).remove_tags(identifier, keys).await
    }

    async fn apply_tags(&self, identifier: &str, tags: &TagSet) -> ServiceResult<()> {
        (**self).apply_tags(identifier, tags).await
    }

    fn update_mode(&self) -> UpdateMode {
        (**self).update_mode()
    }

    async fn list_tags(&self, identifier: &str) -> ServiceResult<TagSet> {
        (**self).list_tags(identifier).await
    }

    fn batch_size(&self) -> Option<usize> {
        (**self).batch_size()
    }
}

/// Reconciler owns one adapter and the reserved-key policy applied to every
/// outbound apply call
pub struct Reconciler<A> {
    adapter: A,
    reserved: ReservedKeys,
}

impl<A: TagAdapter> Reconciler<A> {
    /// Create a reconciler that reserves the `aws:` namespace
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            reserved: ReservedKeys::default(),
        }
    }

    pub fn with_reserved_keys(mut self, reserved: ReservedKeys) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn reserved_keys(&self) -> &ReservedKeys {
        &self.reserved
    }

    /// Bring the remote tags of `identifier` from `old` to `new`.
    ///
    /// Returns the computed delta. No service call is made when it is empty.
    pub async fn reconcile(
        &self,
        identifier: &str,
        old: &TagSet,
        new: &TagSet,
    ) -> Result<ReconciliationDelta> {
        let delta = old.diff(new);

        if delta.is_empty() {
            tracing::debug!("Tags for {} are up to date", identifier);
            return Ok(delta);
        }

        tracing::debug!(
            "Reconciling tags for {}: {} removed, {} updated",
            identifier,
            delta.removed.len(),
            delta.updated.len()
        );

        match self.adapter.update_mode() {
            UpdateMode::Partial => self.partial_update(identifier, &delta).await?,
            UpdateMode::FullReplace => self.full_replace(identifier, old, new).await?,
            UpdateMode::BinaryPresence => self.binary_presence(identifier, old, new).await?,
        }

        Ok(delta)
    }

    async fn partial_update(&self, identifier: &str, delta: &ReconciliationDelta) -> Result<()> {
        if !delta.removed.is_empty() {
            self.remove(identifier, delta.removed.keys()).await?;
        }

        if !delta.updated.is_empty() {
            self.apply(identifier, &delta.updated).await?;
        }

        Ok(())
    }

    async fn full_replace(&self, identifier: &str, old: &TagSet, new: &TagSet) -> Result<()> {
        let remote = match self.adapter.list_tags(identifier).await {
            Ok(tags) => tags,
            Err(e) if e.is_not_found() => {
                tracing::warn!("No tags found for {}, treating as empty: {}", identifier, e);
                TagSet::empty()
            }
            Err(e) => return Err(TagsError::tagging(identifier, TagPhase::List, e)),
        };

        // Tags set outside Terraform survive the replace
        let ignored = remote.ignore(old).ignore(new);

        let combined = new.merge(&ignored).ignore_reserved(&self.reserved);

        if !combined.is_empty() {
            self.apply(identifier, &combined).await
        } else if !old.is_empty() {
            self.remove(identifier, old.keys()).await
        } else {
            Ok(())
        }
    }

    async fn binary_presence(&self, identifier: &str, old: &TagSet, new: &TagSet) -> Result<()> {
        let desired = new.ignore_reserved(&self.reserved);

        if !desired.is_empty() {
            self.apply(identifier, &desired).await
        } else if !old.is_empty() {
            self.remove(identifier, old.keys()).await
        } else {
            Ok(())
        }
    }

    async fn remove(&self, identifier: &str, keys: Vec<String>) -> Result<()> {
        for batch in keys.chunks(self.chunk_size(keys.len())) {
            tracing::debug!("Removing {} tags from {}", batch.len(), identifier);

            match self.adapter.remove_tags(identifier, batch).await {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {
                    tracing::warn!("Tags already removed from {}: {}", identifier, e);
                    return Ok(());
                }
                Err(e) => return Err(TagsError::tagging(identifier, TagPhase::Remove, e)),
            }
        }

        Ok(())
    }

    async fn apply(&self, identifier: &str, tags: &TagSet) -> Result<()> {
        let tags = tags.ignore_reserved(&self.reserved);
        if tags.is_empty() {
            tracing::debug!("Only reserved tags changed for {}, nothing to apply", identifier);
            return Ok(());
        }

        let batches = match self.adapter.update_mode() {
            UpdateMode::Partial => tags.chunks(self.chunk_size(tags.len())),
            // Replacing in several calls would leave only the last batch
            UpdateMode::FullReplace | UpdateMode::BinaryPresence => vec![tags],
        };

        for batch in &batches {
            tracing::debug!("Applying {} tags to {}", batch.len(), identifier);
            self.adapter
                .apply_tags(identifier, batch)
                .await
                .map_err(|e: ServiceError| TagsError::tagging(identifier, TagPhase::Apply, e))?;
        }

        Ok(())
    }

    fn chunk_size(&self, len: usize) -> usize {
        self.adapter.batch_size().unwrap_or(len).max(1)
    }
}
