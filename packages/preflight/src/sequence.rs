//! The orchestrator: an ordered walk over required resources with a
//! whole-sequence dirty flag.

use crate::client::ClusterClient;
use crate::resource::HttpResource;

/// Ordered collection of resources plus the dirty/clean flag.
///
/// Ordering is fixed at construction and is a hard dependency, not an
/// optimization: the version gate must pass before any template is touched,
/// and every template must be settled before the pipeline (pipeline
/// provisioning may depend on template-defined mappings).
///
/// `check_and_publish` takes `&mut self`, so at most one pass can be in
/// flight per sequence — the flag needs no internal lock.
pub struct ResourceSequence {
    resources: Vec<HttpResource>,
    dirty: bool,
}

impl ResourceSequence {
    /// A new sequence starts dirty; nothing is trusted until a full pass
    /// succeeds.
    pub fn new(resources: Vec<HttpResource>) -> Self {
        Self {
            resources,
            dirty: true,
        }
    }

    /// Whether the last full pass failed (or none has run yet).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next pass to re-verify everything from the version gate
    /// onward. Deciding *when* to reset (e.g. on detecting a cluster change)
    /// is the caller's job; nothing in this crate calls this.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Run one reconciliation pass.
    ///
    /// Clean sequences return true immediately with zero network calls.
    /// Otherwise the resources are walked strictly in order, stopping at the
    /// first one that can be neither confirmed nor published; the flag only
    /// flips to clean at the end of a pass in which every resource succeeded.
    ///
    /// Resources confirmed or published before a failure are not rolled
    /// back: the creates are idempotent, so the next pass finds them
    /// confirmed and continues where this one stopped.
    pub async fn check_and_publish(&mut self, client: &dyn ClusterClient) -> bool {
        if !self.dirty {
            tracing::debug!("all resources previously confirmed, skipping checks");
            return true;
        }

        for resource in &self.resources {
            if !resource.proceed(client).await {
                tracing::warn!(resource = resource.name(), "resource could not be confirmed, aborting pass");
                return false;
            }
        }

        self.dirty = false;
        tracing::info!(resources = self.resources.len(), "all cluster resources confirmed");
        true
    }
}
