//! The resources the reconciler knows how to verify.
//!
//! Two shapes: publishable resources (templates, pipelines) that can be
//! created when missing, and the version gate, which can only pass or block.
//! The sequence walker drives both through [`HttpResource::proceed`].

use bytes::Bytes;

use crate::client::ClusterClient;
use crate::error::PreflightError;
use crate::status::{CheckOutcome, CheckPolicy, PublishOutcome, PublishPolicy};

/// A single named remote artifact that can be checked and, when missing,
/// published. The payload is an opaque blob; this type only transmits it.
pub struct PublishableResource {
    name: String,
    endpoint: String,
    body: Bytes,
    check_policy: CheckPolicy,
    publish_policy: PublishPolicy,
}

impl PublishableResource {
    /// Create a resource with the default policies (200 confirms, 404 means
    /// absent, 200/201 accept a publish).
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            body: body.into(),
            check_policy: CheckPolicy::default(),
            publish_policy: PublishPolicy::default(),
        }
    }

    /// Override the status-code policies for clusters with non-standard
    /// responses.
    pub fn with_policies(mut self, check: CheckPolicy, publish: PublishPolicy) -> Self {
        self.check_policy = check;
        self.publish_policy = publish;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One GET, classified by the check policy. No retries — re-invoking the
    /// whole pass is the caller's retry mechanism.
    pub async fn check(&self, client: &dyn ClusterClient) -> CheckOutcome {
        self.check_policy.classify(client.get(&self.endpoint).await)
    }

    /// Check, then publish only if the check reported the resource missing.
    ///
    /// A failed check means the remote state is unknowable, so no PUT is
    /// attempted. Returns true iff the resource ended the call confirmed or
    /// freshly published.
    pub async fn check_and_publish(&self, client: &dyn ClusterClient) -> bool {
        match self.check(client).await {
            CheckOutcome::Confirmed => {
                tracing::debug!(resource = %self.name, "already present, skipping publish");
                true
            }
            CheckOutcome::Missing => {
                tracing::info!(resource = %self.name, endpoint = %self.endpoint, "missing, publishing");
                match self
                    .publish_policy
                    .classify(client.put(&self.endpoint, self.body.clone()).await)
                {
                    PublishOutcome::Published => {
                        tracing::info!(resource = %self.name, "published");
                        true
                    }
                    PublishOutcome::Failed(err) => {
                        tracing::warn!(resource = %self.name, error = %err, "publish failed");
                        false
                    }
                }
            }
            CheckOutcome::Failed(err) => {
                tracing::warn!(resource = %self.name, error = %err, "check failed");
                false
            }
        }
    }
}

/// Gate on the cluster's reported version.
///
/// GETs the root endpoint, pulls `version.number` out of the JSON body, and
/// passes iff the supplied compatibility predicate accepts it. There is no
/// "missing" here and nothing to publish — an incompatible cluster is
/// unrecoverable by this system.
pub struct VersionGate {
    check_policy: CheckPolicy,
    compatible: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

impl VersionGate {
    pub fn new(compatible: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            // No absent set: the root endpoint either answers 200 or the
            // cluster is unusable.
            check_policy: CheckPolicy {
                acceptable: vec![200],
                absent: vec![],
            },
            compatible: Box::new(compatible),
        }
    }

    pub fn name(&self) -> &str {
        "cluster-version"
    }

    pub async fn check(&self, client: &dyn ClusterClient) -> bool {
        let result = client.get("/").await;
        let body = match &result {
            Ok(resp) => resp.body.clone(),
            Err(_) => Bytes::new(),
        };

        match self.check_policy.classify(result) {
            CheckOutcome::Confirmed => {}
            CheckOutcome::Missing | CheckOutcome::Failed(_) => {
                tracing::warn!("version endpoint could not be read");
                return false;
            }
        }

        let reported = match parse_reported_version(&body) {
            Some(reported) => reported,
            None => {
                tracing::warn!("version endpoint returned an unparseable body");
                return false;
            }
        };

        if (self.compatible)(&reported) {
            tracing::debug!(version = %reported, "cluster version accepted");
            true
        } else {
            let err = PreflightError::IncompatibleVersion { reported };
            tracing::warn!(error = %err, "cluster version rejected");
            false
        }
    }
}

/// Pull `version.number` out of a root-endpoint body.
fn parse_reported_version(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("version")?
        .get("number")?
        .as_str()
        .map(str::to_owned)
}

/// The resource kinds the sequence walks, dispatched uniformly.
pub enum HttpResource {
    Version(VersionGate),
    Template(PublishableResource),
    Pipeline(PublishableResource),
}

impl HttpResource {
    pub fn name(&self) -> &str {
        match self {
            HttpResource::Version(gate) => gate.name(),
            HttpResource::Template(resource) | HttpResource::Pipeline(resource) => resource.name(),
        }
    }

    /// True iff this resource is in a state that allows the walk to continue:
    /// version compatible, or resource confirmed/published.
    pub async fn proceed(&self, client: &dyn ClusterClient) -> bool {
        match self {
            HttpResource::Version(gate) => gate.check(client).await,
            HttpResource::Template(resource) | HttpResource::Pipeline(resource) => {
                resource.check_and_publish(client).await
            }
        }
    }
}
