//! Pre-flight reconciliation of remote cluster resources.
//!
//! Before a telemetry exporter is allowed to ship data to a cluster, the
//! index templates and the ingest pipeline it writes into must exist and be
//! valid. This crate walks an ordered set of required resources — version
//! gate first, then each template, then the pipeline — checking each one and
//! publishing it when it is missing, and aborts the pass at the first
//! resource that can be neither confirmed nor repaired.
//!
//! A whole-sequence dirty flag makes repeated invocations cheap: once every
//! resource has been confirmed, further passes are no-ops until the caller
//! explicitly marks the sequence dirty again (e.g. after detecting that the
//! cluster changed).
//!
//! # Example
//!
//! ```rust,ignore
//! use preflight::{HttpClusterClient, PipelineDefinition, ResourceRegistry,
//!                 TemplateDefinition, version};
//!
//! let mut registry = ResourceRegistry::new(PipelineDefinition::new("telemetry", pipeline_json));
//! registry.register_template(TemplateDefinition::new("telemetry-data", template_json));
//!
//! let mut sequence = registry.into_sequence(version::at_least((7, 0, 0)));
//! let client = HttpClusterClient::new(reqwest::Client::new(), "http://localhost:9200");
//!
//! if sequence.check_and_publish(&client).await {
//!     // safe to export
//! }
//! ```

pub mod client;
pub mod error;
pub mod registry;
pub mod resource;
pub mod sequence;
pub mod status;
pub mod version;

pub use client::{ClientError, ClusterClient, ClusterResponse, HttpClusterClient};
pub use error::PreflightError;
pub use registry::{PipelineDefinition, ResourceRegistry, TemplateDefinition};
pub use resource::{HttpResource, PublishableResource, VersionGate};
pub use sequence::ResourceSequence;
pub use status::{CheckOutcome, CheckPolicy, PublishOutcome, PublishPolicy};
