//! Error taxonomy for a failed reconciliation step.
//!
//! Nothing here escapes `check_and_publish` — every failure collapses to a
//! `false` return with the sequence left dirty. The variants exist so each
//! step can log *why* it stopped the pass.

use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub enum PreflightError {
    /// The cluster reported a version this exporter does not support, or one
    /// that could not be parsed at all. Unrecoverable by re-invocation.
    #[error("cluster version {reported:?} is not supported")]
    IncompatibleVersion { reported: String },

    /// A check came back with a status that is neither acceptable nor in the
    /// absent set — the remote state is ambiguous (down, forbidden, erroring).
    #[error("resource check could not determine remote state (HTTP {status})")]
    CheckFailed { status: u16 },

    /// The remote rejected or errored on a create/update.
    #[error("resource publish was rejected (HTTP {status})")]
    PublishFailed { status: u16 },

    /// No structured status was available; the resource's existence cannot be
    /// determined. Never treated as missing.
    #[error(transparent)]
    Transport(#[from] ClientError),
}
