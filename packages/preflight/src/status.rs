//! Status-code policies and response classification.
//!
//! Each resource carries its own policy as plain data; the classifier itself
//! is a pure function from (response-or-error, policy) to an outcome, which
//! keeps the "what counts as missing" decision out of the request code.

use crate::client::{ClientError, ClusterResponse};
use crate::error::PreflightError;

/// How a check response maps onto Confirmed / Missing / Failed.
#[derive(Debug, Clone)]
pub struct CheckPolicy {
    /// Status codes that confirm the resource exists and is valid.
    pub acceptable: Vec<u16>,
    /// Status codes that mean the resource is cleanly absent.
    pub absent: Vec<u16>,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            acceptable: vec![200],
            absent: vec![404],
        }
    }
}

/// How a publish response maps onto Published / Failed. A publish can never
/// report "missing".
#[derive(Debug, Clone)]
pub struct PublishPolicy {
    pub acceptable: Vec<u16>,
}

impl Default for PublishPolicy {
    fn default() -> Self {
        Self {
            acceptable: vec![200, 201],
        }
    }
}

/// Outcome of a read-only existence probe. Produced fresh on every check;
/// never persisted.
#[derive(Debug)]
pub enum CheckOutcome {
    Confirmed,
    Missing,
    Failed(PreflightError),
}

/// Outcome of an idempotent create-or-update.
#[derive(Debug)]
pub enum PublishOutcome {
    Published,
    Failed(PreflightError),
}

impl CheckPolicy {
    /// Classify the result of a check GET.
    ///
    /// A structured remote error still carries a status code and is treated
    /// exactly like a response with that status. An error without one (a
    /// transport failure) is always `Failed` — the resource's existence
    /// cannot be determined, so it must not be mistaken for absent.
    pub fn classify(&self, result: Result<ClusterResponse, ClientError>) -> CheckOutcome {
        let status = match result {
            Ok(resp) => resp.status,
            Err(err) => match err.status() {
                Some(status) => status,
                None => return CheckOutcome::Failed(PreflightError::Transport(err)),
            },
        };

        if self.acceptable.contains(&status) {
            CheckOutcome::Confirmed
        } else if self.absent.contains(&status) {
            CheckOutcome::Missing
        } else {
            CheckOutcome::Failed(PreflightError::CheckFailed { status })
        }
    }
}

impl PublishPolicy {
    /// Classify the result of a publish PUT.
    pub fn classify(&self, result: Result<ClusterResponse, ClientError>) -> PublishOutcome {
        let status = match result {
            Ok(resp) => resp.status,
            Err(err) => match err.status() {
                Some(status) => status,
                None => return PublishOutcome::Failed(PreflightError::Transport(err)),
            },
        };

        if self.acceptable.contains(&status) {
            PublishOutcome::Published
        } else {
            PublishOutcome::Failed(PreflightError::PublishFailed { status })
        }
    }
}
