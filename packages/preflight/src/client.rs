//! Transport seam between the reconciler and the cluster.
//!
//! The core never talks to a concrete HTTP client; everything goes through
//! [`ClusterClient`] so tests can script responses and count calls, and so
//! the production transport stays swappable.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// A raw response from the cluster. Only the version gate reads the body.
#[derive(Debug, Clone)]
pub struct ClusterResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ClusterResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Errors surfaced by a [`ClusterClient`] implementation.
///
/// The distinction matters to classification: a structured remote error still
/// carries a status code and may mean "absent", while a transport failure
/// means the resource's existence cannot be determined at all.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The remote answered, but the implementation surfaced the status as an
    /// error rather than a response.
    #[error("cluster responded with HTTP {status} for {method} {path}")]
    UnexpectedStatus {
        method: &'static str,
        path: String,
        status: u16,
    },

    /// No structured response was received (connection refused, reset,
    /// timeout, ...).
    #[error("transport failure for {method} {path}: {message}")]
    Transport {
        method: &'static str,
        path: String,
        message: String,
    },
}

impl ClientError {
    /// Status code carried by the error, if the remote actually answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            ClientError::Transport { .. } => None,
        }
    }
}

/// Minimal HTTP surface the reconciler needs from a cluster.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Read-only probe of a path.
    async fn get(&self, path: &str) -> Result<ClusterResponse, ClientError>;

    /// Idempotent create-or-update of a path with an opaque JSON payload.
    async fn put(&self, path: &str, body: Bytes) -> Result<ClusterResponse, ClientError>;
}

/// Production client over `reqwest`.
///
/// Any status the cluster answers with comes back as `Ok`; only failures to
/// obtain a response at all become [`ClientError::Transport`]. Timeouts and
/// TLS are whatever the supplied `reqwest::Client` was built with — this type
/// never reconfigures it.
pub struct HttpClusterClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClusterClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport(method: &'static str, path: &str, err: reqwest::Error) -> ClientError {
        ClientError::Transport {
            method,
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ClusterClient for HttpClusterClient {
    async fn get(&self, path: &str) -> Result<ClusterResponse, ClientError> {
        tracing::debug!(path, "GET");
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| Self::transport("GET", path, e))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Self::transport("GET", path, e))?;

        Ok(ClusterResponse { status, body })
    }

    async fn put(&self, path: &str, body: Bytes) -> Result<ClusterResponse, ClientError> {
        tracing::debug!(path, bytes = body.len(), "PUT");
        let resp = self
            .client
            .put(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Self::transport("PUT", path, e))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Self::transport("PUT", path, e))?;

        Ok(ClusterResponse { status, body })
    }
}
