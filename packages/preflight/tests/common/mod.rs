//! Shared test harness: a scripted in-process cluster client that records
//! every call, so tests can assert exact request counts per endpoint.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use preflight::{ClientError, ClusterClient, ClusterResponse};

pub const VERSION_ROUTE: (&str, &str) = ("GET", "/");
pub const GET_TEMPLATE: (&str, &str) = ("GET", "/_template/");
pub const PUT_TEMPLATE: (&str, &str) = ("PUT", "/_template/");
pub const GET_PIPELINE: (&str, &str) = ("GET", "/_ingest/pipeline/");
pub const PUT_PIPELINE: (&str, &str) = ("PUT", "/_ingest/pipeline/");

type Scripted = Result<ClusterResponse, ClientError>;

#[derive(Default)]
struct State {
    scripts: HashMap<(&'static str, &'static str), VecDeque<Scripted>>,
    log: Vec<(String, String)>,
}

/// Cluster client double. Responses are scripted per route (method plus
/// endpoint prefix) and consumed in order; running a route dry panics, which
/// is the moral equivalent of mockito's verifyNoMoreInteractions.
#[derive(Default)]
pub struct MockClient {
    state: Mutex<State>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one scripted response for a route.
    pub fn script(&self, route: (&'static str, &'static str), response: Scripted) {
        let mut state = self.state.lock().unwrap();
        state.scripts.entry(route).or_default().push_back(response);
    }

    /// Script the root endpoint to report the given version.
    pub fn script_version(&self, number: &str) {
        let body = format!(r#"{{"version":{{"number":"{number}"}}}}"#);
        self.script(VERSION_ROUTE, Ok(ClusterResponse::new(200, body)));
    }

    /// Number of recorded calls matching a route.
    pub fn calls(&self, route: (&str, &str)) -> usize {
        let state = self.state.lock().unwrap();
        state
            .log
            .iter()
            .filter(|(method, path)| method == route.0 && matches(path, route.1))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().log.len()
    }

    fn respond(&self, method: &'static str, path: &str) -> Scripted {
        let route = route_of(method, path);
        let mut state = self.state.lock().unwrap();
        state.log.push((method.to_string(), path.to_string()));
        state
            .scripts
            .get_mut(&route)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("unexpected {method} {path}: no scripted response left"))
    }
}

fn matches(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        path == "/"
    } else {
        path.starts_with(prefix)
    }
}

fn route_of(method: &'static str, path: &str) -> (&'static str, &'static str) {
    if path == "/" {
        (method, "/")
    } else if path.starts_with("/_template/") {
        (method, "/_template/")
    } else if path.starts_with("/_ingest/pipeline/") {
        (method, "/_ingest/pipeline/")
    } else {
        panic!("request to unknown endpoint: {method} {path}");
    }
}

#[async_trait]
impl ClusterClient for MockClient {
    async fn get(&self, path: &str) -> Scripted {
        self.respond("GET", path)
    }

    async fn put(&self, path: &str, _body: Bytes) -> Scripted {
        self.respond("PUT", path)
    }
}

pub fn ok(status: u16) -> Scripted {
    Ok(ClusterResponse::new(status, Bytes::new()))
}

pub fn status_error(method: &'static str, status: u16) -> Scripted {
    Err(ClientError::UnexpectedStatus {
        method,
        path: "/_anything".into(),
        status,
    })
}

pub fn transport_error(method: &'static str) -> Scripted {
    Err(ClientError::Transport {
        method,
        path: "/_anything".into(),
        message: "connection reset by peer".into(),
    })
}
