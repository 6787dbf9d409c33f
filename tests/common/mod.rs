// tests/common/mod.rs
//! A scripted transport for driving `NotionClient` without a network.
//!
//! Responses are queued per `METHOD path` and handed out in order, so
//! concurrent requests to different paths cannot steal each other's
//! responses. Every request is recorded.

#![allow(dead_code)]

use notionkit::api::{ApiRequest, HttpMethod, Transport, TransportError};
use notionkit::NotionClient;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Scripted = Result<Value, TransportError>;

#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<ApiRequest>>,
    delays: Mutex<HashMap<String, Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

fn key(method: HttpMethod, path: &str) -> String {
    format!("{} {}", method, path)
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a JSON response, given as text.
    pub fn respond(&self, method: HttpMethod, path: &str, body: &str) {
        let value = serde_json::from_str(body).expect("fixture should be valid JSON");
        self.push(method, path, Ok(value));
    }

    pub fn fail(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Err(TransportError::Status {
                status,
                body: body.to_string(),
            }),
        );
    }

    /// Delays every response for `path` by `delay`.
    pub fn delay(&self, method: HttpMethod, path: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(key(method, path), delay);
    }

    fn push(&self, method: HttpMethod, path: &str, response: Scripted) {
        self.responses
            .lock()
            .unwrap()
            .entry(key(method, path))
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.path).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn client(self: &Arc<Self>) -> NotionClient {
        NotionClient::with_transport(self.clone())
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let key = key(request.method, &request.path);
        self.calls.lock().unwrap().push(request);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        response.unwrap_or_else(|| {
            Err(TransportError::Status {
                status: 404,
                body: format!(
                    r#"{{"object":"error","status":404,"code":"object_not_found","message":"No scripted response for {}"}}"#,
                    key
                ),
            })
        })
    }
}
