//! Transport layer for JSON-RPC communication

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::RpcError;

/// Transport trait for JSON-RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the `result` member of the response
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError>;
}

/// Deserialize a `result` value into a concrete type
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::Serialization(e.to_string()))
}

/// One canned reply
#[derive(Debug, Clone)]
enum MockReply {
    Value(Value),
    Error(i64, String),
    TransportFailure(String),
}

/// In-memory transport for tests.
///
/// Replies are looked up by method name: queued one-shot replies first, then
/// per-method responses, then built-in defaults. Every request is logged.
#[derive(Clone, Default)]
pub struct MockTransport {
    queued: Arc<Mutex<HashMap<String, Vec<MockReply>>>>,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
}

impl MockTransport {
    /// Create a mock with default responses for the common `eth_*` methods
    pub fn new() -> Self {
        let mock = Self::default();
        {
            let mut responses = lock(&mock.responses);
            let defaults = [
                ("eth_chainId", "0x1"),
                ("eth_gasPrice", "0x3b9aca00"),
                ("eth_getBalance", "0xde0b6b3a7640000"),
                ("eth_getTransactionCount", "0x0"),
                ("eth_call", "0x"),
                (
                    "eth_sendRawTransaction",
                    "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
                ),
            ];
            for (method, value) in defaults {
                responses.insert(method.to_string(), MockReply::Value(Value::from(value)));
            }
            responses.insert(
                "eth_getTransactionReceipt".to_string(),
                MockReply::Value(Value::Null),
            );
        }
        mock
    }

    /// Answer every call to `method` with `response`
    pub fn set_response(&self, method: &str, response: Value) {
        lock(&self.responses).insert(method.to_string(), MockReply::Value(response));
    }

    /// Answer every call to `method` with a JSON-RPC error object
    pub fn set_error(&self, method: &str, code: i64, message: &str) {
        lock(&self.responses).insert(method.to_string(), MockReply::Error(code, message.to_string()));
    }

    /// Fail the next call to `method` at the transport level
    pub fn fail_next(&self, method: &str, reason: &str) {
        lock(&self.queued)
            .entry(method.to_string())
            .or_default()
            .push(MockReply::TransportFailure(reason.to_string()));
    }

    /// Every request seen so far, in order
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        lock(&self.calls).clone()
    }

    /// Number of requests made for `method`
    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|(m, _)| m == method).count()
    }

    /// Clear custom responses and the call log
    pub fn clear(&self) {
        lock(&self.queued).clear();
        lock(&self.responses).clear();
        lock(&self.calls).clear();
    }
}

// A poisoned lock only means another test thread panicked; the data is still usable.
fn lock<T>(mutex: &Arc<Mutex<T>>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        lock(&self.calls).push((method.to_string(), params));

        let queued = {
            let mut queued = lock(&self.queued);
            queued.get_mut(method).and_then(|replies| {
                if replies.is_empty() {
                    None
                } else {
                    Some(replies.remove(0))
                }
            })
        };
        let reply = match queued {
            Some(reply) => reply,
            None => lock(&self.responses)
                .get(method)
                .cloned()
                .ok_or_else(|| RpcError::Rpc {
                    code: -32601,
                    message: format!("Method not found: {}", method),
                })?,
        };

        match reply {
            MockReply::Value(value) => Ok(value),
            MockReply::Error(code, message) => Err(RpcError::Rpc { code, message }),
            MockReply::TransportFailure(reason) => Err(RpcError::Transport(reason)),
        }
    }
}

/// HTTP transport for real JSON-RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let id = self.next_id();
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::trace!(id, method, "sending request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        // A missing `result` is how nodes report "not found" (e.g. pending receipts)
        Ok(response.result.unwrap_or(Value::Null))
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
