// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! RPC Pool (§4.1): per-chain round-robin ring of JSON-RPC endpoints with unbounded
//! retry/backoff across the full ring. Modeled on `StarcoinRpcClient`'s reqwest client +
//! JSON-RPC envelope, generalized from one endpoint to a ring of them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use xchain_common::{XchainError, XchainResult};
use xchain_metrics::BridgeMetrics;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const INITIAL_BACKOFF_SECS: u64 = 1;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

struct ChainRing {
    endpoints: Vec<String>,
    next: usize,
}

impl ChainRing {
    fn advance(&mut self) -> Option<String> {
        if self.endpoints.is_empty() {
            return None;
        }
        let url = self.endpoints[self.next % self.endpoints.len()].clone();
        self.next = (self.next + 1) % self.endpoints.len();
        Some(url)
    }
}

/// Holds, for each chain, an ordered list of endpoints and the round-robin cursor. Cheap
/// to clone (`Arc` inside); shared across every worker in an extraction session.
#[derive(Clone)]
pub struct RpcPool {
    client: reqwest::Client,
    rings: Arc<HashMap<String, Mutex<ChainRing>>>,
    metrics: Option<Arc<BridgeMetrics>>,
}

impl RpcPool {
    pub fn new(endpoints_by_chain: HashMap<String, Vec<String>>) -> XchainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| XchainError::Config(format!("failed to build HTTP client: {e}")))?;
        let rings = endpoints_by_chain
            .into_iter()
            .map(|(chain, endpoints)| (chain, Mutex::new(ChainRing { endpoints, next: 0 })))
            .collect();
        Ok(Self {
            client,
            rings: Arc::new(rings),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<BridgeMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Returns the next endpoint for `chain`, advancing the ring cursor under a per-chain
    /// mutex (§4.1 concurrency contract).
    pub fn next(&self, chain: &str) -> XchainResult<String> {
        let ring = self
            .rings
            .get(chain)
            .ok_or_else(|| XchainError::Config(format!("unknown chain: {chain}")))?;
        ring.lock()
            .advance()
            .ok_or_else(|| XchainError::Config(format!("no endpoints configured for chain {chain}")))
    }

    fn ring_len(&self, chain: &str) -> usize {
        self.rings.get(chain).map(|r| r.lock().endpoints.len()).unwrap_or(0)
    }

    /// Issues a JSON-RPC 2.0 POST, retrying across the whole ring on any retryable failure
    /// and sleeping with doubling backoff once a full sweep has failed (§4.1).
    pub async fn request(&self, chain: &str, method: &str, params: Value) -> XchainResult<Value> {
        let ring_len = self.ring_len(chain).max(1);
        let mut backoff = INITIAL_BACKOFF_SECS;
        let mut tried_this_epoch = 0usize;

        loop {
            let url = self.next(chain)?;
            let start = std::time::Instant::now();
            let outcome = self.try_once(&url, method, params.clone()).await;
            if let Some(metrics) = &self.metrics {
                metrics
                    .rpc_request_duration
                    .with_label_values(&[chain, method])
                    .observe(start.elapsed().as_secs_f64());
                metrics.rpc_requests_total.with_label_values(&[chain, method]).inc();
            }

            match outcome {
                Ok(result) => return Ok(result),
                Err(reason) => {
                    warn!(chain, method, url, %reason, "retryable RPC failure");
                    if let Some(metrics) = &self.metrics {
                        metrics.rpc_retries_total.with_label_values(&[chain]).inc();
                    }
                    tried_this_epoch += 1;
                    if tried_this_epoch >= ring_len {
                        tokio::time::sleep(Duration::from_secs(backoff)).await;
                        backoff = backoff.saturating_mul(2);
                        tried_this_epoch = 0;
                    }
                }
            }
        }
    }

    async fn try_once(&self, url: &str, method: &str, params: Value) -> Result<Value, String> {
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("transport error: {e}"))?;
        if !resp.status().is_success() {
            return Err(format!("non-2xx status: {}", resp.status()));
        }
        let parsed: JsonRpcResponse = resp
            .json()
            .await
            .map_err(|e| format!("JSON parse failure: {e}"))?;
        if let Some(err) = parsed.error {
            return Err(format!("JSON-RPC error: {err}"));
        }
        match parsed.result {
            Some(Value::Null) | None => Err("result field absent or null".to_string()),
            Some(result) => Ok(result),
        }
    }

    /// Single-shot request to a specific URL, used only by the Endpoint Probe; fails
    /// immediately on non-2xx instead of retrying (§4.1).
    pub async fn plain_request(&self, url: &str, method: &str, params: Value) -> XchainResult<Value> {
        self.try_once(url, method, params)
            .await
            .map_err(|e| XchainError::Rpc {
                chain: url.to_string(),
                message: e,
            })
    }

    /// `eth_getLogs` wrapper: block numbers as lowercase hex, topics as a single-element
    /// outer array whose inner element ORs over the given topic0 hashes (§4.1).
    pub async fn get_logs_emitted_by_contract(
        &self,
        chain: &str,
        address: &str,
        topics: &[String],
        from_block: u64,
        to_block: u64,
    ) -> XchainResult<Vec<Value>> {
        let params = serde_json::json!([{
            "address": address,
            "topics": [topics],
            "fromBlock": format!("0x{:x}", from_block),
            "toBlock": format!("0x{:x}", to_block),
        }]);
        let result = self
            .request(chain, "eth_getLogs", params)
            .await
            .map_err(|e| XchainError::Rpc {
                chain: chain.to_string(),
                message: e.to_string(),
            })?;
        match result {
            Value::Array(logs) => Ok(logs),
            other => Ok(vec![other]),
        }
    }

    /// Concurrently fetches the receipt and the enclosing block for a transaction,
    /// applying the same retry discipline to each call (§4.1).
    pub async fn process_transaction(
        &self,
        chain: &str,
        tx_hash: &str,
        block_number: u64,
    ) -> XchainResult<(Value, Value)> {
        let receipt_fut = self.request(chain, "eth_getTransactionReceipt", serde_json::json!([tx_hash]));
        let block_fut = self.request(
            chain,
            "eth_getBlockByNumber",
            serde_json::json!([format!("0x{:x}", block_number), true]),
        );
        let (receipt, block) = tokio::join!(receipt_fut, block_fut);
        Ok((receipt?, block?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn request_returns_result_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": "0x1"
            })))
            .mount(&server)
            .await;

        let pool = RpcPool::new(HashMap::from([(
            "ethereum".to_string(),
            vec![server.uri()],
        )]))
        .unwrap();

        let result = pool.request("ethereum", "eth_blockNumber", serde_json::json!([])).await.unwrap();
        assert_eq!(result, serde_json::json!("0x1"));
    }

    #[test]
    fn next_errors_on_unknown_chain() {
        let pool = RpcPool::new(HashMap::new()).unwrap();
        assert!(pool.next("ethereum").is_err());
    }
}
