// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Endpoint Probe (§4.2): filters a baseline endpoint list per chain down to endpoints
//! that answer a canary `eth_getLogs` with a non-empty, well-formed result.

use serde_json::Value;
use tracing::{info, warn};

use crate::config::RpcConfigFile;
use crate::rpc::pool::RpcPool;
use xchain_common::XchainResult;

/// Probes every endpoint configured for each chain in `baseline` and returns a config with
/// each chain's `rpcs` list filtered to the endpoints that passed. Probing is sequential
/// per chain; an all-failing chain is written with an empty `rpcs` list rather than
/// treated as fatal — the Extractor fails fast on first use (§4.2).
pub async fn probe(pool: &RpcPool, baseline: &RpcConfigFile) -> RpcConfigFile {
    let mut filtered = baseline.clone();
    for entry in &mut filtered.blockchains {
        let mut surviving = Vec::new();
        for url in &entry.rpcs {
            match canary(pool, url, &entry.contract, &entry.topics, entry.start_block, entry.end_block).await {
                Ok(true) => surviving.push(url.clone()),
                Ok(false) => warn!(chain = %entry.name, url, "probe returned empty result, dropping endpoint"),
                Err(e) => warn!(chain = %entry.name, url, error = %e, "probe failed, dropping endpoint"),
            }
        }
        info!(
            chain = %entry.name,
            surviving = surviving.len(),
            total = entry.rpcs.len(),
            "endpoint probe complete"
        );
        entry.rpcs = surviving;
    }
    filtered
}

async fn canary(
    pool: &RpcPool,
    url: &str,
    contract: &str,
    topics: &[String],
    start_block: u64,
    end_block: u64,
) -> XchainResult<bool> {
    let params = serde_json::json!([{
        "address": contract,
        "topics": [topics],
        "fromBlock": format!("0x{:x}", start_block),
        "toBlock": format!("0x{:x}", end_block),
    }]);
    let result = pool.plain_request(url, "eth_getLogs", params).await?;
    Ok(matches!(result, Value::Array(ref logs) if !logs.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainRpcEntry;
    use std::collections::HashMap;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn drops_endpoints_with_empty_result() {
        let good = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0", "id": 1, "result": [serde_json::json!({"topics": []})]
            })))
            .mount(&good)
            .await;
        let bad = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0", "id": 1, "result": []
            })))
            .mount(&bad)
            .await;

        let pool = RpcPool::new(HashMap::new()).unwrap();
        let baseline = RpcConfigFile {
            blockchains: vec![ChainRpcEntry {
                name: "ethereum".into(),
                contract: "0xabc".into(),
                topics: vec!["0x1".into()],
                start_block: 1,
                end_block: 2,
                rpcs: vec![good.uri(), bad.uri()],
            }],
        };

        let filtered = probe(&pool, &baseline).await;
        assert_eq!(filtered.blockchains[0].rpcs, vec![good.uri()]);
    }
}
