// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Token metadata / historical price provider client (§4.8, §6). An external HTTP
//! collaborator consumed as two POST endpoints; transient failures are retried with
//! exponential backoff up to 5 attempts (1, 2, 4, 8, 16 s) and then surfaced as `None`
//! rather than an error — a `ProviderError` is never fatal (§7).

use std::time::Duration;

use backoff::future::retry;
use backoff::ExponentialBackoffBuilder;
use serde::{Deserialize, Serialize};
use tracing::warn;

const METADATA_PATH: &str = "v2";
const PRICES_PATH: &str = "prices/v1";
const MAX_ATTEMPTS: u32 = 5;
const INITIAL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Deserialize)]
pub struct TokenMetadataResponse {
    pub symbol: String,
    pub name: String,
    pub decimals: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricePoint {
    pub timestamp: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(default)]
    pub data: Vec<PricePoint>,
}

#[derive(Debug, Serialize)]
struct PriceHistoryRequestBySymbol<'a> {
    symbol: &'a str,
    #[serde(rename = "startTime")]
    start_time: String,
    #[serde(rename = "endTime")]
    end_time: String,
    interval: &'a str,
}

#[derive(Debug, Serialize)]
struct PriceHistoryRequestByAddress<'a> {
    network: &'a str,
    address: &'a str,
    #[serde(rename = "startTime")]
    start_time: String,
    #[serde(rename = "endTime")]
    end_time: String,
    interval: &'a str,
}

/// Client for the metadata/price provider (§6's `alchemy_getTokenMetadata` and
/// `/prices/v1/{key}/tokens/historical` endpoints). Every call is best-effort: a
/// permanently-failing endpoint resolves to `Ok(None)`, never an error, matching
/// `ProviderError`'s "tried at most once per run" contract in §7 (the attempt accounting
/// itself lives one layer up, in the Price Enricher's caches).
#[derive(Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("reqwest client builder should not fail with default TLS config"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn backoff() -> backoff::ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(INITIAL_INTERVAL)
            .with_multiplier(2.0)
            .with_max_elapsed_time(Some(Duration::from_secs(1 + 2 + 4 + 8 + 16 + 5)))
            .build()
    }

    /// `alchemy_getTokenMetadata`-shaped lookup. Unsupported tokens return `{}` from the
    /// provider, which surfaces here as `Ok(None)`.
    pub async fn fetch_token_metadata(&self, chain: &str, address: &str) -> Option<TokenMetadataResponse> {
        let url = format!("{}/{}/{}", self.base_url, METADATA_PATH, self.api_key);
        let body = serde_json::json!({"chain": chain, "address": address, "method": "alchemy_getTokenMetadata"});
        self.post_with_retry::<TokenMetadataResponse>(&url, &body).await
    }

    /// Historical daily price series for `[start_ts, end_ts]`, looked up by `symbol` when
    /// given, else by `(chain, token_address)` (§4.8 `fetch_and_store_token_prices`).
    pub async fn fetch_price_history(
        &self,
        symbol: Option<&str>,
        chain: Option<&str>,
        token_address: Option<&str>,
        start_ts: i64,
        end_ts: i64,
    ) -> Option<PriceHistoryResponse> {
        let url = format!("{}/{}/{}/tokens/historical", self.base_url, PRICES_PATH, self.api_key);
        let start_time = chrono::DateTime::from_timestamp(start_ts, 0)?.to_rfc3339();
        let end_time = chrono::DateTime::from_timestamp(end_ts, 0)?.to_rfc3339();
        let body = match (symbol, chain, token_address) {
            (Some(symbol), _, _) => serde_json::to_value(PriceHistoryRequestBySymbol {
                symbol,
                start_time,
                end_time,
                interval: "1d",
            })
            .ok()?,
            (None, Some(chain), Some(address)) => serde_json::to_value(PriceHistoryRequestByAddress {
                network: chain,
                address,
                start_time,
                end_time,
                interval: "1d",
            })
            .ok()?,
            _ => return None,
        };
        self.post_with_retry::<PriceHistoryResponse>(&url, &body).await
    }

    async fn post_with_retry<T: for<'de> Deserialize<'de>>(&self, url: &str, body: &serde_json::Value) -> Option<T> {
        let op = || {
            let client = self.client.clone();
            async move {
                let resp = client.post(url).json(body).send().await.map_err(|e| {
                    backoff::Error::transient(format!("transport error: {e}"))
                })?;
                if !resp.status().is_success() {
                    return Err(backoff::Error::transient(format!("non-2xx status: {}", resp.status())));
                }
                resp.json::<T>()
                    .await
                    .map_err(|e| backoff::Error::permanent(format!("malformed provider response: {e}")))
            }
        };

        match retry(Self::backoff(), op).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url, error = %e, attempts = MAX_ATTEMPTS, "provider call exhausted retries");
                None
            }
        }
    }
}
