// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics for the extraction/correlation engine, served over `axum` the way
//! `bridge-indexer-alt`'s `BridgeIndexerMetrics` + `MetricsService` do.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use prometheus::{
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry, HistogramVec,
    IntCounterVec, Registry, TextEncoder,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// All counters/histograms the extraction engine emits. One instance is shared (`Arc`)
/// across every worker task in a session.
pub struct BridgeMetrics {
    pub rpc_requests_total: IntCounterVec,
    pub rpc_retries_total: IntCounterVec,
    pub rpc_request_duration: HistogramVec,
    pub decode_errors_total: IntCounterVec,
    pub events_handled_total: IntCounterVec,
    pub events_dropped_total: IntCounterVec,
    pub handler_duplicate_total: IntCounterVec,
    pub handler_errors_total: IntCounterVec,
    pub provider_requests_total: IntCounterVec,
    pub provider_failures_total: IntCounterVec,
    pub cross_chain_rows_total: IntCounterVec,
}

impl BridgeMetrics {
    pub fn new(registry: &Registry) -> Arc<Self> {
        Arc::new(Self {
            rpc_requests_total: register_int_counter_vec_with_registry!(
                "xchain_rpc_requests_total",
                "JSON-RPC requests issued, by chain and method",
                &["chain", "method"],
                registry
            )
            .unwrap(),
            rpc_retries_total: register_int_counter_vec_with_registry!(
                "xchain_rpc_retries_total",
                "RPC Pool retryable-endpoint-failure count, by chain",
                &["chain"],
                registry
            )
            .unwrap(),
            rpc_request_duration: register_histogram_vec_with_registry!(
                "xchain_rpc_request_duration_seconds",
                "RPC request latency, by chain and method",
                &["chain", "method"],
                registry
            )
            .unwrap(),
            decode_errors_total: register_int_counter_vec_with_registry!(
                "xchain_decode_errors_total",
                "Logs dropped for unknown topic0 or malformed payload, by bridge",
                &["bridge"],
                registry
            )
            .unwrap(),
            events_handled_total: register_int_counter_vec_with_registry!(
                "xchain_events_handled_total",
                "Events that survived handling and were written to a raw table",
                &["bridge", "chain", "event"],
                registry
            )
            .unwrap(),
            events_dropped_total: register_int_counter_vec_with_registry!(
                "xchain_events_dropped_total",
                "Events dropped (out-of-scope chain, duplicate key, handler error)",
                &["bridge", "chain", "reason"],
                registry
            )
            .unwrap(),
            handler_duplicate_total: register_int_counter_vec_with_registry!(
                "xchain_handler_duplicate_total",
                "Unique-constraint violations recovered by rollback + rebind + retry",
                &["bridge"],
                registry
            )
            .unwrap(),
            handler_errors_total: register_int_counter_vec_with_registry!(
                "xchain_handler_errors_total",
                "Non-duplicate handler errors, event skipped",
                &["bridge"],
                registry
            )
            .unwrap(),
            provider_requests_total: register_int_counter_vec_with_registry!(
                "xchain_provider_requests_total",
                "Token metadata/price provider HTTP calls",
                &["kind"],
                registry
            )
            .unwrap(),
            provider_failures_total: register_int_counter_vec_with_registry!(
                "xchain_provider_failures_total",
                "Token metadata/price provider calls that exhausted retries",
                &["kind"],
                registry
            )
            .unwrap(),
            cross_chain_rows_total: register_int_counter_vec_with_registry!(
                "xchain_cross_chain_rows_total",
                "Rows materialized into a bridge's cross_chain_transactions table",
                &["bridge"],
                registry
            )
            .unwrap(),
        })
    }

    #[cfg(test)]
    pub fn new_for_testing() -> Arc<Self> {
        Self::new(&Registry::new())
    }
}

/// Minimal args mirroring `starcoin-bridge-indexer-alt-metrics::MetricsArgs`.
#[derive(Clone, Debug)]
pub struct MetricsArgs {
    pub metrics_address: SocketAddr,
}

/// Serves `/metrics` on its own task until `cancel` fires.
pub struct MetricsService {
    args: MetricsArgs,
    registry: Registry,
    cancel: CancellationToken,
}

impl MetricsService {
    pub fn new(args: MetricsArgs, registry: Registry, cancel: CancellationToken) -> Self {
        Self {
            args,
            registry,
            cancel,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn run(self) -> anyhow::Result<JoinHandle<()>> {
        let registry = self.registry.clone();
        let app = Router::new().route(
            "/metrics",
            get(move || {
                let registry = registry.clone();
                async move {
                    let metric_families = registry.gather();
                    let encoder = TextEncoder::new();
                    encoder.encode_to_string(&metric_families).unwrap_or_default()
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind(self.args.metrics_address).await?;
        let cancel = self.cancel;
        Ok(tokio::spawn(async move {
            let serve = axum::serve(listener, app);
            tokio::select! {
                res = serve => {
                    if let Err(e) = res {
                        tracing::error!("metrics server exited: {e}");
                    }
                }
                _ = cancel.cancelled() => {
                    tracing::info!("metrics server shutting down");
                }
            }
        }))
    }
}
