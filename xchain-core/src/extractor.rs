// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! EVM Extractor (§4.5): chunks a `[start, end]` block range, fans a worker pool out over
//! the chunks, and for every surviving decoded event fetches the enclosing transaction and
//! persists a deduplicated batch. One call handles one `(bridge, chain, contract)` triple;
//! the CLI layer loops this over every `BridgeContractGroup` for the session.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use bigdecimal::BigDecimal;
use diesel_async::AsyncPgConnection;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::bridge::{Bridge, ChainName};
use crate::db::DbPool;
use crate::dispatch::{BridgeModule, HandleContext, TransactionSink};
use crate::rpc::RpcPool;
use crate::types::{BlockchainTransactionRow, RawLog};
use xchain_common::logging::{log_error, log_to_cli, CliColor};
use xchain_common::{XchainError, XchainResult};
use xchain_metrics::BridgeMetrics;

/// `{contract, topics, start_block, end_block}` — one scan target, built by the caller from
/// a chain's `ChainRpcEntry` (§4.1/§6).
pub struct ExtractTarget {
    pub contract: String,
    pub topics: Vec<String>,
    pub start_block: u64,
    pub end_block: u64,
    pub num_rpcs: usize,
}

/// Splits `[start, end]` into chunks of `chunk_size = max(1, min((end-start)/threads, 1000))`
/// and returns `(chunks, num_threads)` (§4.5 step 2a-2c, §8 boundary case
/// `end-start < num_threads` ⇒ chunk_size clamps to 1).
fn plan_chunks(start: u64, end: u64, num_rpcs: usize) -> (Vec<(u64, u64)>, usize) {
    let num_threads = num_rpcs.min(10) * 2;
    let num_threads = num_threads.max(1);
    let span = end.saturating_sub(start);
    let chunk_size = (span / num_threads as u64).clamp(1, 1000);

    let mut chunks = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let chunk_end = (cursor + chunk_size - 1).min(end);
        chunks.push((cursor, chunk_end));
        if chunk_end == end {
            break;
        }
        cursor = chunk_end + 1;
    }
    (chunks, num_threads)
}

fn hex_to_u64(s: &str) -> u64 {
    u64::from_str_radix(s.trim_start_matches("0x"), 16).unwrap_or(0)
}

fn parse_raw_log(v: &Value) -> Option<RawLog> {
    Some(RawLog {
        transaction_hash: v.get("transactionHash")?.as_str()?.to_lowercase(),
        block_number: hex_to_u64(v.get("blockNumber")?.as_str()?),
        contract_address: v.get("address")?.as_str()?.to_lowercase(),
        topics: v
            .get("topics")?
            .as_array()?
            .iter()
            .filter_map(|t| t.as_str().map(|s| s.to_lowercase()))
            .collect(),
        data: v.get("data").and_then(Value::as_str).unwrap_or("0x").to_string(),
    })
}

/// Builds the normalized transaction row from a receipt + block pair (§4.3
/// `create_transaction_object`). `fee = gasUsed * effectiveGasPrice`; `timestamp` is parsed
/// from the block's hex field into unix seconds.
fn build_transaction_row(blockchain: &str, tx_hash: &str, receipt: &Value, block: &Value) -> Option<BlockchainTransactionRow> {
    let gas_used = hex_to_u64(receipt.get("gasUsed")?.as_str()?);
    let gas_price = receipt
        .get("effectiveGasPrice")
        .and_then(Value::as_str)
        .map(hex_to_u64)
        .unwrap_or(0);
    let fee = BigDecimal::from(gas_used) * BigDecimal::from(gas_price);
    let status = receipt.get("status").and_then(Value::as_str).map(hex_to_u64).unwrap_or(1) as i32;
    let block_number = hex_to_u64(receipt.get("blockNumber")?.as_str()?);
    let timestamp = hex_to_u64(block.get("timestamp")?.as_str()?) as i64;
    let from_address = receipt.get("from").and_then(Value::as_str).map(|s| s.to_lowercase())?;
    let to_address = receipt.get("to").and_then(Value::as_str).map(|s| s.to_lowercase());

    let value = block
        .get("transactions")
        .and_then(Value::as_array)
        .and_then(|txs| txs.iter().find(|t| t.get("hash").and_then(Value::as_str) == Some(tx_hash)))
        .and_then(|t| t.get("value"))
        .and_then(Value::as_str)
        .map(hex_to_u64)
        .map(BigDecimal::from);

    Some(BlockchainTransactionRow {
        transaction_hash: tx_hash.to_string(),
        blockchain: blockchain.to_string(),
        block_number: block_number as i64,
        timestamp,
        from_address,
        to_address,
        status,
        fee,
        value,
    })
}

/// Runs one extraction session over `target` for `(bridge, chain)` (§4.5). `chain_set` is
/// the user's `--blockchains` set, threaded into every handler for the out-of-scope-chain
/// filter (§4.4).
#[allow(clippy::too_many_arguments)]
pub async fn extract(
    rpc: &RpcPool,
    db: &DbPool,
    module: Arc<BridgeModule>,
    tx_sink: Arc<dyn TransactionSink>,
    bridge: Bridge,
    chain: ChainName,
    chain_set: Arc<HashSet<ChainName>>,
    target: ExtractTarget,
    metrics: Option<Arc<BridgeMetrics>>,
) -> XchainResult<()> {
    let bridge_name = bridge.to_string();
    let chain_name = chain.to_string();
    let (chunks, num_threads) = plan_chunks(target.start_block, target.end_block, target.num_rpcs);

    log_to_cli(
        &bridge_name,
        &chain_name,
        target.start_block,
        target.end_block,
        &format!("extracting {} chunk(s) with {num_threads} worker(s)", chunks.len()),
        CliColor::Info,
    );

    let queue = Arc::new(Mutex::new(VecDeque::from(chunks)));
    let semaphore = Arc::new(Semaphore::new(num_threads));
    let mut workers = Vec::with_capacity(num_threads);

    for _ in 0..num_threads {
        let queue = queue.clone();
        let semaphore = semaphore.clone();
        let rpc = rpc.clone();
        let db = db.clone();
        let module = module.clone();
        let tx_sink = tx_sink.clone();
        let chain_set = chain_set.clone();
        let metrics = metrics.clone();
        let contract = target.contract.clone();
        let topics = target.topics.clone();
        let bridge_name = bridge_name.clone();
        let chain_name = chain_name.clone();

        workers.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore never closed");
            loop {
                let chunk = queue.lock().pop_front();
                let Some((start, end)) = chunk else { break };

                if let Err(e) = run_chunk(
                    &rpc,
                    &db,
                    &module,
                    tx_sink.as_ref(),
                    bridge,
                    chain,
                    &chain_set,
                    &contract,
                    &topics,
                    start,
                    end,
                    metrics.as_deref(),
                )
                .await
                {
                    log_error(&bridge_name, &format!("chunk [{start},{end}] on {chain_name} failed: {e}"));
                }
            }
        }));
    }

    for worker in workers {
        let _ = worker.await;
    }

    log_to_cli(
        &bridge_name,
        &chain_name,
        target.start_block,
        target.end_block,
        "extraction complete",
        CliColor::Success,
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_chunk(
    rpc: &RpcPool,
    db: &DbPool,
    module: &BridgeModule,
    tx_sink: &dyn TransactionSink,
    bridge: Bridge,
    chain: ChainName,
    chain_set: &HashSet<ChainName>,
    contract: &str,
    topics: &[String],
    start: u64,
    end: u64,
    metrics: Option<&BridgeMetrics>,
) -> XchainResult<()> {
    let bridge_name = bridge.to_string();
    let chain_name = chain.to_string();

    let logs = rpc
        .get_logs_emitted_by_contract(&chain_name, contract, topics, start, end)
        .await?;
    if logs.is_empty() {
        return Ok(());
    }

    let mut conn = db
        .get()
        .await
        .map_err(|e| XchainError::Config(format!("failed to get DB connection: {e}")))?;

    let mut rows: HashMap<String, BlockchainTransactionRow> = HashMap::new();

    for raw in &logs {
        let Some(log) = parse_raw_log(raw) else {
            if let Some(m) = metrics {
                m.decode_errors_total.with_label_values(&[&bridge_name]).inc();
            }
            continue;
        };
        let Some(topic0) = log.topic0() else { continue };
        let Some((decode, handler)) = module.lookup(topic0) else {
            if let Some(m) = metrics {
                m.decode_errors_total.with_label_values(&[&bridge_name]).inc();
            }
            continue;
        };

        let decoded = match decode(&log) {
            Ok(d) => d,
            Err(e) => {
                if let Some(m) = metrics {
                    m.decode_errors_total.with_label_values(&[&bridge_name]).inc();
                }
                log_error(&bridge_name, &format!("decode failed for {topic0} on {chain_name}: {e}"));
                continue;
            }
        };

        let mut ctx = HandleContext {
            conn: &mut conn,
            blockchain: chain,
            chain_set,
        };
        let survived = match handler.handle(&mut ctx, decoded).await {
            Ok(event) => event,
            Err(e) => {
                if let Some(m) = metrics {
                    m.handler_errors_total.with_label_values(&[&bridge_name]).inc();
                    if e.is_duplicate_key() {
                        m.handler_duplicate_total.with_label_values(&[&bridge_name]).inc();
                    }
                }
                log_error(&bridge_name, &format!("handler failed for {topic0} on {chain_name}: {e}"));
                continue;
            }
        };

        let Some(_event) = survived else {
            if let Some(m) = metrics {
                m.events_dropped_total.with_label_values(&[&bridge_name, &chain_name, "handler"]).inc();
            }
            continue;
        };
        if let Some(m) = metrics {
            m.events_handled_total.with_label_values(&[&bridge_name, &chain_name, topic0]).inc();
        }

        if rows.contains_key(&log.transaction_hash) {
            continue;
        }
        match tx_sink.exists(&mut conn, &log.transaction_hash).await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                warn!(bridge = %bridge_name, chain = %chain_name, tx = %log.transaction_hash, %e, "existence check failed");
                continue;
            }
        }

        match rpc.process_transaction(&chain_name, &log.transaction_hash, log.block_number).await {
            Ok((receipt, block)) => {
                if let Some(row) = build_transaction_row(&chain_name, &log.transaction_hash, &receipt, &block) {
                    rows.insert(row.transaction_hash.clone(), row);
                } else {
                    log_error(
                        &bridge_name,
                        &format!("empty receipt/block for {} on {chain_name}", log.transaction_hash),
                    );
                }
            }
            Err(e) => {
                log_error(&bridge_name, &format!("receipt/block fetch failed for {}: {e}", log.transaction_hash));
            }
        }
    }

    if !rows.is_empty() {
        let rows: Vec<BlockchainTransactionRow> = rows.into_values().collect();
        tx_sink.insert_many(&mut conn, &rows).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_clamps_to_one_when_span_is_small() {
        let (chunks, threads) = plan_chunks(100, 103, 5);
        assert_eq!(threads, 10);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|(s, e)| e - s == 0));
    }

    #[test]
    fn chunk_size_clamps_to_1000_for_large_ranges() {
        let (chunks, _) = plan_chunks(0, 1_000_000, 10);
        assert!(chunks.iter().all(|(s, e)| e - s + 1 <= 1000));
        assert_eq!(chunks.first().unwrap().0, 0);
        assert_eq!(chunks.last().unwrap().1, 1_000_000);
    }

    #[test]
    fn hex_to_u64_parses_0x_prefixed() {
        assert_eq!(hex_to_u64("0x1a"), 26);
        assert_eq!(hex_to_u64("0x0"), 0);
    }
}
