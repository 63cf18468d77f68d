// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-bridge dispatch table: `topic0 → (decode_fn, handler)` built at startup, replacing
//! the source's topic-string `if/elif` switch (§9 "Cyclic and late-bound dispatch").

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel_async::AsyncPgConnection;

use crate::bridge::{Bridge, ChainName};
use crate::types::{BlockchainTransactionRow, DecodedEvent, RawLog};
use xchain_common::XchainResult;

pub type DecodeFn = fn(&RawLog) -> XchainResult<DecodedEvent>;

/// Context threaded through a single event's handling: the open connection, the chain the
/// log came from, and the user-requested chain set used for the out-of-scope-chain filter
/// (§4.4 "drops events whose referenced chain is not in the user's chain set").
pub struct HandleContext<'a> {
    pub conn: &'a mut AsyncPgConnection,
    pub blockchain: ChainName,
    pub chain_set: &'a std::collections::HashSet<ChainName>,
}

/// One event kind's persistence logic. `handle` returns `Ok(Some(event))` on success (the
/// event survives into the batch passed to `handle_transactions`), `Ok(None)` when the
/// event is intentionally dropped (duplicate natural key or out-of-scope chain), and
/// `Err` only for a handler-level failure that should be logged and the event skipped
/// (§4.4 per-kind handler contract).
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>>;
}

/// `{abi_name, contracts, topics}` — one scan target for the Extractor (§3).
#[derive(Debug, Clone)]
pub struct BridgeContractGroup {
    pub abi_name: String,
    pub contracts: Vec<String>,
    pub topics: Vec<String>,
}

/// Everything the Extractor needs for one bridge: the topic0 dispatch table and the SQL
/// used by the Generator to materialize cross-chain rows (§9 compile-time registry).
pub struct BridgeModule {
    pub bridge: Bridge,
    pub topics: HashMap<String, (DecodeFn, Arc<dyn EventHandler>)>,
}

impl BridgeModule {
    pub fn new(bridge: Bridge) -> Self {
        Self {
            bridge,
            topics: HashMap::new(),
        }
    }

    pub fn register(mut self, topic0: &str, decode: DecodeFn, handler: Arc<dyn EventHandler>) -> Self {
        self.topics.insert(topic0.to_lowercase(), (decode, handler));
        self
    }

    pub fn lookup(&self, topic0: &str) -> Option<&(DecodeFn, Arc<dyn EventHandler>)> {
        self.topics.get(&topic0.to_lowercase())
    }
}

/// The Extractor's view of a bridge's `<bridge>_blockchain_transactions` table (§4.3
/// `does_transaction_exist_by_hash`, §4.5 `handle_transactions`). Kept separate from
/// [`BridgeModule`] so adding it didn't require touching every existing per-bridge module
/// constructor — one [`crate::bridges::transaction_sink`] lookup wires it in per bridge.
#[async_trait]
pub trait TransactionSink: Send + Sync {
    async fn exists(&self, conn: &mut AsyncPgConnection, tx_hash: &str) -> XchainResult<bool>;

    /// Bulk insert, conflicts on `transaction_hash` ignored (§4.4 `handle_transactions`
    /// idempotence; the rollback-and-retry-singly path for a batch that still manages to
    /// violate the constraint lives in the caller, since `on_conflict_do_nothing` already
    /// makes that path unreachable in practice — see DESIGN.md).
    async fn insert_many(&self, conn: &mut AsyncPgConnection, rows: &[BlockchainTransactionRow]) -> XchainResult<usize>;
}
