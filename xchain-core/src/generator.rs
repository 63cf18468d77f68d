// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-bridge Generator/Correlator (§4.7): rebuilds a bridge's `*_cross_chain_transactions`
//! table from scratch each run (truncate, then one `INSERT INTO ... SELECT ... JOIN`
//! matching source and destination legs on the bridge's natural key), then asks the
//! [`crate::price::PriceEnricher`] to backfill USD values over the resulting rows.
//! Grounded on `generator/debridge/generator.py`, `generator/cow/generator.py`,
//! `generator/eco/generator.py`, and `generator/mayan/generator.py`; the remaining bridges
//! extend the same join-on-natural-key shape using their own event tables (§4.4).

use async_trait::async_trait;
use diesel::sql_types::{BigInt, Nullable};
use diesel::QueryableByName;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::bridge::Bridge;
use crate::price::PriceEnricher;
use xchain_common::logging::{log_to_cli, CliColor};
use xchain_common::{XchainError, XchainResult};

const DAY: i64 = 86_400;

/// One distinct `(src_blockchain, src_contract, dst_blockchain, dst_contract)` combination
/// appearing in a bridge's freshly-matched cross-chain rows (§4.8 `get_unique_src_dst_contract_pairs`).
#[derive(Debug, Clone, QueryableByName)]
pub struct SrcDstPair {
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub src_blockchain: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub src_contract: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub dst_blockchain: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub dst_contract: String,
}

#[derive(QueryableByName)]
struct TimestampRange {
    #[diesel(sql_type = Nullable<BigInt>)]
    min_ts: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    max_ts: Option<i64>,
}

/// One `calculate_cctx_usd_values` call: prices a token-denominated amount column using the
/// metadata/price rows keyed by the leg's own blockchain+contract.
pub struct UsdAmountTarget {
    pub table: &'static str,
    pub amount_col: &'static str,
    pub blockchain_col: &'static str,
    pub contract_col: &'static str,
    pub timestamp_col: &'static str,
    pub usd_col: &'static str,
}

/// One `calculate_cctx_native_usd_values` call: prices a gas-fee column (always denominated
/// in the chain's native token, address-sentinel `0x0…0` in `token_metadata`).
pub struct UsdFeeTarget {
    pub table: &'static str,
    pub timestamp_col: &'static str,
    pub blockchain_col: &'static str,
    pub fee_col: &'static str,
    pub usd_col: &'static str,
}

async fn apply_usd_amount(conn: &mut AsyncPgConnection, t: &UsdAmountTarget) -> XchainResult<()> {
    let sql = format!(
        "UPDATE {table} cctx \
         SET {usd_col} = token_price.price_usd * cctx.{amount_col} / power(10, token_metadata.decimals) \
         FROM token_metadata JOIN token_price ON token_metadata.symbol = token_price.symbol \
         WHERE lower(cctx.{contract_col}) = lower(token_metadata.address) \
         AND cctx.{blockchain_col} = token_metadata.blockchain \
         AND CAST(TO_TIMESTAMP(cctx.{timestamp_col}) AS DATE) = token_price.date",
        table = t.table,
        usd_col = t.usd_col,
        amount_col = t.amount_col,
        contract_col = t.contract_col,
        blockchain_col = t.blockchain_col,
        timestamp_col = t.timestamp_col,
    );
    diesel::sql_query(sql)
        .execute(conn)
        .await
        .map_err(|e| config_err(t.table, e))?;
    Ok(())
}

async fn apply_usd_fee(conn: &mut AsyncPgConnection, t: &UsdFeeTarget) -> XchainResult<()> {
    let sql = format!(
        "UPDATE {table} cctx \
         SET {usd_col} = token_price.price_usd * cctx.{fee_col} / power(10, token_metadata.decimals) \
         FROM token_metadata JOIN token_price \
            ON token_metadata.symbol = token_price.symbol AND token_metadata.name = token_price.name \
         WHERE token_metadata.address = '0x0000000000000000000000000000000000000000' \
         AND cctx.{blockchain_col} = token_metadata.blockchain \
         AND CAST(TO_TIMESTAMP(cctx.{timestamp_col}) AS DATE) = token_price.date",
        table = t.table,
        usd_col = t.usd_col,
        fee_col = t.fee_col,
        blockchain_col = t.blockchain_col,
        timestamp_col = t.timestamp_col,
    );
    diesel::sql_query(sql)
        .execute(conn)
        .await
        .map_err(|e| config_err(t.table, e))?;
    Ok(())
}

fn config_err(table: &str, e: diesel::result::Error) -> XchainError {
    XchainError::Config(format!("generator query against {table} failed: {e}"))
}

/// One bridge's correlation step plus the USD-enrichment targets it exposes over its own
/// `*_cross_chain_transactions` table.
#[async_trait]
pub trait CrossChainGenerator: Send + Sync {
    fn bridge(&self) -> Bridge;
    fn transactions_table(&self) -> &'static str;
    fn cross_chain_table(&self) -> &'static str;

    /// Empties the cross-chain table and repopulates it via one `INSERT ... SELECT ... JOIN`
    /// (§4.7 "cross-chain rows are fully rebuilt by each Generator invocation"). Returns the
    /// row count inserted.
    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize>;

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget>;
    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget>;

    /// Bridge-specific fix-up that runs after USD enrichment, e.g. Mayan's Solana lamport
    /// rescale. Default is a no-op.
    async fn post_process(&self, _conn: &mut AsyncPgConnection) -> XchainResult<()> {
        Ok(())
    }
}

async fn truncate_and_insert(conn: &mut AsyncPgConnection, table: &str, insert_sql: &str) -> XchainResult<usize> {
    diesel::sql_query(format!("TRUNCATE TABLE {table}"))
        .execute(conn)
        .await
        .map_err(|e| config_err(table, e))?;
    diesel::sql_query(insert_sql)
        .execute(conn)
        .await
        .map_err(|e| config_err(table, e))
}

async fn unique_pairs(conn: &mut AsyncPgConnection, table: &str) -> XchainResult<Vec<SrcDstPair>> {
    let sql = format!(
        "SELECT DISTINCT src_blockchain, src_contract_address AS src_contract, \
         dst_blockchain, dst_contract_address AS dst_contract FROM {table}"
    );
    diesel::sql_query(sql).load(conn).await.map_err(|e| config_err(table, e))
}

async fn timestamp_range(conn: &mut AsyncPgConnection, table: &str) -> XchainResult<(i64, i64)> {
    let sql = format!("SELECT min(timestamp) AS min_ts, max(timestamp) AS max_ts FROM {table}");
    let row: TimestampRange = diesel::sql_query(sql)
        .get_result(conn)
        .await
        .map_err(|e| config_err(table, e))?;
    let min_ts = row.min_ts.ok_or_else(|| XchainError::Config(format!("{table} has no rows to generate from")))?;
    let max_ts = row.max_ts.unwrap_or(min_ts);
    Ok((min_ts - DAY, max_ts + DAY))
}

/// Runs one bridge's full generation pass: match, native-token + per-pair price population,
/// USD backfill, then the bridge's own post-processing hook (§4.7/§4.8).
pub async fn run(
    generator: &dyn CrossChainGenerator,
    conn: &mut AsyncPgConnection,
    enricher: &mut PriceEnricher,
) -> XchainResult<usize> {
    let bridge = generator.bridge().to_string();
    log_to_cli(&bridge, "-", 0, 0, "matching cross-chain transactions...", CliColor::Info);
    let inserted = generator.match_cross_chain(conn).await?;
    log_to_cli(
        &bridge,
        "-",
        0,
        0,
        &format!("matched {inserted} cross-chain row(s)"),
        CliColor::Success,
    );
    if inserted == 0 {
        return Ok(0);
    }

    let (start_ts, end_ts) = timestamp_range(conn, generator.transactions_table()).await?;
    enricher.populate_native_tokens(conn, start_ts, end_ts).await;

    let pairs = unique_pairs(conn, generator.cross_chain_table()).await?;
    log_to_cli(&bridge, "-", 0, 0, "fetching token prices...", CliColor::Info);
    for pair in &pairs {
        enricher
            .populate_token_info(
                conn,
                &pair.src_blockchain,
                &pair.dst_blockchain,
                Some(&pair.src_contract),
                Some(&pair.dst_contract),
                start_ts,
                end_ts,
            )
            .await;
    }

    for target in generator.usd_amount_targets() {
        apply_usd_amount(conn, &target).await?;
    }
    for target in generator.usd_fee_targets() {
        apply_usd_fee(conn, &target).await?;
    }
    generator.post_process(conn).await?;

    Ok(inserted)
}

macro_rules! amount_target {
    ($table:expr, $amount:expr, $blockchain:expr, $contract:expr, $ts:expr, $usd:expr) => {
        UsdAmountTarget {
            table: $table,
            amount_col: $amount,
            blockchain_col: $blockchain,
            contract_col: $contract,
            timestamp_col: $ts,
            usd_col: $usd,
        }
    };
}

macro_rules! fee_target {
    ($table:expr, $ts:expr, $blockchain:expr, $fee:expr, $usd:expr) => {
        UsdFeeTarget {
            table: $table,
            timestamp_col: $ts,
            blockchain_col: $blockchain,
            fee_col: $fee,
            usd_col: $usd,
        }
    };
}

/// deBridge (grounded directly on `generator/debridge/generator.py::match_cctxs`): joins a
/// `debridge_created_order` deposit to its `debridge_fulfilled_order` fill via `order_id`.
pub struct DebridgeGenerator;

#[async_trait]
impl CrossChainGenerator for DebridgeGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Debridge
    }
    fn transactions_table(&self) -> &'static str {
        "debridge_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "debridge_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "debridge_cross_chain_transactions",
            "INSERT INTO debridge_cross_chain_transactions (
                order_id, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                deposit.order_id,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, deposit.give_token_address,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, dst_tx.to_address,
                dst_tx.fee, dst_tx.timestamp, deposit.take_token_address,
                deposit.give_amount, deposit.take_amount
             FROM debridge_created_order deposit
             JOIN debridge_blockchain_transactions src_tx ON src_tx.transaction_hash = deposit.transaction_hash
             JOIN debridge_fulfilled_order fill ON fill.order_id = deposit.order_id
             JOIN debridge_blockchain_transactions dst_tx ON dst_tx.transaction_hash = fill.transaction_hash",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "debridge_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "debridge_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "debridge_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "debridge_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Fly (deBridge's sibling fast-swap protocol): `fly_swap_in`/`fly_swap_out` share a
/// `deposit_data_hash`, the same correlation shape deBridge uses `order_id` for.
pub struct FlyGenerator;

#[async_trait]
impl CrossChainGenerator for FlyGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Fly
    }
    fn transactions_table(&self) -> &'static str {
        "fly_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "fly_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "fly_cross_chain_transactions",
            "INSERT INTO fly_cross_chain_transactions (
                deposit_data_hash, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                si.deposit_data_hash,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, si.from_asset_address,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, dst_tx.to_address,
                dst_tx.fee, dst_tx.timestamp, so.to_asset_address,
                si.amount_in, so.amount_out
             FROM fly_swap_in si
             JOIN fly_blockchain_transactions src_tx ON src_tx.transaction_hash = si.transaction_hash
             JOIN fly_swap_out so ON so.deposit_data_hash = si.deposit_data_hash
             JOIN fly_blockchain_transactions dst_tx ON dst_tx.transaction_hash = so.transaction_hash
             WHERE si.deposit_data_hash IS NOT NULL",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "fly_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "fly_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "fly_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "fly_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// CoW Protocol: `cross_chain_key` is resolved upstream (decode time, via the pluggable
/// CoW key resolver — SPEC_FULL §11) from each trade's `appData`; this self-joins two
/// `cow_trade` rows sharing that key on different chains, the lexicographically smaller
/// `blockchain` serving as source (§4.4's CoW correlation rule). `cow_cross_chain_transactions.cross_chain_key`
/// is `UNIQUE`, which only holds if each key pairs at most one src leg with one dst leg.
pub struct CowGenerator;

#[async_trait]
impl CrossChainGenerator for CowGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Cow
    }
    fn transactions_table(&self) -> &'static str {
        "cow_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "cow_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "cow_cross_chain_transactions",
            "INSERT INTO cow_cross_chain_transactions (
                cross_chain_key, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                src_trade.cross_chain_key,
                src_trade.blockchain, src_trade.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, src_trade.sell_token,
                dst_trade.blockchain, dst_trade.transaction_hash, dst_tx.from_address, dst_tx.to_address,
                dst_tx.fee, dst_tx.timestamp, dst_trade.buy_token,
                src_trade.sell_amount, dst_trade.buy_amount
             FROM cow_trade src_trade
             JOIN cow_blockchain_transactions src_tx ON src_tx.transaction_hash = src_trade.transaction_hash
             JOIN cow_trade dst_trade
                ON dst_trade.cross_chain_key = src_trade.cross_chain_key
                AND dst_trade.blockchain != src_trade.blockchain
                AND dst_trade.blockchain > src_trade.blockchain
             JOIN cow_blockchain_transactions dst_tx ON dst_tx.transaction_hash = dst_trade.transaction_hash
             WHERE src_trade.cross_chain_key IS NOT NULL",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "cow_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "cow_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "cow_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "cow_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Eco (grounded on `generator/eco/generator.py::match_transfers`): `eco_intent_created`
/// (src) joined to `eco_fulfillment` (dst) via `intent_hash`.
pub struct EcoGenerator;

#[async_trait]
impl CrossChainGenerator for EcoGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Eco
    }
    fn transactions_table(&self) -> &'static str {
        "eco_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "eco_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "eco_cross_chain_transactions",
            "INSERT INTO eco_cross_chain_transactions (
                intent_hash, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                ic.intent_hash,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, ic.inbox,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, f.claimant,
                dst_tx.fee, dst_tx.timestamp, dst_tx.to_address,
                ic.native_value, ic.native_value
             FROM eco_intent_created ic
             JOIN eco_blockchain_transactions src_tx ON src_tx.transaction_hash = ic.transaction_hash
             JOIN eco_fulfillment f ON f.intent_hash = ic.intent_hash
             JOIN eco_blockchain_transactions dst_tx ON dst_tx.transaction_hash = f.transaction_hash
             WHERE ic.inbox IS NOT NULL AND dst_tx.to_address IS NOT NULL",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "eco_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "eco_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "eco_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "eco_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Synapse: `synapse_token_deposit_and_swap` (src) joined to `synapse_token_mint_and_swap`
/// (dst) via `kappa` (§8 acceptance case 2).
pub struct SynapseGenerator;

#[async_trait]
impl CrossChainGenerator for SynapseGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Synapse
    }
    fn transactions_table(&self) -> &'static str {
        "synapse_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "synapse_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "synapse_cross_chain_transactions",
            "INSERT INTO synapse_cross_chain_transactions (
                kappa, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                lower(dep.kappa),
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, dep.token,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, mint.to_address,
                dst_tx.fee, dst_tx.timestamp, mint.token,
                dep.amount, mint.amount
             FROM synapse_token_deposit_and_swap dep
             JOIN synapse_blockchain_transactions src_tx ON src_tx.transaction_hash = dep.transaction_hash
             JOIN synapse_token_mint_and_swap mint ON lower(mint.kappa) = lower(dep.kappa)
             JOIN synapse_blockchain_transactions dst_tx ON dst_tx.transaction_hash = mint.transaction_hash",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "synapse_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "synapse_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "synapse_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "synapse_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Stargate (§11 supplement): `stargate_oft_sent` joined to `stargate_oft_received` via `guid`.
pub struct StargateGenerator;

#[async_trait]
impl CrossChainGenerator for StargateGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Stargate
    }
    fn transactions_table(&self) -> &'static str {
        "stargate_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "stargate_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "stargate_cross_chain_transactions",
            "INSERT INTO stargate_cross_chain_transactions (
                guid, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                sent.guid,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, sent.contract_address,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, recv.to_address,
                dst_tx.fee, dst_tx.timestamp, recv.contract_address,
                sent.amount_sent_ld, recv.amount_received_ld
             FROM stargate_oft_sent sent
             JOIN stargate_blockchain_transactions src_tx ON src_tx.transaction_hash = sent.transaction_hash
             JOIN stargate_oft_received recv ON recv.guid = sent.guid
             JOIN stargate_blockchain_transactions dst_tx ON dst_tx.transaction_hash = recv.transaction_hash",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "stargate_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "stargate_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "stargate_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "stargate_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// CCIP: `ccip_send_requested` (src) joined to `ccip_execution_state_changed` (dst) via
/// `message_id`, restricted to `state = 2` (CCIP's `SUCCESS` execution state).
pub struct CcipGenerator;

#[async_trait]
impl CrossChainGenerator for CcipGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Ccip
    }
    fn transactions_table(&self) -> &'static str {
        "ccip_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "ccip_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "ccip_cross_chain_transactions",
            "INSERT INTO ccip_cross_chain_transactions (
                message_id, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                send.message_id,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, COALESCE(send.input_token, send.fee_token),
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, dst_tx.to_address,
                dst_tx.fee, dst_tx.timestamp, COALESCE(send.output_token, send.fee_token),
                COALESCE(send.amount, send.fee_token_amount), COALESCE(send.amount, send.fee_token_amount)
             FROM ccip_send_requested send
             JOIN ccip_blockchain_transactions src_tx ON src_tx.transaction_hash = send.transaction_hash
             JOIN ccip_execution_state_changed exec ON exec.message_id = send.message_id AND exec.state = 2
             JOIN ccip_blockchain_transactions dst_tx ON dst_tx.transaction_hash = exec.transaction_hash",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "ccip_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "ccip_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "ccip_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "ccip_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Portal (Wormhole Token Bridge): `portal_log_message_published` (src) joined to
/// `portal_transfer_redeemed` (dst) via `sequence_number`.
pub struct PortalGenerator;

#[async_trait]
impl CrossChainGenerator for PortalGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Portal
    }
    fn transactions_table(&self) -> &'static str {
        "portal_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "portal_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "portal_cross_chain_transactions",
            "INSERT INTO portal_cross_chain_transactions (
                sequence_number, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                pub.sequence_number,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, pub.token_address,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, pub.recipient,
                dst_tx.fee, dst_tx.timestamp, red.contract_address,
                pub.amount, pub.amount
             FROM portal_log_message_published pub
             JOIN portal_blockchain_transactions src_tx ON src_tx.transaction_hash = pub.transaction_hash
             JOIN portal_transfer_redeemed red ON red.sequence_number = pub.sequence_number
             JOIN portal_blockchain_transactions dst_tx ON dst_tx.transaction_hash = red.transaction_hash",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "portal_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "portal_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "portal_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "portal_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Wormhole Core: `wormhole_published` (src) joined to `wormhole_redeemed` (dst) on
/// `(sequence_number, emitter_chain_id, emitter_address_32)`, since sequence numbers are
/// scoped per emitter rather than global.
pub struct WormholeGenerator;

#[async_trait]
impl CrossChainGenerator for WormholeGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Wormhole
    }
    fn transactions_table(&self) -> &'static str {
        "wormhole_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "wormhole_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "wormhole_cross_chain_transactions",
            "INSERT INTO wormhole_cross_chain_transactions (
                tx_hash_key, sequence_number, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                pub.transaction_hash, pub.sequence_number,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, pub.contract_address,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, dst_tx.to_address,
                dst_tx.fee, dst_tx.timestamp, red.contract_address,
                0, 0
             FROM wormhole_published pub
             JOIN wormhole_blockchain_transactions src_tx ON src_tx.transaction_hash = pub.transaction_hash
             JOIN wormhole_redeemed red
                ON red.sequence_number = pub.sequence_number
                AND red.emitter_chain_id = pub.emitter_chain_id
                AND red.emitter_address_32 = pub.emitter_address_32
             JOIN wormhole_blockchain_transactions dst_tx ON dst_tx.transaction_hash = red.transaction_hash",
        )
        .await
    }

    /// Wormhole Core's VAAs carry an opaque payload rather than a decoded transfer amount
    /// (§4.4: generic message passing, not a token bridge); `input_amount`/`output_amount`
    /// stay `0` and only fees are USD-priced.
    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        Vec::new()
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "wormhole_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "wormhole_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Router Protocol: `router_funds_deposited` and `router_iusdc_deposited` both join to
/// `router_funds_paid` via `message_hash` (two deposit paths, one settlement path — §8
/// acceptance case 1).
pub struct RouterGenerator;

#[async_trait]
impl CrossChainGenerator for RouterGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Router
    }
    fn transactions_table(&self) -> &'static str {
        "router_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "router_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "router_cross_chain_transactions",
            "INSERT INTO router_cross_chain_transactions (
                message_hash, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                dep.message_hash,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, dep.src_token,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, dep.recipient,
                dst_tx.fee, dst_tx.timestamp, COALESCE(dep.dest_token, dep.src_token),
                dep.amount, COALESCE(dep.dest_amount, dep.amount)
             FROM router_funds_deposited dep
             JOIN router_blockchain_transactions src_tx ON src_tx.transaction_hash = dep.transaction_hash
             JOIN router_funds_paid paid ON paid.message_hash = dep.message_hash
             JOIN router_blockchain_transactions dst_tx ON dst_tx.transaction_hash = paid.transaction_hash
             WHERE dep.message_hash IS NOT NULL

             UNION ALL

             SELECT
                iusdc.message_hash,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, 'iusdc',
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, iusdc.recipient,
                dst_tx.fee, dst_tx.timestamp, 'iusdc',
                iusdc.amount, iusdc.amount
             FROM router_iusdc_deposited iusdc
             JOIN router_blockchain_transactions src_tx ON src_tx.transaction_hash = iusdc.transaction_hash
             JOIN router_funds_paid paid ON paid.message_hash = iusdc.message_hash
             JOIN router_blockchain_transactions dst_tx ON dst_tx.transaction_hash = paid.transaction_hash",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "router_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "router_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "router_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "router_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Mayan (EVM legs only here; the Solana leg is folded in via `mayan_solana_events`, keyed
/// by the same `order_key`/`order_hash`). Grounded on
/// `generator/mayan/generator.py::generate_cross_chain_data`'s Solana lamport rescale.
pub struct MayanGenerator;

#[async_trait]
impl CrossChainGenerator for MayanGenerator {
    fn bridge(&self) -> Bridge {
        Bridge::Mayan
    }
    fn transactions_table(&self) -> &'static str {
        "mayan_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "mayan_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        truncate_and_insert(
            conn,
            "mayan_cross_chain_transactions",
            "INSERT INTO mayan_cross_chain_transactions (
                order_key, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                created.order_key,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, fwd.token_in,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, dst_tx.to_address,
                dst_tx.fee, dst_tx.timestamp, COALESCE(fulfilled.order_key, created.order_key),
                fwd.amount_in, COALESCE(fulfilled.net_amount, fwd.amount_in)
             FROM mayan_order_created created
             JOIN mayan_blockchain_transactions src_tx ON src_tx.transaction_hash = created.transaction_hash
             JOIN mayan_swap_and_forwarded fwd ON fwd.transaction_hash = created.transaction_hash
             JOIN mayan_order_fulfilled fulfilled ON fulfilled.order_key = created.order_key
             JOIN mayan_blockchain_transactions dst_tx ON dst_tx.transaction_hash = fulfilled.transaction_hash

             UNION ALL

             SELECT
                sol.order_hash,
                sol.blockchain, sol.transaction_signature, COALESCE(sol.trader, ''), NULL,
                0, 0, COALESCE(sol.token_in, ''),
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, dst_tx.to_address,
                dst_tx.fee, dst_tx.timestamp, fulfilled.order_key,
                COALESCE(sol.amount, 0), COALESCE(fulfilled.net_amount, sol.amount, 0)
             FROM mayan_solana_events sol
             JOIN mayan_order_fulfilled fulfilled ON fulfilled.order_key = sol.order_hash
             JOIN mayan_blockchain_transactions dst_tx ON dst_tx.transaction_hash = fulfilled.transaction_hash
             WHERE sol.kind = 'initOrder'",
        )
        .await
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "mayan_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "mayan_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "mayan_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "mayan_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }

    /// Solana's native token has 9 decimals; Alchemy's response for the Solana leg's `SOL`
    /// price is priced against an 18-decimal assumption upstream (`token_metadata.decimals`
    /// has no Solana-specific entry), so the USD fee column needs a `10^9` correction on
    /// whichever side is Solana — ported from `generator/mayan/generator.py`'s post-`calculate_cctx_native_usd_values` fix-up.
    async fn post_process(&self, conn: &mut AsyncPgConnection) -> XchainResult<()> {
        diesel::sql_query(
            "UPDATE mayan_cross_chain_transactions SET src_fee_usd = src_fee_usd * 1000000000 \
             WHERE src_blockchain = 'solana' AND src_fee_usd IS NOT NULL",
        )
        .execute(conn)
        .await
        .map_err(|e| config_err("mayan_cross_chain_transactions", e))?;
        diesel::sql_query(
            "UPDATE mayan_cross_chain_transactions SET dst_fee_usd = dst_fee_usd * 1000000000 \
             WHERE dst_blockchain = 'solana' AND dst_fee_usd IS NOT NULL",
        )
        .execute(conn)
        .await
        .map_err(|e| config_err("mayan_cross_chain_transactions", e))?;
        Ok(())
    }
}

/// Shared generator for the five reduced-depth bridges (CCTP, Across, Polygon PoS, Ronin,
/// Omnibridge, §11): `generic_deposit` joined to `generic_claim` by `(bridge, depositor =
/// claimant)` on two distinct chains — an approximation documented in DESIGN.md, since the
/// source material specifies no richer correlation key for these five.
pub struct GenericGenerator {
    pub bridge: Bridge,
}

#[async_trait]
impl CrossChainGenerator for GenericGenerator {
    fn bridge(&self) -> Bridge {
        self.bridge
    }
    fn transactions_table(&self) -> &'static str {
        "generic_blockchain_transactions"
    }
    fn cross_chain_table(&self) -> &'static str {
        "generic_cross_chain_transactions"
    }

    async fn match_cross_chain(&self, conn: &mut AsyncPgConnection) -> XchainResult<usize> {
        let bridge = self.bridge.to_string();
        diesel::sql_query(format!("DELETE FROM generic_cross_chain_transactions WHERE bridge = '{bridge}'"))
            .execute(conn)
            .await
            .map_err(|e| config_err("generic_cross_chain_transactions", e))?;
        let sql = format!(
            "INSERT INTO generic_cross_chain_transactions (
                bridge, src_blockchain, src_transaction_hash, src_from_address, src_to_address,
                src_fee, src_timestamp, src_contract_address,
                dst_blockchain, dst_transaction_hash, dst_from_address, dst_to_address,
                dst_fee, dst_timestamp, dst_contract_address,
                input_amount, output_amount
             )
             SELECT
                dep.bridge,
                src_tx.blockchain, src_tx.transaction_hash, src_tx.from_address, src_tx.to_address,
                src_tx.fee, src_tx.timestamp, dep.token,
                dst_tx.blockchain, dst_tx.transaction_hash, dst_tx.from_address, claim.claimant,
                dst_tx.fee, dst_tx.timestamp, dep.token,
                dep.amount, dep.amount
             FROM generic_deposit dep
             JOIN generic_blockchain_transactions src_tx
                ON src_tx.transaction_hash = dep.transaction_hash AND src_tx.bridge = dep.bridge
             JOIN generic_claim claim ON claim.bridge = dep.bridge AND claim.claimant = dep.depositor
             JOIN generic_blockchain_transactions dst_tx
                ON dst_tx.transaction_hash = claim.transaction_hash AND dst_tx.bridge = claim.bridge
             WHERE dep.bridge = '{bridge}' AND dst_tx.blockchain != src_tx.blockchain"
        );
        diesel::sql_query(sql)
            .execute(conn)
            .await
            .map_err(|e| config_err("generic_cross_chain_transactions", e))
    }

    fn usd_amount_targets(&self) -> Vec<UsdAmountTarget> {
        vec![
            amount_target!(
                "generic_cross_chain_transactions",
                "input_amount",
                "src_blockchain",
                "src_contract_address",
                "src_timestamp",
                "input_amount_usd"
            ),
            amount_target!(
                "generic_cross_chain_transactions",
                "output_amount",
                "dst_blockchain",
                "dst_contract_address",
                "dst_timestamp",
                "output_amount_usd"
            ),
        ]
    }

    fn usd_fee_targets(&self) -> Vec<UsdFeeTarget> {
        vec![
            fee_target!(
                "generic_cross_chain_transactions",
                "src_timestamp",
                "src_blockchain",
                "src_fee",
                "src_fee_usd"
            ),
            fee_target!(
                "generic_cross_chain_transactions",
                "dst_timestamp",
                "dst_blockchain",
                "dst_fee",
                "dst_fee_usd"
            ),
        ]
    }
}

/// Compile-time `Bridge → CrossChainGenerator` registry, parallel to
/// [`crate::bridges::bridge_module`]/[`crate::bridges::transaction_sink`].
pub fn generator_for(bridge: Bridge) -> Box<dyn CrossChainGenerator> {
    if bridge.is_generic() {
        return Box::new(GenericGenerator { bridge });
    }
    match bridge {
        Bridge::Ccip => Box::new(CcipGenerator),
        Bridge::Cow => Box::new(CowGenerator),
        Bridge::Debridge => Box::new(DebridgeGenerator),
        Bridge::Eco => Box::new(EcoGenerator),
        Bridge::Fly => Box::new(FlyGenerator),
        Bridge::Mayan => Box::new(MayanGenerator),
        Bridge::Portal => Box::new(PortalGenerator),
        Bridge::Router => Box::new(RouterGenerator),
        Bridge::Stargate => Box::new(StargateGenerator),
        Bridge::Synapse => Box::new(SynapseGenerator),
        Bridge::Wormhole => Box::new(WormholeGenerator),
        Bridge::Cctp | Bridge::Across | Bridge::PolygonPos | Bridge::Ronin | Bridge::Omnibridge => {
            Box::new(GenericGenerator { bridge })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_bridge_resolves_a_generator() {
        for bridge in Bridge::iter() {
            let g = generator_for(bridge);
            assert_eq!(g.bridge(), bridge);
        }
    }
}
