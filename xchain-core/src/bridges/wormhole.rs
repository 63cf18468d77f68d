// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wormhole Core Messaging: `LogMessagePublished`/`TransferRedeemed` on the Wormhole Core
//! contract. Unlike the token-bridge-specific events Portal decodes, these two events carry
//! only the generic message envelope — no amount/token payload parsing here (§3 keeps Portal
//! and Wormhole Core as separate raw-table sets).

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::abi::{decode_abi, lower_hex_address, lower_hex_bytes32, token_uint_to_bigdecimal};
use crate::bridge::WORMHOLE_CHAIN_IDS;
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, BLOCK_NUMBER_KEY, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{NewWormholePublished, NewWormholeRedeemed};
use xchain_schema::schema::{wormhole_published, wormhole_redeemed};

pub const LOG_MESSAGE_PUBLISHED_TOPIC: &str = "0x6eb224fb001ed210e379b335e35efe88672a8ce935d981a6896b27ffdf52a3b2";
pub const TRANSFER_REDEEMED_TOPIC: &str = "0xcaf280c8cfeba144da67230d9b009c8f868a75bac9a528fa0474be1ba317c169";

fn address_to_bytes32(addr: &str) -> String {
    let stripped = addr.trim_start_matches("0x");
    format!("0x{}{}", "0".repeat(24), stripped)
}

fn decode_published(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Uint(64), ParamType::Uint(32), ParamType::Bytes, ParamType::Uint(8)];
    let tokens = decode_abi("wormhole", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    let sender = tokens.first().and_then(lower_hex_address);
    if let Some(ref v) = sender {
        out.insert("sender".into(), FieldValue::Address(v.clone()));
        out.insert("emitter_address_32".into(), FieldValue::Bytes(address_to_bytes32(v)));
    }
    if let Some(v) = tokens.get(1).and_then(token_uint_to_bigdecimal) {
        out.insert("sequence_number".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("nonce".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(3).and_then(|t| t.clone().into_bytes()) {
        out.insert("payload".into(), FieldValue::Bytes(format!("0x{}", hex::encode(v))));
    }
    if let Some(v) = tokens.get(4).and_then(|t| t.clone().into_uint()) {
        out.insert("consistency_level".into(), FieldValue::I64(v.low_u64() as i64));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(BLOCK_NUMBER_KEY.into(), FieldValue::I64(log.block_number as i64));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(LOG_MESSAGE_PUBLISHED_TOPIC.into()));
    Ok(out)
}

fn decode_redeemed(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Uint(16), ParamType::FixedBytes(32), ParamType::Uint(64)];
    let tokens = decode_abi("wormhole", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(|t| t.clone().into_uint()) {
        out.insert("emitter_chain_id".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32) {
        out.insert("emitter_address_32".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("sequence_number".into(), FieldValue::Uint(v));
    }
    out.insert("data".into(), FieldValue::Bytes(log.data.clone()));
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(TRANSFER_REDEEMED_TOPIC.into()));
    Ok(out)
}

fn handler_err(chain: &str, message: String) -> XchainError {
    XchainError::Handler {
        bridge: "wormhole".into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

struct PublishedHandler;

#[async_trait]
impl EventHandler for PublishedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let get_str = |k: &str| event.get(k).and_then(FieldValue::as_str).map(str::to_string);
        let get_uint = |k: &str| event.get(k).and_then(FieldValue::as_uint).cloned();
        let emitter_chain_id = *WORMHOLE_CHAIN_IDS.get(&ctx.blockchain).unwrap_or(&0) as i32;

        let row = NewWormholePublished {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            block_number: event.get(BLOCK_NUMBER_KEY).and_then(FieldValue::as_i64).unwrap_or_default(),
            sender: get_str("sender").unwrap_or_default(),
            sequence_number: get_uint("sequence_number").unwrap_or_default(),
            nonce: get_uint("nonce"),
            payload: get_str("payload"),
            consistency_level: event.get("consistency_level").and_then(FieldValue::as_i64).map(|v| v as i32),
            emitter_address_32: get_str("emitter_address_32").unwrap_or_default(),
            emitter_chain_id,
        };

        let inserted = diesel::insert_into(wormhole_published::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct RedeemedHandler;

#[async_trait]
impl EventHandler for RedeemedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let get_str = |k: &str| event.get(k).and_then(FieldValue::as_str).map(str::to_string);
        let get_uint = |k: &str| event.get(k).and_then(FieldValue::as_uint).cloned();

        let row = NewWormholeRedeemed {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            sequence_number: get_uint("sequence_number").unwrap_or_default(),
            emitter_chain_id: event.get("emitter_chain_id").and_then(FieldValue::as_i64).unwrap_or_default() as i32,
            emitter_address_32: get_str("emitter_address_32").unwrap_or_default(),
            data: get_str("data").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(wormhole_redeemed::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Wormhole)
        .register(LOG_MESSAGE_PUBLISHED_TOPIC, decode_published, Arc::new(PublishedHandler))
        .register(TRANSFER_REDEEMED_TOPIC, decode_redeemed, Arc::new(RedeemedHandler))
}
