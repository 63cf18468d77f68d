// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Eco Protocol: `IntentCreated` (source chain) and `Fulfillment` (destination chain),
//! joined on the intent's `hash` (§8). Both the reward-token list and the intent's
//! `calldata`/`routeTokens` arrays live only in the on-chain route struct, which the source
//! never persists beyond `hash`/`salt`/`source`/`destination`/`inbox` — tracked here the
//! same way.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::abi::{decode_abi, lower_hex_address, lower_hex_bytes32, token_uint_to_bigdecimal};
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{NewEcoFulfillment, NewEcoIntentCreated};
use xchain_schema::schema::{eco_fulfillment, eco_intent_created};

pub const INTENT_CREATED_TOPIC: &str = "0xd802f2610d0c85b3f19be4413f3cf49de1d4e787edecd538274437a5b9aa648d";
pub const FULFILLMENT_TOPIC: &str = "0x4a817ec64beb8020b3e400f30f3b458110d5765d7a9d1ace4e68754ed2d082de";

fn decode_intent_created(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::FixedBytes(32), // hash
        ParamType::FixedBytes(32), // salt
        ParamType::Uint(256),      // source
        ParamType::Uint(256),      // destination
        ParamType::Address,        // inbox
        ParamType::Address,        // creator
        ParamType::Address,        // prover
        ParamType::Uint(256),      // deadline
        ParamType::Uint(256),      // nativeValue
    ];
    let tokens = decode_abi("eco", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("hash".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32) {
        out.insert("salt".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(2).and_then(|t| t.clone().into_uint()) {
        out.insert("source".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(3).and_then(|t| t.clone().into_uint()) {
        out.insert("destination".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(4).and_then(lower_hex_address) {
        out.insert("inbox".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(5).and_then(lower_hex_address) {
        out.insert("creator".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(6).and_then(lower_hex_address) {
        out.insert("prover".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(7).and_then(token_uint_to_bigdecimal) {
        out.insert("deadline".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(8).and_then(token_uint_to_bigdecimal) {
        out.insert("native_value".into(), FieldValue::Uint(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(INTENT_CREATED_TOPIC.into()));
    Ok(out)
}

fn decode_fulfillment(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::FixedBytes(32), // _hash
        ParamType::Uint(256),      // _sourceChainID
        ParamType::Address,        // _prover
        ParamType::Address,        // _claimant
    ];
    let tokens = decode_abi("eco", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("hash".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(1).and_then(token_uint_to_bigdecimal) {
        out.insert("source_chain_id".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_address) {
        out.insert("prover".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(3).and_then(lower_hex_address) {
        out.insert("claimant".into(), FieldValue::Address(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(FULFILLMENT_TOPIC.into()));
    Ok(out)
}

fn get_str(event: &DecodedEvent, k: &str) -> Option<String> {
    event.get(k).and_then(FieldValue::as_str).map(str::to_string)
}

fn get_uint(event: &DecodedEvent, k: &str) -> Option<bigdecimal::BigDecimal> {
    event.get(k).and_then(FieldValue::as_uint).cloned()
}

fn handler_err(chain: &str, message: String) -> XchainError {
    XchainError::Handler {
        bridge: "eco".into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

struct IntentCreatedHandler;

#[async_trait]
impl EventHandler for IntentCreatedHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewEcoIntentCreated {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            intent_hash: get_str(&event, "hash").ok_or_else(|| XchainError::Integrity("missing hash".into()))?,
            salt: get_str(&event, "salt"),
            source_chain_id: event.get("source").and_then(FieldValue::as_i64).map(bigdecimal::BigDecimal::from),
            destination_chain_id: event.get("destination").and_then(FieldValue::as_i64).map(bigdecimal::BigDecimal::from),
            inbox: get_str(&event, "inbox"),
            creator: get_str(&event, "creator").unwrap_or_default(),
            prover: get_str(&event, "prover"),
            deadline: get_uint(&event, "deadline"),
            native_value: get_uint(&event, "native_value"),
        };

        let inserted = diesel::insert_into(eco_intent_created::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct FulfillmentHandler;

#[async_trait]
impl EventHandler for FulfillmentHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewEcoFulfillment {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            intent_hash: get_str(&event, "hash").ok_or_else(|| XchainError::Integrity("missing hash".into()))?,
            source_chain_id: get_uint(&event, "source_chain_id"),
            prover: get_str(&event, "prover"),
            claimant: get_str(&event, "claimant").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(eco_fulfillment::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Eco)
        .register(INTENT_CREATED_TOPIC, decode_intent_created, Arc::new(IntentCreatedHandler))
        .register(FULFILLMENT_TOPIC, decode_fulfillment, Arc::new(FulfillmentHandler))
}
