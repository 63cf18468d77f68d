// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse Bridge: `TokenDepositAndSwap` (source chain, bridging out) and
//! `TokenMintAndSwap` (destination chain, bridging in). Neither event carries a shared
//! correlation id — `TokenMintAndSwap` reads its `kappa` straight off the event, but
//! `TokenDepositAndSwap` has none, so the Decoder derives one the same way Synapse's own
//! relayer does: `keccak256(tx_hash)` (§8).

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use ethers::utils::keccak256;

use crate::abi::{decode_abi, lower_hex_address, token_uint_to_bigdecimal};
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{NewSynapseTokenDepositAndSwap, NewSynapseTokenMintAndSwap};
use xchain_schema::schema::{synapse_token_deposit_and_swap, synapse_token_mint_and_swap};

pub const TOKEN_DEPOSIT_AND_SWAP_TOPIC: &str = "0x79c15604b92ef54d3f61f0c40caab8857927ca3d5092367163b4562c1699eb5f";
pub const TOKEN_MINT_AND_SWAP_TOPIC: &str = "0x4f56ec39e98539920503fd54ee56ae0cbebe9eb15aa778f18de67701eeae7c65";

fn decode_deposit_and_swap(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Address,  // to
        ParamType::Uint(256), // chainId
        ParamType::Address,  // token
        ParamType::Uint(256), // amount
        ParamType::Uint(8),  // tokenIndexFrom
        ParamType::Uint(8),  // tokenIndexTo
        ParamType::Uint(256), // minDy
        ParamType::Uint(256), // deadline
    ];
    let tokens = decode_abi("synapse", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("to_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(1).and_then(|t| t.clone().into_uint()) {
        out.insert("chain_id".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_address) {
        out.insert("token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(3).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(4).and_then(|t| t.clone().into_uint()) {
        out.insert("token_index_from".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(5).and_then(|t| t.clone().into_uint()) {
        out.insert("token_index_to".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(6).and_then(token_uint_to_bigdecimal) {
        out.insert("min_dy".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(7).and_then(token_uint_to_bigdecimal) {
        out.insert("deadline".into(), FieldValue::Uint(v));
    }
    let kappa = format!("0x{}", hex::encode(keccak256(log.transaction_hash.as_bytes())));
    out.insert("kappa".into(), FieldValue::Bytes(kappa));
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(TOKEN_DEPOSIT_AND_SWAP_TOPIC.into()));
    Ok(out)
}

fn decode_mint_and_swap(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Address,       // to
        ParamType::Address,       // token
        ParamType::Uint(256),     // amount
        ParamType::Uint(256),     // fee
        ParamType::FixedBytes(32), // kappa
        ParamType::Uint(8),       // tokenIndexFrom
        ParamType::Uint(8),       // tokenIndexTo
        ParamType::Uint(256),     // minDy
        ParamType::Uint(256),     // deadline
        ParamType::Bool,          // swapSuccess
    ];
    let tokens = decode_abi("synapse", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("to_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(3).and_then(token_uint_to_bigdecimal) {
        out.insert("fee".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(4).and_then(|t| t.clone().into_fixed_bytes()) {
        out.insert("kappa".into(), FieldValue::Bytes(format!("0x{}", hex::encode(v))));
    }
    if let Some(v) = tokens.get(5).and_then(|t| t.clone().into_uint()) {
        out.insert("token_index_from".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(6).and_then(|t| t.clone().into_uint()) {
        out.insert("token_index_to".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(7).and_then(token_uint_to_bigdecimal) {
        out.insert("min_dy".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(8).and_then(token_uint_to_bigdecimal) {
        out.insert("deadline".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(9).and_then(|t| t.clone().into_bool()) {
        out.insert("swap_success".into(), FieldValue::Bool(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(TOKEN_MINT_AND_SWAP_TOPIC.into()));
    Ok(out)
}

fn get_str(event: &DecodedEvent, k: &str) -> Option<String> {
    event.get(k).and_then(FieldValue::as_str).map(str::to_string)
}

fn get_uint(event: &DecodedEvent, k: &str) -> Option<bigdecimal::BigDecimal> {
    event.get(k).and_then(FieldValue::as_uint).cloned()
}

fn get_i32(event: &DecodedEvent, k: &str) -> Option<i32> {
    event.get(k).and_then(FieldValue::as_i64).map(|v| v as i32)
}

fn handler_err(chain: &str, message: String) -> XchainError {
    XchainError::Handler {
        bridge: "synapse".into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

struct DepositAndSwapHandler;

#[async_trait]
impl EventHandler for DepositAndSwapHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewSynapseTokenDepositAndSwap {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            kappa: get_str(&event, "kappa").ok_or_else(|| XchainError::Integrity("missing kappa".into()))?,
            token: get_str(&event, "token").unwrap_or_default(),
            amount: get_uint(&event, "amount").unwrap_or_default(),
            chain_id: event.get("chain_id").and_then(FieldValue::as_i64).unwrap_or_default(),
            to_address: get_str(&event, "to_address").unwrap_or_default(),
            token_index_from: get_i32(&event, "token_index_from"),
            token_index_to: get_i32(&event, "token_index_to"),
            min_dy: get_uint(&event, "min_dy"),
            deadline: get_uint(&event, "deadline"),
        };

        let inserted = diesel::insert_into(synapse_token_deposit_and_swap::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct MintAndSwapHandler;

#[async_trait]
impl EventHandler for MintAndSwapHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewSynapseTokenMintAndSwap {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            kappa: get_str(&event, "kappa").ok_or_else(|| XchainError::Integrity("missing kappa".into()))?,
            token: get_str(&event, "token").unwrap_or_default(),
            amount: get_uint(&event, "amount").unwrap_or_default(),
            fee: get_uint(&event, "fee"),
            to_address: get_str(&event, "to_address").unwrap_or_default(),
            token_index_from: get_i32(&event, "token_index_from"),
            token_index_to: get_i32(&event, "token_index_to"),
            min_dy: get_uint(&event, "min_dy"),
            deadline: get_uint(&event, "deadline"),
            swap_success: event.get("swap_success").and_then(FieldValue::as_bool),
        };

        let inserted = diesel::insert_into(synapse_token_mint_and_swap::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Synapse)
        .register(TOKEN_DEPOSIT_AND_SWAP_TOPIC, decode_deposit_and_swap, Arc::new(DepositAndSwapHandler))
        .register(TOKEN_MINT_AND_SWAP_TOPIC, decode_mint_and_swap, Arc::new(MintAndSwapHandler))
}
