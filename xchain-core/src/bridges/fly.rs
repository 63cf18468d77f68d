// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fly (Synapse's intent-based fast bridge): `SwapIn`/`SwapOut` carry the full swap leg on
//! each side, `Deposit` the escrowed collateral. `SwapIn` is the only event whose join key
//! isn't on-chain data directly — it's `keccak256(encodedDepositData)` (§8), computed here
//! exactly like the source's `_compute_deposit_hash_from_encoded`; `SwapOut`/`Deposit` read
//! `depositDataHash` straight off the event.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use ethers::utils::keccak256;

use crate::abi::{decode_abi, lower_hex_address, lower_hex_bytes32, token_uint_to_bigdecimal};
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{NewFlyDeposit, NewFlySwapIn, NewFlySwapOut};
use xchain_schema::schema::{fly_deposit, fly_swap_in, fly_swap_out};

pub const SWAP_IN_TOPIC: &str = "0x37600fc06910ae05ad532c02a9de91251b21674999c33c6e6da90271029bfa23";
pub const SWAP_OUT_TOPIC: &str = "0x13d672f2c19bbdf5ce8c9c4894d9586248592fd27d555c2c03ac5e49d219f45d";
pub const DEPOSIT_TOPIC: &str = "0x98e783c3864bbf744a057ef605a2a61701c3b62b5ed68b3745b99094497daf1f";

fn decode_swap_in(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Address, // fromAddress
        ParamType::Address, // toAddress
        ParamType::Address, // fromAssetAddress
        ParamType::Address, // toAssetAddress
        ParamType::Uint(256), // amountIn
        ParamType::Uint(256), // amountOut
        ParamType::Bytes,   // encodedDepositData
    ];
    let tokens = decode_abi("fly", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("from_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("to_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_address) {
        out.insert("from_asset_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(3).and_then(lower_hex_address) {
        out.insert("to_asset_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(4).and_then(token_uint_to_bigdecimal) {
        out.insert("amount_in".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(5).and_then(token_uint_to_bigdecimal) {
        out.insert("amount_out".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(6).and_then(|t| t.clone().into_bytes()) {
        let encoded = format!("0x{}", hex::encode(&v));
        let hash = format!("0x{}", hex::encode(keccak256(&v)));
        out.insert("encoded_deposit_data".into(), FieldValue::Bytes(encoded));
        out.insert("deposit_data_hash".into(), FieldValue::Bytes(hash));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(SWAP_IN_TOPIC.into()));
    Ok(out)
}

fn decode_swap_out(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Address, // fromAddress
        ParamType::Address, // toAddress
        ParamType::Address, // fromAssetAddress
        ParamType::Address, // toAssetAddress
        ParamType::Uint(256), // amountIn
        ParamType::Uint(256), // amountOut
        ParamType::FixedBytes(32), // depositDataHash
    ];
    let tokens = decode_abi("fly", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("from_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("to_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_address) {
        out.insert("from_asset_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(3).and_then(lower_hex_address) {
        out.insert("to_asset_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(4).and_then(token_uint_to_bigdecimal) {
        out.insert("amount_in".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(5).and_then(token_uint_to_bigdecimal) {
        out.insert("amount_out".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(6).and_then(lower_hex_bytes32) {
        out.insert("deposit_data_hash".into(), FieldValue::Bytes(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(SWAP_OUT_TOPIC.into()));
    Ok(out)
}

fn decode_deposit(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::FixedBytes(32), ParamType::Uint(256)];
    let tokens = decode_abi("fly", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("deposit_data_hash".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(1).and_then(token_uint_to_bigdecimal) {
        out.insert("amount".into(), FieldValue::Uint(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(DEPOSIT_TOPIC.into()));
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
        bridge: "fly".into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

struct SwapInHandler;

#[async_trait]
impl EventHandler for SwapInHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewFlySwapIn {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            from_address: get_str(&event, "from_address").unwrap_or_default(),
            to_address: get_str(&event, "to_address").unwrap_or_default(),
            from_asset_address: get_str(&event, "from_asset_address").unwrap_or_default(),
            to_asset_address: get_str(&event, "to_asset_address").unwrap_or_default(),
            amount_in: get_uint(&event, "amount_in").unwrap_or_default(),
            amount_out: get_uint(&event, "amount_out").unwrap_or_default(),
            encoded_deposit_data: get_str(&event, "encoded_deposit_data"),
            deposit_data_hash: get_str(&event, "deposit_data_hash"),
        };

        let inserted = diesel::insert_into(fly_swap_in::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct SwapOutHandler;

#[async_trait]
impl EventHandler for SwapOutHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewFlySwapOut {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            from_address: get_str(&event, "from_address").unwrap_or_default(),
            to_address: get_str(&event, "to_address").unwrap_or_default(),
            from_asset_address: get_str(&event, "from_asset_address").unwrap_or_default(),
            to_asset_address: get_str(&event, "to_asset_address").unwrap_or_default(),
            amount_in: get_uint(&event, "amount_in").unwrap_or_default(),
            amount_out: get_uint(&event, "amount_out").unwrap_or_default(),
            deposit_data_hash: get_str(&event, "deposit_data_hash"),
        };

        let inserted = diesel::insert_into(fly_swap_out::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct DepositHandler;

#[async_trait]
impl EventHandler for DepositHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewFlyDeposit {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(&event, CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            deposit_data_hash: get_str(&event, "deposit_data_hash").ok_or_else(|| XchainError::Integrity("missing deposit_data_hash".into()))?,
            amount: get_uint(&event, "amount"),
        };

        let inserted = diesel::insert_into(fly_deposit::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Fly)
        .register(SWAP_IN_TOPIC, decode_swap_in, Arc::new(SwapInHandler))
        .register(SWAP_OUT_TOPIC, decode_swap_out, Arc::new(SwapOutHandler))
        .register(DEPOSIT_TOPIC, decode_deposit, Arc::new(DepositHandler))
}
