// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Portal (Wormhole Token Bridge): reuses the Wormhole Core `LogMessagePublished` /
//! `TransferRedeemed` topics but decodes the 133-byte BridgeStructs.Transfer payload embedded
//! in `LogMessagePublished.payload` (§8). `originalAmount = normalizedAmount * 10^max(decimals-8,0)`
//! un-normalizes Wormhole's 8-decimal wire amount back to the 18-decimal value the source
//! assumes for every payload it tracks.

use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::abi::{decode_abi, lower_hex_bytes32, token_uint_to_bigdecimal, u256_to_bigdecimal};
use crate::bridge::wormhole_chain_name;
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use ethers::types::U256;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{NewPortalLogMessagePublished, NewPortalTransferRedeemed};
use xchain_schema::schema::{portal_log_message_published, portal_transfer_redeemed};

pub const LOG_MESSAGE_PUBLISHED_TOPIC: &str = "0x6eb224fb001ed210e379b335e35efe88672a8ce935d981a6896b27ffdf52a3b2";
pub const TRANSFER_REDEEMED_TOPIC: &str = "0xcaf280c8cfeba144da67230d9b009c8f868a75bac9a528fa0474be1ba317c169";

/// The token-bridge transfer payload: a 1-byte discriminant distinguishes it from Wormhole's
/// other payload types, hence the 266-hex-char (133-byte) length gate in `decode_published`.
struct TransferPayload {
    original_amount: BigDecimal,
    token_address: String,
    token_chain: u16,
    recipient: String,
    to_chain: u16,
    fee: BigDecimal,
}

fn decode_transfer_payload(payload: &[u8], decimals: u32) -> Option<TransferPayload> {
    if payload.len() < 1 + 32 + 32 + 2 + 32 + 2 + 32 {
        return None;
    }
    let mut offset = 1; // payloadID
    let normalized_amount = U256::from_big_endian(&payload[offset..offset + 32]);
    offset += 32;
    let token_address = format!("0x{}", hex::encode(&payload[offset..offset + 32]));
    offset += 32;
    let token_chain = u16::from_be_bytes(payload[offset..offset + 2].try_into().ok()?);
    offset += 2;
    let recipient = format!("0x{}", hex::encode(&payload[offset..offset + 32]));
    offset += 32;
    let to_chain = u16::from_be_bytes(payload[offset..offset + 2].try_into().ok()?);
    offset += 2;
    let fee = U256::from_big_endian(&payload[offset..offset + 32]);

    let shift = decimals.saturating_sub(8);
    let scale = U256::from(10u64).checked_pow(U256::from(shift))?;
    let original_amount = normalized_amount.checked_mul(scale)?;

    Some(TransferPayload {
        original_amount: u256_to_bigdecimal(original_amount),
        token_address,
        token_chain,
        recipient,
        to_chain,
        fee: u256_to_bigdecimal(fee),
    })
}

fn decode_published(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Address, ParamType::Uint(64), ParamType::Uint(32), ParamType::Bytes, ParamType::Uint(8)];
    let tokens = decode_abi("portal", &types, &log.data)?;
    let payload_bytes = tokens.get(3).and_then(|t| t.clone().into_bytes()).unwrap_or_default();

    // 266 hex chars == 133 bytes; anything else is a different payload riding the same topic.
    if payload_bytes.len() != 133 {
        return Ok(DecodedEvent::new());
    }

    let decoded = decode_transfer_payload(&payload_bytes, 18).ok_or_else(|| XchainError::Decode {
        bridge: "portal".into(),
        topic: LOG_MESSAGE_PUBLISHED_TOPIC.into(),
        message: "transfer payload too short".into(),
    })?;

    let mut out = DecodedEvent::new();
    out.insert("amount".into(), FieldValue::Uint(decoded.original_amount));
    out.insert("token_address".into(), FieldValue::Address(decoded.token_address));
    out.insert("token_chain".into(), FieldValue::I64(decoded.token_chain as i64));
    out.insert("recipient".into(), FieldValue::Address(decoded.recipient));
    out.insert("to_chain_id".into(), FieldValue::I64(decoded.to_chain as i64));
    out.insert("fee".into(), FieldValue::Uint(decoded.fee));
    if let Some(v) = tokens.get(1).and_then(token_uint_to_bigdecimal) {
        out.insert("sequence_number".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(2).and_then(|t| t.clone().into_uint()) {
        out.insert("nonce".into(), FieldValue::I64(v.low_u64() as i64));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(LOG_MESSAGE_PUBLISHED_TOPIC.into()));
    Ok(out)
}

fn decode_redeemed(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::Uint(16), ParamType::FixedBytes(32), ParamType::Uint(64)];
    let tokens = decode_abi("portal", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(|t| t.clone().into_uint()) {
        out.insert("emitter_chain_id".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32) {
        out.insert("emitter_address".into(), FieldValue::Bytes(v));
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
        bridge: "portal".into(),
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
        if event.is_empty() {
            return Ok(None);
        }
        let dst = event
            .get("to_chain_id")
            .and_then(FieldValue::as_i64)
            .and_then(|id| wormhole_chain_name(id as u16));
        let Some(dst) = dst else { return Ok(None) };

        let get_str = |k: &str| event.get(k).and_then(FieldValue::as_str).map(str::to_string);
        let get_uint = |k: &str| event.get(k).and_then(FieldValue::as_uint).cloned();

        let row = NewPortalLogMessagePublished {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            sequence_number: get_uint("sequence_number").unwrap_or_default(),
            nonce: event.get("nonce").and_then(FieldValue::as_i64).unwrap_or_default(),
            amount: get_uint("amount").unwrap_or_default(),
            token_address: get_str("token_address").unwrap_or_default(),
            token_chain: event.get("token_chain").and_then(FieldValue::as_i64).unwrap_or_default() as i32,
            recipient: get_str("recipient").unwrap_or_default(),
            recipient_chain: dst.to_string(),
            fee: get_uint("fee").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(portal_log_message_published::table)
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
        let src = event
            .get("emitter_chain_id")
            .and_then(FieldValue::as_i64)
            .and_then(|id| wormhole_chain_name(id as u16));
        let Some(src) = src else { return Ok(None) };

        let get_str = |k: &str| event.get(k).and_then(FieldValue::as_str).map(str::to_string);
        let get_uint = |k: &str| event.get(k).and_then(FieldValue::as_uint).cloned();

        let row = NewPortalTransferRedeemed {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            sequence_number: get_uint("sequence_number").unwrap_or_default(),
            emitter_chain: src.to_string(),
            emitter_address: get_str("emitter_address").unwrap_or_default(),
            data: get_str("data").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(portal_transfer_redeemed::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err(&ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Portal)
        .register(LOG_MESSAGE_PUBLISHED_TOPIC, decode_published, Arc::new(PublishedHandler))
        .register(TRANSFER_REDEEMED_TOPIC, decode_redeemed, Arc::new(RedeemedHandler))
}
