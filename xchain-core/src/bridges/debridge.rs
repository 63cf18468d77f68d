// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! deBridge DLN: `CreatedOrder`/`FulfilledOrder`/`SentOrderUnlock`/`ClaimedUnlock`.
//! `CreatedOrder`/`FulfilledOrder` carry a 14-field order tuple keyed on both a `giveChainId`
//! and a `takeChainId`; the source drops the event if either side's chain id does not map to
//! a tracked chain, or if the id carries the `"1000000"` prefix deBridge reserves for chains
//! below its value threshold (§4.4 out-of-scope-chain drop, extended to a dual-sided check).

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::abi::{decode_abi, lower_hex_address, lower_hex_bytes32, token_uint_to_bigdecimal};
use crate::bridge::{evm_chain_name, ChainName};
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::{
    NewDebridgeClaimedUnlock, NewDebridgeCreatedOrder, NewDebridgeFulfilledOrder, NewDebridgeSentOrderUnlock,
};
use xchain_schema::schema::{
    debridge_claimed_unlock, debridge_created_order, debridge_fulfilled_order, debridge_sent_order_unlock,
};

pub const CREATED_ORDER_TOPIC: &str = "0xfc8703fd57380f9dd234a89dce51333782d49c5902f307b02f03e014d18fe471";
pub const FULFILLED_ORDER_TOPIC: &str = "0xd281ee92bab1446041582480d2c0a9dc91f855386bb27ea295faac1e992f7fe4";
pub const SENT_ORDER_UNLOCK_TOPIC: &str = "0x37a01d7dc38e924008cf4f2fa3d2ec1f45e7ae3c8292eb3e7d9314b7ad10e2fc";
pub const CLAIMED_UNLOCK_TOPIC: &str = "0x33fff3d864e92b6e1ef9e830196fc019c946104ea621b833aaebd3c3e84b2f6f";

/// `convert_id_to_blockchain_name`: discards ids deBridge reserves below `"1000000"`, then
/// falls back to the plain EVM chain-id table. Chains outside the tracked set return `None`
/// and the caller drops the event (§4.4).
fn debridge_chain_name(chain_id: u64) -> Option<ChainName> {
    if chain_id.to_string().starts_with("1000000") {
        debug!(chain_id, "dropping deBridge event for below-threshold chain id");
        return None;
    }
    evm_chain_name(chain_id)
}

fn order_tuple_types() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Uint(64),   // makerOrderNonce
        ParamType::Bytes,      // makerSrc
        ParamType::Uint(256),  // giveChainId
        ParamType::Bytes,      // giveTokenAddress
        ParamType::Uint(256),  // giveAmount
        ParamType::Uint(256),  // takeChainId
        ParamType::Bytes,      // takeTokenAddress
        ParamType::Uint(256),  // takeAmount
        ParamType::Bytes,      // receiverDst
        ParamType::Bytes,      // givePatchAuthoritySrc
        ParamType::Bytes,      // orderAuthorityAddressDst
        ParamType::Bytes,      // allowedTakerDst
        ParamType::Bytes,      // allowedCancelBeneficiarySrc
        ParamType::Bytes,      // externalCall
    ])
}

fn decode_order_common(log: &RawLog, types: Vec<ParamType>) -> XchainResult<(Vec<ethers::abi::Token>, Vec<ethers::abi::Token>)> {
    let tokens = decode_abi("debridge", &types, &log.data)?;
    let order = tokens
        .first()
        .cloned()
        .and_then(|t| t.into_tuple())
        .ok_or_else(|| XchainError::Decode {
            bridge: "debridge".into(),
            topic: String::new(),
            message: "order tuple missing".into(),
        })?;
    Ok((tokens, order))
}

fn decode_created_order(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![order_tuple_types(), ParamType::FixedBytes(32), ParamType::Uint(256), ParamType::Uint(256), ParamType::Uint(256), ParamType::Bytes];
    let (tokens, order) = decode_order_common(log, types)?;
    let mut out = order_fields(&order);
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32) {
        out.insert("order_id".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("native_fix_fee".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(3).and_then(token_uint_to_bigdecimal) {
        out.insert("percent_fee".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(4).and_then(token_uint_to_bigdecimal) {
        out.insert("referral_code".into(), FieldValue::Uint(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(CREATED_ORDER_TOPIC.into()));
    Ok(out)
}

fn decode_fulfilled_order(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![order_tuple_types(), ParamType::FixedBytes(32), ParamType::Bytes, ParamType::Bytes];
    let (tokens, order) = decode_order_common(log, types)?;
    let mut out = order_fields(&order);
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32) {
        out.insert("order_id".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_bytes32).or_else(|| tokens.get(2).and_then(lower_hex_address)) {
        out.insert("sender".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(3).and_then(lower_hex_bytes32).or_else(|| tokens.get(3).and_then(lower_hex_address)) {
        out.insert("unlock_authority".into(), FieldValue::Address(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(FULFILLED_ORDER_TOPIC.into()));
    Ok(out)
}

fn order_fields(order: &[ethers::abi::Token]) -> DecodedEvent {
    let mut out = DecodedEvent::new();
    if let Some(v) = order.first().and_then(token_uint_to_bigdecimal) {
        out.insert("maker_order_nonce".into(), FieldValue::Uint(v));
    }
    if let Some(v) = order.get(1).and_then(lower_hex_bytes32).or_else(|| order.get(1).and_then(lower_hex_address)) {
        out.insert("maker_src".into(), FieldValue::Address(v));
    }
    if let Some(v) = order.get(2).and_then(|t| t.clone().into_uint()) {
        out.insert("give_chain_id".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = order.get(3).and_then(lower_hex_bytes32).or_else(|| order.get(3).and_then(lower_hex_address)) {
        out.insert("give_token_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = order.get(4).and_then(token_uint_to_bigdecimal) {
        out.insert("give_amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = order.get(5).and_then(|t| t.clone().into_uint()) {
        out.insert("take_chain_id".into(), FieldValue::I64(v.low_u64() as i64));
    }
    if let Some(v) = order.get(6).and_then(lower_hex_bytes32).or_else(|| order.get(6).and_then(lower_hex_address)) {
        out.insert("take_token_address".into(), FieldValue::Address(v));
    }
    if let Some(v) = order.get(7).and_then(token_uint_to_bigdecimal) {
        out.insert("take_amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = order.get(8).and_then(lower_hex_bytes32).or_else(|| order.get(8).and_then(lower_hex_address)) {
        out.insert("receiver_dst".into(), FieldValue::Address(v));
    }
    if let Some(v) = order.get(9).and_then(lower_hex_bytes32).or_else(|| order.get(9).and_then(lower_hex_address)) {
        out.insert("give_patch_authority_src".into(), FieldValue::Address(v));
    }
    if let Some(v) = order.get(10).and_then(lower_hex_bytes32).or_else(|| order.get(10).and_then(lower_hex_address)) {
        out.insert("order_authority_address_dst".into(), FieldValue::Address(v));
    }
    if let Some(v) = order.get(11).and_then(lower_hex_bytes32).or_else(|| order.get(11).and_then(lower_hex_address)) {
        out.insert("allowed_taker_dst".into(), FieldValue::Address(v));
    }
    if let Some(v) = order.get(12).and_then(|t| t.clone().into_bytes()) {
        out.insert("allowed_cancel_beneficiary_src".into(), FieldValue::Bytes(format!("0x{}", hex::encode(v))));
    }
    if let Some(v) = order.get(13).and_then(|t| t.clone().into_bytes()) {
        out.insert("external_call".into(), FieldValue::Bytes(format!("0x{}", hex::encode(v))));
    }
    out
}

fn decode_sent_order_unlock(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::FixedBytes(32), ParamType::Bytes, ParamType::FixedBytes(32)];
    let tokens = decode_abi("debridge", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("order_id".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32).or_else(|| tokens.get(1).and_then(lower_hex_address)) {
        out.insert("beneficiary".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_bytes32) {
        out.insert("submission_id".into(), FieldValue::Bytes(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(SENT_ORDER_UNLOCK_TOPIC.into()));
    Ok(out)
}

fn decode_claimed_unlock(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![ParamType::FixedBytes(32), ParamType::Bytes, ParamType::Uint(256), ParamType::Bytes];
    let tokens = decode_abi("debridge", &types, &log.data)?;
    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_bytes32) {
        out.insert("order_id".into(), FieldValue::Bytes(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_bytes32).or_else(|| tokens.get(1).and_then(lower_hex_address)) {
        out.insert("beneficiary".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(token_uint_to_bigdecimal) {
        out.insert("give_amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(3).and_then(lower_hex_bytes32).or_else(|| tokens.get(3).and_then(lower_hex_address)) {
        out.insert("give_token_address".into(), FieldValue::Address(v));
    }
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(CLAIMED_UNLOCK_TOPIC.into()));
    Ok(out)
}

fn get_str(event: &DecodedEvent, k: &str) -> Option<String> {
    event.get(k).and_then(FieldValue::as_str).map(str::to_string)
}

fn get_uint(event: &DecodedEvent, k: &str) -> Option<bigdecimal::BigDecimal> {
    event.get(k).and_then(FieldValue::as_uint).cloned()
}

fn handler_err(bridge: &str, chain: &str, message: String) -> XchainError {
    XchainError::Handler {
        bridge: bridge.into(),
        chain: chain.into(),
        start: 0,
        end: 0,
        contract: String::new(),
        message,
        duplicate: false,
    }
}

struct CreatedOrderHandler;

#[async_trait]
impl EventHandler for CreatedOrderHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let give_chain_id = event.get("give_chain_id").and_then(FieldValue::as_i64);
        let take_chain_id = event.get("take_chain_id").and_then(FieldValue::as_i64);
        let (Some(src), Some(dst)) = (
            give_chain_id.and_then(|id| debridge_chain_name(id as u64)),
            take_chain_id.and_then(|id| debridge_chain_name(id as u64)),
        ) else {
            return Ok(None);
        };

        let row = NewDebridgeCreatedOrder {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            order_id: get_str(&event, "order_id").ok_or_else(|| XchainError::Integrity("missing order_id".into()))?,
            maker_order_nonce: get_uint(&event, "maker_order_nonce").unwrap_or_default(),
            maker_src: get_str(&event, "maker_src").unwrap_or_default(),
            src_blockchain: src.to_string(),
            give_token_address: get_str(&event, "give_token_address").unwrap_or_default(),
            give_amount: get_uint(&event, "give_amount").unwrap_or_default(),
            dst_blockchain: dst.to_string(),
            take_token_address: get_str(&event, "take_token_address").unwrap_or_default(),
            take_amount: get_uint(&event, "take_amount").unwrap_or_default(),
            receiver_dst: get_str(&event, "receiver_dst").unwrap_or_default(),
            give_patch_authority_src: get_str(&event, "give_patch_authority_src").unwrap_or_default(),
            order_authority_address_dst: get_str(&event, "order_authority_address_dst").unwrap_or_default(),
            allowed_taker_dst: get_str(&event, "allowed_taker_dst"),
            allowed_cancel_beneficiary_src: get_str(&event, "allowed_cancel_beneficiary_src"),
            external_call: get_str(&event, "external_call"),
            affiliate_fee: get_uint(&event, "affiliate_fee"),
            native_fix_fee: get_uint(&event, "native_fix_fee").unwrap_or_default(),
            percent_fee: get_uint(&event, "percent_fee").unwrap_or_default(),
            referral_code: get_str(&event, "referral_code"),
        };

        let inserted = diesel::insert_into(debridge_created_order::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err("debridge", &ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct FulfilledOrderHandler;

#[async_trait]
impl EventHandler for FulfilledOrderHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let give_chain_id = event.get("give_chain_id").and_then(FieldValue::as_i64);
        let take_chain_id = event.get("take_chain_id").and_then(FieldValue::as_i64);
        let (Some(src), Some(dst)) = (
            give_chain_id.and_then(|id| debridge_chain_name(id as u64)),
            take_chain_id.and_then(|id| debridge_chain_name(id as u64)),
        ) else {
            return Ok(None);
        };

        let row = NewDebridgeFulfilledOrder {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            order_id: get_str(&event, "order_id").ok_or_else(|| XchainError::Integrity("missing order_id".into()))?,
            maker_order_nonce: get_uint(&event, "maker_order_nonce").unwrap_or_default(),
            maker_src: get_str(&event, "maker_src").unwrap_or_default(),
            src_blockchain: src.to_string(),
            give_token_address: get_str(&event, "give_token_address").unwrap_or_default(),
            give_amount: get_uint(&event, "give_amount").unwrap_or_default(),
            dst_blockchain: dst.to_string(),
            take_token_address: get_str(&event, "take_token_address").unwrap_or_default(),
            take_amount: get_uint(&event, "take_amount").unwrap_or_default(),
            receiver_dst: get_str(&event, "receiver_dst").unwrap_or_default(),
            give_patch_authority_src: get_str(&event, "give_patch_authority_src").unwrap_or_default(),
            order_authority_address_dst: get_str(&event, "order_authority_address_dst").unwrap_or_default(),
            allowed_taker_dst: get_str(&event, "allowed_taker_dst"),
            allowed_cancel_beneficiary_src: get_str(&event, "allowed_cancel_beneficiary_src"),
            external_call: get_str(&event, "external_call"),
            sender: get_str(&event, "sender").unwrap_or_default(),
            unlock_authority: get_str(&event, "unlock_authority").unwrap_or_default(),
        };

        let inserted = diesel::insert_into(debridge_fulfilled_order::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err("debridge", &ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct SentOrderUnlockHandler;

#[async_trait]
impl EventHandler for SentOrderUnlockHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewDebridgeSentOrderUnlock {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            order_id: get_str(&event, "order_id").ok_or_else(|| XchainError::Integrity("missing order_id".into()))?,
            beneficiary: get_str(&event, "beneficiary").unwrap_or_default(),
            submission_id: get_str(&event, "submission_id").unwrap_or_default(),
        };
        let inserted = diesel::insert_into(debridge_sent_order_unlock::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err("debridge", &ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

struct ClaimedUnlockHandler;

#[async_trait]
impl EventHandler for ClaimedUnlockHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let row = NewDebridgeClaimedUnlock {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(&event, TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            order_id: get_str(&event, "order_id").ok_or_else(|| XchainError::Integrity("missing order_id".into()))?,
            beneficiary: get_str(&event, "beneficiary").unwrap_or_default(),
            give_amount: get_uint(&event, "give_amount").unwrap_or_default(),
            give_token_address: get_str(&event, "give_token_address").unwrap_or_default(),
        };
        let inserted = diesel::insert_into(debridge_claimed_unlock::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| handler_err("debridge", &ctx.blockchain.to_string(), e.to_string()))?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Debridge)
        .register(CREATED_ORDER_TOPIC, decode_created_order, Arc::new(CreatedOrderHandler))
        .register(FULFILLED_ORDER_TOPIC, decode_fulfilled_order, Arc::new(FulfilledOrderHandler))
        .register(SENT_ORDER_UNLOCK_TOPIC, decode_sent_order_unlock, Arc::new(SentOrderUnlockHandler))
        .register(CLAIMED_UNLOCK_TOPIC, decode_claimed_unlock, Arc::new(ClaimedUnlockHandler))
}
