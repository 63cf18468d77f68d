// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! CoW Protocol: GPv2Settlement's `Trade(address owner, IERC20 sellToken, IERC20 buyToken,
//! uint256 sellAmount, uint256 buyAmount, uint256 feeAmount, bytes orderUid)`. `orderUid` is
//! a 56-byte packed key (`orderDigest[32] || owner[20] || validTo[4]`); we decode it for the
//! `valid_to` column and reuse its leading 32 bytes as the cross-chain correlation key.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::abi::{decode_abi, lower_hex_address, token_uint_to_bigdecimal};
use crate::dispatch::{BridgeModule, EventHandler, HandleContext};
use crate::types::{DecodedEvent, FieldValue, RawLog, CONTRACT_ADDRESS_KEY, TOPIC_KEY, TX_HASH_KEY};
use ethers::abi::ParamType;
use xchain_common::{XchainError, XchainResult};
use xchain_schema::models::NewCowTrade;
use xchain_schema::schema::cow_trade;

pub const TRADE_TOPIC: &str = "0xa07a543ab8a018198e99ca0184c93fe9050a79400a0a723441f84de1d972cc17";

fn decode_order_uid(uid: &[u8]) -> (String, String, i64) {
    let order_hash = format!("0x{}", hex::encode(&uid[..32.min(uid.len())]));
    let owner = if uid.len() >= 52 {
        format!("0x{}", hex::encode(&uid[32..52]))
    } else {
        String::new()
    };
    let valid_to = if uid.len() >= 56 {
        i64::from(u32::from_be_bytes(uid[52..56].try_into().unwrap()))
    } else {
        0
    };
    (order_hash, owner, valid_to)
}

fn decode_trade(log: &RawLog) -> XchainResult<DecodedEvent> {
    let types = vec![
        ParamType::Address,
        ParamType::Address,
        ParamType::Address,
        ParamType::Uint(256),
        ParamType::Uint(256),
        ParamType::Uint(256),
        ParamType::Bytes,
    ];
    let tokens = decode_abi("cow", &types, &log.data)?;
    let order_uid = tokens.get(6).and_then(|t| t.clone().into_bytes()).unwrap_or_default();
    let (order_hash, _owner_from_uid, valid_to) = decode_order_uid(&order_uid);

    let mut out = DecodedEvent::new();
    if let Some(v) = tokens.first().and_then(lower_hex_address) {
        out.insert("owner".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(1).and_then(lower_hex_address) {
        out.insert("sell_token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(2).and_then(lower_hex_address) {
        out.insert("buy_token".into(), FieldValue::Address(v));
    }
    if let Some(v) = tokens.get(3).and_then(token_uint_to_bigdecimal) {
        out.insert("sell_amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(4).and_then(token_uint_to_bigdecimal) {
        out.insert("buy_amount".into(), FieldValue::Uint(v));
    }
    if let Some(v) = tokens.get(5).and_then(token_uint_to_bigdecimal) {
        out.insert("fee_amount".into(), FieldValue::Uint(v));
    }
    out.insert("order_uid".into(), FieldValue::Bytes(format!("0x{}", hex::encode(&order_uid))));
    out.insert("cross_chain_key".into(), FieldValue::Bytes(order_hash));
    out.insert("valid_to".into(), FieldValue::I64(valid_to));
    out.insert("block_number".into(), FieldValue::I64(log.block_number as i64));
    out.insert(TX_HASH_KEY.into(), FieldValue::Str(log.transaction_hash.clone()));
    out.insert(CONTRACT_ADDRESS_KEY.into(), FieldValue::Address(log.contract_address.clone()));
    out.insert(TOPIC_KEY.into(), FieldValue::Str(TRADE_TOPIC.into()));
    Ok(out)
}

struct TradeHandler;

#[async_trait]
impl EventHandler for TradeHandler {
    async fn handle(&self, ctx: &mut HandleContext<'_>, event: DecodedEvent) -> XchainResult<Option<DecodedEvent>> {
        let get_str = |k: &str| event.get(k).and_then(FieldValue::as_str).map(str::to_string);
        let get_uint = |k: &str| event.get(k).and_then(FieldValue::as_uint).cloned();

        let row = NewCowTrade {
            blockchain: ctx.blockchain.to_string(),
            transaction_hash: get_str(TX_HASH_KEY).ok_or_else(|| XchainError::Integrity("missing transaction_hash".into()))?,
            contract_address: get_str(CONTRACT_ADDRESS_KEY).unwrap_or_default(),
            order_uid: get_str("order_uid").ok_or_else(|| XchainError::Integrity("missing order_uid".into()))?,
            owner: get_str("owner").unwrap_or_default(),
            sell_token: get_str("sell_token").unwrap_or_default(),
            buy_token: get_str("buy_token").unwrap_or_default(),
            sell_amount: get_uint("sell_amount").unwrap_or_default(),
            buy_amount: get_uint("buy_amount").unwrap_or_default(),
            fee_amount: get_uint("fee_amount").unwrap_or_default(),
            log_index: None,
            block_number: event.get("block_number").and_then(FieldValue::as_i64),
            valid_to: event.get("valid_to").and_then(FieldValue::as_i64),
            cross_chain_key: get_str("cross_chain_key"),
        };

        let inserted = diesel::insert_into(cow_trade::table)
            .values(&row)
            .on_conflict((cow_trade::blockchain, cow_trade::order_uid))
            .do_nothing()
            .execute(ctx.conn)
            .await
            .map_err(|e| XchainError::Handler {
                bridge: "cow".into(),
                chain: ctx.blockchain.to_string(),
                start: 0,
                end: 0,
                contract: String::new(),
                message: e.to_string(),
                duplicate: false,
            })?;
        Ok(if inserted == 0 { None } else { Some(event) })
    }
}

pub fn module() -> BridgeModule {
    BridgeModule::new(crate::bridge::Bridge::Cow).register(TRADE_TOPIC, decode_trade, Arc::new(TradeHandler))
}
