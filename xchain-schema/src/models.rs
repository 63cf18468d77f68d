// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Insertable/Queryable rows for every table in [`crate::schema`]. Handlers build these
//! directly off decoded events and hand them to `diesel::insert_into(..).on_conflict_do_nothing()`;
//! the Generator and Price Enricher read and write the `*_cross_chain_transactions` /
//! `token_price` tables through raw `sql_query` templates instead, so only the shapes
//! needed for ORM-level inserts and lookups are modeled here.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;

use crate::schema::*;

// ---------------------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------------------

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = native_token, check_for_backend(diesel::pg::Pg))]
pub struct NativeToken {
    pub blockchain: String,
    pub symbol: String,
}

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = token_metadata, check_for_backend(diesel::pg::Pg))]
pub struct TokenMetadata {
    pub blockchain: String,
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: i32,
}

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = token_price, check_for_backend(diesel::pg::Pg))]
pub struct TokenPrice {
    pub symbol: String,
    pub name: String,
    pub date: NaiveDate,
    pub price_usd: BigDecimal,
}

/// Shape shared by every `<bridge>_blockchain_transactions` table. Each bridge still gets
/// its own `diesel::table!` (and its own Rust type, via the per-bridge macro below) because
/// Diesel table modules aren't generic, but the fields and the way a Handler builds one
/// from a transaction receipt + block (§4.3 `create_transaction_object`) are identical.
macro_rules! blockchain_transaction_model {
    ($name:ident, $table:ident) => {
        #[derive(Queryable, Insertable, Debug, Clone)]
        #[diesel(table_name = $table, check_for_backend(diesel::pg::Pg))]
        pub struct $name {
            pub transaction_hash: String,
            pub blockchain: String,
            pub block_number: i64,
            pub timestamp: i64,
            pub from_address: String,
            pub to_address: Option<String>,
            pub status: i32,
            pub fee: BigDecimal,
            pub value: Option<BigDecimal>,
        }
    };
}

blockchain_transaction_model!(CcipBlockchainTransaction, ccip_blockchain_transactions);
blockchain_transaction_model!(DebridgeBlockchainTransaction, debridge_blockchain_transactions);
blockchain_transaction_model!(CowBlockchainTransaction, cow_blockchain_transactions);
blockchain_transaction_model!(MayanBlockchainTransaction, mayan_blockchain_transactions);
blockchain_transaction_model!(PortalBlockchainTransaction, portal_blockchain_transactions);
blockchain_transaction_model!(WormholeBlockchainTransaction, wormhole_blockchain_transactions);
blockchain_transaction_model!(RouterBlockchainTransaction, router_blockchain_transactions);
blockchain_transaction_model!(SynapseBlockchainTransaction, synapse_blockchain_transactions);
blockchain_transaction_model!(EcoBlockchainTransaction, eco_blockchain_transactions);
blockchain_transaction_model!(FlyBlockchainTransaction, fly_blockchain_transactions);
blockchain_transaction_model!(StargateBlockchainTransaction, stargate_blockchain_transactions);

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = generic_blockchain_transactions, check_for_backend(diesel::pg::Pg))]
pub struct GenericBlockchainTransaction {
    pub bridge: String,
    pub transaction_hash: String,
    pub blockchain: String,
    pub block_number: i64,
    pub timestamp: i64,
    pub from_address: String,
    pub to_address: Option<String>,
    pub status: i32,
    pub fee: BigDecimal,
    pub value: Option<BigDecimal>,
}

// ---------------------------------------------------------------------------------------
// CCIP
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ccip_send_requested, check_for_backend(diesel::pg::Pg))]
pub struct NewCcipSendRequested {
    pub blockchain: String,
    pub transaction_hash: String,
    pub message_id: String,
    pub nonce: BigDecimal,
    pub sender: String,
    pub receiver: String,
    pub sequence_number: BigDecimal,
    pub gas_limit: BigDecimal,
    pub strict: bool,
    pub fee_token: String,
    pub fee_token_amount: BigDecimal,
    pub input_token: Option<String>,
    pub amount: Option<BigDecimal>,
    pub output_token: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ccip_execution_state_changed, check_for_backend(diesel::pg::Pg))]
pub struct NewCcipExecutionStateChanged {
    pub blockchain: String,
    pub transaction_hash: String,
    pub message_id: String,
    pub sequence_number: BigDecimal,
    pub state: i32,
    pub return_data: Option<String>,
}

// ---------------------------------------------------------------------------------------
// deBridge
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = debridge_created_order, check_for_backend(diesel::pg::Pg))]
pub struct NewDebridgeCreatedOrder {
    pub blockchain: String,
    pub transaction_hash: String,
    pub order_id: String,
    pub maker_order_nonce: BigDecimal,
    pub maker_src: String,
    pub src_blockchain: String,
    pub give_token_address: String,
    pub give_amount: BigDecimal,
    pub dst_blockchain: String,
    pub take_token_address: String,
    pub take_amount: BigDecimal,
    pub receiver_dst: String,
    pub give_patch_authority_src: String,
    pub order_authority_address_dst: String,
    pub allowed_taker_dst: Option<String>,
    pub allowed_cancel_beneficiary_src: Option<String>,
    pub external_call: Option<String>,
    pub affiliate_fee: Option<BigDecimal>,
    pub native_fix_fee: BigDecimal,
    pub percent_fee: BigDecimal,
    pub referral_code: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = debridge_fulfilled_order, check_for_backend(diesel::pg::Pg))]
pub struct NewDebridgeFulfilledOrder {
    pub blockchain: String,
    pub transaction_hash: String,
    pub order_id: String,
    pub maker_order_nonce: BigDecimal,
    pub maker_src: String,
    pub src_blockchain: String,
    pub give_token_address: String,
    pub give_amount: BigDecimal,
    pub dst_blockchain: String,
    pub take_token_address: String,
    pub take_amount: BigDecimal,
    pub receiver_dst: String,
    pub give_patch_authority_src: String,
    pub order_authority_address_dst: String,
    pub allowed_taker_dst: Option<String>,
    pub allowed_cancel_beneficiary_src: Option<String>,
    pub external_call: Option<String>,
    pub sender: String,
    pub unlock_authority: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = debridge_claimed_unlock, check_for_backend(diesel::pg::Pg))]
pub struct NewDebridgeClaimedUnlock {
    pub blockchain: String,
    pub transaction_hash: String,
    pub order_id: String,
    pub beneficiary: String,
    pub give_amount: BigDecimal,
    pub give_token_address: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = debridge_sent_order_unlock, check_for_backend(diesel::pg::Pg))]
pub struct NewDebridgeSentOrderUnlock {
    pub blockchain: String,
    pub transaction_hash: String,
    pub order_id: String,
    pub beneficiary: String,
    pub submission_id: String,
}

// ---------------------------------------------------------------------------------------
// CoW Protocol
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = cow_trade, check_for_backend(diesel::pg::Pg))]
pub struct NewCowTrade {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub order_uid: String,
    pub owner: String,
    pub sell_token: String,
    pub buy_token: String,
    pub sell_amount: BigDecimal,
    pub buy_amount: BigDecimal,
    pub fee_amount: BigDecimal,
    pub log_index: Option<i64>,
    pub block_number: Option<i64>,
    pub valid_to: Option<i64>,
    pub cross_chain_key: Option<String>,
}

// ---------------------------------------------------------------------------------------
// Mayan
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = mayan_order_created, check_for_backend(diesel::pg::Pg))]
pub struct NewMayanOrderCreated {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub order_key: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = mayan_order_fulfilled, check_for_backend(diesel::pg::Pg))]
pub struct NewMayanOrderFulfilled {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub order_key: String,
    pub sequence: Option<BigDecimal>,
    pub net_amount: Option<BigDecimal>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = mayan_order_unlocked, check_for_backend(diesel::pg::Pg))]
pub struct NewMayanOrderUnlocked {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub order_key: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = mayan_swap_and_forwarded, check_for_backend(diesel::pg::Pg))]
pub struct NewMayanSwapAndForwarded {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub token_in: String,
    pub amount_in: BigDecimal,
    pub swap_protocol: Option<String>,
    pub middle_token: Option<String>,
    pub middle_amount: Option<BigDecimal>,
    pub mayan_protocol: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = mayan_forwarded, check_for_backend(diesel::pg::Pg))]
pub struct NewMayanForwarded {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub token: String,
    pub amount: Option<BigDecimal>,
    pub mayan_protocol: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = mayan_solana_events, check_for_backend(diesel::pg::Pg))]
pub struct NewMayanSolanaEvent {
    pub blockchain: String,
    pub transaction_signature: String,
    pub program_id: String,
    pub kind: String,
    pub order_hash: String,
    pub trader: Option<String>,
    pub token_in: Option<String>,
    pub amount: Option<BigDecimal>,
    pub src_chain_id: Option<i64>,
}

// ---------------------------------------------------------------------------------------
// Portal
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = portal_log_message_published, check_for_backend(diesel::pg::Pg))]
pub struct NewPortalLogMessagePublished {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub sequence_number: BigDecimal,
    pub nonce: i64,
    pub amount: BigDecimal,
    pub token_address: String,
    pub token_chain: i32,
    pub recipient: String,
    pub recipient_chain: String,
    pub fee: BigDecimal,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = portal_transfer_redeemed, check_for_backend(diesel::pg::Pg))]
pub struct NewPortalTransferRedeemed {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub sequence_number: BigDecimal,
    pub emitter_chain: String,
    pub emitter_address: String,
    pub data: String,
}

// ---------------------------------------------------------------------------------------
// Wormhole Core
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = wormhole_published, check_for_backend(diesel::pg::Pg))]
pub struct NewWormholePublished {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub block_number: i64,
    pub sender: String,
    pub sequence_number: BigDecimal,
    pub nonce: Option<BigDecimal>,
    pub payload: Option<String>,
    pub consistency_level: Option<i32>,
    pub emitter_address_32: String,
    pub emitter_chain_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = wormhole_redeemed, check_for_backend(diesel::pg::Pg))]
pub struct NewWormholeRedeemed {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub sequence_number: BigDecimal,
    pub emitter_chain_id: i32,
    pub emitter_address_32: String,
    pub data: String,
}

// ---------------------------------------------------------------------------------------
// Router Protocol
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = router_funds_deposited, check_for_backend(diesel::pg::Pg))]
pub struct NewRouterFundsDeposited {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub partner_id: BigDecimal,
    pub deposit_id: BigDecimal,
    pub has_message: bool,
    pub message_hash: Option<String>,
    pub dest_chain_id_bytes: String,
    pub dest_chain_name: Option<String>,
    pub amount: BigDecimal,
    pub dest_amount: Option<BigDecimal>,
    pub src_token: String,
    pub depositor: String,
    pub dest_token: Option<String>,
    pub recipient: Option<String>,
    pub destination_forwarder: Option<String>,
    pub message: Option<String>,
}

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = router_iusdc_deposited, check_for_backend(diesel::pg::Pg))]
pub struct NewRouterIusdcDeposited {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub deposit_id: BigDecimal,
    pub dest_chain_id_bytes: String,
    pub dest_chain_name: Option<String>,
    pub amount: BigDecimal,
    pub depositor: String,
    pub recipient: String,
    pub message_hash: String,
}

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = router_deposit_info_update, check_for_backend(diesel::pg::Pg))]
pub struct NewRouterDepositInfoUpdate {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub deposit_id: BigDecimal,
    pub dest_amount: BigDecimal,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = router_funds_paid, check_for_backend(diesel::pg::Pg))]
pub struct NewRouterFundsPaid {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub message_hash: String,
    pub has_message: bool,
    pub forwarder: Option<String>,
}

// ---------------------------------------------------------------------------------------
// Synapse
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = synapse_token_deposit_and_swap, check_for_backend(diesel::pg::Pg))]
pub struct NewSynapseTokenDepositAndSwap {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub kappa: String,
    pub token: String,
    pub amount: BigDecimal,
    pub chain_id: i64,
    pub to_address: String,
    pub token_index_from: Option<i32>,
    pub token_index_to: Option<i32>,
    pub min_dy: Option<BigDecimal>,
    pub deadline: Option<BigDecimal>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = synapse_token_mint_and_swap, check_for_backend(diesel::pg::Pg))]
pub struct NewSynapseTokenMintAndSwap {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub kappa: String,
    pub token: String,
    pub amount: BigDecimal,
    pub fee: Option<BigDecimal>,
    pub to_address: String,
    pub token_index_from: Option<i32>,
    pub token_index_to: Option<i32>,
    pub min_dy: Option<BigDecimal>,
    pub deadline: Option<BigDecimal>,
    pub swap_success: Option<bool>,
}

// ---------------------------------------------------------------------------------------
// Eco
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Queryable, Debug, Clone)]
#[diesel(table_name = eco_intent_created, check_for_backend(diesel::pg::Pg))]
pub struct NewEcoIntentCreated {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub intent_hash: String,
    pub salt: Option<String>,
    pub source_chain_id: Option<BigDecimal>,
    pub destination_chain_id: Option<BigDecimal>,
    pub inbox: Option<String>,
    pub creator: String,
    pub prover: Option<String>,
    pub deadline: Option<BigDecimal>,
    pub native_value: Option<BigDecimal>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = eco_fulfillment, check_for_backend(diesel::pg::Pg))]
pub struct NewEcoFulfillment {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub intent_hash: String,
    pub source_chain_id: Option<BigDecimal>,
    pub prover: Option<String>,
    pub claimant: String,
}

// ---------------------------------------------------------------------------------------
// Fly
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = fly_swap_in, check_for_backend(diesel::pg::Pg))]
pub struct NewFlySwapIn {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub from_address: String,
    pub to_address: String,
    pub from_asset_address: String,
    pub to_asset_address: String,
    pub amount_in: BigDecimal,
    pub amount_out: BigDecimal,
    pub encoded_deposit_data: Option<String>,
    pub deposit_data_hash: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = fly_swap_out, check_for_backend(diesel::pg::Pg))]
pub struct NewFlySwapOut {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub from_address: String,
    pub to_address: String,
    pub from_asset_address: String,
    pub to_asset_address: String,
    pub amount_in: BigDecimal,
    pub amount_out: BigDecimal,
    pub deposit_data_hash: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = fly_deposit, check_for_backend(diesel::pg::Pg))]
pub struct NewFlyDeposit {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub deposit_data_hash: String,
    pub amount: Option<BigDecimal>,
}

// ---------------------------------------------------------------------------------------
// Stargate
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = stargate_oft_sent, check_for_backend(diesel::pg::Pg))]
pub struct NewStargateOftSent {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub guid: String,
    pub dst_blockchain: Option<String>,
    pub from_address: String,
    pub amount_sent_ld: BigDecimal,
    pub amount_received_ld: BigDecimal,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = stargate_oft_received, check_for_backend(diesel::pg::Pg))]
pub struct NewStargateOftReceived {
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub guid: String,
    pub src_blockchain: Option<String>,
    pub to_address: String,
    pub amount_received_ld: BigDecimal,
}

// ---------------------------------------------------------------------------------------
// Generic (CCTP, Across, Polygon PoS, Ronin, Omnibridge)
// ---------------------------------------------------------------------------------------

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = generic_deposit, check_for_backend(diesel::pg::Pg))]
pub struct NewGenericDeposit {
    pub bridge: String,
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub depositor: String,
    pub token: String,
    pub amount: BigDecimal,
    pub dest_chain_id: Option<i64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = generic_claim, check_for_backend(diesel::pg::Pg))]
pub struct NewGenericClaim {
    pub bridge: String,
    pub blockchain: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub claimant: String,
}
