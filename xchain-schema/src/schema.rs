// @generated from the per-bridge table declarations in `xchain-schema/migrations`.
// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
#![allow(unused_imports)]

use diesel::table;

// ---------------------------------------------------------------------------------------
// Shared tables (owned by the Price Enricher, §3/§4.8).
// ---------------------------------------------------------------------------------------

table! {
    native_token (blockchain) {
        blockchain -> Text,
        symbol -> Text,
    }
}

table! {
    token_metadata (blockchain, address) {
        blockchain -> Text,
        address -> Text,
        symbol -> Text,
        name -> Text,
        decimals -> Int4,
    }
}

table! {
    token_price (symbol, name, date) {
        symbol -> Text,
        name -> Text,
        date -> Date,
        price_usd -> Numeric,
    }
}

// ---------------------------------------------------------------------------------------
// CCIP
// ---------------------------------------------------------------------------------------

table! {
    ccip_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    ccip_send_requested (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        message_id -> Text,
        nonce -> Numeric,
        sender -> Text,
        receiver -> Text,
        sequence_number -> Numeric,
        gas_limit -> Numeric,
        strict -> Bool,
        fee_token -> Text,
        fee_token_amount -> Numeric,
        input_token -> Nullable<Text>,
        amount -> Nullable<Numeric>,
        output_token -> Nullable<Text>,
    }
}

table! {
    ccip_execution_state_changed (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        message_id -> Text,
        sequence_number -> Numeric,
        state -> Int4,
        return_data -> Nullable<Text>,
    }
}

table! {
    ccip_cross_chain_transactions (id) {
        id -> Int8,
        message_id -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// deBridge
// ---------------------------------------------------------------------------------------

table! {
    debridge_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    debridge_created_order (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        order_id -> Text,
        maker_order_nonce -> Numeric,
        maker_src -> Text,
        src_blockchain -> Text,
        give_token_address -> Text,
        give_amount -> Numeric,
        dst_blockchain -> Text,
        take_token_address -> Text,
        take_amount -> Numeric,
        receiver_dst -> Text,
        give_patch_authority_src -> Text,
        order_authority_address_dst -> Text,
        allowed_taker_dst -> Nullable<Text>,
        allowed_cancel_beneficiary_src -> Nullable<Text>,
        external_call -> Nullable<Text>,
        affiliate_fee -> Nullable<Numeric>,
        native_fix_fee -> Numeric,
        percent_fee -> Numeric,
        referral_code -> Nullable<Text>,
    }
}

table! {
    debridge_fulfilled_order (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        order_id -> Text,
        maker_order_nonce -> Numeric,
        maker_src -> Text,
        src_blockchain -> Text,
        give_token_address -> Text,
        give_amount -> Numeric,
        dst_blockchain -> Text,
        take_token_address -> Text,
        take_amount -> Numeric,
        receiver_dst -> Text,
        give_patch_authority_src -> Text,
        order_authority_address_dst -> Text,
        allowed_taker_dst -> Nullable<Text>,
        allowed_cancel_beneficiary_src -> Nullable<Text>,
        external_call -> Nullable<Text>,
        sender -> Text,
        unlock_authority -> Text,
    }
}

table! {
    debridge_claimed_unlock (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        order_id -> Text,
        beneficiary -> Text,
        give_amount -> Numeric,
        give_token_address -> Text,
    }
}

table! {
    debridge_sent_order_unlock (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        order_id -> Text,
        beneficiary -> Text,
        submission_id -> Text,
    }
}

table! {
    debridge_cross_chain_transactions (id) {
        id -> Int8,
        order_id -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// CoW Protocol
// ---------------------------------------------------------------------------------------

table! {
    cow_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    cow_trade (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        order_uid -> Text,
        owner -> Text,
        sell_token -> Text,
        buy_token -> Text,
        sell_amount -> Numeric,
        buy_amount -> Numeric,
        fee_amount -> Numeric,
        log_index -> Nullable<Int8>,
        block_number -> Nullable<Int8>,
        valid_to -> Nullable<Int8>,
        cross_chain_key -> Nullable<Text>,
    }
}

table! {
    cow_cross_chain_transactions (id) {
        id -> Int8,
        cross_chain_key -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Mayan (EVM + Solana)
// ---------------------------------------------------------------------------------------

table! {
    mayan_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    mayan_order_created (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        order_key -> Text,
    }
}

table! {
    mayan_order_fulfilled (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        order_key -> Text,
        sequence -> Nullable<Numeric>,
        net_amount -> Nullable<Numeric>,
    }
}

table! {
    mayan_order_unlocked (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        order_key -> Text,
    }
}

table! {
    mayan_swap_and_forwarded (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        token_in -> Text,
        amount_in -> Numeric,
        swap_protocol -> Nullable<Text>,
        middle_token -> Nullable<Text>,
        middle_amount -> Nullable<Numeric>,
        mayan_protocol -> Text,
    }
}

table! {
    mayan_forwarded (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        token -> Text,
        amount -> Nullable<Numeric>,
        mayan_protocol -> Text,
    }
}

table! {
    mayan_solana_events (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_signature -> Text,
        program_id -> Text,
        kind -> Text,
        order_hash -> Text,
        trader -> Nullable<Text>,
        token_in -> Nullable<Text>,
        amount -> Nullable<Numeric>,
        src_chain_id -> Nullable<Int8>,
    }
}

table! {
    mayan_cross_chain_transactions (id) {
        id -> Int8,
        order_key -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        refund_fee_usd -> Nullable<Numeric>,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Portal (Wormhole Token Bridge)
// ---------------------------------------------------------------------------------------

table! {
    portal_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    portal_log_message_published (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        sequence_number -> Numeric,
        nonce -> Int8,
        amount -> Numeric,
        token_address -> Text,
        token_chain -> Int4,
        recipient -> Text,
        recipient_chain -> Text,
        fee -> Numeric,
    }
}

table! {
    portal_transfer_redeemed (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        sequence_number -> Numeric,
        emitter_chain -> Text,
        emitter_address -> Text,
        data -> Text,
    }
}

table! {
    portal_cross_chain_transactions (id) {
        id -> Int8,
        sequence_number -> Numeric,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Wormhole Core
// ---------------------------------------------------------------------------------------

table! {
    wormhole_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    wormhole_published (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        block_number -> Int8,
        sender -> Text,
        sequence_number -> Numeric,
        nonce -> Nullable<Numeric>,
        payload -> Nullable<Text>,
        consistency_level -> Nullable<Int4>,
        emitter_address_32 -> Text,
        emitter_chain_id -> Int4,
    }
}

table! {
    wormhole_redeemed (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        sequence_number -> Numeric,
        emitter_chain_id -> Int4,
        emitter_address_32 -> Text,
        data -> Text,
    }
}

table! {
    wormhole_cross_chain_transactions (id) {
        id -> Int8,
        tx_hash_key -> Text,
        sequence_number -> Numeric,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Router Protocol
// ---------------------------------------------------------------------------------------

table! {
    router_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    router_funds_deposited (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        partner_id -> Numeric,
        deposit_id -> Numeric,
        has_message -> Bool,
        message_hash -> Nullable<Text>,
        dest_chain_id_bytes -> Text,
        dest_chain_name -> Nullable<Text>,
        amount -> Numeric,
        dest_amount -> Nullable<Numeric>,
        src_token -> Text,
        depositor -> Text,
        dest_token -> Nullable<Text>,
        recipient -> Nullable<Text>,
        destination_forwarder -> Nullable<Text>,
        message -> Nullable<Text>,
    }
}

table! {
    router_iusdc_deposited (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        deposit_id -> Numeric,
        dest_chain_id_bytes -> Text,
        dest_chain_name -> Nullable<Text>,
        amount -> Numeric,
        depositor -> Text,
        recipient -> Text,
        message_hash -> Text,
    }
}

table! {
    router_deposit_info_update (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        deposit_id -> Numeric,
        dest_amount -> Numeric,
    }
}

table! {
    router_funds_paid (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        message_hash -> Text,
        has_message -> Bool,
        forwarder -> Nullable<Text>,
    }
}

table! {
    router_cross_chain_transactions (id) {
        id -> Int8,
        message_hash -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Synapse
// ---------------------------------------------------------------------------------------

table! {
    synapse_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    synapse_token_deposit_and_swap (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        kappa -> Text,
        token -> Text,
        amount -> Numeric,
        chain_id -> Int8,
        to_address -> Text,
        token_index_from -> Nullable<Int4>,
        token_index_to -> Nullable<Int4>,
        min_dy -> Nullable<Numeric>,
        deadline -> Nullable<Numeric>,
    }
}

table! {
    synapse_token_mint_and_swap (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        kappa -> Text,
        token -> Text,
        amount -> Numeric,
        fee -> Nullable<Numeric>,
        to_address -> Text,
        token_index_from -> Nullable<Int4>,
        token_index_to -> Nullable<Int4>,
        min_dy -> Nullable<Numeric>,
        deadline -> Nullable<Numeric>,
        swap_success -> Nullable<Bool>,
    }
}

table! {
    synapse_cross_chain_transactions (id) {
        id -> Int8,
        kappa -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Eco
// ---------------------------------------------------------------------------------------

table! {
    eco_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    eco_intent_created (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        intent_hash -> Text,
        salt -> Nullable<Text>,
        source_chain_id -> Nullable<Numeric>,
        destination_chain_id -> Nullable<Numeric>,
        inbox -> Nullable<Text>,
        creator -> Text,
        prover -> Nullable<Text>,
        deadline -> Nullable<Numeric>,
        native_value -> Nullable<Numeric>,
    }
}

table! {
    eco_fulfillment (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        intent_hash -> Text,
        source_chain_id -> Nullable<Numeric>,
        prover -> Nullable<Text>,
        claimant -> Text,
    }
}

table! {
    eco_cross_chain_transactions (id) {
        id -> Int8,
        intent_hash -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Fly (deBridge's sibling fast-swap protocol, see glossary)
// ---------------------------------------------------------------------------------------

table! {
    fly_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    fly_swap_in (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        from_address -> Text,
        to_address -> Text,
        from_asset_address -> Text,
        to_asset_address -> Text,
        amount_in -> Numeric,
        amount_out -> Numeric,
        encoded_deposit_data -> Nullable<Text>,
        deposit_data_hash -> Nullable<Text>,
    }
}

table! {
    fly_swap_out (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        from_address -> Text,
        to_address -> Text,
        from_asset_address -> Text,
        to_asset_address -> Text,
        amount_in -> Numeric,
        amount_out -> Numeric,
        deposit_data_hash -> Nullable<Text>,
    }
}

table! {
    fly_deposit (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        deposit_data_hash -> Text,
        amount -> Nullable<Numeric>,
    }
}

table! {
    fly_cross_chain_transactions (id) {
        id -> Int8,
        deposit_data_hash -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Stargate (supplemented from original_source/repository/stargate/models.py, §11)
// ---------------------------------------------------------------------------------------

table! {
    stargate_blockchain_transactions (transaction_hash) {
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    stargate_oft_sent (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        guid -> Text,
        dst_blockchain -> Nullable<Text>,
        from_address -> Text,
        amount_sent_ld -> Numeric,
        amount_received_ld -> Numeric,
    }
}

table! {
    stargate_oft_received (id) {
        id -> Int8,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        guid -> Text,
        src_blockchain -> Nullable<Text>,
        to_address -> Text,
        amount_received_ld -> Numeric,
    }
}

table! {
    stargate_cross_chain_transactions (id) {
        id -> Int8,
        guid -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}

// ---------------------------------------------------------------------------------------
// Generic bridges without detailed decode/handler specs (CCTP, Across, Polygon PoS, Ronin,
// Omnibridge, §11) share one reduced-depth schema, distinguished by the `bridge` column.
// ---------------------------------------------------------------------------------------

table! {
    generic_blockchain_transactions (bridge, transaction_hash) {
        bridge -> Text,
        transaction_hash -> Text,
        blockchain -> Text,
        block_number -> Int8,
        timestamp -> Int8,
        from_address -> Text,
        to_address -> Nullable<Text>,
        status -> Int4,
        fee -> Numeric,
        value -> Nullable<Numeric>,
    }
}

table! {
    generic_deposit (id) {
        id -> Int8,
        bridge -> Text,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        depositor -> Text,
        token -> Text,
        amount -> Numeric,
        dest_chain_id -> Nullable<Int8>,
    }
}

table! {
    generic_claim (id) {
        id -> Int8,
        bridge -> Text,
        blockchain -> Text,
        transaction_hash -> Text,
        contract_address -> Text,
        claimant -> Text,
    }
}

table! {
    generic_cross_chain_transactions (id) {
        id -> Int8,
        bridge -> Text,
        src_blockchain -> Text,
        src_transaction_hash -> Text,
        src_from_address -> Text,
        src_to_address -> Nullable<Text>,
        src_fee -> Numeric,
        src_fee_usd -> Nullable<Numeric>,
        src_timestamp -> Int8,
        src_contract_address -> Text,
        dst_blockchain -> Text,
        dst_transaction_hash -> Text,
        dst_from_address -> Text,
        dst_to_address -> Nullable<Text>,
        dst_fee -> Numeric,
        dst_fee_usd -> Nullable<Numeric>,
        dst_timestamp -> Int8,
        dst_contract_address -> Text,
        input_amount -> Numeric,
        input_amount_usd -> Nullable<Numeric>,
        output_amount -> Numeric,
        output_amount_usd -> Nullable<Numeric>,
    }
}
