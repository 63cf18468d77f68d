// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compile-time `Bridge → BridgeModule` registry (§9 "Dynamic bridge dispatch"). Every
//! bridge variant maps to exactly one module; the five reduced-depth bridges share
//! [`generic::module`] parameterized by the variant itself.

pub mod ccip;
pub mod cow;
pub mod debridge;
pub mod eco;
pub mod fly;
pub mod generic;
pub mod mayan;
pub mod portal;
pub mod router;
pub mod stargate;
pub mod synapse;
pub mod tx_sink;
pub mod wormhole;

use std::sync::Arc;

use crate::bridge::Bridge;
use crate::dispatch::{BridgeModule, TransactionSink};

/// Builds the dispatch table for one bridge. Called once per (bridge, chain) extraction
/// session; cheap enough that no caching is needed.
pub fn bridge_module(bridge: Bridge) -> BridgeModule {
    if bridge.is_generic() {
        return generic::module(bridge);
    }
    match bridge {
        Bridge::Ccip => ccip::module(),
        Bridge::Cow => cow::module(),
        Bridge::Debridge => debridge::module(),
        Bridge::Eco => eco::module(),
        Bridge::Fly => fly::module(),
        Bridge::Mayan => mayan::module(),
        Bridge::Portal => portal::module(),
        Bridge::Router => router::module(),
        Bridge::Stargate => stargate::module(),
        Bridge::Synapse => synapse::module(),
        Bridge::Wormhole => wormhole::module(),
        Bridge::Cctp | Bridge::Across | Bridge::PolygonPos | Bridge::Ronin | Bridge::Omnibridge => {
            generic::module(bridge)
        }
    }
}

/// The Extractor's handle to a bridge's `<bridge>_blockchain_transactions` table (§4.3,
/// §4.5), looked up separately from [`bridge_module`] — see `tx_sink`'s module comment.
pub fn transaction_sink(bridge: Bridge) -> Arc<dyn TransactionSink> {
    use tx_sink::*;
    if bridge.is_generic() {
        return Arc::new(GenericTxSink { bridge });
    }
    match bridge {
        Bridge::Ccip => Arc::new(CcipTxSink),
        Bridge::Cow => Arc::new(CowTxSink),
        Bridge::Debridge => Arc::new(DebridgeTxSink),
        Bridge::Eco => Arc::new(EcoTxSink),
        Bridge::Fly => Arc::new(FlyTxSink),
        Bridge::Mayan => Arc::new(MayanTxSink),
        Bridge::Portal => Arc::new(PortalTxSink),
        Bridge::Router => Arc::new(RouterTxSink),
        Bridge::Stargate => Arc::new(StargateTxSink),
        Bridge::Synapse => Arc::new(SynapseTxSink),
        Bridge::Wormhole => Arc::new(WormholeTxSink),
        Bridge::Cctp | Bridge::Across | Bridge::PolygonPos | Bridge::Ronin | Bridge::Omnibridge => {
            Arc::new(GenericTxSink { bridge })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_bridge_has_a_module_with_at_least_one_topic() {
        for bridge in Bridge::iter() {
            let module = bridge_module(bridge);
            assert_eq!(module.bridge, bridge);
            assert!(!module.topics.is_empty(), "{bridge} has no registered topics");
        }
    }

    #[test]
    fn every_bridge_resolves_a_transaction_sink() {
        for bridge in Bridge::iter() {
            let _ = transaction_sink(bridge);
        }
    }
}
