// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! One [`TransactionSink`] per bridge's `<bridge>_blockchain_transactions` table. Diesel
//! table modules aren't generic, so each bridge still needs its own small impl; the macro
//! below keeps all eleven of them to one line apiece.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::types::BlockchainTransactionRow;
use xchain_common::{XchainError, XchainResult};

fn db_err(bridge: &str, e: diesel::result::Error) -> XchainError {
    XchainError::Handler {
        bridge: bridge.into(),
        chain: String::new(),
        start: 0,
        end: 0,
        contract: String::new(),
        message: e.to_string(),
        duplicate: matches!(e, diesel::result::Error::DatabaseError(diesel::result::DatabaseErrorKind::UniqueViolation, _)),
    }
}

macro_rules! transaction_sink {
    ($sink:ident, $bridge:literal, $table:ident, $model:ident) => {
        pub struct $sink;

        #[async_trait]
        impl crate::dispatch::TransactionSink for $sink {
            async fn exists(&self, conn: &mut AsyncPgConnection, tx_hash: &str) -> XchainResult<bool> {
                use xchain_schema::schema::$table::dsl;
                let count: i64 = dsl::$table
                    .filter(dsl::transaction_hash.eq(tx_hash))
                    .count()
                    .get_result(conn)
                    .await
                    .map_err(|e| db_err($bridge, e))?;
                Ok(count > 0)
            }

            async fn insert_many(
                &self,
                conn: &mut AsyncPgConnection,
                rows: &[BlockchainTransactionRow],
            ) -> XchainResult<usize> {
                let values: Vec<xchain_schema::models::$model> = rows
                    .iter()
                    .cloned()
                    .map(|r| xchain_schema::models::$model {
                        transaction_hash: r.transaction_hash,
                        blockchain: r.blockchain,
                        block_number: r.block_number,
                        timestamp: r.timestamp,
                        from_address: r.from_address,
                        to_address: r.to_address,
                        status: r.status,
                        fee: r.fee,
                        value: r.value,
                    })
                    .collect();
                diesel::insert_into(xchain_schema::schema::$table::table)
                    .values(&values)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await
                    .map_err(|e| db_err($bridge, e))
            }
        }
    };
}

transaction_sink!(CcipTxSink, "ccip", ccip_blockchain_transactions, CcipBlockchainTransaction);
transaction_sink!(DebridgeTxSink, "debridge", debridge_blockchain_transactions, DebridgeBlockchainTransaction);
transaction_sink!(CowTxSink, "cow", cow_blockchain_transactions, CowBlockchainTransaction);
transaction_sink!(MayanTxSink, "mayan", mayan_blockchain_transactions, MayanBlockchainTransaction);
transaction_sink!(PortalTxSink, "portal", portal_blockchain_transactions, PortalBlockchainTransaction);
transaction_sink!(WormholeTxSink, "wormhole", wormhole_blockchain_transactions, WormholeBlockchainTransaction);
transaction_sink!(RouterTxSink, "router", router_blockchain_transactions, RouterBlockchainTransaction);
transaction_sink!(SynapseTxSink, "synapse", synapse_blockchain_transactions, SynapseBlockchainTransaction);
transaction_sink!(EcoTxSink, "eco", eco_blockchain_transactions, EcoBlockchainTransaction);
transaction_sink!(FlyTxSink, "fly", fly_blockchain_transactions, FlyBlockchainTransaction);
transaction_sink!(StargateTxSink, "stargate", stargate_blockchain_transactions, StargateBlockchainTransaction);

/// The five reduced-depth bridges share `generic_blockchain_transactions`, keyed by
/// `(bridge, transaction_hash)` rather than `transaction_hash` alone, so it gets its own
/// impl instead of the macro above.
pub struct GenericTxSink {
    pub bridge: crate::bridge::Bridge,
}

#[async_trait]
impl crate::dispatch::TransactionSink for GenericTxSink {
    async fn exists(&self, conn: &mut AsyncPgConnection, tx_hash: &str) -> XchainResult<bool> {
        use xchain_schema::schema::generic_blockchain_transactions::dsl;
        let count: i64 = dsl::generic_blockchain_transactions
            .filter(dsl::transaction_hash.eq(tx_hash))
            .filter(dsl::bridge.eq(self.bridge.to_string()))
            .count()
            .get_result(conn)
            .await
            .map_err(|e| db_err(&self.bridge.to_string(), e))?;
        Ok(count > 0)
    }

    async fn insert_many(&self, conn: &mut AsyncPgConnection, rows: &[BlockchainTransactionRow]) -> XchainResult<usize> {
        let values: Vec<xchain_schema::models::GenericBlockchainTransaction> = rows
            .iter()
            .cloned()
            .map(|r| xchain_schema::models::GenericBlockchainTransaction {
                bridge: self.bridge.to_string(),
                transaction_hash: r.transaction_hash,
                blockchain: r.blockchain,
                block_number: r.block_number,
                timestamp: r.timestamp,
                from_address: r.from_address,
                to_address: r.to_address,
                status: r.status,
                fee: r.fee,
                value: r.value,
            })
            .collect();
        diesel::insert_into(xchain_schema::schema::generic_blockchain_transactions::table)
            .values(&values)
            .on_conflict_do_nothing()
            .execute(conn)
            .await
            .map_err(|e| db_err(&self.bridge.to_string(), e))
    }
}
