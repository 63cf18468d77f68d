// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Diesel schema and models for the extraction/correlation engine's Postgres store.
//! One `<bridge>_blockchain_transactions` + one or more raw event tables + one
//! `<bridge>_cross_chain_transactions` table per bridge, plus the shared
//! `token_metadata` / `token_price` / `native_token` tables the Price Enricher owns.

pub mod models;
pub mod schema;

use diesel_migrations::{embed_migrations, EmbeddedMigrations};

/// Migrations embedded at compile time and run with `MigrationHarness::run_pending_migrations`
/// from `xchain-cli`'s startup path, the way `bridge-indexer-alt` runs its own.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
