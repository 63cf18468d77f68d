// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connection pool setup and migration runner (§10.2), grounded on how
//! `bridge-indexer-alt`'s `main.rs` builds its pool and runs `starcoin_bridge_schema::MIGRATIONS`
//! at startup. This crate uses `diesel-async`'s `bb8` backend rather than the teacher's
//! `deadpool` (see DESIGN.md): bb8 is the backend `diesel-async`'s own docs lead with, and
//! nothing here depends on deadpool-specific object recycling.

use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::AsyncPgConnection;
use url::Url;

use xchain_common::{XchainError, XchainResult};

pub type DbPool = Pool<AsyncPgConnection>;

/// Builds a bb8 pool for `database_url`. Pool size is intentionally generous: extraction
/// workers each hold a connection only for the duration of a single `INSERT`/`SELECT`.
pub async fn connect(database_url: &Url, max_size: u32) -> XchainResult<DbPool> {
    let config = ManagerConfig::default();
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(database_url.as_str(), config);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .await
        .map_err(|e| XchainError::Config(format!("failed to build database pool: {e}")))
}

/// Runs embedded migrations synchronously over a plain (non-async) connection, the way
/// `diesel_migrations::MigrationHarness` requires; called once at process startup before
/// any extraction or generation work begins.
pub fn run_migrations(database_url: &Url) -> XchainResult<()> {
    use diesel::prelude::*;
    use diesel_migrations::MigrationHarness;

    let mut conn = diesel::pg::PgConnection::establish(database_url.as_str())
        .map_err(|e| XchainError::Config(format!("failed to connect for migrations: {e}")))?;
    conn.run_pending_migrations(xchain_schema::MIGRATIONS)
        .map_err(|e| XchainError::Config(format!("failed to run migrations: {e}")))?;
    Ok(())
}
