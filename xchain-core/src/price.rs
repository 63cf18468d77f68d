// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Price Enricher (§4.8), grounded on `generator/common/price_generator.py`'s
//! `PriceGenerator`. Owns `token_metadata`, `token_price`, and `native_token` (§3
//! ownership rule); per-run "tried" caches live on the instance, never as process-wide
//! state (§9 "Global caches for tried metadata/price").

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::bridge::{native_token_info, ChainName, NATIVE_TOKEN_SENTINEL};
use crate::provider::ProviderClient;
use xchain_schema::models::{NativeToken, TokenMetadata, TokenPrice};
use xchain_schema::schema::{native_token, token_metadata, token_price};

const ONE_DAY: i64 = 86_400;

fn is_stable_dollar(symbol: &str) -> bool {
    let lower = symbol.to_lowercase();
    lower.contains("usd") || lower.contains("dai") || lower.contains("frax")
}

fn unix_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Two-sided gap report from `is_token_price_complete`: `(requested_start, stored_min)` and
/// `(stored_max, requested_end)`, each present only when that side actually has a gap.
pub struct MissingRanges {
    pub before: Option<(i64, i64)>,
    pub after: Option<(i64, i64)>,
}

impl MissingRanges {
    fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

/// Per-Price-Enricher-instance caches of `(chain, contract)` pairs already attempted this
/// run, so a failing provider call is never retried within one `generate` invocation
/// (§4.8, §7 `ProviderError`).
pub struct PriceEnricher {
    provider: ProviderClient,
    tried_metadata: HashSet<(String, String)>,
    tried_price: HashSet<(String, String)>,
}

impl PriceEnricher {
    pub fn new(provider: ProviderClient) -> Self {
        Self {
            provider,
            tried_metadata: HashSet::new(),
            tried_price: HashSet::new(),
        }
    }

    /// Ensures a `native_token` row, wrapped-native `token_metadata` row, a price series
    /// for `[start_ts, end_ts]`, and a sentinel `token_metadata` row (native fee accounting)
    /// for every chain this process knows about (§4.8).
    pub async fn populate_native_tokens(&mut self, conn: &mut AsyncPgConnection, start_ts: i64, end_ts: i64) {
        for chain in [
            ChainName::Ethereum,
            ChainName::Arbitrum,
            ChainName::Optimism,
            ChainName::Base,
            ChainName::Polygon,
            ChainName::Bnb,
            ChainName::Avalanche,
            ChainName::Scroll,
            ChainName::Linea,
            ChainName::Gnosis,
            ChainName::Ronin,
        ] {
            let Some((symbol, wrapped_contract)) = native_token_info(chain) else {
                continue;
            };
            let blockchain = chain.to_string();

            let _ = diesel::insert_into(native_token::table)
                .values(&NativeToken {
                    blockchain: blockchain.clone(),
                    symbol: symbol.to_string(),
                })
                .on_conflict_do_nothing()
                .execute(conn)
                .await;

            let metadata = self
                .ensure_metadata(conn, &blockchain, wrapped_contract, None)
                .await;
            let Some(metadata) = metadata else {
                warn!(blockchain, "skipping native token: no metadata available");
                continue;
            };

            self.ensure_price_series(conn, &metadata.symbol, &metadata.name, start_ts, end_ts)
                .await;

            let _ = diesel::insert_into(token_metadata::table)
                .values(&TokenMetadata {
                    blockchain: blockchain.clone(),
                    address: NATIVE_TOKEN_SENTINEL.to_string(),
                    symbol: metadata.symbol,
                    name: metadata.name,
                    decimals: metadata.decimals,
                })
                .on_conflict_do_nothing()
                .execute(conn)
                .await;
        }
    }

    /// Ensures metadata + price coverage for both sides of one correlated pair (§4.8
    /// `populate_token_info`). Each side is independent: a failure on one never blocks the
    /// other, and USD columns for the failing side simply stay NULL downstream.
    #[allow(clippy::too_many_arguments)]
    pub async fn populate_token_info(
        &mut self,
        conn: &mut AsyncPgConnection,
        src_chain: &str,
        dst_chain: &str,
        input_token: Option<&str>,
        output_token: Option<&str>,
        start_ts: i64,
        end_ts: i64,
    ) {
        if let Some(input_token) = input_token {
            if let Some(metadata) = self.ensure_metadata(conn, src_chain, input_token, None).await {
                self.ensure_price_series(conn, &metadata.symbol, &metadata.name, start_ts, end_ts)
                    .await;
            }
        }
        if let Some(output_token) = output_token {
            if let Some(metadata) = self.ensure_metadata(conn, dst_chain, output_token, None).await {
                self.ensure_price_series(conn, &metadata.symbol, &metadata.name, start_ts, end_ts)
                    .await;
            }
        }
    }

    async fn ensure_metadata(
        &mut self,
        conn: &mut AsyncPgConnection,
        blockchain: &str,
        contract: &str,
        stored_under: Option<&str>,
    ) -> Option<TokenMetadata> {
        if blockchain == "solana" {
            return None;
        }

        let existing = token_metadata::table
            .filter(token_metadata::blockchain.eq(blockchain))
            .filter(token_metadata::address.eq(stored_under.unwrap_or(contract)))
            .first::<TokenMetadata>(conn)
            .await
            .ok();
        if let Some(existing) = existing {
            return Some(existing);
        }

        let key = (blockchain.to_string(), contract.to_string());
        if self.tried_metadata.contains(&key) {
            return None;
        }
        self.tried_metadata.insert(key);

        let fetched = self.provider.fetch_token_metadata(blockchain, contract).await?;
        let row = TokenMetadata {
            blockchain: blockchain.to_string(),
            address: stored_under.unwrap_or(contract).to_string(),
            symbol: fetched.symbol.to_uppercase(),
            name: fetched.name,
            decimals: if fetched.decimals == 0 { 1 } else { fetched.decimals },
        };
        diesel::insert_into(token_metadata::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(conn)
            .await
            .ok()?;
        Some(row)
    }

    async fn ensure_price_series(
        &mut self,
        conn: &mut AsyncPgConnection,
        symbol: &str,
        name: &str,
        start_ts: i64,
        end_ts: i64,
    ) {
        let (complete, missing) = self.is_token_price_complete(conn, symbol, name, start_ts, end_ts).await;
        if complete {
            return;
        }
        let key = (symbol.to_string(), name.to_string());
        if self.tried_price.contains(&key) {
            return;
        }

        match missing {
            None => self.fetch_and_store_token_prices(conn, start_ts, end_ts, symbol, name, None, None).await,
            Some(ranges) if ranges.is_empty() => {}
            Some(ranges) => {
                if let Some((s, e)) = ranges.before {
                    self.fetch_and_store_token_prices(conn, s, e, symbol, name, None, None).await;
                }
                if let Some((s, e)) = ranges.after {
                    self.fetch_and_store_token_prices(conn, s, e, symbol, name, None, None).await;
                }
            }
        }
        self.tried_price.insert(key);
    }

    /// Writes a daily price series for `[start_ts, end_ts]`. Stable-dollar symbols
    /// (`usd`/`dai`/`frax` by substring) are written as `1.0` without a network call (§4.8).
    #[allow(clippy::too_many_arguments)]
    pub async fn fetch_and_store_token_prices(
        &self,
        conn: &mut AsyncPgConnection,
        start_ts: i64,
        end_ts: i64,
        symbol: &str,
        name: &str,
        chain: Option<&str>,
        token_address: Option<&str>,
    ) {
        if chain == Some("solana") {
            return;
        }

        if is_stable_dollar(symbol) {
            let mut rows = Vec::new();
            let mut ts = start_ts;
            while ts <= end_ts {
                if let Some(date) = unix_to_date(ts) {
                    rows.push(TokenPrice {
                        symbol: symbol.to_string(),
                        name: name.to_string(),
                        date,
                        price_usd: bigdecimal::BigDecimal::from(1),
                    });
                }
                ts += ONE_DAY;
            }
            let _ = diesel::insert_into(token_price::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(conn)
                .await;
            return;
        }

        let history = self
            .provider
            .fetch_price_history(
                if chain.is_none() { Some(symbol) } else { None },
                chain,
                token_address,
                start_ts,
                end_ts,
            )
            .await;
        let Some(history) = history else { return };

        let rows: Vec<TokenPrice> = history
            .data
            .into_iter()
            .filter_map(|point| {
                let date = DateTime::parse_from_rfc3339(&point.timestamp)
                    .ok()
                    .map(|dt| dt.date_naive())?;
                Some(TokenPrice {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    date,
                    price_usd: bigdecimal::BigDecimal::try_from(point.value).unwrap_or_default(),
                })
            })
            .collect();
        if !rows.is_empty() {
            let _ = diesel::insert_into(token_price::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(conn)
                .await;
        }
    }

    /// Compares the distinct stored date count for `(symbol, name)` against the inclusive
    /// day span of `[start_ts, end_ts]` (§4.8).
    pub async fn is_token_price_complete(
        &self,
        conn: &mut AsyncPgConnection,
        symbol: &str,
        name: &str,
        start_ts: i64,
        end_ts: i64,
    ) -> (bool, Option<MissingRanges>) {
        let (Some(start_date), Some(end_date)) = (unix_to_date(start_ts), unix_to_date(end_ts)) else {
            return (true, None);
        };
        let days_diff = (end_date - start_date).num_days() + 1;

        let count: i64 = token_price::table
            .filter(token_price::symbol.eq(symbol))
            .filter(token_price::name.eq(name))
            .filter(token_price::date.between(start_date, end_date))
            .count()
            .get_result(conn)
            .await
            .unwrap_or(0);

        if count == 0 {
            return (false, None);
        }
        if count == days_diff {
            return (true, None);
        }

        let min_date: Option<NaiveDate> = token_price::table
            .filter(token_price::symbol.eq(symbol))
            .filter(token_price::name.eq(name))
            .select(diesel::dsl::min(token_price::date))
            .first(conn)
            .await
            .ok()
            .flatten();
        let max_date: Option<NaiveDate> = token_price::table
            .filter(token_price::symbol.eq(symbol))
            .filter(token_price::name.eq(name))
            .select(diesel::dsl::max(token_price::date))
            .first(conn)
            .await
            .ok()
            .flatten();

        let mut ranges = MissingRanges { before: None, after: None };
        if let Some(min_date) = min_date {
            if min_date > start_date {
                ranges.before = Some((start_ts, min_date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp()));
            }
        }
        if let Some(max_date) = max_date {
            if end_date > max_date {
                ranges.after = Some((max_date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp(), end_ts));
            }
        }
        if ranges.is_empty() {
            (true, None)
        } else {
            (false, Some(ranges))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_dollar_detection_is_case_insensitive() {
        assert!(is_stable_dollar("USDC"));
        assert!(is_stable_dollar("Dai"));
        assert!(is_stable_dollar("fraxBP"));
        assert!(!is_stable_dollar("WETH"));
    }

    #[test]
    fn unix_to_date_roundtrips() {
        let d = unix_to_date(1_700_000_000).unwrap();
        assert_eq!(d.to_string(), "2023-11-14");
    }
}
