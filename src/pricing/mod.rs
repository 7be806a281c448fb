//! Price fetching with a short-lived cache
//!
//! Collapses bursts of identical requests: the composite cache key is
//! order-insensitive (sorted, de-duplicated ids and quotes), entries
//! live 60 seconds, and fetch failures are never cached.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::coingecko::{MarketData, PriceMap};
use crate::error::ConvertError;
use crate::types::AssetId;

/// Sorted, de-duplicated copy of a token list.
fn canonical_list(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = items.to_vec();
    out.sort();
    out.dedup();
    out
}

/// Build the composite cache key so requests differing only in input
/// ordering share an entry.
pub fn cache_key(ids: &[String], quotes: &[String]) -> String {
    format!("{}|{}", canonical_list(ids).join(","), canonical_list(quotes).join(","))
}

/// Fetches current prices for sets of asset ids against quote
/// currencies, caching full responses briefly. Shared across requests.
pub struct PriceFetcher {
    source: Arc<dyn MarketData>,
    cache: Mutex<TtlCache<String, PriceMap>>,
}

impl PriceFetcher {
    pub fn new(source: Arc<dyn MarketData>, ttl: Duration, capacity: usize) -> Self {
        Self {
            source,
            cache: Mutex::new(TtlCache::new(ttl, capacity)),
        }
    }

    /// Get prices for every id against every quote currency. A missing
    /// id or currency in the result means "price unavailable", not an
    /// error; callers look entries up and handle absence themselves.
    pub async fn prices(
        &self,
        ids: &[AssetId],
        quotes: &[String],
    ) -> Result<PriceMap, ConvertError> {
        let ids: Vec<String> = ids.iter().map(|id| id.0.clone()).collect();
        let ids = canonical_list(&ids);
        let quotes = canonical_list(quotes);
        // The remote request reuses the canonical lists, so identical
        // requests are identical on the wire too.
        let key = cache_key(&ids, &quotes);

        let cached = self
            .cache
            .lock()
            .expect("price cache lock poisoned")
            .get(&key);
        if let Some(prices) = cached {
            debug!(key = %key, "Price cache hit");
            return Ok(prices);
        }

        info!(key = %key, "Price cache miss, fetching");
        let prices = self
            .source
            .simple_price(&ids, &quotes)
            .await
            .map_err(ConvertError::FetchFailed)?;

        self.cache
            .lock()
            .expect("price cache lock poisoned")
            .insert(key, prices.clone());
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cache_key_is_order_insensitive() {
        let a = cache_key(&strings(&["ethereum", "solana"]), &strings(&["usd"]));
        let b = cache_key(&strings(&["solana", "ethereum"]), &strings(&["usd"]));
        assert_eq!(a, b);
        assert_eq!(a, "ethereum,solana|usd");
    }

    #[test]
    fn test_cache_key_deduplicates() {
        let key = cache_key(
            &strings(&["bitcoin", "bitcoin"]),
            &strings(&["usd", "eur", "usd"]),
        );
        assert_eq!(key, "bitcoin|eur,usd");
    }

    #[test]
    fn test_cache_key_distinguishes_ids_from_quotes() {
        let a = cache_key(&strings(&["bitcoin"]), &strings(&["usd"]));
        let b = cache_key(&strings(&["bitcoin", "usd"]), &strings(&[]));
        assert_ne!(a, b);
    }
}
