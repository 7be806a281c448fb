//! Symbol resolution - ticker to canonical asset id
//!
//! Resolution order: static shortcut table, then the symbol cache
//! (12h TTL, negative results included), then a remote asset-list
//! fetch ranked by a deterministic pure function. Transport failures
//! propagate and are never written to the cache.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::coingecko::MarketData;
use crate::error::ConvertError;
use crate::types::{AssetId, CoinRecord};

/// Common ticker abbreviations mapped straight to canonical ids.
/// Authoritative: consulted before the cache and the network.
const COMMON_IDS: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("xbt", "bitcoin"),
    ("eth", "ethereum"),
    ("sol", "solana"),
    ("ada", "cardano"),
    ("xrp", "ripple"),
    ("doge", "dogecoin"),
    ("dot", "polkadot"),
    ("matic", "matic-network"),
    ("avax", "avalanche-2"),
    ("ltc", "litecoin"),
    ("bch", "bitcoin-cash"),
    ("atom", "cosmos"),
    ("link", "chainlink"),
    ("uni", "uniswap"),
    ("arb", "arbitrum"),
    ("op", "optimism"),
    ("ton", "the-open-network"),
    ("xlm", "stellar"),
    ("etc", "ethereum-classic"),
    ("near", "near"),
    ("apt", "aptos"),
    ("ftm", "fantom"),
    ("fil", "filecoin"),
    ("hnt", "helium"),
];

/// Canonicalize a raw ticker token: lowercase, keep only `[a-z0-9]`.
/// Total and idempotent; an input with no alphanumerics yields "".
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Pick the canonical id for a normalized key from the full asset list.
/// Exact symbol matches win over exact name matches; ties break to the
/// shortest name, then the lexicographically smallest id.
pub fn rank_candidates(coins: &[CoinRecord], key: &str) -> Option<AssetId> {
    let mut matches: Vec<&CoinRecord> = coins
        .iter()
        .filter(|c| normalize(&c.symbol) == key)
        .collect();
    if matches.is_empty() {
        matches = coins.iter().filter(|c| normalize(&c.name) == key).collect();
    }
    matches
        .into_iter()
        .min_by(|a, b| (a.name.len(), &a.id).cmp(&(b.name.len(), &b.id)))
        .map(|c| AssetId(c.id.clone()))
}

fn shortcut(key: &str) -> Option<AssetId> {
    COMMON_IDS
        .iter()
        .find(|(ticker, _)| *ticker == key)
        .map(|(_, id)| AssetId::from(*id))
}

/// How a resolution was satisfied. Keeps "confirmed missing" distinct
/// from "not yet looked up" and from "lookup failed".
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// Normalized key was empty; no lookup attempted.
    Empty,
    /// Matched the static shortcut table, no cache or network touched.
    Shortcut(AssetId),
    /// Served from the symbol cache; None means a cached "no such asset".
    CacheHit(Option<AssetId>),
    /// Freshly resolved against the remote list and cached.
    Fetched(Option<AssetId>),
}

impl ResolveOutcome {
    /// Collapse to the resolved id, discarding provenance.
    pub fn into_id(self) -> Option<AssetId> {
        match self {
            ResolveOutcome::Empty => None,
            ResolveOutcome::Shortcut(id) => Some(id),
            ResolveOutcome::CacheHit(id) | ResolveOutcome::Fetched(id) => id,
        }
    }
}

/// Maps normalized tickers to canonical asset ids, caching both hits
/// and confirmed misses. Shared across all concurrent requests.
pub struct SymbolResolver {
    source: Arc<dyn MarketData>,
    cache: Mutex<TtlCache<String, Option<AssetId>>>,
}

impl SymbolResolver {
    pub fn new(source: Arc<dyn MarketData>, ttl: Duration, capacity: usize) -> Self {
        Self {
            source,
            cache: Mutex::new(TtlCache::new(ttl, capacity)),
        }
    }

    /// Resolve a ticker to its canonical id, or None for a confirmed
    /// "no such asset". Lookup failures propagate without caching.
    pub async fn resolve(&self, ticker: &str) -> Result<Option<AssetId>, ConvertError> {
        Ok(self.resolve_detailed(ticker).await?.into_id())
    }

    /// Same as [`resolve`](Self::resolve) but reporting how the result
    /// was obtained.
    pub async fn resolve_detailed(&self, ticker: &str) -> Result<ResolveOutcome, ConvertError> {
        let key = normalize(ticker);
        if key.is_empty() {
            return Ok(ResolveOutcome::Empty);
        }

        if let Some(id) = shortcut(&key) {
            debug!(key = %key, id = %id, "Shortcut hit");
            return Ok(ResolveOutcome::Shortcut(id));
        }

        let cached = self
            .cache
            .lock()
            .expect("symbol cache lock poisoned")
            .get(&key);
        if let Some(value) = cached {
            debug!(key = %key, hit = value.is_some(), "Symbol cache hit");
            return Ok(ResolveOutcome::CacheHit(value));
        }

        info!(key = %key, "Symbol cache miss, fetching asset list");
        let coins = self
            .source
            .coin_list()
            .await
            .map_err(ConvertError::LookupFailed)?;
        let resolved = rank_candidates(&coins, &key);

        self.cache
            .lock()
            .expect("symbol cache lock poisoned")
            .insert(key, resolved.clone());
        Ok(ResolveOutcome::Fetched(resolved))
    }
}
