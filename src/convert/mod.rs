//! Conversion engine
//!
//! Orchestrates symbol resolution and price fetching to turn
//! (amount, base, quote) into a converted amount and an implied unit
//! rate. Fiat quotes use the source's native fiat pairing; anything
//! else is bridged through USD since the source does not expose every
//! direct pair.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::coingecko::{MarketData, PriceMap};
use crate::error::ConvertError;
use crate::pricing::PriceFetcher;
use crate::resolver::{normalize, SymbolResolver};
use crate::types::{AssetClass, AssetId, AssetSide, ConversionResult};

/// Cache lifetimes and sizes for the two caches the engine owns.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    pub symbol_ttl: Duration,
    pub symbol_capacity: usize,
    pub price_ttl: Duration,
    pub price_capacity: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            symbol_ttl: Duration::from_secs(12 * 60 * 60),
            symbol_capacity: 5000,
            price_ttl: Duration::from_secs(60),
            price_capacity: 5000,
        }
    }
}

/// Stateless request orchestrator over the shared resolver and
/// fetcher. One engine serves all concurrent requests.
pub struct ConversionEngine {
    resolver: SymbolResolver,
    fetcher: PriceFetcher,
}

impl ConversionEngine {
    pub fn new(source: Arc<dyn MarketData>, policy: CachePolicy) -> Self {
        Self {
            resolver: SymbolResolver::new(
                source.clone(),
                policy.symbol_ttl,
                policy.symbol_capacity,
            ),
            fetcher: PriceFetcher::new(source, policy.price_ttl, policy.price_capacity),
        }
    }

    pub fn resolver(&self) -> &SymbolResolver {
        &self.resolver
    }

    /// Convert an amount of the base asset into the quote asset.
    pub async fn convert(
        &self,
        amount: f64,
        base_ticker: &str,
        quote_ticker: &str,
    ) -> Result<ConversionResult, ConvertError> {
        let base_key = normalize(base_ticker);
        let quote_key = normalize(quote_ticker);
        let quote_class = AssetClass::of(&quote_key);

        let base_id = self
            .resolver
            .resolve(&base_key)
            .await?
            .ok_or(ConvertError::UnknownAsset(AssetSide::Base))?;

        let rate = match quote_class {
            AssetClass::Fiat => self.fiat_rate(&base_id, &quote_key).await?,
            AssetClass::Crypto => self.cross_rate(&base_id, &quote_key).await?,
        };

        let converted_amount = amount * rate;
        debug!(
            base = %base_key,
            quote = %quote_key,
            rate,
            converted_amount,
            "Conversion complete"
        );

        Ok(ConversionResult {
            converted_amount,
            rate,
            base_label: base_key.to_uppercase(),
            quote_label: quote_key.to_uppercase(),
            quote_class,
        })
    }

    /// Direct fiat pairing: one price, used as the rate.
    async fn fiat_rate(&self, base_id: &AssetId, quote_key: &str) -> Result<f64, ConvertError> {
        let prices = self
            .fetcher
            .prices(&[base_id.clone()], &[quote_key.to_string()])
            .await?;
        lookup(&prices, base_id, quote_key).ok_or(ConvertError::PriceUnavailable)
    }

    /// USD bridge: both legs quoted in USD, rate is their ratio.
    async fn cross_rate(&self, base_id: &AssetId, quote_key: &str) -> Result<f64, ConvertError> {
        let quote_id = self
            .resolver
            .resolve(quote_key)
            .await?
            .ok_or(ConvertError::UnknownAsset(AssetSide::Quote))?;

        let prices = self
            .fetcher
            .prices(&[base_id.clone(), quote_id.clone()], &["usd".to_string()])
            .await?;

        let base_usd = lookup(&prices, base_id, "usd").ok_or(ConvertError::PriceUnavailable)?;
        let quote_usd = lookup(&prices, &quote_id, "usd").ok_or(ConvertError::PriceUnavailable)?;
        if quote_usd == 0.0 {
            return Err(ConvertError::PriceUnavailable);
        }
        Ok(base_usd / quote_usd)
    }
}

/// A missing id or currency in the response means "price unavailable".
fn lookup(prices: &PriceMap, id: &AssetId, currency: &str) -> Option<f64> {
    prices.get(id.as_str()).and_then(|m| m.get(currency)).copied()
}
