//! CoinGecko REST API client
//!
//! Two read-only endpoints back the whole core: the full asset list
//! (for symbol resolution) and simple-price (for conversion rates).
//! Endpoints documented at: https://docs.coingecko.com/reference

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::types::CoinRecord;

/// Prices keyed by asset id, then by quote currency code.
pub type PriceMap = HashMap<String, HashMap<String, f64>>;

/// Remote market-data source. The resolver and fetcher only see this
/// seam, so tests can run against an in-memory stub.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch every known asset as (id, symbol, name) records.
    async fn coin_list(&self) -> Result<Vec<CoinRecord>, SourceError>;

    /// Fetch current prices for the full ids x quotes cross-product.
    /// A partial response (missing id or currency) is not an error.
    async fn simple_price(&self, ids: &[String], quotes: &[String])
        -> Result<PriceMap, SourceError>;
}

/// REST client for the CoinGecko v3 API.
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Create a client with a fixed request timeout and identifying headers.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("convertbot")),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET a URL and decode the JSON body, mapping non-2xx statuses to
    /// SourceError::Status with a truncated body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let resp = self.client.get(url).query(params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body: String = body.chars().take(200).collect();
            warn!(%status, %url, "CoinGecko request failed");
            return Err(SourceError::Status { status, body });
        }
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl MarketData for CoinGeckoClient {
    async fn coin_list(&self) -> Result<Vec<CoinRecord>, SourceError> {
        let url = format!("{}/coins/list", self.base_url);
        let coins: Vec<CoinRecord> = self
            .get_json(&url, &[("include_platform", "false")])
            .await?;
        debug!(count = coins.len(), "Fetched remote asset list");
        Ok(coins)
    }

    async fn simple_price(
        &self,
        ids: &[String],
        quotes: &[String],
    ) -> Result<PriceMap, SourceError> {
        let url = format!("{}/simple/price", self.base_url);
        let ids_param = ids.join(",");
        let quotes_param = quotes.join(",");
        let prices: PriceMap = self
            .get_json(
                &url,
                &[
                    ("ids", ids_param.as_str()),
                    ("vs_currencies", quotes_param.as_str()),
                    ("precision", "full"),
                ],
            )
            .await?;
        debug!(ids = %ids_param, quotes = %quotes_param, "Fetched prices");
        Ok(prices)
    }
}
