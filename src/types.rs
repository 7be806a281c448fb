//! Core types used throughout ConvertBot
//!
//! Defines the canonical asset identifier, asset classification,
//! and the result shape produced by the conversion engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier assigned by the pricing data source to one
/// tradable asset (e.g. "bitcoin"). Distinct from the trading symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        AssetId(s.to_string())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recognized fiat currency codes (normalized form). Quote tokens outside
/// this set are treated as crypto assets and priced through the USD bridge.
pub const FIAT_WHITELIST: &[&str] = &[
    "usd", "eur", "gbp", "jpy", "cny", "aud", "cad", "chf", "inr", "brl", "mxn", "sek", "nok",
    "dkk", "pln", "zar", "hkd", "sgd", "thb", "twd", "idr", "php", "try", "ils", "nzd", "rub",
    "aed", "sar", "ngn", "ars", "clp", "czk", "ron",
];

/// Asset class of a quote token, controls the pricing branch and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Fiat,
    Crypto,
}

impl AssetClass {
    /// Classify a normalized ticker key against the fiat whitelist.
    pub fn of(key: &str) -> Self {
        if FIAT_WHITELIST.contains(&key) {
            AssetClass::Fiat
        } else {
            AssetClass::Crypto
        }
    }
}

/// Which side of a conversion a ticker sits on, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSide {
    Base,
    Quote,
}

impl fmt::Display for AssetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSide::Base => write!(f, "base"),
            AssetSide::Quote => write!(f, "quote"),
        }
    }
}

/// One record from the remote asset list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinRecord {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

/// Outcome of one conversion request. Transient, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// amount * rate, in units of the quote asset
    pub converted_amount: f64,
    /// Implied unit rate: value of 1 base asset in the quote asset
    pub rate: f64,
    /// Uppercased base ticker for display
    pub base_label: String,
    /// Uppercased quote ticker for display
    pub quote_label: String,
    /// Class of the quote asset, drives formatting
    pub quote_class: AssetClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiat_classification() {
        assert_eq!(AssetClass::of("usd"), AssetClass::Fiat);
        assert_eq!(AssetClass::of("ron"), AssetClass::Fiat);
        assert_eq!(AssetClass::of("btc"), AssetClass::Crypto);
        assert_eq!(AssetClass::of(""), AssetClass::Crypto);
    }

    #[test]
    fn test_asset_id_display() {
        let id = AssetId::from("bitcoin");
        assert_eq!(id.to_string(), "bitcoin");
        assert_eq!(id.as_str(), "bitcoin");
    }

    #[test]
    fn test_coin_record_tolerates_missing_fields() {
        let record: CoinRecord = serde_json::from_str(r#"{"id": "bitcoin"}"#).unwrap();
        assert_eq!(record.id, "bitcoin");
        assert!(record.symbol.is_empty());
        assert!(record.name.is_empty());
    }
}
