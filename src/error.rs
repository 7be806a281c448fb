//! Error types for the conversion core
//!
//! All four failure kinds reach the request boundary as distinct,
//! inspectable values; the transport binding turns them into user text.

use crate::types::AssetSide;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the remote data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connect, read, or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status, body truncated for diagnostics.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Failure of one conversion request.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Ticker has no shortcut, cache, or remote match. Not retried.
    #[error("unknown {0} asset")]
    UnknownAsset(AssetSide),

    /// Assets resolved but the fetch response had no usable price.
    #[error("price unavailable")]
    PriceUnavailable,

    /// Symbol list fetch failed. Never cached, safe to retry next request.
    #[error("asset lookup failed: {0}")]
    LookupFailed(#[source] SourceError),

    /// Price fetch failed. Never cached, safe to retry next request.
    #[error("price fetch failed: {0}")]
    FetchFailed(#[source] SourceError),
}

impl ConvertError {
    /// Whether a retry at the request level could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ConvertError::LookupFailed(_) | ConvertError::FetchFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_side() {
        let base = ConvertError::UnknownAsset(AssetSide::Base);
        let quote = ConvertError::UnknownAsset(AssetSide::Quote);
        assert_eq!(base.to_string(), "unknown base asset");
        assert_eq!(quote.to_string(), "unknown quote asset");
    }

    #[test]
    fn test_transient_classification() {
        assert!(!ConvertError::UnknownAsset(AssetSide::Base).is_transient());
        assert!(!ConvertError::PriceUnavailable.is_transient());
        let status = SourceError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "rate limited".to_string(),
        };
        assert!(ConvertError::FetchFailed(status).is_transient());
    }
}
