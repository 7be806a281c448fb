//! ConvertBot Library
//!
//! Ticker resolution, cached price fetching, and chat-style asset
//! conversion backed by CoinGecko

pub mod cache;
pub mod coingecko;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod pricing;
pub mod resolver;
pub mod types;
