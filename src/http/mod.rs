//! HTTP clients for the two external data sources.
//!
//! - [`BlockchainApiClient`] - address balance and transaction references
//!   from the BlockCypher REST API
//! - [`PriceFeedClient`] - current BTC price from a CoinDesk-style price index
//! - [`HttpError`] - error type shared by both
//!
//! Both clients sit on a `reqwest` client wrapped in retry middleware
//! (exponential backoff for transient failures) and record the latency of
//! their last request.

mod blockchain_client;
mod error;
mod http_client;
mod price_client;
mod types;

pub use blockchain_client::BlockchainApiClient;
pub use error::HttpError;
pub use price_client::PriceFeedClient;
pub use types::{AddressInfo, PriceIndexEntry, PriceIndexResponse};
