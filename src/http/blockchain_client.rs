//! Client for the BlockCypher address endpoint.
//!
//! ```rust,no_run
//! use url::Url;
//! use btc_tracker::http::BlockchainApiClient;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = BlockchainApiClient::new(Url::parse("https://api.blockcypher.com/v1/btc/main/")?, None)?;
//! let info = client.fetch_address("1DEP8i3QJCsomS4BSMY2RpU1upv62aGvhD").await?;
//! println!("{} satoshis over {} transactions", info.balance, info.n_tx);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use log::{debug, warn};
use url::Url;

use super::error::HttpError;
use super::http_client::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, HttpClient, as_directory};
use super::types::AddressInfo;
use crate::log::mask_string;

/// Fetches address balances and transaction references.
pub struct BlockchainApiClient {
    http_client: HttpClient,
    token: Option<String>,
}

impl BlockchainApiClient {
    /// Creates a client with a 30 second timeout and 3 retries.
    ///
    /// `base_url` is the chain root, e.g. `https://api.blockcypher.com/v1/btc/main/`.
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self, anyhow::Error> {
        Self::with_config(
            base_url,
            token,
            DEFAULT_MAX_RETRIES,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_config(
        base_url: Url,
        token: Option<String>,
        max_retries: u32,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = HttpClient::with_config(as_directory(base_url), max_retries, timeout)?;
        Ok(Self {
            http_client,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Fetch the balance record and transaction references for `address`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ServerError`] when the API rejects the address
    /// and the other [`HttpError`] variants for transport failures.
    pub async fn fetch_address(&self, address: &str) -> Result<AddressInfo, HttpError> {
        let url = self.address_url(address)?;
        debug!(address:% = mask_string(address); "Fetching address");

        let info: AddressInfo = self.http_client.get_json(url).await?;

        if info.has_more {
            warn!(
                address:% = mask_string(address),
                returned = info.txrefs.as_ref().map(Vec::len).unwrap_or(0);
                "Blockchain API truncated the transaction list"
            );
        }
        if let Some(latency) = self.http_client.get_latency().await {
            debug!(latency_ms = latency.as_millis() as u64; "Address lookup latency");
        }

        Ok(info)
    }

    fn address_url(&self, address: &str) -> Result<Url, HttpError> {
        let mut url = self.http_client.base_url().join(&format!("addrs/{}", address))?;
        if let Some(token) = &self.token {
            url.query_pairs_mut().append_pair("token", token);
        }
        Ok(url)
    }
}
