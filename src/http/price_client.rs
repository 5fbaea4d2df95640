use std::time::Duration;

use log::debug;
use url::Url;

use super::error::HttpError;
use super::http_client::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, HttpClient};
use super::types::PriceIndexResponse;

/// Fetches the current BTC price from a CoinDesk-style price index.
pub struct PriceFeedClient {
    http_client: HttpClient,
    currency: String,
}

impl PriceFeedClient {
    /// `feed_url` is the full endpoint, e.g. `https://api.coindesk.com/v1/bpi/currentprice.json`.
    pub fn new(feed_url: Url, currency: impl Into<String>) -> Result<Self, anyhow::Error> {
        Self::with_config(
            feed_url,
            currency,
            DEFAULT_MAX_RETRIES,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_config(
        feed_url: Url,
        currency: impl Into<String>,
        max_retries: u32,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            http_client: HttpClient::with_config(feed_url, max_retries, timeout)?,
            currency: currency.into().to_uppercase(),
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Fiat units per 1 BTC in the configured currency.
    pub async fn fetch_rate(&self) -> Result<f64, HttpError> {
        let response: PriceIndexResponse = self.http_client.get_json(self.http_client.base_url().clone()).await?;

        let rate = response
            .rate_for(&self.currency)
            .ok_or_else(|| HttpError::MissingCurrency(self.currency.clone()))?;

        debug!(currency:% = self.currency, rate = rate; "Fetched BTC price");
        Ok(rate)
    }
}
