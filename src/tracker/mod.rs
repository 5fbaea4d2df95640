//! Address lookups: validation, the two concurrent fetches, normalization
//! and report building.

mod error;
mod session;
mod source;

use log::{debug, info};

pub use error::LookupError;
pub use session::{SessionEvent, TrackSession};
pub use source::{AddressSource, RateSource};

use crate::http::AddressInfo;
use crate::log::{mask_amount, mask_string};
use crate::report::AddressReport;

/// Longest address accepted before hitting the network (bech32 tops out at 90).
pub const MAX_ADDRESS_LEN: usize = 100;

/// Reject input that cannot be an address before it ends up in a URL path.
pub fn validate_address(address: &str) -> Result<&str, LookupError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(LookupError::InvalidAddress("address is empty".to_string()));
    }
    if trimmed.len() > MAX_ADDRESS_LEN {
        return Err(LookupError::InvalidAddress(format!(
            "address is longer than {} characters",
            MAX_ADDRESS_LEN
        )));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LookupError::InvalidAddress(
            "address may only contain letters and digits".to_string(),
        ));
    }
    Ok(trimmed)
}

pub struct WalletTracker<A, R> {
    address_source: A,
    rate_source: R,
    currency: String,
    display_limit: usize,
}

impl<A: AddressSource, R: RateSource> WalletTracker<A, R> {
    pub fn new(address_source: A, rate_source: R, currency: impl Into<String>, display_limit: usize) -> Self {
        Self {
            address_source,
            rate_source,
            currency: currency.into(),
            display_limit,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Current fiat rate, rejected unless finite and positive.
    pub async fn fetch_rate(&self) -> Result<f64, LookupError> {
        let rate = self.rate_source.fetch_rate().await.map_err(LookupError::Rate)?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(LookupError::InvalidRate(rate));
        }
        Ok(rate)
    }

    pub async fn fetch_address(&self, address: &str) -> Result<AddressInfo, LookupError> {
        let address = validate_address(address)?;
        let info = self
            .address_source
            .fetch_address(address)
            .await
            .map_err(LookupError::Address)?;

        debug!(
            address:% = mask_string(&info.address),
            balance:% = mask_amount(info.balance),
            n_tx = info.n_tx;
            "Fetched address"
        );
        Ok(info)
    }

    /// Fetch address and rate concurrently and build the report.
    pub async fn lookup(&self, address: &str) -> Result<AddressReport, LookupError> {
        let (info, rate) = tokio::try_join!(self.fetch_address(address), self.fetch_rate())?;
        Ok(self.build_report(&info, rate))
    }

    pub fn build_report(&self, info: &AddressInfo, rate: f64) -> AddressReport {
        let merged = info.merged_transactions();
        info!(
            address:% = mask_string(&info.address),
            fragments = info.txrefs.as_ref().map(Vec::len).unwrap_or(0),
            transactions = merged.len();
            "Normalized transaction history"
        );
        AddressReport::new(info, &merged, rate, &self.currency, self.display_limit)
    }
}
