use std::future::Future;

use crate::http::{AddressInfo, BlockchainApiClient, HttpError, PriceFeedClient};

/// Where address records come from.
pub trait AddressSource: Send + Sync {
    fn fetch_address(&self, address: &str) -> impl Future<Output = Result<AddressInfo, HttpError>> + Send;
}

/// Where the BTC price comes from.
pub trait RateSource: Send + Sync {
    fn fetch_rate(&self) -> impl Future<Output = Result<f64, HttpError>> + Send;
}

impl AddressSource for BlockchainApiClient {
    fn fetch_address(&self, address: &str) -> impl Future<Output = Result<AddressInfo, HttpError>> + Send {
        BlockchainApiClient::fetch_address(self, address)
    }
}

impl RateSource for PriceFeedClient {
    fn fetch_rate(&self) -> impl Future<Output = Result<f64, HttpError>> + Send {
        PriceFeedClient::fetch_rate(self)
    }
}
