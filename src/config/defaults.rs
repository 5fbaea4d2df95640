use serde::{Deserialize, Serialize};

use crate::cli::{ConfigArgs, OutputArgs};
use crate::transactions::DEFAULT_DISPLAY_LIMIT;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub price_feed_url: String,
    pub fiat_currency: String,
    pub display_limit: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.blockcypher.com/v1/btc/main/".to_string(),
            api_token: None,
            price_feed_url: "https://api.coindesk.com/v1/bpi/currentprice.json".to_string(),
            fiat_currency: "USD".to_string(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            max_retries: 3,
            timeout_secs: 30,
        }
    }
}

impl TrackerConfig {
    pub fn main_key_prefix() -> &'static str {
        "tracker"
    }
}

/// Command line flags take precedence over file and environment values.
pub trait ApplyArgs {
    fn apply_config_args(&mut self, args: &ConfigArgs);
    fn apply_output(&mut self, args: &OutputArgs);
}

impl ApplyArgs for TrackerConfig {
    fn apply_config_args(&mut self, args: &ConfigArgs) {
        if let Some(api_url) = &args.api_url {
            self.api_base_url = api_url.clone();
        }
        if let Some(api_token) = &args.api_token {
            self.api_token = Some(api_token.clone());
        }
        if let Some(price_url) = &args.price_url {
            self.price_feed_url = price_url.clone();
        }
        if let Some(currency) = &args.currency {
            self.fiat_currency = currency.to_uppercase();
        }
    }

    fn apply_output(&mut self, args: &OutputArgs) {
        if let Some(limit) = args.limit {
            self.display_limit = limit;
        }
    }
}
