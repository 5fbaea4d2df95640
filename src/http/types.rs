use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::transactions::{MergedTx, RawTxRef, normalize};

/// Address summary as returned by the BlockCypher address endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: String,
    /// Confirmed balance in satoshis.
    pub balance: u64,
    pub total_received: u64,
    pub total_sent: u64,
    #[serde(default)]
    pub unconfirmed_balance: i64,
    #[serde(default)]
    pub final_balance: i64,
    pub n_tx: u64,
    #[serde(default)]
    pub unconfirmed_n_tx: u64,
    #[serde(default)]
    pub final_n_tx: u64,
    /// Absent when the address has no confirmed transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txrefs: Option<Vec<RawTxRef>>,
    /// The API truncated `txrefs`.
    #[serde(default, rename = "hasMore")]
    pub has_more: bool,
}

impl AddressInfo {
    /// Normalized transaction history; empty when the API sent no `txrefs`.
    pub fn merged_transactions(&self) -> Vec<MergedTx> {
        normalize(self.txrefs.as_deref().unwrap_or_default())
    }
}

/// CoinDesk Bitcoin Price Index response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceIndexResponse {
    pub bpi: HashMap<String, PriceIndexEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceIndexEntry {
    pub code: String,
    /// Fiat units per 1 BTC.
    pub rate_float: f64,
}

impl PriceIndexResponse {
    /// Rate for `currency`, matching the code case-insensitively.
    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        self.bpi
            .get(&currency.to_uppercase())
            .or_else(|| {
                self.bpi
                    .values()
                    .find(|entry| entry.code.eq_ignore_ascii_case(currency))
            })
            .map(|entry| entry.rate_float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::TxDirection;

    const ADDRESS_JSON: &str = r#"{
        "address": "1DEP8i3QJCsomS4BSMY2RpU1upv62aGvhD",
        "total_received": 4433416,
        "total_sent": 0,
        "balance": 4433416,
        "unconfirmed_balance": 0,
        "final_balance": 4433416,
        "n_tx": 7,
        "unconfirmed_n_tx": 0,
        "final_n_tx": 7,
        "txrefs": [
            {
                "tx_hash": "14b1052855bbf6561bc4db8aa501762e7cc1e86994dda9e782a6b73b1ce0dc1e",
                "block_height": 302013,
                "tx_input_n": -1,
                "tx_output_n": 0,
                "value": 20213,
                "ref_balance": 4433416,
                "spent": false,
                "confirmations": 63066,
                "confirmed": "2014-05-22T03:46:25Z",
                "double_spend": false
            },
            {
                "tx_hash": "4cff011ec53022f2ae47197d1a2fd4a6ac2a80139f4d0131c1fed625ed5dc869",
                "block_height": 292586,
                "tx_input_n": 0,
                "tx_output_n": -1,
                "value": 1000,
                "confirmations": 72493,
                "confirmed": "2014-03-26T17:08:04Z"
            }
        ],
        "hasMore": true,
        "tx_url": "https://api.blockcypher.com/v1/btc/main/txs/"
    }"#;

    #[test]
    fn test_deserialize_address_info() {
        let info: AddressInfo = serde_json::from_str(ADDRESS_JSON).unwrap();

        assert_eq!(info.address, "1DEP8i3QJCsomS4BSMY2RpU1upv62aGvhD");
        assert_eq!(info.balance, 4_433_416);
        assert_eq!(info.n_tx, 7);
        assert!(info.has_more);

        let txrefs = info.txrefs.as_ref().unwrap();
        assert_eq!(txrefs.len(), 2);
        assert_eq!(txrefs[0].block_height, Some(302_013));
        assert_eq!(txrefs[0].direction(), TxDirection::Received);
        assert_eq!(txrefs[1].direction(), TxDirection::Sent);
    }

    #[test]
    fn test_missing_txrefs_normalize_to_empty() {
        let info: AddressInfo = serde_json::from_str(
            r#"{"address": "1Empty", "total_received": 0, "total_sent": 0, "balance": 0, "n_tx": 0}"#,
        )
        .unwrap();

        assert!(info.txrefs.is_none());
        assert!(!info.has_more);
        assert!(info.merged_transactions().is_empty());
    }

    #[test]
    fn test_merged_transactions_from_address_info() {
        let info: AddressInfo = serde_json::from_str(ADDRESS_JSON).unwrap();

        let merged = info.merged_transactions();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].confirmed, "2014-05-22T03:46:25Z");
        assert_eq!(merged[0].direction, TxDirection::Received);
    }

    #[test]
    fn test_rate_for_currency() {
        let response: PriceIndexResponse = serde_json::from_str(
            r#"{
                "time": {"updated": "Jan 1, 2024 00:00:00 UTC"},
                "bpi": {
                    "USD": {"code": "USD", "rate": "42,000.1234", "rate_float": 42000.1234},
                    "EUR": {"code": "EUR", "rate": "38,000.0000", "rate_float": 38000.0}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(response.rate_for("USD"), Some(42_000.1234));
        assert_eq!(response.rate_for("eur"), Some(38_000.0));
        assert_eq!(response.rate_for("GBP"), None);
    }
}
