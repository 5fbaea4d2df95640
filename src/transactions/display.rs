use serde::{Deserialize, Serialize};

use super::formatting::{format_fiat, format_signed_btc};
use super::types::{MergedTx, TxDirection};
use crate::utils::timestamp::display_timestamp;

/// Number of transactions surfaced to the user unless configured otherwise.
pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

/// User-friendly transaction representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayedTransaction {
    pub tx_hash: String,
    pub direction: TxDirection,
    /// Amount in satoshis (always positive, use direction for sign).
    pub amount: u64,
    /// Signed amount, e.g. "+0.00000800 BTC".
    pub amount_display: String,
    /// Fiat value of the amount, e.g. "0.52 USD".
    pub fiat_display: String,
    pub date_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
}

impl DisplayedTransaction {
    pub fn from_merged(tx: &MergedTx, rate: f64, currency: &str) -> Self {
        Self {
            tx_hash: tx.tx_hash.clone(),
            direction: tx.direction,
            amount: tx.value,
            amount_display: format_signed_btc(tx.direction, tx.value),
            fiat_display: format_fiat(tx.value, rate, currency),
            date_display: display_timestamp(&tx.confirmed),
            confirmations: tx.confirmations,
        }
    }
}

/// The slice of the normalized history that is shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<DisplayedTransaction>,
    /// Number of merged transactions before slicing.
    pub total: usize,
    pub limit: usize,
}

impl TransactionPage {
    pub fn is_truncated(&self) -> bool {
        self.total > self.transactions.len()
    }
}

/// Take the first `limit` entries of an already normalized history.
pub fn display_transactions(merged: &[MergedTx], rate: f64, currency: &str, limit: usize) -> TransactionPage {
    TransactionPage {
        transactions: merged
            .iter()
            .take(limit)
            .map(|tx| DisplayedTransaction::from_merged(tx, rate, currency))
            .collect(),
        total: merged.len(),
        limit,
    }
}
