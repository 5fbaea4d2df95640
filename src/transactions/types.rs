use serde::{Deserialize, Serialize};

/// `tx_input_n` value marking a fragment as a received output.
pub const RECEIVED_INPUT_MARKER: i64 = -1;

/// A single input/output record touching the tracked address, as returned
/// by the blockchain API. Several of these can share one `tx_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTxRef {
    pub tx_hash: String,
    /// Amount in satoshis.
    pub value: u64,
    pub tx_input_n: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_output_n: Option<i64>,
    /// ISO-8601 confirmation time. Empty when the API omits it.
    #[serde(default)]
    pub confirmed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub double_spend: bool,
}

impl RawTxRef {
    pub fn direction(&self) -> TxDirection {
        if self.tx_input_n == RECEIVED_INPUT_MARKER {
            TxDirection::Received
        } else {
            TxDirection::Sent
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxDirection {
    Received,
    Sent,
}

impl TxDirection {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::Sent => "Sent",
        }
    }

    pub fn sign(&self) -> char {
        match self {
            Self::Received => '+',
            Self::Sent => '-',
        }
    }
}

/// All fragments sharing one transaction hash, folded into one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedTx {
    pub tx_hash: String,
    /// Sum of the fragment values in satoshis (always positive, use direction for sign).
    pub value: u64,
    /// Taken from the first-seen fragment.
    #[serde(rename = "type")]
    pub direction: TxDirection,
    /// Taken from the first-seen fragment.
    pub confirmed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
}

impl MergedTx {
    pub(crate) fn seed(fragment: &RawTxRef) -> Self {
        Self {
            tx_hash: fragment.tx_hash.clone(),
            value: fragment.value,
            direction: fragment.direction(),
            confirmed: fragment.confirmed.clone(),
            block_height: fragment.block_height,
            confirmations: fragment.confirmations,
        }
    }

    pub(crate) fn absorb(&mut self, fragment: &RawTxRef) {
        self.value = self.value.saturating_add(fragment.value);
    }
}

impl From<&MergedTx> for RawTxRef {
    /// Re-expresses a merged entry as a single fragment.
    fn from(tx: &MergedTx) -> Self {
        let tx_input_n = match tx.direction {
            TxDirection::Received => RECEIVED_INPUT_MARKER,
            TxDirection::Sent => 0,
        };
        Self {
            tx_hash: tx.tx_hash.clone(),
            value: tx.value,
            tx_input_n,
            tx_output_n: None,
            confirmed: tx.confirmed.clone(),
            block_height: tx.block_height,
            confirmations: tx.confirmations,
            double_spend: false,
        }
    }
}
