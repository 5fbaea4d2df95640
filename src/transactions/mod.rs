mod display;
pub mod formatting;
mod normalizer;
mod types;

pub use display::{DEFAULT_DISPLAY_LIMIT, DisplayedTransaction, TransactionPage, display_transactions};
pub use normalizer::{normalize, normalize_at};
pub use types::{MergedTx, RECEIVED_INPUT_MARKER, RawTxRef, TxDirection};
