pub mod cli;
pub mod config;
pub mod http;
pub mod log;
pub mod report;
pub mod tracker;
pub mod transactions;
pub mod utils;

pub use crate::http::{AddressInfo, BlockchainApiClient, HttpError, PriceFeedClient};
pub use crate::report::AddressReport;
pub use crate::tracker::{LookupError, TrackSession, WalletTracker};
pub use crate::transactions::{MergedTx, RawTxRef, TxDirection, normalize};
