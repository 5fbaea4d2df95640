use crate::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid Bitcoin address: {0}")]
    InvalidAddress(String),

    #[error("Address lookup failed: {0}")]
    Address(#[source] HttpError),

    #[error("Price lookup failed: {0}")]
    Rate(#[source] HttpError),

    #[error("Price feed returned an unusable rate: {0}")]
    InvalidRate(f64),
}
