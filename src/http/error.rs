//! Error types for HTTP client operations.
//!
//! This module defines the [`HttpError`] enum which covers every failure
//! mode when talking to the blockchain API or the price feed.

use thiserror::Error;

/// Errors that can occur during HTTP client operations.
///
/// # Error Categories
///
/// - **Network errors**: [`RequestFailed`](HttpError::RequestFailed),
///   [`MiddlewareError`](HttpError::MiddlewareError)
/// - **Server errors**: [`ServerError`](HttpError::ServerError)
/// - **Client errors**: [`UrlError`](HttpError::UrlError),
///   [`JsonError`](HttpError::JsonError)
/// - **Payload errors**: [`MissingCurrency`](HttpError::MissingCurrency)
///
/// # Example
///
/// ```rust,no_run
/// use btc_tracker::http::HttpError;
///
/// fn handle_error(err: HttpError) {
///     match err {
///         HttpError::ServerError { status, body } => {
///             eprintln!("Server returned {}: {}", status, body);
///         }
///         HttpError::RequestFailed(e) => {
///             eprintln!("Network error: {}", e);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The HTTP request failed due to a network or connection error, or the
    /// response body could not be decoded.
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// An error occurred in the middleware layer. This may indicate that all
    /// retry attempts have been exhausted.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),

    /// The server returned a non-success HTTP status code.
    ///
    /// BlockCypher answers an unknown or malformed address with `400`, and
    /// rate limiting with `429`.
    #[error("Server error {status}: {body}")]
    ServerError {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The response body, which may contain error details.
        body: String,
    },

    /// Joining the base URL with a request path produced an invalid URL.
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Failed to decode a JSON payload.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The price feed answered, but without a rate for the requested currency.
    #[error("Price feed has no rate for currency {0}")]
    MissingCurrency(String),
}
