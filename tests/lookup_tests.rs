use std::time::Duration;

use btc_tracker::http::{BlockchainApiClient, HttpError, PriceFeedClient};
use btc_tracker::tracker::{LookupError, WalletTracker};
use btc_tracker::transactions::TxDirection;
use reqwest::StatusCode;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADDRESS: &str = "1DEP8i3QJCsomS4BSMY2RpU1upv62aGvhD";

fn address_body() -> serde_json::Value {
    serde_json::json!({
        "address": ADDRESS,
        "total_received": 900,
        "total_sent": 100,
        "balance": 800,
        "unconfirmed_balance": 0,
        "final_balance": 800,
        "n_tx": 3,
        "unconfirmed_n_tx": 0,
        "final_n_tx": 3,
        "txrefs": [
            {
                "tx_hash": "aaaa",
                "block_height": 820000,
                "tx_input_n": -1,
                "tx_output_n": 0,
                "value": 500,
                "ref_balance": 500,
                "spent": false,
                "confirmations": 10,
                "confirmed": "2024-01-02T00:00:00Z",
                "double_spend": false
            },
            {
                "tx_hash": "bbbb",
                "block_height": 819000,
                "tx_input_n": 0,
                "tx_output_n": -1,
                "value": 100,
                "ref_balance": 400,
                "confirmations": 1010,
                "confirmed": "2024-01-01T00:00:00Z",
                "double_spend": false
            },
            {
                "tx_hash": "aaaa",
                "block_height": 820000,
                "tx_input_n": -1,
                "tx_output_n": 1,
                "value": 400,
                "ref_balance": 900,
                "spent": false,
                "confirmations": 10,
                "confirmed": "2024-01-02T00:00:00Z",
                "double_spend": false
            }
        ]
    })
}

fn price_body() -> serde_json::Value {
    serde_json::json!({
        "time": { "updated": "Jan 2, 2024 00:00:00 UTC" },
        "bpi": {
            "USD": { "code": "USD", "rate": "50,000.0000", "rate_float": 50000.0 },
            "EUR": { "code": "EUR", "rate": "45,000.0000", "rate_float": 45000.0 }
        }
    })
}

fn api_client(server: &MockServer, token: Option<&str>) -> BlockchainApiClient {
    let base = Url::parse(&format!("{}/v1/btc/main", server.uri())).unwrap();
    BlockchainApiClient::with_config(base, token.map(str::to_string), 0, Duration::from_secs(5)).unwrap()
}

fn price_client(server: &MockServer, currency: &str) -> PriceFeedClient {
    let feed = Url::parse(&format!("{}/v1/bpi/currentprice.json", server.uri())).unwrap();
    PriceFeedClient::with_config(feed, currency, 0, Duration::from_secs(5)).unwrap()
}

async fn mount_price(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/bpi/currentprice.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_address_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/btc/main/addrs/{}", ADDRESS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body()))
        .expect(1)
        .mount(&server)
        .await;

    let info = api_client(&server, None).fetch_address(ADDRESS).await.unwrap();

    assert_eq!(info.address, ADDRESS);
    assert_eq!(info.balance, 800);
    assert_eq!(info.txrefs.as_ref().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_fetch_address_sends_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/btc/main/addrs/{}", ADDRESS)))
        .and(query_param("token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body()))
        .expect(1)
        .mount(&server)
        .await;

    let info = api_client(&server, Some("secret")).fetch_address(ADDRESS).await;

    assert!(info.is_ok());
}

#[tokio::test]
async fn test_fetch_address_rejected_by_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"error": "Wallet 1nope not found"}"#),
        )
        .mount(&server)
        .await;

    let result = api_client(&server, None).fetch_address("1nope").await;

    match result {
        Err(HttpError::ServerError { status, body }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("not found"));
        },
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_address_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = api_client(&server, None).fetch_address(ADDRESS).await;

    assert!(matches!(result, Err(HttpError::JsonError(_))));
}

#[tokio::test]
async fn test_fetch_rate_for_configured_currency() {
    let server = MockServer::start().await;
    mount_price(&server).await;

    assert_eq!(price_client(&server, "usd").fetch_rate().await.unwrap(), 50000.0);
    assert_eq!(price_client(&server, "EUR").fetch_rate().await.unwrap(), 45000.0);
}

#[tokio::test]
async fn test_fetch_rate_missing_currency() {
    let server = MockServer::start().await;
    mount_price(&server).await;

    let result = price_client(&server, "GBP").fetch_rate().await;

    assert!(matches!(result, Err(HttpError::MissingCurrency(code)) if code == "GBP"));
}

#[tokio::test]
async fn test_lookup_end_to_end() {
    let server = MockServer::start().await;
    mount_price(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/btc/main/addrs/{}", ADDRESS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body()))
        .mount(&server)
        .await;
    let tracker = WalletTracker::new(api_client(&server, None), price_client(&server, "USD"), "USD", 20);

    let report = tracker.lookup(ADDRESS).await.unwrap();

    let txs = &report.transactions.transactions;
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].tx_hash, "aaaa");
    assert_eq!(txs[0].amount, 900);
    assert_eq!(txs[0].direction, TxDirection::Received);
    assert_eq!(txs[1].tx_hash, "bbbb");
    assert_eq!(txs[1].direction, TxDirection::Sent);
    assert_eq!(report.balance_fiat, "0.40 USD");
    assert_eq!(report.last_transaction.as_deref(), Some("2024-01-02 00:00:00 UTC"));
}

#[tokio::test]
async fn test_lookup_fails_when_api_rejects_address() {
    let server = MockServer::start().await;
    mount_price(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/btc/main/addrs/1nope"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    let tracker = WalletTracker::new(api_client(&server, None), price_client(&server, "USD"), "USD", 20);

    let result = tracker.lookup("1nope").await;

    assert!(matches!(result, Err(LookupError::Address(HttpError::ServerError { .. }))));
}
