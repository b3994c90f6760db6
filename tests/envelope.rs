use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roostoo_tx::core::config::ExchangeConfig;
use roostoo_tx::signer::FixedClock;
use roostoo_tx::{
    CancelTarget, Credentials, Error, OrderQuery, OrderRequest, RequestSigner, RoostooClient, Side,
};

const TS: u64 = 1_700_000_000_000;

fn client(server: &MockServer) -> RoostooClient {
    let signer = RequestSigner::with_clock(
        Credentials::new("test_api_key", "test_secret"),
        Arc::new(FixedClock(TS)),
    );
    RoostooClient::with_signer(signer, server.uri()).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn signed_get_sends_timestamp_query_and_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/balance"))
        .and(query_param("timestamp", "1700000000000"))
        .and(header("RST-API-KEY", "test_api_key"))
        .and(header(
            "MSG-SIGNATURE",
            "5e3fa45849fa8fc9a88178c403000f1e8a259dd1587b4dcb183e5379bd953031",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ErrMsg": "",
            "SpotWallet": {"USD": {"Free": 50000, "Lock": 0}},
            "MarginWallet": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let balance = client(&server).balance().await.unwrap();
    assert_eq!(balance.spot_wallet["USD"].free, 50000.0);
}

#[tokio::test]
async fn pending_count_without_orders_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/pending_count"))
        .and(query_param("timestamp", "1700000000000"))
        .and(header("RST-API-KEY", "test_api_key"))
        .and(header(
            "MSG-SIGNATURE",
            "5e3fa45849fa8fc9a88178c403000f1e8a259dd1587b4dcb183e5379bd953031",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": false,
            "ErrMsg": "no pending order under this account",
            "TotalPending": 0,
            "OrderPairs": {}
        })))
        .mount(&server)
        .await;

    let pending = client(&server).pending_count().await.unwrap();
    assert!(!pending.success);
    assert_eq!(pending.total_pending, 0);
}

#[tokio::test]
async fn signed_post_sends_canonical_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/place_order"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header("RST-API-KEY", "test_api_key"))
        .and(header(
            "MSG-SIGNATURE",
            "6a455cd759b5f0c6258482ee7f622f0d1c776b98e522440480600a871251cf89",
        ))
        .and(body_string(
            "pair=DOGE/USD&quantity=7&side=BUY&timestamp=1700000000000&type=MARKET",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ErrMsg": "",
            "OrderDetail": {
                "Pair": "DOGE/USD",
                "OrderID": 81,
                "Status": "FILLED",
                "Role": "TAKER",
                "Side": "BUY",
                "Type": "MARKET",
                "Quantity": 7,
                "FilledQuantity": 7
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = OrderRequest::market("DOGE", Side::Buy, dec("7"));
    let resp = client(&server).place_order(&order).await.unwrap();

    let detail = resp.order_detail.unwrap();
    assert_eq!(detail.order_id, 81);
    assert_eq!(detail.status, "FILLED");
}

#[tokio::test]
async fn limit_order_body_includes_price() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/place_order"))
        .and(header(
            "MSG-SIGNATURE",
            "bdec77930e03993942ba7f648854a3a331d475969676b2de061dc734cb4a8176",
        ))
        .and(body_string(
            "pair=BTC/USD&price=65000.5&quantity=0.01&side=SELL&timestamp=1700000000000&type=LIMIT",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ErrMsg": "",
            "OrderDetail": {"Pair": "BTC/USD", "OrderID": 82, "Status": "PENDING"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = OrderRequest::limit("BTC/USD", Side::Sell, dec("0.01"), dec("65000.5"));
    client(&server).place_order(&order).await.unwrap();
}

#[tokio::test]
async fn query_and_cancel_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/query_order"))
        .and(header(
            "MSG-SIGNATURE",
            "e2a7492dd792ff172ee2f2d046843ecc878e4a42c6d4caf6dd5fa2d37d885cb3",
        ))
        .and(body_string("order_id=42&timestamp=1700000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ErrMsg": "",
            "OrderMatched": [{"Pair": "BTC/USD", "OrderID": 42, "Status": "PENDING"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v3/cancel_order"))
        .and(body_string("order_id=42&timestamp=1700000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ErrMsg": "",
            "CanceledList": [42]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let found = client.query_order(&OrderQuery::Id(42)).await.unwrap();
    assert_eq!(found.order_matched.len(), 1);

    let canceled = client.cancel_order(&CancelTarget::Id(42)).await.unwrap();
    assert_eq!(canceled.canceled_list, vec![42]);
}

#[tokio::test]
async fn query_by_pair_pending_only() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/query_order"))
        .and(header(
            "MSG-SIGNATURE",
            "0f86772014c39a55c485c8026bf00e002798379b220b6ef0d0cb8e49898d1296",
        ))
        .and(body_string("pair=BTC/USD&pending_only=TRUE&timestamp=1700000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ErrMsg": "",
            "OrderMatched": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = OrderQuery::Pair {
        pair: "BTC".into(),
        pending_only: Some(true),
    };
    client(&server).query_order(&query).await.unwrap();
}

#[tokio::test]
async fn exchange_rejection_maps_to_exchange_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/cancel_order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": false,
            "ErrMsg": "no order to cancel"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .cancel_order(&CancelTarget::All)
        .await
        .unwrap_err();
    match err {
        Error::Exchange(msg) => assert_eq!(msg, "no order to cancel"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn http_failure_maps_to_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/balance"))
        .respond_with(ResponseTemplate::new(401).set_body_string("signature mismatch"))
        .mount(&server)
        .await;

    let err = client(&server).balance().await.unwrap_err();
    match err {
        Error::Http { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "signature mismatch");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn invalid_parameter_never_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let order = OrderRequest::market("DOGE&side=SELL", Side::Buy, dec("7"));
    let err = client(&server).place_order(&order).await.unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
    assert!(err.is_signing());
}

#[tokio::test]
async fn public_endpoints_are_unsigned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/serverTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ServerTime": 1700000000123u64})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/ticker"))
        .and(query_param("timestamp", "1700000000000"))
        .and(query_param("pair", "BTC/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "ErrMsg": "",
            "ServerTime": 1700000000123u64,
            "Data": {"BTC/USD": {
                "MaxBid": 65000.0, "MinAsk": 65001.0, "LastPrice": 65000.5,
                "Change": 0.01, "CoinTradeValue": 12.5, "UnitTradeValue": 812500.0
            }}
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(client.server_time().await.unwrap().server_time, 1_700_000_000_123);

    let ticker = client.ticker(Some("BTC")).await.unwrap();
    assert_eq!(ticker.data["BTC/USD"].last_price, 65000.5);

    let received = server.received_requests().await.unwrap();
    assert!(
        received
            .iter()
            .all(|r| !r.headers.contains_key("MSG-SIGNATURE"))
    );
}

#[tokio::test]
async fn public_client_keeps_configured_timeout_and_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/serverTime"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ServerTime": 1700000000123u64}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ExchangeConfig {
        base_url: format!("{}/", server.uri()),
        request_timeout_secs: 1,
        ..Default::default()
    };
    let client = RoostooClient::public_from_config(&config).unwrap();
    assert_eq!(client.base_url(), server.uri());

    match client.server_time().await.unwrap_err() {
        Error::Network(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {:?}", other),
    }
}
