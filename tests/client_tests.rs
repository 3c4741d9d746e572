//! Integration tests for the purchase → authorize → approve flow against a
//! local mock gateway.

use std::time::Duration;

use mockito::{Matcher, ServerGuard};
use serde_json::json;
use tosspay::{
    ApiResult, Config, Environment, PayStatus, PurchaseRequest, TossPayClient, TossPayError,
};
use uuid::Uuid;

/// Client pointed at the mock gateway, sandbox credentials.
fn test_client(server: &ServerGuard) -> TossPayClient {
    let config = Config::builder()
        .environment(Environment::Development)
        .base_url(server.url())
        .build()
        .expect("config should build");
    TossPayClient::with_config(config)
}

fn order_no() -> String {
    Uuid::new_v4().to_string()
}

#[test]
fn purchase_rejects_order_no_with_ampersand() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/payments").expect(0).create();
    let client = test_client(&server);

    let request = PurchaseRequest::new(format!("{}&", order_no()), 40000, "test");
    let result = client.purchase(&request);

    assert!(matches!(result, Err(TossPayError::InvalidOrderNo(_))));
    // Rejected before any network call
    mock.assert();
}

#[test]
fn purchase_rejects_expiry_over_one_hour() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/payments").expect(0).create();
    let client = test_client(&server);

    let request = PurchaseRequest::new(order_no(), 40000, "test")
        .expired_time(Duration::from_secs(61 * 60));
    let result = client.purchase(&request);

    assert!(matches!(
        result,
        Err(TossPayError::ExpiredTimeTooLong { .. })
    ));
    mock.assert();
}

#[test]
fn purchase_rejects_auto_execute_without_callback() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/payments").expect(0).create();
    let client = test_client(&server);

    let request = PurchaseRequest::new(order_no(), 40000, "test").auto_execute(true);
    let result = client.purchase(&request);

    assert!(matches!(result, Err(TossPayError::NotAutoExecutable)));
    mock.assert();
}

#[test]
fn purchase_returns_checkout_and_payment() {
    let mut server = mockito::Server::new();
    let order = order_no();

    let create = server
        .mock("POST", "/payments")
        .match_body(Matcher::PartialJson(json!({
            "orderNo": order,
            "amount": 40000,
            "productDesc": "test",
        })))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 0,
                "payToken": "N4GOTJB5eR3Tnx8kJeVp90",
                "checkoutPage": "https://pay.toss.im/payfront/web/a1b2c3"
            })
            .to_string(),
        )
        .create();

    let status = server
        .mock("POST", "/status")
        .match_body(Matcher::PartialJson(json!({
            "payToken": "N4GOTJB5eR3Tnx8kJeVp90",
        })))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 0,
                "payToken": "N4GOTJB5eR3Tnx8kJeVp90",
                "orderNo": order,
                "payStatus": "PAY_STANDBY",
                "amount": 40000,
                "amountTaxFree": 0,
                "productDesc": "test",
                "createdTs": "2016-11-16 13:30:00"
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let request = PurchaseRequest::new(order.clone(), 40000, "test");
    let result = client
        .purchase(&request)
        .expect("call should succeed")
        .success()
        .expect("gateway should accept");

    assert_eq!(result.pay_token, "N4GOTJB5eR3Tnx8kJeVp90");
    assert_eq!(
        result.purchase_url,
        "https://pay.toss.im/payfront/web/a1b2c3"
    );
    assert_eq!(result.payment.amount, 40000);
    assert_eq!(result.payment.product_desc, "test");
    assert_eq!(result.payment.pay_status, PayStatus::PayStandby);
    assert_eq!(result.payment.order_no.as_deref(), Some(order.as_str()));

    create.assert();
    status.assert();
}

#[test]
fn purchase_sends_auto_execute_and_callback() {
    let mut server = mockito::Server::new();

    let create = server
        .mock("POST", "/payments")
        .match_body(Matcher::PartialJson(json!({
            "autoExecute": true,
            "resultCallback": "https://merchant.example/callback",
        })))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 0,
                "payToken": "tok-auto",
                "checkoutPage": "https://pay.toss.im/payfront/web/d4e5f6"
            })
            .to_string(),
        )
        .create();

    let status = server
        .mock("POST", "/status")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 0,
                "payToken": "tok-auto",
                "payStatus": "PAY_STANDBY",
                "amount": 40000,
                "productDesc": "test"
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let request = PurchaseRequest::new(order_no(), 40000, "test")
        .auto_execute(true)
        .result_callback("https://merchant.example/callback");

    let result = client
        .purchase(&request)
        .expect("call should succeed")
        .success()
        .expect("gateway should accept");
    assert!(!result.pay_token.is_empty());
    assert!(!result.purchase_url.is_empty());

    create.assert();
    status.assert();
}

#[test]
fn purchase_of_zero_amount_is_rejected_by_gateway() {
    let mut server = mockito::Server::new();

    server
        .mock("POST", "/payments")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": 200,
                "code": -1,
                "errorCode": "COMMON_INVALID_PARAMETER",
                "msg": "요청한 값이 부족하거나 올바르지 않습니다. amount는 0보다 커야 합니다."
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let request = PurchaseRequest::new(order_no(), 0, "test");

    let err = client
        .purchase(&request)
        .expect("call should succeed")
        .failure()
        .expect("gateway should reject");

    assert_eq!(err.status, Some(200));
    assert_eq!(err.code, -1);
    assert_eq!(err.error_code.as_deref(), Some("COMMON_INVALID_PARAMETER"));
    assert_eq!(
        err.msg,
        "요청한 값이 부족하거나 올바르지 않습니다. amount는 0보다 커야 합니다."
    );
    assert_eq!(err.data["errorCode"], "COMMON_INVALID_PARAMETER");
}

#[test]
fn get_payment_returns_snapshot() {
    let mut server = mockito::Server::new();

    let status = server
        .mock("POST", "/status")
        .match_body(Matcher::PartialJson(json!({
            "payToken": "N4GOTJB5eR3Tnx8kJeVp90",
        })))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 0,
                "payToken": "N4GOTJB5eR3Tnx8kJeVp90",
                "payStatus": "PAY_COMPLETE",
                "payMethod": "CARD",
                "amount": 40000,
                "productDesc": "test",
                "paidTs": "2016-11-16 13:59:59"
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let payment = client
        .get_payment("N4GOTJB5eR3Tnx8kJeVp90")
        .expect("call should succeed")
        .success()
        .expect("gateway should accept");

    assert_eq!(payment.pay_token, "N4GOTJB5eR3Tnx8kJeVp90");
    assert_eq!(payment.pay_status, PayStatus::PayComplete);
    assert_eq!(payment.pay_method.as_deref(), Some("CARD"));
    assert!(payment.paid_ts.is_some());

    status.assert();
}

#[test]
fn approve_without_user_session_is_rejected() {
    let mut server = mockito::Server::new();

    server
        .mock("POST", "/execute")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": 200,
                "code": -1,
                "msg": "사용자 정보가 존재하지 않습니다."
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let err = client
        .approve("N4GOTJB5eR3Tnx8kJeVp90")
        .expect("call should succeed")
        .failure()
        .expect("gateway should reject");

    assert_eq!(err.msg, "사용자 정보가 존재하지 않습니다.");
    assert_eq!(err.code, -1);
}

#[test]
fn approve_returns_approval_time() {
    let mut server = mockito::Server::new();

    let execute = server
        .mock("POST", "/execute")
        .match_body(Matcher::PartialJson(json!({
            "payToken": "N4GOTJB5eR3Tnx8kJeVp90",
        })))
        .with_header("content-type", "application/json")
        .with_body(json!({"code": 0, "approvalTime": "2016-11-16 13:59:59"}).to_string())
        .create();

    let client = test_client(&server);
    let approved = client
        .approve("N4GOTJB5eR3Tnx8kJeVp90")
        .expect("call should succeed")
        .success()
        .expect("gateway should accept");

    assert_eq!(
        approved.approval_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        "2016-11-16 13:59:59"
    );

    execute.assert();
}

#[test]
fn gateway_returning_html_is_a_parse_error() {
    let mut server = mockito::Server::new();

    server
        .mock("POST", "/status")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create();

    let client = test_client(&server);
    let result = client.get_payment("tok");

    assert!(matches!(result, Err(TossPayError::Json(_))));
}
