//! Integration tests for the endpoint modules.
//!
//! These tests verify paths, verbs, payload shapes and result mapping of
//! each area against a mock server.

mod common;

use std::io::Write;
use std::sync::Arc;

use common::{create_client, log_in, truncated_body_server, RecordingPlatform};
use mini_shop_api::resources::{
    AddressInput, ApiError, CartItemInput, OrderListParams, OrderStatus, ProductListParams,
    ProfileUpdate, Recharge,
};
use mini_shop_api::{LoginError, UploadError, UserId};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "ok", "data": data}))
}

// ============================================================================
// Address
// ============================================================================

#[tokio::test]
async fn test_address_create_wraps_payload_in_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/address/create"))
        .and(body_json(json!({
            "data": {
                "recipient_name": "Li Lei",
                "recipient_phone": "13800000000",
                "province": "Zhejiang",
                "city": "Hangzhou",
                "district": "Xihu",
                "detail": "1 Lake Road",
                "is_default": true
            }
        })))
        .respond_with(ok(json!({"address_id": 11})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let created = client
        .addresses()
        .create(&AddressInput {
            recipient_name: "Li Lei".into(),
            recipient_phone: "13800000000".into(),
            province: "Zhejiang".into(),
            city: "Hangzhou".into(),
            district: "Xihu".into(),
            detail: "1 Lake Road".into(),
            is_default: Some(true),
        })
        .await
        .unwrap();

    assert_eq!(created, json!({"address_id": 11}));
}

#[tokio::test]
async fn test_address_delete_uses_delete_verb() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/address/delete/5"))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    client.addresses().delete(5).await.unwrap();
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_add_reports_business_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .and(body_json(json!({"product_id": 7, "quantity": 2})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 3, "message": "out of stock"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let error = client
        .cart()
        .add(&CartItemInput {
            product_id: 7,
            quantity: Some(2),
            shop_id: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Business { code: 3, ref message } if message == "out of stock"));
}

// ============================================================================
// Order
// ============================================================================

#[tokio::test]
async fn test_order_delete_encodes_order_number_and_defaults_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/order/delete/0"))
        .and(query_param("order_no", "SO 2024/01"))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    client.orders().delete("SO 2024/01", None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("order_no=SO%202024%2F01"));
}

#[tokio::test]
async fn test_order_rebuy_posts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/order/rebuy"))
        .and(query_param("order_no", "SO1"))
        .and(body_json(json!({})))
        .respond_with(ok(json!({"cart_ids": [1, 2]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let data = client.orders().rebuy("SO1").await.unwrap();
    assert_eq!(data["cart_ids"], json!([1, 2]));
}

#[tokio::test]
async fn test_order_list_sends_filters_as_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/order/list"))
        .and(query_param("status", "2"))
        .and(query_param("page", "1"))
        .respond_with(ok(json!({"list": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    client
        .orders()
        .list(&OrderListParams {
            status: Some(OrderStatus::Completed),
            page: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_order_detail_by_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/order/detail"))
        .and(query_param("order_no", "SO9"))
        .respond_with(ok(json!({"order_no": "SO9"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let order = client.orders().detail("SO9").await.unwrap();
    assert_eq!(order["order_no"], "SO9");
}

// ============================================================================
// Inquiry & pay
// ============================================================================

#[tokio::test]
async fn test_inquiry_detail_by_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inquiry/detail"))
        .and(query_param("inquiry_no", "IQ1"))
        .respond_with(ok(json!({"inquiry_no": "IQ1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let inquiry = client.inquiries().detail("IQ1").await.unwrap();
    assert_eq!(inquiry["inquiry_no"], "IQ1");
}

#[tokio::test]
async fn test_pay_recharge_returns_pay_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pay/recharge"))
        .and(body_json(json!({"code": "wx", "amount": 50.0})))
        .respond_with(ok(json!({"pay_params": {"nonce": "n"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let data = client
        .pay()
        .recharge(&Recharge {
            code: "wx".into(),
            amount: 50.0,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(data["pay_params"]["nonce"], "n");
}

// ============================================================================
// Success without data
// ============================================================================

async fn data_less_client(verb: &str, endpoint: &str) -> (MockServer, mini_shop_api::HttpClient) {
    let mock_server = MockServer::start().await;
    Mock::given(method(verb))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");
    (mock_server, client)
}

#[tokio::test]
async fn test_list_without_data_is_malformed() {
    let (_server, client) = data_less_client("GET", "/api/cart/list").await;

    let error = client.cart().list().await.unwrap_err();
    assert!(matches!(error, ApiError::Malformed { .. }));
}

#[tokio::test]
async fn test_detail_without_data_is_malformed() {
    let (_server, client) = data_less_client("GET", "/api/order/detail").await;

    let error = client.orders().detail("SO9").await.unwrap_err();
    assert!(matches!(error, ApiError::Malformed { .. }));
}

#[tokio::test]
async fn test_balance_without_data_is_malformed() {
    let (_server, client) = data_less_client("GET", "/api/user/balance").await;

    let error = client.user().balance().await.unwrap_err();
    assert!(matches!(error, ApiError::Malformed { .. }));
}

#[tokio::test]
async fn test_pay_params_without_data_is_malformed() {
    let (_server, client) = data_less_client("POST", "/api/pay/recharge").await;

    let error = client
        .pay()
        .recharge(&Recharge {
            code: "wx".into(),
            amount: 50.0,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Malformed { .. }));
}

#[tokio::test]
async fn test_write_acknowledgement_accepts_missing_data() {
    let (_server, client) = data_less_client("POST", "/api/cart/add").await;

    let data = client
        .cart()
        .add(&CartItemInput {
            product_id: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(data, serde_json::Value::Null);
}

// ============================================================================
// Product & shop
// ============================================================================

#[tokio::test]
async fn test_product_list_is_anonymous_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .respond_with(ok(json!({
            "categories": [{"id": 100, "name": "Hot"}],
            "products": [{"id": 1}, {"id": 2}],
            "has_more": false,
            "total": 2,
            "page": 1,
            "page_size": 20
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    let page = client
        .products()
        .list(&ProductListParams {
            name: Some(" tea ".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.products.len(), 2);
    assert_eq!(page.total, 2);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("name=tea&page=1&page_size=20"));
}

#[tokio::test]
async fn test_product_list_sends_token_when_logged_in() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .and(header("Authorization", "Bearer token"))
        .respond_with(ok(json!({"products": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let page = client
        .products()
        .list(&ProductListParams::default())
        .await
        .unwrap();
    assert!(page.products.is_empty());
}

#[tokio::test]
async fn test_product_list_without_data_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    let error = client
        .products()
        .list(&ProductListParams::default())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Malformed { .. }));
}

#[tokio::test]
async fn test_product_list_unrecovered_401_is_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product/list"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Login expired"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let error = client
        .products()
        .list(&ProductListParams::default())
        .await
        .unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(error.to_string(), "Login expired");
}

#[tokio::test]
async fn test_shop_list_is_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shop/list"))
        .respond_with(ok(json!([{"id": 1, "name": "Main"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let shops = client.shops().list().await.unwrap();
    assert_eq!(shops[0]["name"], "Main");
}

// ============================================================================
// User
// ============================================================================

#[tokio::test]
async fn test_login_establishes_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"code": "wx-code"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Token", "new-token")
                .set_body_json(json!({"code": 0, "data": {"user_id": "u-9"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    let identity = client.user().login("wx-code").await.unwrap();

    assert_eq!(identity.id, UserId::Text("u-9".to_string()));
    assert_eq!(identity.nickname, "WeChat user");
    let snapshot = client.session().snapshot();
    assert_eq!(snapshot.token.as_deref(), Some("new-token"));
    assert!(snapshot.has_logged_in);
}

#[tokio::test]
async fn test_login_without_token_header_stores_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": {"user_id": 1}})),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    let error = client.user().login("wx-code").await.unwrap_err();

    assert!(matches!(error, ApiError::Login(LoginError::MissingToken)));
    assert!(client.session().identity().is_none());
    assert!(!client.session().has_logged_in());
}

#[tokio::test]
async fn test_update_info_posts_changed_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/update"))
        .and(body_json(json!({"nickname": "Ann"})))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    client
        .user()
        .update_info(&ProfileUpdate {
            nickname: Some("Ann".into()),
            avatar: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_avatar_requires_login() {
    let client = create_client("http://127.0.0.1:9", RecordingPlatform::new());

    let error = client
        .user()
        .upload_avatar("/nonexistent/avatar.png")
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Upload(UploadError::NotLoggedIn)));
}

#[tokio::test]
async fn test_upload_avatar_returns_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/upload-avatar"))
        .and(header("Authorization", "Bearer token"))
        .respond_with(ok(json!("https://cdn.example.com/a.png")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\x89PNG").unwrap();

    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let url = client.user().upload_avatar(file.path()).await.unwrap();
    assert_eq!(url, json!("https://cdn.example.com/a.png"));

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
}

#[tokio::test]
async fn test_upload_response_cut_off_mid_read_is_network_error() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let client = create_client(&truncated_body_server(), RecordingPlatform::new());
    log_in(&client, "token");

    let error = client.user().upload_avatar(file.path()).await.unwrap_err();
    assert!(matches!(error, ApiError::Upload(UploadError::Network(_))));
}

#[tokio::test]
async fn test_upload_rejection_uses_default_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/upload-avatar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 9})))
        .mount(&mock_server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    let client = create_client(&mock_server.uri(), Arc::new(RecordingPlatform::default()));
    log_in(&client, "token");

    let error = client.user().upload_avatar(file.path()).await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::Upload(UploadError::Rejected { code: 9, ref message }) if message == "Upload failed"
    ));
}

#[tokio::test]
async fn test_upload_non_json_response_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/upload-avatar"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    let client = create_client(&mock_server.uri(), RecordingPlatform::new());
    log_in(&client, "token");

    let error = client.user().upload_avatar(file.path()).await.unwrap_err();
    assert!(matches!(error, ApiError::Upload(UploadError::Parse)));
}
