#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tenra_api::types::{CreateCategoryRequest, Id, UpdateUserRequest};
use tenra_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

async fn setup_signed_in() -> (MockServer, ApiClient) {
    let (server, client) = setup().await;
    client.set_token("test-token".to_string().into());
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_sign_in_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/tenant/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "accessToken": "tok-abc",
                "id": 1,
                "username": "chi",
                "role": "admin",
            }
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let data = client.sign_in("0901234567", &secret).await.unwrap();

    assert_eq!(data.access_token, "tok-abc");
    assert_eq!(data.user.role, "admin");
}

#[tokio::test]
async fn test_sign_in_rejected_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/tenant/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "phone number or password is incorrect"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.sign_in("0901234567", &secret).await;

    assert!(
        matches!(result, Err(Error::Rejected { .. })),
        "expected Rejected error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_calls_without_token_fail_locally() {
    let (server, client) = setup().await;

    // No mock mounted: the call must fail before any request is sent.
    let result = client.list_categories().await;
    assert!(matches!(result, Err(Error::NotSignedIn)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unauthorized_status_maps_to_authentication_error() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_categories().await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

// ── Envelope and payload shape tests ────────────────────────────────

#[tokio::test]
async fn test_list_categories_nested_payload_shape() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "data": [
                {"id": 1, "name": "Tea", "properties": [
                    {"name": "size", "type": "select", "options": ["S", "M", "L"]}
                ]},
                {"id": 2, "name": "Coffee"}
            ]}
        })))
        .mount(&server)
        .await;

    let page = client.list_categories().await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Tea");
    assert_eq!(page.items[0].properties[0].options.as_deref().unwrap().len(), 3);
    assert!(page.items[1].properties.is_empty());
}

#[tokio::test]
async fn test_list_products_paged_payload_shape() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "results": [
                    {"id": 10, "upc": "8900001", "name": "Trà sữa",
                     "price": {"price": 45000, "displayPrice": "45.000đ"}},
                ],
                "total": 1
            }
        })))
        .mount(&server)
        .await;

    let page = client.list_products(1, 200).await.unwrap();

    assert_eq!(page.total, Some(1));
    assert_eq!(page.items[0].upc, "8900001");
    assert_eq!(
        page.items[0].price.as_ref().unwrap().display_price.as_deref(),
        Some("45.000đ")
    );
}

#[tokio::test]
async fn test_list_users_bare_payload_shape() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("GET"))
        .and(path("/tenant/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 1, "username": "an", "role": "staff", "isActive": true,
                 "store": {"id": 8, "name": "District 1"}},
            ],
            "_totalPage": 1
        })))
        .mount(&server)
        .await;

    let page = client.list_tenant_users().await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].store.as_ref().unwrap().id, Id::Int(8));
}

// ── Mutation tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_category_sends_camel_case_body() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("POST"))
        .and(path("/category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateCategoryRequest {
        name: "Toppings".into(),
        properties: vec![],
    };
    client.create_category(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"name": "Toppings", "properties": []}));
}

#[tokio::test]
async fn test_rejected_mutation_surfaces_server_message() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("DELETE"))
        .and(path("/category/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "category still has products"
        })))
        .mount(&server)
        .await;

    let err = client.delete_category(&Id::Int(3)).await.unwrap_err();
    assert!(err.is_rejected());
    assert!(err.to_string().contains("category still has products"));
}

#[tokio::test]
async fn test_update_user_hits_per_id_path() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("PUT"))
        .and(path("/tenant/users/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateUserRequest {
        is_active: Some(false),
        store: Some(Id::Int(8)),
        ..UpdateUserRequest::default()
    };
    client.update_user(&Id::Int(12), &request).await.unwrap();
}

#[tokio::test]
async fn test_server_error_status_is_not_a_rejection() {
    let (server, client) = setup_signed_in().await;

    Mock::given(method("GET"))
        .and(path("/store"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client.list_stores(1, 30).await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 502, .. }));
    assert!(!err.is_rejected());
}
