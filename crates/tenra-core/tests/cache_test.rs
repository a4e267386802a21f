#![allow(clippy::unwrap_used)]
// Cache-coherence tests for the Backoffice facade against a mock API.
//
// These pin the resource-service contract: cache-or-fetch, forced
// refetch after mutations, destructive search with empty-query reset,
// and the failure taxonomy (rejection empties, transport keeps stale).

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tenra_core::{
    Backoffice, BackofficeConfig, CategoryProperty, CoreError, EntityId, FetchOptions,
    FetchOutcome, OrderStatus, PropertyType,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn secret(value: &str) -> secrecy::SecretString {
    value.to_string().into()
}

async fn mount_sign_in(server: &MockServer, user: serde_json::Value) {
    let mut data = json!({"accessToken": "tok-test"});
    data.as_object_mut()
        .unwrap()
        .extend(user.as_object().unwrap().clone());

    Mock::given(method("POST"))
        .and(path("/tenant/signin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data})),
        )
        .mount(server)
        .await;
}

async fn setup_with_user(user: serde_json::Value) -> (MockServer, Backoffice, tempfile::TempDir) {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut config = BackofficeConfig::new(Url::parse(&server.uri()).unwrap());
    config.session_file = Some(dir.path().join("session.json"));
    let backoffice = Backoffice::new(config).unwrap();

    mount_sign_in(&server, user).await;
    backoffice.sign_in("0901234567", &secret("pw")).await.unwrap();

    (server, backoffice, dir)
}

async fn setup_admin() -> (MockServer, Backoffice, tempfile::TempDir) {
    setup_with_user(json!({"id": 1, "username": "chi", "role": "admin"})).await
}

fn category_listing(names: &[(i64, &str)]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = names
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name, "properties": []}))
        .collect();
    json!({"success": true, "data": {"data": items}})
}

// ── Cache policy ────────────────────────────────────────────────────

#[tokio::test]
async fn second_fetch_is_served_from_cache() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(category_listing(&[(1, "Shoes")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let first = backoffice.fetch_categories(FetchOptions::default()).await.unwrap();
    let second = backoffice.fetch_categories(FetchOptions::default()).await.unwrap();

    assert_eq!(first, FetchOutcome::Fetched(1));
    assert_eq!(second, FetchOutcome::Cached);

    let snapshot = backoffice.store().categories_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Shoes");
    assert_eq!(snapshot[0].id, EntityId::Int(1));
}

#[tokio::test]
async fn override_cache_always_issues_a_network_call() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(category_listing(&[(1, "Shoes")])),
        )
        .expect(2)
        .mount(&server)
        .await;

    backoffice.fetch_categories(FetchOptions::default()).await.unwrap();
    let outcome = backoffice.fetch_categories(FetchOptions::refresh()).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Fetched(1));
}

#[tokio::test]
async fn rejected_listing_empties_the_collection() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(category_listing(&[(1, "Shoes")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    backoffice.fetch_categories(FetchOptions::default()).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "tenant suspended"
        })))
        .mount(&server)
        .await;

    let outcome = backoffice.fetch_categories(FetchOptions::refresh()).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Rejected);
    assert!(backoffice.store().categories_snapshot().is_empty());
}

#[tokio::test]
async fn http_failure_keeps_the_stale_snapshot() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(category_listing(&[(1, "Shoes")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    backoffice.fetch_categories(FetchOptions::default()).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let outcome = backoffice.fetch_categories(FetchOptions::refresh()).await.unwrap();
    assert_eq!(outcome, FetchOutcome::TransportFailed);

    let snapshot = backoffice.store().categories_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Shoes");
}

// ── Mutation semantics ──────────────────────────────────────────────

#[tokio::test]
async fn successful_create_refetches_the_authoritative_listing() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(category_listing(&[(1, "Shoes")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    backoffice.fetch_categories(FetchOptions::default()).await.unwrap();

    Mock::given(method("POST"))
        .and(path("/category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    // The refetch returns the server's listing including the assigned id.
    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(category_listing(&[(1, "Shoes"), (2, "Toppings")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let properties = [CategoryProperty {
        name: "size".into(),
        property_type: PropertyType::Select,
        options: vec!["S".into(), "M".into()],
    }];
    backoffice.create_category("Toppings", &properties).await.unwrap();

    let snapshot = backoffice.store().categories_snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].name, "Toppings");
    assert_eq!(snapshot[1].id, EntityId::Int(2));
}

#[tokio::test]
async fn failed_mutation_leaves_the_collection_untouched() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/category"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(category_listing(&[(1, "Shoes")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    backoffice.fetch_categories(FetchOptions::default()).await.unwrap();
    let before = backoffice.store().categories_snapshot();

    Mock::given(method("DELETE"))
        .and(path("/category/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "category still has products"
        })))
        .mount(&server)
        .await;

    let err = backoffice.delete_category(&EntityId::Int(1)).await.unwrap_err();
    assert!(matches!(err, CoreError::Rejected { .. }));

    // No refetch happened (the GET mock allows exactly one call) and the
    // snapshot is the very same Arc.
    let after = backoffice.store().categories_snapshot();
    assert!(std::sync::Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn duplicate_property_names_never_reach_the_network() {
    let (server, backoffice, _dir) = setup_admin().await;

    let properties = [
        CategoryProperty {
            name: "size".into(),
            property_type: PropertyType::Text,
            options: Vec::new(),
        },
        CategoryProperty {
            name: "size".into(),
            property_type: PropertyType::Number,
            options: Vec::new(),
        },
    ];
    let err = backoffice.create_category("Toppings", &properties).await.unwrap_err();

    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    let hits: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/category")
        .collect();
    assert!(hits.is_empty());
}

// ── Search semantics ────────────────────────────────────────────────

#[tokio::test]
async fn search_filters_cached_products_and_empty_query_restores() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"results": [
                {"id": 1, "upc": "8900001", "name": "Trà sữa"},
                {"id": 2, "upc": "8900002", "name": "Cà phê"},
            ], "total": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    backoffice.fetch_products(FetchOptions::default()).await.unwrap();

    backoffice.search_products("tr");
    let filtered = backoffice.store().products_snapshot();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Trà sữa");

    // Reset restores the full last fetch, not the filtered subset, and
    // does so without a network call.
    backoffice.search_products("");
    assert_eq!(backoffice.store().products_snapshot().len(), 2);
}

// ── Role-dependent user listing ─────────────────────────────────────

#[tokio::test]
async fn manager_user_listing_hits_the_staffs_endpoint() {
    let (server, backoffice, _dir) = setup_with_user(json!({
        "id": 3,
        "username": "lan",
        "role": "manager",
        "store": {"id": 8, "name": "District 1"},
    }))
    .await;

    Mock::given(method("GET"))
        .and(path("/tenant/staffs/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 4, "username": "an", "role": "staff", "isActive": true},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = backoffice.fetch_users(FetchOptions::default()).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Fetched(1));
    assert!(!backoffice.is_authorized_for_admin());
    assert!(backoffice.is_authorized_for_manager());
}

// ── Store-scoped collections ────────────────────────────────────────

#[tokio::test]
async fn switching_stores_bypasses_the_cache_guard() {
    let (server, backoffice, _dir) = setup_admin().await;

    for store in [1, 2] {
        Mock::given(method("GET"))
            .and(path(format!("/products/{store}/products")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"results": [
                    {"id": store, "inventory": 5,
                     "product": {"id": 10, "upc": "8900001", "name": "Trà sữa"}},
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let first = backoffice
        .fetch_store_products(&EntityId::Int(1), FetchOptions::default())
        .await
        .unwrap();
    // Non-empty cache, but a different store: must refetch.
    let second = backoffice
        .fetch_store_products(&EntityId::Int(2), FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(first, FetchOutcome::Fetched(1));
    assert_eq!(second, FetchOutcome::Fetched(1));
    assert_eq!(
        backoffice.store().store_products_snapshot()[0].store_id,
        EntityId::Int(2)
    );
}

// ── Orders ──────────────────────────────────────────────────────────

#[tokio::test]
async fn advance_order_requests_the_next_status_and_refetches() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/orders/store/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 70, "status": "processing", "paymentStatus": "PENDING"}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    backoffice
        .fetch_orders(&EntityId::Int(8), FetchOptions::default())
        .await
        .unwrap();

    Mock::given(method("PUT"))
        .and(path("/orders/70"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/store/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 70, "status": "shipping"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let moved_to = backoffice.advance_order(&EntityId::Int(70)).await.unwrap();
    assert_eq!(moved_to, OrderStatus::Shipping);
    assert_eq!(
        backoffice.store().orders_snapshot()[0].status,
        OrderStatus::Shipping
    );

    let body: serde_json::Value = serde_json::from_slice(
        &server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .find(|r| r.method.as_str() == "PUT")
            .unwrap()
            .body,
    )
    .unwrap();
    assert_eq!(body, json!({"status": "shipping"}));
}

#[tokio::test]
async fn terminal_orders_cannot_be_advanced() {
    let (server, backoffice, _dir) = setup_admin().await;

    Mock::given(method("GET"))
        .and(path("/orders/store/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 71, "status": "completed"}]
        })))
        .mount(&server)
        .await;
    backoffice
        .fetch_orders(&EntityId::Int(8), FetchOptions::default())
        .await
        .unwrap();

    let err = backoffice.advance_order(&EntityId::Int(71)).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
}

// ── Session persistence ─────────────────────────────────────────────

#[tokio::test]
async fn session_survives_a_process_restart() {
    let (server, backoffice, dir) = setup_admin().await;
    drop(backoffice);

    let mut config = BackofficeConfig::new(Url::parse(&server.uri()).unwrap());
    config.session_file = Some(dir.path().join("session.json"));
    let restarted = Backoffice::new(config).unwrap();

    let session = restarted.restore_session().unwrap().unwrap();
    assert_eq!(session.user.username, "chi");
    assert!(restarted.is_authorized_for_admin());
}

#[tokio::test]
async fn sign_out_clears_the_persisted_session() {
    let (_server, backoffice, dir) = setup_admin().await;

    backoffice.sign_out().unwrap();
    assert!(backoffice.session().is_none());
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn fetches_require_a_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = BackofficeConfig::new(Url::parse(&server.uri()).unwrap());
    config.session_file = Some(dir.path().join("session.json"));
    let backoffice = Backoffice::new(config).unwrap();

    let err = backoffice.fetch_categories(FetchOptions::default()).await.unwrap_err();
    assert!(matches!(err, CoreError::NotSignedIn));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_credentials_fail_as_authentication() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = BackofficeConfig::new(Url::parse(&server.uri()).unwrap());
    config.session_file = Some(dir.path().join("session.json"));
    let backoffice = Backoffice::new(config).unwrap();

    Mock::given(method("POST"))
        .and(path("/tenant/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "phone number or password is incorrect"
        })))
        .mount(&server)
        .await;

    let err = backoffice
        .sign_in("0901234567", &secret("wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert!(backoffice.session().is_none());
}
