//! End-to-end HTTP tests: a real listener, a real database, reqwest on the
//! client side.

use cf_crypto::{FieldCipher, MasterKey};
use cf_server::auth::TokenVerifier;
use cf_server::http::{router, AppState};
use cf_server::service::ContactService;
use cf_store::Store;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    verifier: TokenVerifier,
    _dir: tempfile::TempDir,
}

async fn spawn_server() -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(&dir.path().join("contacts.db"))
        .await
        .expect("open store");
    let verifier = TokenVerifier::new(b"http-test-secret".to_vec());
    let state = AppState {
        service: ContactService::new(store, FieldCipher::new(MasterKey([5u8; 32]))),
        verifier: verifier.clone(),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.expect("serve");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        verifier,
        _dir: dir,
    }
}

fn ann_body() -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "phone": "5551234567",
        "email": "a@x.com",
        "address": "1 Main St"
    })
}

#[tokio::test]
async fn health_needs_no_auth() {
    let server = spawn_server().await;
    let resp = reqwest::get(format!("{}/healthz", server.base_url))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn missing_and_bad_tokens_are_unauthorized() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/contacts", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");

    let resp = client
        .get(format!("{}/contacts", server.base_url))
        .bearer_auth("cf1.bogus.deadbeef")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn crud_flow_with_ownership_isolation() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let u1 = server.verifier.mint("u1");
    let u2 = server.verifier.mint("u2");

    // Create.
    let resp = client
        .post(format!("{}/contacts", server.base_url))
        .bearer_auth(&u1)
        .json(&ann_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["firstName"], "Ann");
    assert!(created["avatarColor"].as_str().unwrap().starts_with('#'));

    // Read back.
    let resp = client
        .get(format!("{}/contacts/{id}", server.base_url))
        .bearer_auth(&u1)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched["email"], "a@x.com");

    // Foreign owner: merged 404, for read and write alike.
    for resp in [
        client
            .get(format!("{}/contacts/{id}", server.base_url))
            .bearer_auth(&u2)
            .send()
            .await
            .unwrap(),
        client
            .delete(format!("{}/contacts/{id}", server.base_url))
            .bearer_auth(&u2)
            .send()
            .await
            .unwrap(),
    ] {
        assert_eq!(resp.status(), 404);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Not found or unauthorized");
    }

    // Full-replacement update.
    let mut updated_body = ann_body();
    updated_body["firstName"] = json!("Anne");
    updated_body["company"] = json!("MongoDB");
    let resp = client
        .put(format!("{}/contacts/{id}", server.base_url))
        .bearer_auth(&u1)
        .json(&updated_body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["firstName"], "Anne");
    assert_eq!(updated["company"], "MongoDB");

    // List for the owner.
    let resp = client
        .get(format!("{}/contacts", server.base_url))
        .bearer_auth(&u1)
        .send()
        .await
        .unwrap();
    let listed: Value = resp.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Delete, then the record is gone.
    let resp = client
        .delete(format!("{}/contacts/{id}", server.base_url))
        .bearer_auth(&u1)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let resp = client
        .get(format!("{}/contacts/{id}", server.base_url))
        .bearer_auth(&u1)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn create_validation_maps_to_400() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let token = server.verifier.mint("u1");

    let mut body = ann_body();
    body["firstName"] = json!("");
    let resp = client
        .post(format!("{}/contacts", server.base_url))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "firstName is required");
}

#[tokio::test]
async fn list_supports_search_query() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let token = server.verifier.mint("u1");

    for (first, phone) in [("Ann", "5551234567"), ("Bea", "(555) 987-6543")] {
        let mut body = ann_body();
        body["firstName"] = json!(first);
        body["phone"] = json!(phone);
        let resp = client
            .post(format!("{}/contacts", server.base_url))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = client
        .get(format!("{}/contacts?q=5559876543", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let hits: Value = resp.json().await.unwrap();
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["firstName"], "Bea");
}
