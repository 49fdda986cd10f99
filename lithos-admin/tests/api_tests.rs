//! Integration tests for lithos-admin API endpoints
//!
//! Tests cover:
//! - Login gate (wrong password, missing token, disabled gate)
//! - Product CRUD against SQLite
//! - Enquiry listing and status updates through the backend seam
//! - Site-image upload through the object-store seam

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lithos_admin::auth::{AuthGate, ADMIN_TOKEN_HEADER};
use lithos_admin::storage::ObjectStore;
use lithos_admin::{build_router, AppState};
use lithos_common::enquiry::{EnquiryStatus, EnquirySubmission};
use lithos_common::events::EventBus;
use lithos_common::remote::{EnquiryBackend, StoredEnquiry};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot` method

/// Backend seam fake preloaded with enquiries
struct FakeBackend {
    enquiries: Mutex<Vec<StoredEnquiry>>,
    status_updates: Mutex<Vec<(String, EnquiryStatus)>>,
}

impl FakeBackend {
    fn with_one_enquiry() -> Arc<Self> {
        let submission = EnquirySubmission {
            name: "Asha Patel".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            message: None,
            project_details: "Product: Kota Blue Slab (ID: 7)\nQuantity: 3 SFT".to_string(),
            date: "2026-05-01".to_string(),
            status: EnquiryStatus::New,
        };
        Arc::new(Self {
            enquiries: Mutex::new(vec![StoredEnquiry {
                id: "doc-1".to_string(),
                created_at: chrono::Utc::now(),
                submission,
            }]),
            status_updates: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl EnquiryBackend for FakeBackend {
    async fn create_enquiry(&self, _submission: &EnquirySubmission) -> lithos_common::Result<String> {
        unreachable!("back office never creates enquiries")
    }

    async fn list_enquiries(&self) -> lithos_common::Result<Vec<StoredEnquiry>> {
        Ok(self.enquiries.lock().unwrap().clone())
    }

    async fn update_status(&self, id: &str, status: EnquiryStatus) -> lithos_common::Result<()> {
        if !self.enquiries.lock().unwrap().iter().any(|e| e.id == id) {
            return Err(lithos_common::Error::NotFound(format!("enquiry {id}")));
        }
        self.status_updates
            .lock()
            .unwrap()
            .push((id.to_string(), status));
        Ok(())
    }
}

/// Object-store seam fake returning deterministic URLs
#[derive(Default)]
struct FakeObjectStore {
    puts: Mutex<Vec<(String, usize, String)>>,
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> lithos_common::Result<String> {
        self.puts.lock().unwrap().push((
            object_name.to_string(),
            bytes.len(),
            content_type.to_string(),
        ));
        Ok(format!("https://objects.test/lithos-site/{object_name}"))
    }
}

struct TestApp {
    app: axum::Router,
    backend: Arc<FakeBackend>,
    objects: Arc<FakeObjectStore>,
}

async fn setup(password: &str) -> TestApp {
    let db = lithos_common::db::init::init_test_database()
        .await
        .expect("Should create test database");

    let backend = FakeBackend::with_one_enquiry();
    let objects = Arc::new(FakeObjectStore::default());
    let state = AppState::new(
        db,
        EventBus::new(100),
        backend.clone(),
        objects.clone(),
        Arc::new(AuthGate::new(password)),
    );

    TestApp {
        app: build_router(state),
        backend,
        objects,
    }
}

/// Log in and return the session token
async fn login(app: &axum::Router, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    body["token"].as_str().unwrap().to_string()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(ADMIN_TOKEN_HEADER, token);
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(ADMIN_TOKEN_HEADER, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn product_body(name: &str, unit: &str) -> Value {
    json!({
        "name": name,
        "category": "Slabs",
        "description": "Test product",
        "image_url": "/images/test.jpg",
        "unit": unit,
    })
}

// =============================================================================
// Health & authentication
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let test = setup("granite").await;

    let response = test.app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "lithos-admin");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let test = setup("granite").await;

    let response = test
        .app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "password": "marble" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let test = setup("granite").await;

    let response = test.app.clone().oneshot(get("/api/products", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test
        .app
        .clone()
        .oneshot(get("/api/products", Some("forged-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = login(&test.app, "granite").await;
    let response = test
        .app
        .oneshot(get("/api/products", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_password_disables_the_gate() {
    let test = setup("").await;

    let response = test.app.oneshot(get("/api/products", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Product CRUD
// =============================================================================

#[tokio::test]
async fn test_product_crud_round_trip() {
    let test = setup("granite").await;
    let token = login(&test.app, "granite").await;

    // Create
    let response = test
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            Some(&token),
            product_body("Kota Blue Slab", "SFT"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = extract_json(response.into_body()).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Kota Blue Slab");
    assert_eq!(created["unit"], "SFT");

    // List
    let response = test
        .app
        .clone()
        .oneshot(get("/api/products", Some(&token)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Update
    let response = test
        .app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/products/{id}"),
            Some(&token),
            product_body("Kota Blue Slab (Honed)", "SFT"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = extract_json(response.into_body()).await;
    assert_eq!(updated["name"], "Kota Blue Slab (Honed)");

    // Delete
    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/products/{id}"))
                .header(ADMIN_TOKEN_HEADER, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone now
    let response = test
        .app
        .oneshot(json_request(
            "PUT",
            &format!("/api/products/{id}"),
            Some(&token),
            product_body("Ghost", "SFT"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_with_unknown_unit_is_rejected() {
    let test = setup("").await;

    let response = test
        .app
        .oneshot(json_request(
            "POST",
            "/api/products",
            None,
            product_body("Oddity", "Kilogram"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"]["message"].as_str().unwrap().starts_with("unit:"));
}

// =============================================================================
// Enquiry tracking
// =============================================================================

#[tokio::test]
async fn test_enquiry_listing_serializes_documents() {
    let test = setup("").await;

    let response = test.app.oneshot(get("/api/enquiries", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let enquiries = body.as_array().unwrap();
    assert_eq!(enquiries.len(), 1);
    assert_eq!(enquiries[0]["id"], "doc-1");
    assert_eq!(enquiries[0]["name"], "Asha Patel");
    assert_eq!(enquiries[0]["status"], "New");
    assert!(enquiries[0]["projectDetails"]
        .as_str()
        .unwrap()
        .contains("(ID: 7)"));
    assert!(enquiries[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_enquiry_status_update() {
    let test = setup("").await;

    let response = test
        .app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/enquiries/doc-1/status",
            None,
            json!({ "status": "QuoteSent" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updates = test.backend.status_updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0], ("doc-1".to_string(), EnquiryStatus::QuoteSent));
}

#[tokio::test]
async fn test_enquiry_status_update_for_unknown_document_is_404() {
    let test = setup("").await;

    let response = test
        .app
        .oneshot(json_request(
            "PUT",
            "/api/enquiries/no-such-doc/status",
            None,
            json!({ "status": "Contacted" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Site images
// =============================================================================

#[tokio::test]
async fn test_image_upload_records_url() {
    let test = setup("").await;

    let content = BASE64.encode(b"fake image bytes");
    let response = test
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/images",
            None,
            json!({
                "section": "hero",
                "file_name": "banner.jpg",
                "content_base64": content,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["section"], "hero");
    assert_eq!(
        body["url"],
        "https://objects.test/lithos-site/site/hero/banner.jpg"
    );

    // The object store saw the decoded bytes with the right content type
    let puts = test.objects.puts.lock().unwrap();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].0, "site/hero/banner.jpg");
    assert_eq!(puts[0].1, b"fake image bytes".len());
    assert_eq!(puts[0].2, "image/jpeg");
    drop(puts);

    // And the record is listed
    let response = test.app.oneshot(get("/api/images", None)).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_image_upload_rejects_bad_payloads() {
    let test = setup("").await;

    // Invalid base64
    let response = test
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/images",
            None,
            json!({ "section": "hero", "file_name": "a.jpg", "content_base64": "!!!" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Path traversal in the file name
    let response = test
        .app
        .oneshot(json_request(
            "POST",
            "/api/images",
            None,
            json!({
                "section": "hero",
                "file_name": "../escape.jpg",
                "content_base64": BASE64.encode(b"x"),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
