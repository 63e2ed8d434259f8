//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! # Accounts
//! POST   /api/register        - Create an admin
//! POST   /api/login           - Check admin credentials
//!
//! # Catalog (mutations require x-admin-id)
//! GET    /api/products        - List products
//! POST   /api/products        - Create product (multipart, image required)
//! PUT    /api/products/{id}   - Update product (multipart, image optional)
//! DELETE /api/products/{id}   - Delete product and its image
//!
//! # Storefront inbox
//! POST   /api/messages        - Contact message
//! GET    /api/reviews         - Reviews, newest first
//! POST   /api/reviews         - Submit review
//! POST   /api/newsletters     - Newsletter signup
//! POST   /api/orders          - Order request
//! ```
//!
//! `/uploads/{filename}` and the health checks are mounted in [`crate::app`].

pub mod auth;
pub mod contact;
pub mod form;
pub mod newsletter;
pub mod orders;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Serialize;

use crate::state::AppState;

/// Body of every successful mutation: `{"success": true}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Create the `/api` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::delete),
        )
        .route("/messages", post(contact::create))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/newsletters", post(newsletter::subscribe))
        .route("/orders", post(orders::create))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use sqlx::postgres::PgPoolOptions;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::{ApiConfig, AssetConfig, LogFormat};
    use crate::db::memory::{MemoryAdminStore, MemoryProductStore};
    use crate::middleware::ADMIN_ID_HEADER;
    use crate::state::AppState;

    const BOUNDARY: &str = "shop-test-boundary";

    /// One multipart part: field name, optional filename, content.
    type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

    struct TestApp {
        dir: TempDir,
        router: Router,
    }

    impl TestApp {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = ApiConfig {
                database_url: SecretString::from("postgres://localhost/shop_test".to_string()),
                host: [127, 0, 0, 1].into(),
                port: 0,
                assets: AssetConfig {
                    dir: dir.path().to_path_buf(),
                    max_bytes: 1024,
                },
                cors_origins: Vec::new(),
                log_format: LogFormat::Text,
                sentry_dsn: None,
                sentry_environment: None,
                sentry_sample_rate: 1.0,
                sentry_traces_sample_rate: 0.0,
            };
            // Never connected: products and admins are served from memory.
            let pool = PgPoolOptions::new()
                .connect_lazy("postgres://localhost/shop_test")
                .unwrap();
            let state = AppState::with_stores(
                config,
                pool,
                Arc::new(MemoryAdminStore::with_ids(&[7])),
                Arc::new(MemoryProductStore::new()),
            );
            Self {
                dir,
                router: crate::app(state),
            }
        }

        fn uploads(&self) -> &Path {
            self.dir.path()
        }

        fn stored_files(&self) -> usize {
            std::fs::read_dir(self.uploads()).unwrap().count()
        }

        async fn send(&self, request: Request<Body>) -> Response {
            self.router.clone().oneshot(request).await.unwrap()
        }

        async fn get(&self, uri: &str) -> Response {
            self.send(Request::get(uri).body(Body::empty()).unwrap())
                .await
        }
    }

    fn text<'a>(name: &'a str, value: &'a str) -> Part<'a> {
        (name, None, value.as_bytes())
    }

    fn file<'a>(name: &'a str, filename: &'a str, bytes: &'a [u8]) -> Part<'a> {
        (name, Some(filename), bytes)
    }

    fn shirt_parts<'a>(image: Option<(&'a str, &'a [u8])>) -> Vec<Part<'a>> {
        let mut parts = vec![
            text("name", "Shirt"),
            text("price", "10"),
            text("discount", "0"),
        ];
        if let Some((filename, bytes)) = image {
            parts.push(file("image", filename, bytes));
        }
        parts
    }

    fn multipart(parts: &[Part<'_>]) -> Body {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match filename {
                Some(f) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn product_request(
        method: Method,
        uri: &str,
        admin: Option<&str>,
        parts: &[Part<'_>],
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(admin) = admin {
            builder = builder.header(ADMIN_ID_HEADER, admin);
        }
        builder.body(multipart(parts)).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn is_generated(name: &str, suffix: &str) -> bool {
        name.strip_suffix(suffix)
            .and_then(|p| p.strip_suffix('-'))
            .is_some_and(|m| !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit()))
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let response = app.get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_create_without_admin_header_is_forbidden() {
        let app = TestApp::new();
        let parts = shirt_parts(Some(("a.png", b"png".as_slice())));

        let response = app
            .send(product_request(Method::POST, "/api/products", None, &parts))
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "admin credential is missing");
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_create_with_unknown_admin_is_forbidden() {
        let app = TestApp::new();
        let parts = shirt_parts(Some(("a.png", b"png".as_slice())));

        for admin in ["8", "not-a-number"] {
            let response = app
                .send(product_request(Method::POST, "/api/products", Some(admin), &parts))
                .await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            assert_eq!(body_json(response).await["error"], "not authorized as admin");
        }
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_create_without_image_is_bad_request() {
        let app = TestApp::new();
        let parts = shirt_parts(None);

        let response = app
            .send(product_request(Method::POST, "/api/products", Some("7"), &parts))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "an image file is required");
        assert_eq!(app.stored_files(), 0);
        assert_eq!(body_json(app.get("/api/products").await).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_with_oversized_image_is_bad_request() {
        let app = TestApp::new();
        let big = vec![0_u8; 2048];
        let parts = shirt_parts(Some(("big.png", big.as_slice())));

        let response = app
            .send(product_request(Method::POST, "/api/products", Some("7"), &parts))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_invalid_price_is_bad_request() {
        let app = TestApp::new();
        let parts = vec![
            text("name", "Shirt"),
            text("price", "ten"),
            text("discount", "0"),
            file("image", "a.png", b"png"),
        ];

        let response = app
            .send(product_request(Method::POST, "/api/products", Some("7"), &parts))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_shirt_lifecycle_over_http() {
        let app = TestApp::new();
        let parts = shirt_parts(Some(("a.png", b"png-bytes".as_slice())));

        let response = app
            .send(product_request(Method::POST, "/api/products", Some("7"), &parts))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));

        let listed = body_json(app.get("/api/products").await).await;
        let product = &listed[0];
        assert_eq!(product["name"], "Shirt");
        let image = product["image"].as_str().unwrap().to_string();
        assert!(is_generated(&image, "a.png"), "{image}");
        let id = product["product_id"].as_i64().unwrap();

        let served = app.get(&format!("/uploads/{image}")).await;
        assert_eq!(served.status(), StatusCode::OK);
        let bytes = to_bytes(served.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"png-bytes");

        let response = app
            .send(product_request(
                Method::DELETE,
                &format!("/api/products/{id}"),
                Some("7"),
                &[],
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));

        assert_eq!(body_json(app.get("/api/products").await).await, json!([]));
        assert!(!app.uploads().join(&image).exists());
        assert_eq!(
            app.get(&format!("/uploads/{image}")).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_update_keeps_image_without_file() {
        let app = TestApp::new();
        let parts = shirt_parts(Some(("a.png", b"png".as_slice())));
        let created = app
            .send(product_request(Method::POST, "/api/products", Some("7"), &parts))
            .await;
        assert_eq!(created.status(), StatusCode::OK);
        let before = body_json(app.get("/api/products").await).await;
        let id = before[0]["product_id"].as_i64().unwrap();

        let update = vec![
            text("name", "Tee"),
            text("price", "12.50"),
            text("discount", "1"),
        ];
        let response = app
            .send(product_request(
                Method::PUT,
                &format!("/api/products/{id}"),
                Some("7"),
                &update,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let after = body_json(app.get("/api/products").await).await;
        assert_eq!(after[0]["name"], "Tee");
        assert_eq!(after[0]["price"], "12.50");
        assert_eq!(after[0]["image"], before[0]["image"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_succeeds() {
        let app = TestApp::new();
        let parts = shirt_parts(Some(("a.png", b"png".as_slice())));

        let response = app
            .send(product_request(Method::PUT, "/api/products/99", Some("7"), &parts))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(app.get("/api/products").await).await, json!([]));
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let app = TestApp::new();

        let response = app
            .send(product_request(Method::DELETE, "/api/products/99", Some("7"), &[]))
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "product 99 not found");
    }

    #[tokio::test]
    async fn test_delete_checks_admin_before_id() {
        let app = TestApp::new();

        let response = app
            .send(product_request(Method::DELETE, "/api/products/abc", None, &[]))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .send(product_request(Method::DELETE, "/api/products/abc", Some("7"), &[]))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unparseable_id_is_not_found() {
        let app = TestApp::new();

        for id in ["abc", "99999999999"] {
            let response = app
                .send(product_request(
                    Method::DELETE,
                    &format!("/api/products/{id}"),
                    Some("7"),
                    &[],
                ))
                .await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{id}");
            assert_eq!(
                body_json(response).await["error"],
                format!("product {id} not found")
            );
        }
    }

    #[tokio::test]
    async fn test_update_unparseable_id_is_a_no_op() {
        let app = TestApp::new();
        let parts = shirt_parts(Some(("a.png", b"png".as_slice())));

        for id in ["abc", "99999999999"] {
            let response = app
                .send(product_request(
                    Method::PUT,
                    &format!("/api/products/{id}"),
                    Some("7"),
                    &parts,
                ))
                .await;
            assert_eq!(response.status(), StatusCode::OK, "{id}");
            assert_eq!(body_json(response).await, json!({"success": true}));
        }
        assert_eq!(app.stored_files(), 0);
        assert_eq!(body_json(app.get("/api/products").await).await, json!([]));
    }

    #[tokio::test]
    async fn test_update_stores_image_text_verbatim() {
        let app = TestApp::new();
        let parts = shirt_parts(Some(("a.png", b"png".as_slice())));
        let created = app
            .send(product_request(Method::POST, "/api/products", Some("7"), &parts))
            .await;
        assert_eq!(created.status(), StatusCode::OK);
        let listed = body_json(app.get("/api/products").await).await;
        let id = listed[0]["product_id"].as_i64().unwrap();

        let update = vec![
            text("name", "Shirt"),
            text("price", "10"),
            text("discount", "0"),
            text("image", " legacy shirt.png "),
        ];
        let response = app
            .send(product_request(
                Method::PUT,
                &format!("/api/products/{id}"),
                Some("7"),
                &update,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let after = body_json(app.get("/api/products").await).await;
        assert_eq!(after[0]["image"], " legacy shirt.png ");
    }

    #[tokio::test]
    async fn test_create_rejects_non_multipart_body() {
        let app = TestApp::new();
        let request = Request::post("/api/products")
            .header(ADMIN_ID_HEADER, "7")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Shirt","price":"10","discount":"0"}"#))
            .unwrap();

        let response = app.send(request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_review_is_validated_before_storage() {
        let app = TestApp::new();
        let request = Request::post("/api/reviews")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Ana","stars":9,"review":"Great"}"#))
            .unwrap();

        let response = app.send(request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "invalid stars: stars must be between 1 and 5"
        );
    }
}
