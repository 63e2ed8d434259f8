//! Storefront inbox tests against a running server.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use shop_integration_tests::{api_base_url, unique_email};

#[tokio::test]
#[ignore = "Requires running shop-api and database"]
async fn test_review_appears_first() {
    let client = Client::new();
    let base_url = api_base_url();
    let text = format!("Great fit {}", uuid::Uuid::new_v4().simple());

    let resp = client
        .post(format!("{base_url}/api/reviews"))
        .json(&json!({"name": "Ana", "stars": 5, "review": &text}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let reviews: Vec<Value> = client
        .get(format!("{base_url}/api/reviews"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reviews.iter().any(|r| r["review"] == text.as_str()));
}

#[tokio::test]
#[ignore = "Requires running shop-api and database"]
async fn test_review_rejects_bad_stars() {
    let resp = Client::new()
        .post(format!("{}/api/reviews", api_base_url()))
        .form(&[("name", "Ana"), ("stars", "0"), ("review", "Hmm")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running shop-api and database"]
async fn test_contact_and_newsletter() {
    let client = Client::new();
    let base_url = api_base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/api/messages"))
        .form(&[
            ("name", "Ana"),
            ("email", email.as_str()),
            ("message", "Do you ship abroad?"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/api/newsletters"))
        .form(&[("email", email.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running shop-api and database"]
async fn test_order_rejects_zero_quantity() {
    let resp = Client::new()
        .post(format!("{}/api/orders", api_base_url()))
        .form(&[("product_id", "1"), ("quantity", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
