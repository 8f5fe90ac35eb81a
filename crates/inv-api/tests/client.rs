//! HTTP behaviour of `InvenTreeClient` against a mock server.

use inv_api::{ApiError, InvenTreeClient, InventoryApi, list_entities};
use inv_config::ApiConfig;
use inv_core::EntityKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        url: format!("{}/api", server.uri()),
        site_url: server.uri(),
        token: "secret-token".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn configured_token_is_sent_on_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/part/category/"))
        .and(header("Authorization", "Token secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"pk": 1, "name": "Passive", "parent": null},
            {"pk": 2, "name": "Resistor", "parent": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = InvenTreeClient::connect(&config(&server)).await.unwrap();
    let categories = list_entities(&client, EntityKind::PartCategory, &[])
        .await
        .unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1]["name"], "Resistor");
}

#[tokio::test]
async fn credentials_are_exchanged_for_a_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/token/"))
        .and(header("Authorization", "Basic YWRtaW46cHc="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "issued"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/part/"))
        .and(header("Authorization", "Token issued"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig {
        token: String::new(),
        username: "admin".into(),
        password: "pw".into(),
        ..config(&server)
    };
    let client = InvenTreeClient::connect(&config).await.unwrap();
    let parts = client.get("part/", &[]).await.unwrap();
    assert_eq!(parts, json!([]));
}

#[tokio::test]
async fn rejected_credentials_are_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid username/password."))
        .mount(&server)
        .await;

    let config = ApiConfig {
        token: String::new(),
        username: "admin".into(),
        password: "wrong".into(),
        ..config(&server)
    };
    let err = InvenTreeClient::connect(&config).await.err().unwrap();
    assert!(matches!(err, ApiError::Auth(_)));
}

#[tokio::test]
async fn missing_credentials_fail_without_a_request() {
    let server = MockServer::start().await;
    let config = ApiConfig {
        token: String::new(),
        ..config(&server)
    };
    let err = InvenTreeClient::connect(&config).await.err().unwrap();
    assert!(matches!(err, ApiError::Auth(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn leading_slash_paths_are_site_relative() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plugin/kicad-library-plugin/api/category/"))
        .and(body_json(json!({"category": 5})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "category": {"id": 5}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = InvenTreeClient::connect(&config(&server)).await.unwrap();
    let created = client
        .post("/plugin/kicad-library-plugin/api/category/", &json!({"category": 5}))
        .await
        .unwrap();
    assert_eq!(created["category"]["id"], 5);
}

#[tokio::test]
async fn query_filters_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/part/related/"))
        .and(query_param("part", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"pk": 3, "part_1": 42, "part_2": 43}]
        })))
        .mount(&server)
        .await;

    let client = InvenTreeClient::connect(&config(&server)).await.unwrap();
    let related = list_entities(&client, EntityKind::PartRelated, &[("part", "42".into())])
        .await
        .unwrap();
    assert_eq!(related.len(), 1);
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/part/9/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = InvenTreeClient::connect(&config(&server)).await.unwrap();
    inv_api::delete_entity(&client, EntityKind::Part, 9).await.unwrap();
}

#[tokio::test]
async fn rate_limit_and_status_errors_are_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/company/"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "15"))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/part/404/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"detail\":\"Not found.\"}"))
        .mount(&server)
        .await;

    let client = InvenTreeClient::connect(&config(&server)).await.unwrap();

    let err = client.get("company/", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::RateLimited {
            retry_after_secs: 15
        }
    ));

    let err = client.patch("part/404/", &json!({"active": false})).await.unwrap_err();
    assert!(err.is_not_found());
}
