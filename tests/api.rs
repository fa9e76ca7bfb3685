use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use crud_service::{app, AbsentPolicy, AppState, Settings};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(absent: AbsentPolicy) -> Router {
    app(AppState::in_memory(absent), &Settings::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(b.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn customer_lifecycle() {
    let app = router(AbsentPolicy::NotFound);

    let (status, body) = send(&app, Method::POST, "/customers", Some(r#"{"name":"Alice"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let created = parse(&body);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Alice");
    assert!(created["createdAt"].is_string());

    let (status, body) = send(&app, Method::GET, "/customers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), created);

    let (status, body) = send(&app, Method::DELETE, "/customers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body) = send(&app, Method::GET, "/customers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse(&body)["error"]["code"], "not_found");
}

#[tokio::test]
async fn absent_as_null_returns_null_body() {
    let app = router(AbsentPolicy::Null);
    let (status, body) = send(&app, Method::GET, "/customers/9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "null");
}

#[tokio::test]
async fn products_are_listed_in_id_order() {
    let app = router(AbsentPolicy::NotFound);
    for (name, price) in [("Widget", 2.5), ("Gadget", 10.0)] {
        let payload = json!({"name": name, "price": price}).to_string();
        let (status, _) = send(&app, Method::POST, "/products", Some(&payload)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = parse(&body);
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["name"], "Widget");
    assert_eq!(items[0]["price"], 2.5);
    assert_eq!(items[1]["id"], 2);
    assert_eq!(items[1]["name"], "Gadget");
}

#[tokio::test]
async fn resources_do_not_share_rows() {
    let app = router(AbsentPolicy::NotFound);
    send(&app, Method::POST, "/customers", Some(r#"{"name":"Alice"}"#)).await;
    let (_, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(parse(&body), json!([]));
    let (status, _) = send(&app, Method::GET, "/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_id_is_ok() {
    let app = router(AbsentPolicy::NotFound);
    let (status, body) = send(&app, Method::DELETE, "/products/77", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn validation_failures_are_422() {
    let app = router(AbsentPolicy::NotFound);

    let (status, body) = send(&app, Method::POST, "/customers", Some(r#"{"name":"  "}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse(&body)["error"]["code"], "validation_error");

    let (status, _) = send(&app, Method::POST, "/products", Some(r#"{"name":"Widget"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::POST, "/products", Some(r#"{"name":"Widget","price":-1}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(parse(&body), json!([]));
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let app = router(AbsentPolicy::NotFound);

    let (status, body) = send(&app, Method::POST, "/customers", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["error"]["code"], "bad_request");

    let (status, _) = send(&app, Method::POST, "/customers", Some(r#"["Alice"]"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/customers/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/products/1.5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_with_unknown_id_is_404() {
    let app = router(AbsentPolicy::NotFound);
    let (status, _) = send(&app, Method::POST, "/customers", Some(r#"{"id":5,"name":"Ghost"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_endpoints_are_not_routed() {
    let app = router(AbsentPolicy::NotFound);
    send(&app, Method::POST, "/customers", Some(r#"{"name":"Alice"}"#)).await;
    let (status, _) = send(&app, Method::PUT, "/customers/1", Some(r#"{"name":"Bob"}"#)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn common_routes_report_ok() {
    let app = router(AbsentPolicy::NotFound);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({"status": "ok"}));

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["database"], "ok");

    let (_, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(parse(&body)["name"], "crud-service");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let settings = Settings {
        max_body_bytes: 16,
        ..Settings::default()
    };
    let app = app(AppState::in_memory(AbsentPolicy::NotFound), &settings);
    let payload = json!({"name": "A customer name well past sixteen bytes"}).to_string();
    let (status, _) = send(&app, Method::POST, "/customers", Some(&payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (_, body) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(parse(&body), json!([]));
}

#[tokio::test]
async fn missing_content_type_is_415() {
    let app = router(AbsentPolicy::NotFound);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/customers")
        .body(Body::from(r#"{"name":"Alice"}"#))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "unsupported_media_type");
}
