mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use ttfashion_api::app_router;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let state = common::setup().await;
    let app = app_router(state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn department_crud_over_http() {
    let state = common::setup().await;
    let app = app_router(state);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/departments",
            json!({"id": "D09", "name": "财务部"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/departments?page=1&limit=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["totalPages"], 1);
    assert_eq!(body["data"][0]["name"], "财务部");
}

#[tokio::test]
async fn order_creation_requires_operator_header() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    let app = app_router(state);

    let payload = json!({
        "supplierId": "S0001",
        "items": [{"productId": "P1", "quantity": 1, "unitPrice": "10.00"}]
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/purchase-orders", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut request = json_request("POST", "/api/v1/purchase-orders", payload);
    request
        .headers_mut()
        .insert("x-employee-id", "E001".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_status_strings_are_rejected_at_the_boundary() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    let app = app_router(state);

    let mut request = json_request(
        "POST",
        "/api/v1/purchase-orders",
        json!({
            "supplierId": "S0001",
            "items": [{"productId": "P1", "quantity": 1, "unitPrice": "10.00"}]
        }),
    );
    request
        .headers_mut()
        .insert("x-employee-id", "E001".parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/purchase-orders/{}/status", id),
            json!({"orderStatus": "done"}),
        ))
        .await
        .unwrap();
    // serde refuses the unknown variant before the service sees it
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn resource_mounts_respond() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    let app = app_router(state);

    for uri in [
        "/api/v1/departments",
        "/api/v1/employees",
        "/api/v1/customers",
        "/api/v1/suppliers",
        "/api/v1/suppliers/S0001/products",
        "/api/v1/products",
        "/api/v1/products/P1/stock",
        "/api/v1/warehouses",
        "/api/v1/warehouses/W1/stock",
        "/api/v1/purchase-orders",
        "/api/v1/purchase-orders/stats",
        "/api/v1/sales-orders",
        "/api/v1/sales-orders/stats",
        "/api/v1/inbound-orders",
        "/api/v1/outbound-orders",
        "/api/v1/inventory",
        "/api/v1/inventory/alerts",
        "/api/v1/inventory/stats",
        "/api/v1/reports/dashboard",
        "/api/v1/system-logs",
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn missing_resources_return_not_found() {
    let state = common::setup().await;
    let app = app_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/products/NOPE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
