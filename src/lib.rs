pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

pub use handlers::{AppServices, AppState};

/// All versioned API routes, one nested router per resource.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/departments", handlers::departments::department_routes())
        .nest("/employees", handlers::employees::employee_routes())
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/suppliers", handlers::suppliers::supplier_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/warehouses", handlers::warehouses::warehouse_routes())
        .nest(
            "/purchase-orders",
            handlers::purchase_orders::purchase_order_routes(),
        )
        .nest("/sales-orders", handlers::sales_orders::sales_order_routes())
        .nest(
            "/inbound-orders",
            handlers::inbound_orders::inbound_order_routes(),
        )
        .nest(
            "/outbound-orders",
            handlers::outbound_orders::outbound_order_routes(),
        )
        .nest("/inventory", handlers::inventory::inventory_routes())
        .nest("/reports", handlers::reports::report_routes())
        .nest("/system-logs", handlers::system_logs::system_log_routes())
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "ttfashion-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"status": "ok", "database": "connected"})),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "degraded", "database": e.to_string()})),
        ),
    }
}

/// Assembles the full application router around `state`.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
