use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use super::common::{success_response, validate_input, Paginated, PaginationParams};
use crate::errors::ApiError;
use crate::handlers::AppState;
use crate::services::warehouse::{InventoryFilter, UpdateInventoryInput};

async fn list_inventory(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<InventoryFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .warehouse
        .get_inventory(filter, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn low_stock_alerts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let alerts = state.services.warehouse.get_low_stock_alerts().await?;
    Ok(success_response(alerts))
}

async fn inventory_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.services.warehouse.inventory_stats().await?;
    Ok(success_response(stats))
}

async fn overwrite_inventory(
    State(state): State<AppState>,
    Path((product_id, warehouse_id)): Path<(String, String)>,
    Json(payload): Json<UpdateInventoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let row = state
        .services
        .warehouse
        .update_inventory(&product_id, &warehouse_id, payload)
        .await?;
    Ok(success_response(row))
}

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory))
        .route("/alerts", get(low_stock_alerts))
        .route("/stats", get(inventory_stats))
        .route("/:productId/:warehouseId", put(overwrite_inventory))
}
