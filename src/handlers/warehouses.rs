use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::common::{
    created_response, no_content_response, success_response, validate_input, Paginated,
    PaginationParams,
};
use crate::errors::ApiError;
use crate::handlers::AppState;
use crate::services::warehouses::{CreateWarehouseInput, UpdateWarehouseInput};

#[derive(Debug, Deserialize)]
struct KeywordQuery {
    keyword: Option<String>,
}

async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<CreateWarehouseInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let warehouse = state.services.warehouses.create(payload).await?;
    Ok(created_response(warehouse))
}

async fn list_warehouses(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(q): Query<KeywordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .warehouses
        .find_all(q.keyword, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let warehouse = state.services.warehouses.find_one(&id).await?;
    Ok(success_response(warehouse))
}

async fn get_warehouse_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stock = state.services.inventory.by_warehouse(&id).await?;
    Ok(success_response(stock))
}

async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateWarehouseInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let warehouse = state.services.warehouses.update(&id, payload).await?;
    Ok(success_response(warehouse))
}

async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.warehouses.remove(&id).await?;
    Ok(no_content_response())
}

pub fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_warehouse).get(list_warehouses))
        .route(
            "/:id",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
        .route("/:id/stock", get(get_warehouse_stock))
}
