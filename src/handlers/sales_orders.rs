use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;

use super::common::{
    created_response, no_content_response, success_response, validate_input, OperatorId,
    Paginated, PaginationParams,
};
use crate::errors::ApiError;
use crate::handlers::AppState;
use crate::services::sales::{
    CreateSalesOrderInput, SalesOrderFilter, UpdateSalesOrderInput, UpdateSalesStatusInput,
};

async fn create_sales_order(
    State(state): State<AppState>,
    OperatorId(employee_id): OperatorId,
    Json(payload): Json<CreateSalesOrderInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let order = state.services.sales.create(&employee_id, payload).await?;
    Ok(created_response(order))
}

async fn list_sales_orders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<SalesOrderFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .sales
        .find_all(filter, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn sales_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.services.sales.stats(Utc::now().date_naive()).await?;
    Ok(success_response(stats))
}

async fn get_sales_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.services.sales.find_one(&id).await?;
    Ok(success_response(order))
}

async fn update_sales_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSalesOrderInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let order = state.services.sales.update(&id, payload).await?;
    Ok(success_response(order))
}

async fn update_sales_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSalesStatusInput>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .sales
        .update_status(&id, payload.order_status)
        .await?;
    Ok(success_response(order))
}

async fn delete_sales_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.sales.remove(&id).await?;
    Ok(no_content_response())
}

pub fn sales_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sales_order).get(list_sales_orders))
        .route("/stats", get(sales_stats))
        .route(
            "/:id",
            get(get_sales_order)
                .put(update_sales_order)
                .delete(delete_sales_order),
        )
        .route("/:id/status", patch(update_sales_order_status))
}
