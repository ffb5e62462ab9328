use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use super::common::{
    created_response, success_response, validate_input, OperatorId, Paginated, PaginationParams,
};
use crate::errors::ApiError;
use crate::handlers::AppState;
use crate::services::warehouse::{CreateInboundInput, MovementFilter, UpdateOperateStatusInput};

async fn create_inbound_order(
    State(state): State<AppState>,
    OperatorId(employee_id): OperatorId,
    Json(payload): Json<CreateInboundInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let order = state
        .services
        .warehouse
        .create_inbound(&employee_id, payload)
        .await?;
    Ok(created_response(order))
}

async fn list_inbound_orders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<MovementFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .warehouse
        .find_all_inbound(filter, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn get_inbound_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.services.warehouse.find_one_inbound(&id).await?;
    Ok(success_response(order))
}

async fn update_inbound_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOperateStatusInput>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .warehouse
        .update_inbound_status(&id, payload.operate_status)
        .await?;
    Ok(success_response(order))
}

pub fn inbound_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_inbound_order).get(list_inbound_orders))
        .route("/:id", get(get_inbound_order))
        .route("/:id/status", patch(update_inbound_order_status))
}
