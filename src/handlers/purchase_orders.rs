use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use super::common::{
    created_response, no_content_response, success_response, validate_input, OperatorId,
    Paginated, PaginationParams,
};
use crate::errors::ApiError;
use crate::handlers::AppState;
use crate::services::purchase::{
    CreatePurchaseOrderInput, PurchaseOrderFilter, UpdatePurchaseOrderInput,
    UpdatePurchaseStatusInput,
};

async fn create_purchase_order(
    State(state): State<AppState>,
    OperatorId(employee_id): OperatorId,
    Json(payload): Json<CreatePurchaseOrderInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let order = state.services.purchase.create(&employee_id, payload).await?;
    Ok(created_response(order))
}

async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<PurchaseOrderFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .purchase
        .find_all(filter, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn purchase_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.services.purchase.stats().await?;
    Ok(success_response(stats))
}

async fn get_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.services.purchase.find_one(&id).await?;
    Ok(success_response(order))
}

async fn update_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePurchaseOrderInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let order = state.services.purchase.update(&id, payload).await?;
    Ok(success_response(order))
}

async fn update_purchase_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePurchaseStatusInput>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .purchase
        .update_status(&id, payload.order_status)
        .await?;
    Ok(success_response(order))
}

async fn delete_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.purchase.remove(&id).await?;
    Ok(no_content_response())
}

pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_purchase_order).get(list_purchase_orders))
        .route("/stats", get(purchase_stats))
        .route(
            "/:id",
            get(get_purchase_order)
                .put(update_purchase_order)
                .delete(delete_purchase_order),
        )
        .route("/:id/status", patch(update_purchase_order_status))
}
