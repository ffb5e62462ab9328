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
use crate::services::suppliers::{CreateSupplierInput, UpdateSupplierInput};

#[derive(Debug, Deserialize)]
struct KeywordQuery {
    keyword: Option<String>,
}

async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let supplier = state.services.suppliers.create(payload).await?;
    Ok(created_response(supplier))
}

async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(q): Query<KeywordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .suppliers
        .find_all(q.keyword, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state.services.suppliers.find_one(&id).await?;
    Ok(success_response(supplier))
}

async fn get_supplier_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.services.suppliers.find_products(&id).await?;
    Ok(success_response(products))
}

async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSupplierInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let supplier = state.services.suppliers.update(&id, payload).await?;
    Ok(success_response(supplier))
}

async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.suppliers.remove(&id).await?;
    Ok(no_content_response())
}

pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_supplier).get(list_suppliers))
        .route(
            "/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .route("/:id/products", get(get_supplier_products))
}
