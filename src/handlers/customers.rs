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
use crate::services::customers::{CreateCustomerInput, UpdateCustomerInput};

#[derive(Debug, Deserialize)]
struct KeywordQuery {
    keyword: Option<String>,
}

async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let customer = state.services.customers.create(payload).await?;
    Ok(created_response(customer))
}

async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(q): Query<KeywordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .customers
        .find_all(q.keyword, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.services.customers.find_one(&id).await?;
    Ok(success_response(customer))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCustomerInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let customer = state.services.customers.update(&id, payload).await?;
    Ok(success_response(customer))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.customers.remove(&id).await?;
    Ok(no_content_response())
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
