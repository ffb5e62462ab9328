use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::common::{
    created_response, no_content_response, success_response, validate_input, Paginated,
    PaginationParams,
};
use crate::errors::ApiError;
use crate::handlers::AppState;
use crate::services::employees::{CreateEmployeeInput, EmployeeFilter, UpdateEmployeeInput};

async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let employee = state.services.employees.create(payload).await?;
    Ok(created_response(employee))
}

async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<EmployeeFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .employees
        .find_all(filter, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state.services.employees.find_one(&id).await?;
    Ok(success_response(employee))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEmployeeInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let employee = state.services.employees.update(&id, payload).await?;
    Ok(success_response(employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.employees.remove(&id).await?;
    Ok(no_content_response())
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_employee).get(list_employees))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}
