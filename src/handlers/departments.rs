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
use crate::services::departments::{CreateDepartmentInput, UpdateDepartmentInput};

#[derive(Debug, Deserialize)]
struct KeywordQuery {
    keyword: Option<String>,
}

async fn create_department(
    State(state): State<AppState>,
    Json(payload): Json<CreateDepartmentInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let department = state.services.departments.create(payload).await?;
    Ok(created_response(department))
}

async fn list_departments(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(q): Query<KeywordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .departments
        .find_all(q.keyword, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let department = state.services.departments.find_one(&id).await?;
    Ok(success_response(department))
}

async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDepartmentInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let department = state.services.departments.update(&id, payload).await?;
    Ok(success_response(department))
}

async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.departments.remove(&id).await?;
    Ok(no_content_response())
}

pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_department).get(list_departments))
        .route(
            "/:id",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
}
