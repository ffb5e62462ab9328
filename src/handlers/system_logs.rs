use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

use super::common::{success_response, Paginated, PaginationParams};
use crate::errors::ApiError;
use crate::handlers::AppState;
use crate::services::system_logs::SystemLogFilter;

async fn list_system_logs(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<SystemLogFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.normalized();
    let (data, total) = state
        .services
        .logs
        .find_all(filter, params.page, params.limit)
        .await?;
    Ok(success_response(Paginated::new(data, params, total)))
}

pub fn system_log_routes() -> Router<AppState> {
    Router::new().route("/", get(list_system_logs))
}
