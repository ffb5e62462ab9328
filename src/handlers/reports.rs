use axum::{extract::State, response::IntoResponse, routing::get, Router};
use chrono::Utc;

use super::common::success_response;
use crate::errors::ApiError;
use crate::handlers::AppState;

async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .services
        .reports
        .dashboard(Utc::now().date_naive())
        .await?;
    Ok(success_response(snapshot))
}

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
