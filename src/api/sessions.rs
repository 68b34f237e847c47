use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::auth::Claims;
use crate::services::session_service::{self, SessionInput};

pub async fn list_sessions(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    match session_service::list_sessions(&db, &claims.sub).await {
        Ok(sessions) => (
            StatusCode::OK,
            Json(json!({ "sessions": sessions, "total": sessions.len() })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_session(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(input): Json<SessionInput>,
) -> impl IntoResponse {
    match session_service::create_session(&db, &claims.sub, input).await {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(e) => error_response(e),
    }
}
