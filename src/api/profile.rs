use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::auth::Claims;
use crate::services::profile_service::{self, ProfileUpdate};

pub async fn get_profile(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    match profile_service::get_profile(&db, &claims.sub).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Profile not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_profile(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(update): Json<ProfileUpdate>,
) -> impl IntoResponse {
    match profile_service::update_profile(&db, &claims.sub, update).await {
        Ok(profile) => (
            StatusCode::OK,
            Json(json!({ "message": "Profile updated successfully", "profile": profile })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
