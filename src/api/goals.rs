use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::auth::Claims;
use crate::services::goal_service;

#[derive(Debug, Deserialize)]
pub struct UpsertGoalRequest {
    pub year: i32,
    pub target_books: i32,
}

pub async fn get_goal(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(year): Path<i32>,
) -> impl IntoResponse {
    match goal_service::get_goal(&db, &claims.sub, year).await {
        Ok(Some(goal)) => (StatusCode::OK, Json(goal)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No goal set for this year" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn upsert_goal(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(req): Json<UpsertGoalRequest>,
) -> impl IntoResponse {
    match goal_service::upsert_goal(&db, &claims.sub, req.year, req.target_books).await {
        Ok(goal) => (StatusCode::OK, Json(goal)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_goal(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(year): Path<i32>,
) -> impl IntoResponse {
    match goal_service::delete_goal(&db, &claims.sub, year).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Goal deleted successfully" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_goal_progress(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(year): Path<i32>,
) -> impl IntoResponse {
    match goal_service::goal_progress(&db, &claims.sub, year).await {
        Ok(progress) => (StatusCode::OK, Json(progress)).into_response(),
        Err(e) => error_response(e),
    }
}
