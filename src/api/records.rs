use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::auth::Claims;
use crate::services::record_service::{self, RecordInput, RecordUpdate};

pub async fn list_records(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    match record_service::list_records(&db, &claims.sub).await {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({ "records": records, "total": records.len() })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_record(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match record_service::get_record(&db, &claims.sub, id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Reading record not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_record(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(input): Json<RecordInput>,
) -> impl IntoResponse {
    match record_service::create_record(&db, &claims.sub, input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_record(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(input): Json<RecordUpdate>,
) -> impl IntoResponse {
    match record_service::update_record(&db, &claims.sub, id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_record(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match record_service::delete_record(&db, &claims.sub, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Reading record deleted successfully" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
