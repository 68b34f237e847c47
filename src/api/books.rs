use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::auth::Claims;
use crate::services::book_service::{self, BookFilter, BookInput};

pub async fn list_books(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(filter): Query<BookFilter>,
) -> impl IntoResponse {
    match book_service::list_books(&db, &claims.sub, filter).await {
        Ok(books) => (
            StatusCode::OK,
            Json(json!({ "books": books, "total": books.len() })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_book(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::get_book(&db, &claims.sub, id).await {
        Ok(Some(detail)) => (StatusCode::OK, Json(detail)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_book(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(input): Json<BookInput>,
) -> impl IntoResponse {
    match book_service::create_book(&db, &claims.sub, input).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Book created successfully", "book": book })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_book(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(input): Json<BookInput>,
) -> impl IntoResponse {
    match book_service::update_book(&db, &claims.sub, id, input).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::delete_book(&db, &claims.sub, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Book deleted successfully" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
