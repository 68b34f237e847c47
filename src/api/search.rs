use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::auth::Claims;
use crate::google_books::GoogleBooksClient;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Proxy a free-text query to the external catalog. Results prefill the
/// add-book form; nothing is persisted here.
pub async fn search_books(
    State(catalog): State<GoogleBooksClient>,
    _claims: Claims,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    if params.q.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Query must not be empty" })),
        )
            .into_response();
    }

    match catalog.search(&params.q).await {
        Ok(hits) => (
            StatusCode::OK,
            Json(json!({ "total": hits.len(), "results": hits })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
