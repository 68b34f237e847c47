pub mod auth;
pub mod books;
pub mod goals;
pub mod health;
pub mod profile;
pub mod records;
pub mod search;
pub mod sessions;
pub mod stats;

use axum::{
    Json, Router,
    extract::FromRef,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::domain::DomainError;
use crate::google_books::GoogleBooksClient;

/// Application state shared across all handlers. Both the store connection
/// and the catalog client are constructed once at startup and passed in -
/// no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub catalog: GoogleBooksClient,
}

impl AppState {
    pub fn new(db: DatabaseConnection, catalog: GoogleBooksClient) -> Self {
        Self { db, catalog }
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for GoogleBooksClient {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

/// Map a domain failure to a user-facing response. Raw store payloads stay
/// inside the error message produced by the service layer.
pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::External(_) => StatusCode::BAD_GATEWAY,
        DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if matches!(err, DomainError::Database(_) | DomainError::External(_)) {
        tracing::error!("Request failed: {}", err);
    }

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Reading records
        .route(
            "/records",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/records/:id",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        // Reading goals
        .route("/goals", post(goals::upsert_goal))
        .route(
            "/goals/:year",
            get(goals::get_goal).delete(goals::delete_goal),
        )
        .route("/goals/:year/progress", get(goals::get_goal_progress))
        // Reading sessions
        .route(
            "/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        // Statistics & dashboard
        .route("/stats", get(stats::get_statistics))
        .route("/dashboard", get(stats::get_dashboard))
        // Profile
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        // External catalog search (prefills the add-book form)
        .route("/search/books", get(search::search_books))
        .with_state(state)
}
