use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Datelike;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::auth::Claims;
use crate::services::{goal_service, stats_service};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Goal year to report progress for; defaults to the current UTC year
    pub year: Option<i32>,
}

pub async fn get_statistics(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    match stats_service::reading_statistics(&db, &claims.sub).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Everything the dashboard renders in one response. The statistics, the
/// status breakdown and the goal progress are independent reads and are
/// issued concurrently; no cross-query consistency is promised.
pub async fn get_dashboard(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let year = query.year.unwrap_or_else(|| chrono::Utc::now().year());

    let (stats, breakdown, goal) = tokio::join!(
        stats_service::reading_statistics(&db, &claims.sub),
        stats_service::status_breakdown(&db, &claims.sub),
        goal_service::goal_progress(&db, &claims.sub, year)
    );

    match (stats, breakdown, goal) {
        (Ok(stats), Ok(breakdown), Ok(goal)) => (
            StatusCode::OK,
            Json(json!({
                "statistics": stats,
                "status_breakdown": breakdown,
                "goal": goal,
                "year": year
            })),
        )
            .into_response(),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => error_response(e),
    }
}
