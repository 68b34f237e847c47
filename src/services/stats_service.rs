//! Reading-statistics aggregation for the dashboard.
//!
//! Four independent reads reduced into one summary record. The aggregate is
//! all-or-nothing: any failed sub-query aborts the whole result.

use chrono::{Datelike, TimeZone, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::domain::DomainError;
use crate::models::book;
use crate::models::reading_record::{Column, Entity as RecordEntity, ReadingStatus};
use crate::models::reading_session;

/// Sentinel returned when the user has no categorized books yet.
pub const UNKNOWN_GENRE: &str = "unknown";

#[derive(Debug, Serialize, PartialEq)]
pub struct ReadingStatistics {
    /// Count of finished records, all time
    pub total_books: u64,
    /// Count of records finished since the first day of the current month
    pub books_this_month: u64,
    /// Mean session duration in minutes, rounded; 0 with no sessions
    pub average_reading_time: i64,
    pub top_genre: String,
}

/// Record counts per status, for the dashboard pie chart.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatusBreakdown {
    pub unread: u64,
    pub in_progress: u64,
    pub finished: u64,
}

/// Most frequent genre; ties keep the first-encountered genre in the order
/// the rows were scanned (ascending id, so insertion order - deterministic).
pub fn top_genre<I: IntoIterator<Item = String>>(genres: I) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for genre in genres {
        let genre = genre.trim().to_string();
        if genre.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(name, _)| *name == genre) {
            Some((_, count)) => *count += 1,
            None => counts.push((genre, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (name, count) in counts {
        let replace = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if replace {
            best = Some((name, count));
        }
    }

    best.map(|(name, _)| name)
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
}

/// Mean duration rounded to the nearest minute; 0 with no sessions.
pub fn average_minutes(durations: &[i32]) -> i64 {
    if durations.is_empty() {
        return 0;
    }
    let total: i64 = durations.iter().map(|d| *d as i64).sum();
    (total as f64 / durations.len() as f64).round() as i64
}

/// Compute the user's reading statistics. Read-only.
pub async fn reading_statistics(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<ReadingStatistics, DomainError> {
    // 1. Total finished records
    let total_books = RecordEntity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Status.eq(ReadingStatus::Finished))
        .count(db)
        .await?;

    // 2. Finished since the first day of the current month. Timestamps are
    // stored as RFC 3339 UTC, so the boundary is computed in UTC as well.
    let now = Utc::now();
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now);

    let books_this_month = RecordEntity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Status.eq(ReadingStatus::Finished))
        .filter(Column::CompletedAt.gte(month_start.to_rfc3339()))
        .count(db)
        .await?;

    // 3. Average session duration
    let durations = session_durations(db, user_id).await?;
    let average_reading_time = average_minutes(&durations);

    // 4. Top genre across the user's books
    let books = book::Entity::find()
        .filter(book::Column::UserId.eq(user_id))
        .order_by_asc(book::Column::Id)
        .all(db)
        .await?;
    let top_genre = top_genre(books.into_iter().filter_map(|b| b.genre));

    Ok(ReadingStatistics {
        total_books,
        books_this_month,
        average_reading_time,
        top_genre,
    })
}

/// Per-status record counts for the user
pub async fn status_breakdown(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<StatusBreakdown, DomainError> {
    let count_for = |status: ReadingStatus| {
        RecordEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.eq(status))
            .count(db)
    };

    let (unread, in_progress, finished) = tokio::join!(
        count_for(ReadingStatus::Unread),
        count_for(ReadingStatus::InProgress),
        count_for(ReadingStatus::Finished)
    );

    Ok(StatusBreakdown {
        unread: unread?,
        in_progress: in_progress?,
        finished: finished?,
    })
}

async fn session_durations(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<i32>, DomainError> {
    let durations = reading_session::Entity::find()
        .select_only()
        .column(reading_session::Column::Duration)
        .filter(reading_session::Column::UserId.eq(user_id))
        .into_tuple::<i32>()
        .all(db)
        .await?;
    Ok(durations)
}
