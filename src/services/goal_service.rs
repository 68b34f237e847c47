//! Yearly reading goals: upsert keyed on (user, year) and progress derivation.

use chrono::{TimeZone, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::Serialize;

use crate::domain::DomainError;
use crate::models::ReadingGoal;
use crate::models::reading_goal::{ActiveModel as GoalActiveModel, Column, Entity as GoalEntity};
use crate::models::reading_record::{
    Column as RecordColumn, Entity as RecordEntity, ReadingStatus,
};

/// Goal progress as the dashboard consumes it. `progress` is `None` when no
/// goal exists for the year - "no goal" is not 0%.
#[derive(Debug, Serialize)]
pub struct GoalProgress {
    pub goal: Option<ReadingGoal>,
    pub completed_books: u64,
    pub progress: Option<f64>,
}

/// Percentage of a goal covered by the completed count. Target is validated
/// to be >= 1 before a goal row can exist.
pub fn progress_percentage(target_books: i32, completed: u64) -> f64 {
    completed as f64 / target_books as f64 * 100.0
}

fn validate(user_id: &str, year: i32, target_books: i32) -> Result<(), DomainError> {
    if user_id.trim().is_empty() {
        return Err(DomainError::Validation("user id is required".to_string()));
    }
    if !(1900..=2200).contains(&year) {
        return Err(DomainError::Validation(format!(
            "year {} is out of range",
            year
        )));
    }
    if target_books < 1 {
        return Err(DomainError::Validation(
            "target must be at least one book".to_string(),
        ));
    }
    Ok(())
}

/// Fetch the goal for a year, if any
pub async fn get_goal(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
) -> Result<Option<ReadingGoal>, DomainError> {
    let goal = GoalEntity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Year.eq(year))
        .one(db)
        .await?;

    Ok(goal.map(ReadingGoal::from))
}

/// Create-or-replace the single goal row for (user, year). A single
/// `ON CONFLICT` statement keeps the composite key unique under concurrent
/// writes; only the target is replaced on conflict.
pub async fn upsert_goal(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    target_books: i32,
) -> Result<ReadingGoal, DomainError> {
    validate(user_id, year, target_books)?;

    let now = chrono::Utc::now();

    let goal = GoalActiveModel {
        user_id: Set(user_id.to_string()),
        year: Set(year),
        target_books: Set(target_books),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    };

    GoalEntity::insert(goal)
        .on_conflict(
            OnConflict::columns([Column::UserId, Column::Year])
                .update_columns([Column::TargetBooks, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;

    // Read the row back; the upsert id is not reliable across backends
    get_goal(db, user_id, year)
        .await?
        .ok_or_else(|| DomainError::Database("goal row missing after upsert".to_string()))
}

/// Delete the goal for a year
pub async fn delete_goal(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
) -> Result<(), DomainError> {
    let result = GoalEntity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Year.eq(year))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DomainError::NotFound);
    }

    Ok(())
}

/// Count records finished within the calendar year (UTC boundaries)
pub async fn finished_in_year(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
) -> Result<u64, DomainError> {
    let now = Utc::now();
    let start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let end = Utc
        .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);

    let count = RecordEntity::find()
        .filter(RecordColumn::UserId.eq(user_id))
        .filter(RecordColumn::Status.eq(ReadingStatus::Finished))
        .filter(RecordColumn::CompletedAt.gte(start.to_rfc3339()))
        .filter(RecordColumn::CompletedAt.lt(end.to_rfc3339()))
        .count(db)
        .await?;

    Ok(count)
}

/// Combine the goal read and the finished-count read for the dashboard.
/// The two queries are independent and issued concurrently; a stale goal
/// next to a fresh count is acceptable, so no transaction is used.
pub async fn goal_progress(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
) -> Result<GoalProgress, DomainError> {
    let (goal, completed) = tokio::join!(
        get_goal(db, user_id, year),
        finished_in_year(db, user_id, year)
    );
    let goal = goal?;
    let completed = completed?;

    let progress = goal
        .as_ref()
        .map(|g| progress_percentage(g.target_books, completed));

    Ok(GoalProgress {
        goal,
        completed_books: completed,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_math() {
        assert_eq!(progress_percentage(12, 3), 25.0);
        assert_eq!(progress_percentage(10, 0), 0.0);
        // Exceeding the target is fine, the value just passes 100
        assert_eq!(progress_percentage(4, 6), 150.0);
    }

    #[test]
    fn upsert_validation_rejects_bad_input() {
        assert!(validate("u1", 2024, 12).is_ok());
        assert!(validate("", 2024, 12).is_err());
        assert!(validate("u1", 24, 12).is_err());
        assert!(validate("u1", 2024, 0).is_err());
    }
}
