//! Reading-record CRUD with centralized status/progress reconciliation.
//!
//! Progress and status are never written independently: every mutation path
//! funnels through [`reconcile`], so `progress = 100 <=> finished` and
//! `progress = 0 <=> unread` hold regardless of which endpoint wrote the row.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::book;
use crate::models::reading_record::{
    ActiveModel as RecordActiveModel, Column, Entity as RecordEntity, ReadingRecord, ReadingStatus,
};

/// Input payload for creating a record
#[derive(Debug, Clone, Deserialize)]
pub struct RecordInput {
    pub book_id: i32,
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub thoughts: Option<String>,
}

/// Input payload for updating a record
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RecordUpdate {
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub thoughts: Option<Option<String>>,
}

/// The single state-transition rule. A provided progress wins and determines
/// the status; a bare status change anchors progress to its end of the
/// range. Progress is clamped to 0..=100 before anything is derived.
pub fn reconcile(
    status: Option<ReadingStatus>,
    progress: Option<i32>,
    current_progress: i32,
) -> (ReadingStatus, i32) {
    let progress = match (progress, status) {
        (Some(p), _) => p.clamp(0, 100),
        (None, Some(s)) => s.anchor_progress(current_progress),
        (None, None) => current_progress.clamp(0, 100),
    };

    (ReadingStatus::from_progress(progress), progress)
}

/// Completion timestamp follows the status: stamped on entry to finished,
/// preserved while finished, cleared on leaving it.
fn completed_at_for(
    status: ReadingStatus,
    previous: Option<String>,
    now: &chrono::DateTime<chrono::Utc>,
) -> Option<String> {
    match status {
        ReadingStatus::Finished => previous.or_else(|| Some(now.to_rfc3339())),
        _ => None,
    }
}

/// List the user's records, newest first, joined with book title/author
pub async fn list_records(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<ReadingRecord>, DomainError> {
    let rows = RecordEntity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::Id)
        .find_also_related(book::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(record, book)| ReadingRecord::from_model(record, book))
        .collect())
}

/// Get a single record with its book
pub async fn get_record(
    db: &DatabaseConnection,
    user_id: &str,
    id: i32,
) -> Result<Option<ReadingRecord>, DomainError> {
    let row = RecordEntity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .find_also_related(book::Entity)
        .one(db)
        .await?;

    Ok(row.map(|(record, book)| ReadingRecord::from_model(record, book)))
}

/// Create a record against one of the user's books
pub async fn create_record(
    db: &DatabaseConnection,
    user_id: &str,
    input: RecordInput,
) -> Result<ReadingRecord, DomainError> {
    // The referenced book must exist and belong to the caller
    let book_model = book::Entity::find_by_id(input.book_id)
        .filter(book::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| DomainError::Validation("book not found for this user".to_string()))?;

    let now = chrono::Utc::now();
    let (status, progress) = reconcile(input.status, input.progress, 0);
    let completed_at = completed_at_for(status, None, &now);

    let new_record = RecordActiveModel {
        user_id: Set(user_id.to_string()),
        book_id: Set(book_model.id),
        status: Set(status),
        progress: Set(progress),
        thoughts: Set(input.thoughts),
        completed_at: Set(completed_at),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    };

    let model = new_record.insert(db).await?;
    tracing::info!("Created reading record {} for user {}", model.id, user_id);

    Ok(ReadingRecord::from_model(model, Some(book_model)))
}

/// Update a record. Absent fields keep their stored values.
pub async fn update_record(
    db: &DatabaseConnection,
    user_id: &str,
    id: i32,
    input: RecordUpdate,
) -> Result<ReadingRecord, DomainError> {
    let model = RecordEntity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let now = chrono::Utc::now();
    let (status, progress) = reconcile(input.status, input.progress, model.progress);
    let completed_at = completed_at_for(status, model.completed_at.clone(), &now);
    let book_id = model.book_id;

    let mut record: RecordActiveModel = model.into();
    record.status = Set(status);
    record.progress = Set(progress);
    record.completed_at = Set(completed_at);
    if let Some(thoughts) = input.thoughts {
        record.thoughts = Set(thoughts);
    }
    record.updated_at = Set(now.to_rfc3339());

    let model = record.update(db).await?;

    let book_model = book::Entity::find_by_id(book_id).one(db).await?;
    Ok(ReadingRecord::from_model(model, book_model))
}

/// Delete a record
pub async fn delete_record(
    db: &DatabaseConnection,
    user_id: &str,
    id: i32,
) -> Result<(), DomainError> {
    let result = RecordEntity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DomainError::NotFound);
    }

    Ok(())
}
