//! Reading sessions: minimal create/list surface feeding the statistics.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::ReadingSession;
use crate::models::book;
use crate::models::reading_session::{
    ActiveModel as SessionActiveModel, Column, Entity as SessionEntity,
};

/// Input payload for logging a session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionInput {
    pub book_id: i32,
    /// Minutes spent reading
    pub duration: i32,
    /// Calendar date of the sitting, `YYYY-MM-DD`
    pub date: String,
}

/// List the user's sessions, most recent date first
pub async fn list_sessions(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<ReadingSession>, DomainError> {
    let sessions = SessionEntity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::Date)
        .order_by_desc(Column::Id)
        .all(db)
        .await?;

    Ok(sessions.into_iter().map(ReadingSession::from).collect())
}

/// Log a reading session against one of the user's books
pub async fn create_session(
    db: &DatabaseConnection,
    user_id: &str,
    input: SessionInput,
) -> Result<ReadingSession, DomainError> {
    if input.duration < 1 {
        return Err(DomainError::Validation(
            "duration must be at least one minute".to_string(),
        ));
    }
    if chrono::NaiveDate::parse_from_str(&input.date, "%Y-%m-%d").is_err() {
        return Err(DomainError::Validation(format!(
            "invalid session date '{}'",
            input.date
        )));
    }

    let book_exists = book::Entity::find_by_id(input.book_id)
        .filter(book::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .is_some();
    if !book_exists {
        return Err(DomainError::Validation(
            "book not found for this user".to_string(),
        ));
    }

    let now = chrono::Utc::now();

    let session = SessionActiveModel {
        user_id: Set(user_id.to_string()),
        book_id: Set(input.book_id),
        duration: Set(input.duration),
        date: Set(input.date),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    };

    let model = session.insert(db).await?;
    Ok(ReadingSession::from(model))
}
