use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed status enumeration for a reading record. The status is always
/// derived from the progress value through [`ReadingStatus::from_progress`];
/// no mutation path writes the two fields independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[sea_orm(string_value = "unread")]
    Unread,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "finished")]
    Finished,
}

impl ReadingStatus {
    /// progress = 0 means unread, 100 means finished, anything between is
    /// in progress. Callers clamp before calling.
    pub fn from_progress(progress: i32) -> Self {
        match progress {
            0 => ReadingStatus::Unread,
            100 => ReadingStatus::Finished,
            _ => ReadingStatus::InProgress,
        }
    }

    /// Progress value a bare status change anchors to. In-progress keeps
    /// the current value when it already sits strictly between the ends.
    pub fn anchor_progress(self, current: i32) -> i32 {
        match self {
            ReadingStatus::Unread => 0,
            ReadingStatus::Finished => 100,
            ReadingStatus::InProgress => {
                if (1..=99).contains(&current) {
                    current
                } else {
                    1
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reading_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub book_id: i32,
    pub status: ReadingStatus,
    pub progress: i32,
    pub thoughts: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Book fields embedded in record responses, mirroring what list and detail
/// views need without a second round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordBook {
    pub id: i32,
    pub title: String,
    pub author: String,
}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub id: i32,
    pub book_id: i32,
    pub status: ReadingStatus,
    pub progress: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thoughts: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub book: Option<RecordBook>,
}

impl ReadingRecord {
    pub fn from_model(model: Model, book: Option<super::book::Model>) -> Self {
        Self {
            id: model.id,
            book_id: model.book_id,
            status: model.status,
            progress: model.progress,
            thoughts: model.thoughts,
            completed_at: model.completed_at,
            created_at: model.created_at,
            book: book.map(|b| RecordBook {
                id: b.id,
                title: b.title,
                author: b.author,
            }),
        }
    }
}
