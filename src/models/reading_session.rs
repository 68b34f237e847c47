use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A timed reading sitting. Only input to the average-reading-time
/// statistic; the API surface is a minimal create/list pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reading_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub book_id: i32,
    /// Minutes spent reading.
    pub duration: i32,
    pub date: String,
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

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSession {
    pub id: i32,
    pub book_id: i32,
    pub duration: i32,
    pub date: String,
}

impl From<Model> for ReadingSession {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            book_id: model.book_id,
            duration: model.duration,
            date: model.date,
        }
    }
}
