use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reading_record::Entity")]
    ReadingRecords,
    #[sea_orm(has_many = "super::reading_session::Entity")]
    ReadingSessions,
}

impl Related<super::reading_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingRecords.def()
    }
}

impl Related<super::reading_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<i32>,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            author: model.author,
            description: model.description,
            published_year: model.published_year,
            genre: model.genre,
        }
    }
}

impl From<Book> for ActiveModel {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.map_or(NotSet, Set),
            title: Set(book.title),
            author: Set(book.author),
            description: Set(book.description),
            published_year: Set(book.published_year),
            genre: Set(book.genre),
            user_id: NotSet,
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}
