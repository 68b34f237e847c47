use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Yearly reading goal. At most one row per (user_id, year), enforced by a
/// unique index and the upsert in `goal_service`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reading_goals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub year: i32,
    pub target_books: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingGoal {
    pub id: i32,
    pub year: i32,
    pub target_books: i32,
}

impl From<Model> for ReadingGoal {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            year: model.year,
            target_books: model.target_books,
        }
    }
}
