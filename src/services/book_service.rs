//! Book CRUD scoped by owning user.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::Book;
use crate::models::book::{ActiveModel as BookActiveModel, Column, Entity as BookEntity};
use crate::models::reading_record;

/// Filter parameters for listing books
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

/// Input payload for creating or updating a book
#[derive(Debug, Clone, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Book detail with its reading records, as the detail view consumes it.
#[derive(Debug, serde::Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub reading_records: Vec<crate::models::ReadingRecord>,
}

fn validate_input(input: &BookInput) -> Result<(), DomainError> {
    if input.title.trim().is_empty() {
        return Err(DomainError::Validation("title is required".to_string()));
    }
    if input.author.trim().is_empty() {
        return Err(DomainError::Validation("author is required".to_string()));
    }
    Ok(())
}

/// List the user's books with optional substring filters
pub async fn list_books(
    db: &DatabaseConnection,
    user_id: &str,
    filter: BookFilter,
) -> Result<Vec<Book>, DomainError> {
    tracing::debug!(
        "List books for user {} - filters: title={:?}, author={:?}, genre={:?}",
        user_id,
        filter.title,
        filter.author,
        filter.genre
    );

    let mut query = BookEntity::find().filter(Column::UserId.eq(user_id));

    if let Some(title) = &filter.title {
        if !title.is_empty() {
            query = query.filter(Column::Title.contains(title));
        }
    }

    if let Some(author) = &filter.author {
        if !author.is_empty() {
            query = query.filter(Column::Author.contains(author));
        }
    }

    if let Some(genre) = &filter.genre {
        if !genre.is_empty() {
            query = query.filter(Column::Genre.eq(genre));
        }
    }

    let books = query.order_by_asc(Column::Id).all(db).await?;

    Ok(books.into_iter().map(Book::from).collect())
}

/// Get a single book with its reading records. `Ok(None)` means the row is
/// absent for this owner; store failures surface separately.
pub async fn get_book(
    db: &DatabaseConnection,
    user_id: &str,
    id: i32,
) -> Result<Option<BookDetail>, DomainError> {
    let book_model = BookEntity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?;

    let Some(model) = book_model else {
        return Ok(None);
    };

    let records = model
        .find_related(reading_record::Entity)
        .order_by_desc(reading_record::Column::Id)
        .all(db)
        .await?;

    Ok(Some(BookDetail {
        book: Book::from(model),
        reading_records: records
            .into_iter()
            .map(|r| crate::models::ReadingRecord::from_model(r, None))
            .collect(),
    }))
}

/// Create a new book for the user
pub async fn create_book(
    db: &DatabaseConnection,
    user_id: &str,
    input: BookInput,
) -> Result<Book, DomainError> {
    validate_input(&input)?;

    let now = chrono::Utc::now();

    let new_book = BookActiveModel {
        user_id: Set(user_id.to_string()),
        title: Set(input.title),
        author: Set(input.author),
        description: Set(input.description),
        published_year: Set(input.published_year),
        genre: Set(input.genre),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    };

    let model = new_book.insert(db).await?;
    tracing::info!("Created book {} for user {}", model.id, user_id);

    Ok(Book::from(model))
}

/// Update an existing book
pub async fn update_book(
    db: &DatabaseConnection,
    user_id: &str,
    id: i32,
    input: BookInput,
) -> Result<Book, DomainError> {
    validate_input(&input)?;

    let book_model = BookEntity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let now = chrono::Utc::now();

    let mut book: BookActiveModel = book_model.into();
    book.title = Set(input.title);
    book.author = Set(input.author);
    book.description = Set(input.description);
    book.published_year = Set(input.published_year);
    book.genre = Set(input.genre);
    book.updated_at = Set(now.to_rfc3339());

    let model = book.update(db).await?;
    Ok(Book::from(model))
}

/// Delete a book. The store cascades the delete to its reading records.
pub async fn delete_book(
    db: &DatabaseConnection,
    user_id: &str,
    id: i32,
) -> Result<(), DomainError> {
    let result = BookEntity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DomainError::NotFound);
    }

    tracing::info!("Deleted book {} for user {}", id, user_id);
    Ok(())
}
