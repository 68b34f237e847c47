use readmark::db;
use readmark::domain::DomainError;
use readmark::models::reading_goal;
use readmark::services::{goal_service, record_service};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_user(db: &DatabaseConnection, email: &str) -> String {
    let now = chrono::Utc::now().to_rfc3339();
    let id = uuid::Uuid::new_v4().to_string();
    let user = readmark::models::user::ActiveModel {
        id: Set(id.clone()),
        email: Set(email.to_string()),
        password_hash: Set("hash".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    user.insert(db).await.expect("Failed to create user");
    id
}

async fn create_test_book(db: &DatabaseConnection, user_id: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let book = readmark::models::book::ActiveModel {
        user_id: Set(user_id.to_string()),
        title: Set("Goal Book".to_string()),
        author: Set("Author".to_string()),
        description: Set(None),
        published_year: Set(None),
        genre: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    book.insert(db).await.expect("Failed to create book").id
}

async fn goal_row_count(db: &DatabaseConnection, user_id: &str, year: i32) -> u64 {
    reading_goal::Entity::find()
        .filter(reading_goal::Column::UserId.eq(user_id))
        .filter(reading_goal::Column::Year.eq(year))
        .count(db)
        .await
        .expect("count failed")
}

#[tokio::test]
async fn upserting_twice_leaves_one_row_with_second_target() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "upsert@example.com").await;

    goal_service::upsert_goal(&db, &user_id, 2024, 12)
        .await
        .expect("first upsert failed");
    let goal = goal_service::upsert_goal(&db, &user_id, 2024, 20)
        .await
        .expect("second upsert failed");

    assert_eq!(goal.target_books, 20);
    assert_eq!(goal_row_count(&db, &user_id, 2024).await, 1);
}

#[tokio::test]
async fn goals_for_different_years_coexist() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "years@example.com").await;

    goal_service::upsert_goal(&db, &user_id, 2024, 12)
        .await
        .expect("upsert failed");
    goal_service::upsert_goal(&db, &user_id, 2025, 18)
        .await
        .expect("upsert failed");

    let g2024 = goal_service::get_goal(&db, &user_id, 2024)
        .await
        .expect("get failed")
        .expect("goal missing");
    let g2025 = goal_service::get_goal(&db, &user_id, 2025)
        .await
        .expect("get failed")
        .expect("goal missing");
    assert_eq!(g2024.target_books, 12);
    assert_eq!(g2025.target_books, 18);
}

#[tokio::test]
async fn upsert_rejects_invalid_input_before_touching_the_store() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "invalid@example.com").await;

    let err = goal_service::upsert_goal(&db, &user_id, 2024, 0)
        .await
        .expect_err("zero target must fail");
    assert!(matches!(err, DomainError::Validation(_)));

    let err = goal_service::upsert_goal(&db, "", 2024, 5)
        .await
        .expect_err("empty user must fail");
    assert!(matches!(err, DomainError::Validation(_)));

    assert_eq!(goal_row_count(&db, &user_id, 2024).await, 0);
}

#[tokio::test]
async fn progress_is_undefined_without_a_goal() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "nogoal@example.com").await;
    let book_id = create_test_book(&db, &user_id).await;

    // A finished book without a goal still gives no percentage
    record_service::create_record(
        &db,
        &user_id,
        record_service::RecordInput {
            book_id,
            status: None,
            progress: Some(100),
            thoughts: None,
        },
    )
    .await
    .expect("record failed");

    let year = chrono::Utc::now().format("%Y").to_string().parse().unwrap();
    let progress = goal_service::goal_progress(&db, &user_id, year)
        .await
        .expect("progress failed");

    assert!(progress.goal.is_none());
    assert_eq!(progress.completed_books, 1);
    // "no goal" is None, not 0%
    assert!(progress.progress.is_none());
}

#[tokio::test]
async fn progress_is_completed_over_target() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "progress@example.com").await;
    let book_id = create_test_book(&db, &user_id).await;

    let year: i32 = chrono::Utc::now().format("%Y").to_string().parse().unwrap();
    goal_service::upsert_goal(&db, &user_id, year, 12)
        .await
        .expect("upsert failed");

    for _ in 0..3 {
        record_service::create_record(
            &db,
            &user_id,
            record_service::RecordInput {
                book_id,
                status: None,
                progress: Some(100),
                thoughts: None,
            },
        )
        .await
        .expect("record failed");
    }

    let progress = goal_service::goal_progress(&db, &user_id, year)
        .await
        .expect("progress failed");
    assert_eq!(progress.completed_books, 3);
    assert_eq!(progress.progress, Some(25.0));
}

#[tokio::test]
async fn finished_count_ignores_other_years_and_users() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "scoped@example.com").await;
    let other = create_test_user(&db, "other@example.com").await;
    let book_id = create_test_book(&db, &user_id).await;
    let other_book = create_test_book(&db, &other).await;

    let now = chrono::Utc::now();
    let year: i32 = now.format("%Y").to_string().parse().unwrap();

    // One finished last year for the same user
    let last_year = now - chrono::Duration::days(400);
    readmark::models::reading_record::ActiveModel {
        user_id: Set(user_id.clone()),
        book_id: Set(book_id),
        status: Set(readmark::models::ReadingStatus::Finished),
        progress: Set(100),
        thoughts: Set(None),
        completed_at: Set(Some(last_year.to_rfc3339())),
        created_at: Set(last_year.to_rfc3339()),
        updated_at: Set(last_year.to_rfc3339()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert failed");

    // One finished this year for a different user
    record_service::create_record(
        &db,
        &other,
        record_service::RecordInput {
            book_id: other_book,
            status: None,
            progress: Some(100),
            thoughts: None,
        },
    )
    .await
    .expect("record failed");

    let count = goal_service::finished_in_year(&db, &user_id, year)
        .await
        .expect("count failed");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn deleting_a_goal_distinguishes_missing_rows() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db, "delete@example.com").await;

    goal_service::upsert_goal(&db, &user_id, 2024, 12)
        .await
        .expect("upsert failed");
    goal_service::delete_goal(&db, &user_id, 2024)
        .await
        .expect("delete failed");

    let err = goal_service::delete_goal(&db, &user_id, 2024)
        .await
        .expect_err("second delete must be NotFound");
    assert!(matches!(err, DomainError::NotFound));
}
