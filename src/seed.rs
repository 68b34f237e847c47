//! Demo data for local development, gated by SEED_DEMO.

use chrono::Datelike;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::auth::hash_password;
use crate::models::reading_record::ReadingStatus;
use crate::models::{book, profile, reading_goal, reading_record, reading_session, user};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now();
    let user_id = "00000000-0000-0000-0000-000000000001".to_string();

    let password_hash =
        hash_password("demo1234").map_err(|e| DbErr::Custom(format!("hash failed: {}", e)))?;

    let demo_user = user::ActiveModel {
        id: Set(user_id.clone()),
        email: Set("demo@readmark.local".to_owned()),
        password_hash: Set(password_hash),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
    };
    demo_user.insert(db).await?;

    let demo_profile = profile::ActiveModel {
        id: Set(user_id.clone()),
        display_name: Set(Some("Demo Reader".to_owned())),
        bio: Set(None),
        avatar_url: Set(None),
        notifications_enabled: Set(Some(true)),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
    };
    demo_profile.insert(db).await?;

    let titles = [
        ("The Left Hand of Darkness", "Ursula K. Le Guin", "sf"),
        ("The Remains of the Day", "Kazuo Ishiguro", "fiction"),
        ("A Wizard of Earthsea", "Ursula K. Le Guin", "sf"),
    ];

    let mut book_ids = Vec::new();
    for (title, author, genre) in titles {
        let model = book::ActiveModel {
            user_id: Set(user_id.clone()),
            title: Set(title.to_owned()),
            author: Set(author.to_owned()),
            description: Set(None),
            published_year: Set(None),
            genre: Set(Some(genre.to_owned())),
            created_at: Set(now.to_rfc3339()),
            updated_at: Set(now.to_rfc3339()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        book_ids.push(model.id);
    }

    // One finished, one in progress
    reading_record::ActiveModel {
        user_id: Set(user_id.clone()),
        book_id: Set(book_ids[0]),
        status: Set(ReadingStatus::Finished),
        progress: Set(100),
        thoughts: Set(Some("Slow start, remarkable ending.".to_owned())),
        completed_at: Set(Some(now.to_rfc3339())),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    reading_record::ActiveModel {
        user_id: Set(user_id.clone()),
        book_id: Set(book_ids[1]),
        status: Set(ReadingStatus::InProgress),
        progress: Set(40),
        thoughts: Set(None),
        completed_at: Set(None),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    reading_session::ActiveModel {
        user_id: Set(user_id.clone()),
        book_id: Set(book_ids[0]),
        duration: Set(45),
        date: Set(now.format("%Y-%m-%d").to_string()),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    reading_goal::ActiveModel {
        user_id: Set(user_id),
        year: Set(now.year()),
        target_books: Set(24),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(())
}
