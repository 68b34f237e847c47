//! User profile read/update. The row is created at registration time.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::profile::{ActiveModel as ProfileActiveModel, Entity as ProfileEntity, Model};

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub display_name: Option<Option<String>>,
    #[serde(default)]
    pub bio: Option<Option<String>>,
    #[serde(default)]
    pub avatar_url: Option<Option<String>>,
    #[serde(default)]
    pub notifications_enabled: Option<Option<bool>>,
}

pub async fn get_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<Model>, DomainError> {
    let profile = ProfileEntity::find_by_id(user_id.to_string()).one(db).await?;
    Ok(profile)
}

pub async fn update_profile(
    db: &DatabaseConnection,
    user_id: &str,
    update: ProfileUpdate,
) -> Result<Model, DomainError> {
    let model = ProfileEntity::find_by_id(user_id.to_string())
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let mut profile: ProfileActiveModel = model.into();

    if let Some(display_name) = update.display_name {
        profile.display_name = Set(display_name);
    }
    if let Some(bio) = update.bio {
        profile.bio = Set(bio);
    }
    if let Some(avatar_url) = update.avatar_url {
        profile.avatar_url = Set(avatar_url);
    }
    if let Some(notifications_enabled) = update.notifications_enabled {
        profile.notifications_enabled = Set(notifications_enabled);
    }
    profile.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = profile.update(db).await?;
    Ok(model)
}

/// Create the implicit profile row alongside a new account
pub async fn create_profile(db: &DatabaseConnection, user_id: &str) -> Result<Model, DomainError> {
    let now = chrono::Utc::now();

    let profile = ProfileActiveModel {
        id: Set(user_id.to_string()),
        display_name: Set(None),
        bio: Set(None),
        avatar_url: Set(None),
        notifications_enabled: Set(None),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
    };

    let model = profile.insert(db).await?;
    Ok(model)
}
