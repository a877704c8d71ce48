use anyhow::{anyhow, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::entities::{prelude::*, users};
use crate::repositories::timestamp;
use score_types::{LatLng, LegacyUser, User};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_user(model: users::Model) -> Result<User> {
        let previous_guess = model
            .previous_guess
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let last_location = model
            .last_location
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(User {
            id: model.id,
            username: model.username,
            flag: model.flag,
            previous_guess,
            last_location,
            reset_at: model.reset_at,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let model = Users::find_by_id(id).one(&self.db).await?;
        model.map(Self::model_to_user).transpose()
    }

    /// Upserts a user, always refreshing the display name to the latest
    /// value seen in chat.
    pub async fn get_or_create_user(&self, id: &str, username: &str) -> Result<User> {
        let user = users::ActiveModel {
            id: Set(id.to_owned()),
            username: Set(username.to_owned()),
            ..Default::default()
        };

        Users::insert(user)
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .update_column(users::Column::Username)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        let model = Users::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("user {id} missing right after upsert"))?;
        Self::model_to_user(model)
    }

    /// Seeds a user row from a legacy-store entry, carrying over the identity
    /// fields the old store knew about.
    pub async fn migrate_user(
        &self,
        id: &str,
        username: &str,
        legacy: &LegacyUser,
    ) -> Result<User> {
        debug!(id, username, "migrating user from legacy store");
        let previous_guess = legacy
            .previous_guess
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let last_location = legacy
            .last_location
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let user = users::ActiveModel {
            id: Set(id.to_owned()),
            username: Set(username.to_owned()),
            flag: Set(legacy.flag.clone()),
            previous_guess: Set(previous_guess),
            last_location: Set(last_location),
            ..Default::default()
        };

        Users::insert(user).exec_without_returning(&self.db).await?;

        let model = Users::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("user {id} missing right after migration"))?;
        Self::model_to_user(model)
    }

    pub async fn set_user_flag(&self, user_id: &str, flag: &str) -> Result<()> {
        Users::update_many()
            .col_expr(users::Column::Flag, Expr::value(flag.to_owned()))
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn set_user_last_location(&self, user_id: &str, location: &LatLng) -> Result<()> {
        Users::update_many()
            .col_expr(
                users::Column::LastLocation,
                Expr::value(serde_json::to_string(location)?),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Detaches the current streak and advances the reset watermark to now.
    /// No guess, round, or streak row is deleted.
    pub async fn reset_user_stats(&self, user_id: &str) -> Result<()> {
        debug!(user_id, "resetting user stats");
        Users::update_many()
            .col_expr(
                users::Column::CurrentStreakId,
                Expr::value(Option::<String>::None),
            )
            .col_expr(users::Column::ResetAt, Expr::value(timestamp()))
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
