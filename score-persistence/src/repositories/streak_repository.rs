use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, QueryFilter, Set,
    Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{prelude::*, streaks, users};
use crate::repositories::timestamp;
use score_types::CurrentStreak;

#[derive(Debug, FromQueryResult)]
struct CurrentStreakRow {
    id: String,
    count: i32,
    location: String,
}

/// The streak state machine. Per user it is either NoStreak (no pointer) or
/// ActiveStreak (pointer at a streaks row). Detaching never deletes the row;
/// history feeds best-streak stats.
pub struct StreakRepository {
    db: DatabaseConnection,
}

impl StreakRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The user's current streak joined with the last round's location, used
    /// to show the user their last-known approximate area.
    pub async fn get_user_streak(&self, user_id: &str) -> Result<Option<CurrentStreak>> {
        let row = CurrentStreakRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            SELECT streaks.id, streaks.count, rounds.location
            FROM users, streaks, rounds
            WHERE users.id = ?
              AND streaks.id = users.current_streak_id
              AND rounds.id = streaks.last_round_id
            "#,
            [user_id.into()],
        ))
        .one(&self.db)
        .await?;

        row.map(|r| {
            Ok(CurrentStreak {
                id: r.id,
                count: r.count,
                last_location: serde_json::from_str(&r.location)?,
            })
        })
        .transpose()
    }

    /// Correct-answer event for `round_id`: starts a streak at 1 or extends
    /// the active one. Creating the row and pointing the user at it happen in
    /// one transaction. Deduplicating per round is the caller's job.
    pub async fn add_user_streak(&self, user_id: &str, round_id: &str) -> Result<()> {
        let txn = self.db.begin().await?;

        let current = Users::find_by_id(user_id)
            .one(&txn)
            .await?
            .and_then(|u| u.current_streak_id);

        match current {
            Some(streak_id) => {
                Streaks::update_many()
                    .col_expr(
                        streaks::Column::Count,
                        Expr::col(streaks::Column::Count).add(1),
                    )
                    .col_expr(
                        streaks::Column::LastRoundId,
                        Expr::value(round_id.to_owned()),
                    )
                    .col_expr(streaks::Column::UpdatedAt, Expr::value(timestamp()))
                    .filter(streaks::Column::Id.eq(streak_id))
                    .exec(&txn)
                    .await?;
            }
            None => {
                let id = Uuid::new_v4().to_string();
                let now = timestamp();
                let streak = streaks::ActiveModel {
                    id: Set(id.clone()),
                    user_id: Set(user_id.to_owned()),
                    last_round_id: Set(round_id.to_owned()),
                    count: Set(1),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                Streaks::insert(streak).exec_without_returning(&txn).await?;

                Users::update_many()
                    .col_expr(users::Column::CurrentStreakId, Expr::value(id))
                    .filter(users::Column::Id.eq(user_id))
                    .exec(&txn)
                    .await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }

    /// Incorrect-answer event or explicit reset: detach the pointer, keep the
    /// row.
    pub async fn reset_user_streak(&self, user_id: &str) -> Result<()> {
        Users::update_many()
            .col_expr(
                users::Column::CurrentStreakId,
                Expr::value(Option::<String>::None),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
