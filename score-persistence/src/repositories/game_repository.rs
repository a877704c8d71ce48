use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, QueryFilter, Set,
    Statement,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{games, guesses, prelude::*, rounds};
use crate::repositories::timestamp;
use score_types::{GameSeed, NewGuess, RoundLocation, UserGuess};

#[derive(Debug, FromQueryResult)]
struct RoundIdRow {
    id: String,
}

/// Games, rounds, and guesses. Ordering correctness (which round is open,
/// whether a user already guessed) is owned by the surrounding controller;
/// this layer only persists.
pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new game session. Inserting the same token twice is a hard
    /// error, not an upsert.
    pub async fn create_game(&self, seed: &GameSeed) -> Result<()> {
        debug!(token = %seed.token, map = %seed.map_name, "creating game");
        let game = games::ActiveModel {
            id: Set(seed.token.clone()),
            map: Set(seed.map.clone()),
            map_name: Set(seed.map_name.clone()),
            map_bounds: Set(serde_json::to_string(&seed.bounds)?),
            forbid_moving: Set(seed.forbid_moving),
            forbid_panning: Set(seed.forbid_rotating),
            forbid_zooming: Set(seed.forbid_zooming),
            time_limit: Set(seed.time_limit),
            created_at: Set(timestamp()),
        };

        Games::insert(game).exec_without_returning(&self.db).await?;
        Ok(())
    }

    /// Records a round and returns its generated id. The game id is not
    /// validated here; rounds for unknown games are the controller's bug.
    pub async fn create_round(&self, game_id: &str, location: &RoundLocation) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let round = rounds::ActiveModel {
            id: Set(id.clone()),
            game_id: Set(game_id.to_owned()),
            location: Set(serde_json::to_string(location)?),
            country: Set(None),
            created_at: Set(timestamp()),
        };

        Rounds::insert(round).exec_without_returning(&self.db).await?;
        Ok(id)
    }

    /// The most recently created round of a game, if any. Timestamps only
    /// have second resolution, so rounds created within the same second fall
    /// back to insertion order.
    pub async fn get_current_round(&self, game_id: &str) -> Result<Option<String>> {
        let round = RoundIdRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            SELECT id FROM rounds
            WHERE game_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
            [game_id.into()],
        ))
        .one(&self.db)
        .await?;

        Ok(round.map(|r| r.id))
    }

    /// Fills in the resolved country code of a round's target.
    pub async fn set_round_country(&self, round_id: &str, country: &str) -> Result<()> {
        Rounds::update_many()
            .col_expr(rounds::Column::Country, Expr::value(country.to_owned()))
            .filter(rounds::Column::Id.eq(round_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Always inserts a new guess row. Callers wanting first-guess-or-update
    /// semantics look up the existing guess first and branch to
    /// [`update_guess`](Self::update_guess) themselves.
    pub async fn create_guess(
        &self,
        round_id: &str,
        user_id: &str,
        guess: &NewGuess,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let row = guesses::ActiveModel {
            id: Set(id.clone()),
            round_id: Set(round_id.to_owned()),
            user_id: Set(user_id.to_owned()),
            color: Set(guess.color.clone()),
            flag: Set(guess.flag.clone()),
            location: Set(serde_json::to_string(&guess.location)?),
            country: Set(guess.country.clone()),
            streak: Set(guess.streak),
            distance: Set(guess.distance),
            score: Set(guess.score),
            created_at: Set(timestamp()),
        };

        Guesses::insert(row).exec_without_returning(&self.db).await?;
        Ok(id)
    }

    /// The existing guess of one user in one round, if any.
    pub async fn get_user_guess(&self, round_id: &str, user_id: &str) -> Result<Option<UserGuess>> {
        let row = Guesses::find()
            .filter(guesses::Column::RoundId.eq(round_id))
            .filter(guesses::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        row.map(|g| {
            Ok(UserGuess {
                id: g.id,
                color: g.color,
                flag: g.flag,
                location: serde_json::from_str(&g.location)?,
                country: g.country,
                streak: g.streak,
                distance: g.distance,
                score: g.score,
            })
        })
        .transpose()
    }

    /// Overwrites a guess in place. `created_at` is deliberately untouched:
    /// it carries the original submission order used for perfect-score
    /// tie-breaking.
    pub async fn update_guess(&self, guess_id: &str, guess: &NewGuess) -> Result<()> {
        Guesses::update_many()
            .col_expr(guesses::Column::Color, Expr::value(guess.color.clone()))
            .col_expr(guesses::Column::Flag, Expr::value(guess.flag.clone()))
            .col_expr(
                guesses::Column::Location,
                Expr::value(serde_json::to_string(&guess.location)?),
            )
            .col_expr(
                guesses::Column::Country,
                Expr::value(guess.country.clone()),
            )
            .col_expr(guesses::Column::Streak, Expr::value(guess.streak))
            .col_expr(guesses::Column::Distance, Expr::value(guess.distance))
            .col_expr(guesses::Column::Score, Expr::value(guess.score))
            .filter(guesses::Column::Id.eq(guess_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Late resolution of a guess's country and streak snapshot, once the
    /// round's target country is known.
    pub async fn set_guess_country(
        &self,
        guess_id: &str,
        country: &str,
        streak: i32,
    ) -> Result<()> {
        Guesses::update_many()
            .col_expr(guesses::Column::Country, Expr::value(country.to_owned()))
            .col_expr(guesses::Column::Streak, Expr::value(streak))
            .filter(guesses::Column::Id.eq(guess_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
