use anyhow::Result;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

use score_types::{
    GameScore, GlobalStats, RoundParticipant, RoundScore, StatLeader, UserStats, PERFECT_SCORE,
};

#[derive(Debug, FromQueryResult)]
struct RoundScoreRow {
    guess_id: String,
    username: String,
    color: Option<String>,
    flag: Option<String>,
    location: String,
    streak: i32,
    distance: f64,
    score: i32,
}

#[derive(Debug, FromQueryResult)]
struct ParticipantRow {
    guess_id: String,
    username: String,
    color: Option<String>,
    flag: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct GameScoreRow {
    username: String,
    color: Option<String>,
    flag: Option<String>,
    streak: Option<i32>,
    rounds: i32,
    distance: f64,
    score: i32,
}

#[derive(Debug, FromQueryResult)]
struct UserStatsRow {
    username: String,
    flag: Option<String>,
    current_streak: i32,
    best_streak: i32,
    total_guesses: i64,
    correct_guesses: i64,
    perfects: i64,
    average: Option<f64>,
    victories: i64,
}

#[derive(Debug, FromQueryResult)]
struct LeaderRow {
    id: String,
    username: String,
    value: i64,
}

impl From<LeaderRow> for StatLeader {
    fn from(row: LeaderRow) -> Self {
        StatLeader {
            id: row.id,
            username: row.username,
            count: row.value,
        }
    }
}

/// Read-only ranking and aggregation over the guess history.
pub struct StatsRepository {
    db: DatabaseConnection,
}

impl StatsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Everyone who guessed in a round, by submission time, no scores. Shown
    /// while guesses are still open.
    pub async fn get_round_participants(&self, round_id: &str) -> Result<Vec<RoundParticipant>> {
        let rows = ParticipantRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            SELECT guesses.id AS guess_id, users.username, guesses.color, guesses.flag
            FROM guesses, users
            WHERE guesses.round_id = ? AND users.id = guesses.user_id
            ORDER BY guesses.created_at ASC
            "#,
            [round_id.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RoundParticipant {
                guess_id: r.guess_id,
                username: r.username,
                color: r.color,
                flag: r.flag,
            })
            .collect())
    }

    /// The round leaderboard: score descending. Ties among perfect scores
    /// break by submission time, any other tie by distance. The CASE key is
    /// only ever compared within a group of equal scores, so mixing seconds
    /// and meters in one expression is safe.
    pub async fn get_round_scores(&self, round_id: &str) -> Result<Vec<RoundScore>> {
        let rows = RoundScoreRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            SELECT guesses.id AS guess_id, users.username, guesses.color,
                   guesses.flag, guesses.location, guesses.streak,
                   guesses.distance, guesses.score
            FROM guesses, users
            WHERE guesses.round_id = ?1 AND users.id = guesses.user_id
            ORDER BY guesses.score DESC,
                     CASE WHEN guesses.score = ?2 THEN guesses.created_at
                          ELSE guesses.distance END ASC
            "#,
            [round_id.into(), PERFECT_SCORE.into()],
        ))
        .all(&self.db)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(RoundScore {
                    guess_id: r.guess_id,
                    username: r.username,
                    color: r.color,
                    flag: r.flag,
                    position: serde_json::from_str(&r.location)?,
                    streak: r.streak,
                    distance: r.distance,
                    score: r.score,
                    modified: false,
                })
            })
            .collect()
    }

    /// The game leaderboard: per-user totals, ordered by summed score. The
    /// streak column is whatever the user's chronologically last guess in
    /// this game recorded, not a live recomputation — the streaks table
    /// cannot answer "what was the streak back then".
    pub async fn get_game_scores(&self, game_id: &str) -> Result<Vec<GameScore>> {
        let rows = GameScoreRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            SELECT users.username, guesses.color, users.flag,
                   (
                       SELECT ig.streak
                       FROM guesses ig, rounds ir
                       WHERE ir.game_id = rounds.game_id
                         AND ig.round_id = ir.id
                         AND ig.user_id = users.id
                       ORDER BY ig.created_at DESC
                       LIMIT 1
                   ) AS streak,
                   COUNT(guesses.id) AS rounds,
                   SUM(guesses.distance) AS distance,
                   SUM(guesses.score) AS score
            FROM rounds, guesses, users
            WHERE rounds.game_id = ?
              AND guesses.round_id = rounds.id
              AND users.id = guesses.user_id
            GROUP BY guesses.user_id
            ORDER BY score DESC
            "#,
            [game_id.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| GameScore {
                username: r.username,
                color: r.color,
                flag: r.flag,
                streak: r.streak.unwrap_or(0),
                rounds: r.rounds,
                distance: r.distance,
                score: r.score,
            })
            .collect())
    }

    /// Lifetime stats for one user, or `None` for an unknown user. Everything
    /// except victories honors the reset watermark; a game, once won, stays
    /// won.
    pub async fn get_user_stats(&self, user_id: &str) -> Result<Option<UserStats>> {
        let row = UserStatsRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            SELECT users.username, users.flag,
                   COALESCE(current_streak.count, 0) AS current_streak,
                   COALESCE((
                       SELECT MAX(count) FROM streaks
                       WHERE user_id = users.id AND updated_at > users.reset_at
                   ), 0) AS best_streak,
                   (
                       SELECT COUNT(*) FROM guesses
                       WHERE user_id = users.id AND created_at > users.reset_at
                   ) AS total_guesses,
                   (
                       SELECT COUNT(*) FROM guesses
                       WHERE user_id = users.id AND streak > 0
                         AND created_at > users.reset_at
                   ) AS correct_guesses,
                   (
                       SELECT COUNT(*) FROM guesses
                       WHERE user_id = users.id AND score = ?2
                         AND created_at > users.reset_at
                   ) AS perfects,
                   (
                       SELECT AVG(score) FROM guesses
                       WHERE user_id = users.id AND created_at > users.reset_at
                   ) AS average,
                   (
                       SELECT COUNT(*) FROM game_winners
                       WHERE user_id = users.id
                   ) AS victories
            FROM users
            LEFT JOIN streaks current_streak
                   ON current_streak.id = users.current_streak_id
            WHERE users.id = ?1
            "#,
            [user_id.into(), PERFECT_SCORE.into()],
        ))
        .one(&self.db)
        .await?;

        Ok(row.map(|r| UserStats {
            username: r.username,
            flag: r.flag,
            streak: r.current_streak,
            best_streak: r.best_streak,
            nb_guesses: r.total_guesses,
            correct_guesses: r.correct_guesses,
            mean_score: r.average,
            perfects: r.perfects,
            victories: r.victories,
        }))
    }

    /// Channel-wide records: best streak ever, most victories, most perfect
    /// guesses, each with the user holding it.
    pub async fn get_global_stats(&self) -> Result<GlobalStats> {
        let streak = LeaderRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            r#"
            SELECT users.id, users.username, MAX(streaks.count) AS value
            FROM users, streaks
            WHERE streaks.user_id = users.id
              AND streaks.created_at > users.reset_at
            GROUP BY users.id
            ORDER BY value DESC
            LIMIT 1
            "#,
        ))
        .one(&self.db)
        .await?;

        let victories = LeaderRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            r#"
            SELECT users.id, users.username, COUNT(*) AS value
            FROM game_winners
            LEFT JOIN users ON users.id = game_winners.user_id
            WHERE game_winners.user_id IS NOT NULL
            GROUP BY users.id
            ORDER BY value DESC
            LIMIT 1
            "#,
        ))
        .one(&self.db)
        .await?;

        let perfects = LeaderRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"
            SELECT users.id, users.username, COUNT(guesses.id) AS value
            FROM users
            LEFT JOIN guesses ON guesses.user_id = users.id
                             AND guesses.created_at > users.reset_at
            WHERE guesses.score = ?
            GROUP BY users.id
            ORDER BY value DESC
            LIMIT 1
            "#,
            [PERFECT_SCORE.into()],
        ))
        .one(&self.db)
        .await?;

        Ok(GlobalStats {
            streak: streak.map(Into::into),
            victories: victories.map(Into::into),
            perfects: perfects.map(Into::into),
        })
    }
}
