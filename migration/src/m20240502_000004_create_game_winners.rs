use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // sea-query has no view builder; raw SQL it is.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE VIEW game_winners (id, user_id, score) AS
                -- Only count completed games (with at least 5 rounds),
                -- else there is no winner yet
                WITH completed_games AS (
                    SELECT games.id
                    FROM games, rounds
                    WHERE rounds.game_id = games.id
                    GROUP BY games.id
                    HAVING COUNT(rounds.id) >= 5
                ),
                -- All users' total scores in each completed game
                game_scores AS (
                    SELECT guesses.user_id, completed_games.id AS game_id,
                           SUM(guesses.score) AS score
                    FROM completed_games
                    LEFT JOIN rounds ON rounds.game_id = completed_games.id
                    LEFT JOIN guesses ON guesses.round_id = rounds.id
                    GROUP BY guesses.user_id, completed_games.id
                )
                SELECT completed_games.id, top_scores.user_id, top_scores.score
                FROM completed_games
                -- Matches every user tied for the top total score, so a tie
                -- yields multiple winner rows
                LEFT JOIN (
                    SELECT game_scores.user_id, game_scores.game_id, top.score
                    FROM game_scores
                    JOIN (
                        SELECT game_id, MAX(score) AS score
                        FROM game_scores
                        GROUP BY game_id
                    ) top ON top.game_id = game_scores.game_id
                         AND top.score = game_scores.score
                ) top_scores ON completed_games.id = top_scores.game_id
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP VIEW game_winners")
            .await?;

        Ok(())
    }
}
