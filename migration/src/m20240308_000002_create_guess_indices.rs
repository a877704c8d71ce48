use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_base_tables::{Guesses, Rounds};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("guess_user_id")
                    .table(Guesses::Table)
                    .col(Guesses::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("guess_round_id")
                    .table(Guesses::Table)
                    .col(Guesses::RoundId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("round_game_id")
                    .table(Rounds::Table)
                    .col(Rounds::GameId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("guess_user_id")
                    .table(Guesses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("guess_round_id")
                    .table(Guesses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("round_game_id")
                    .table(Rounds::Table)
                    .to_owned(),
            )
            .await
    }
}
