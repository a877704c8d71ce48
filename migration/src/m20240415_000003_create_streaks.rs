use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_base_tables::{Rounds, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Streaks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Streaks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Streaks::UserId).string().not_null())
                    .col(ColumnDef::new(Streaks::LastRoundId).string().not_null())
                    .col(
                        ColumnDef::new(Streaks::Count)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Streaks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Streaks::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_streaks_user_id")
                            .from(Streaks::Table, Streaks::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_streaks_last_round_id")
                            .from(Streaks::Table, Streaks::LastRoundId)
                            .to(Rounds::Table, Rounds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The current-streak pointer. Multiple historical streak rows per
        // user are allowed; only the pointed-at one is "current".
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .add_column(ColumnDef::new(Streaks::CurrentStreakId).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .drop_column(Streaks::CurrentStreakId)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Streaks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Streaks {
    Table,
    Id,
    UserId,
    LastRoundId,
    Count,
    CreatedAt,
    UpdatedAt,
    // users.current_streak_id, added alongside this table
    CurrentStreakId,
}
