use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    // Chat platform account id
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    // Last seen display name
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Flag).string())
                    // JSON {lat, lng}
                    .col(ColumnDef::new(Users::PreviousGuess).string())
                    // JSON {lat, lng}
                    .col(ColumnDef::new(Users::LastLocation).string())
                    // Watermark: guesses at or before this instant are
                    // excluded from current stats
                    .col(
                        ColumnDef::new(Users::ResetAt)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    // Session token from the game provider
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Games::Map).string().not_null())
                    .col(ColumnDef::new(Games::MapName).string().not_null())
                    // JSON {min: LatLng, max: LatLng}, for the scoring scale
                    .col(ColumnDef::new(Games::MapBounds).string().not_null())
                    .col(ColumnDef::new(Games::ForbidMoving).boolean().not_null())
                    .col(ColumnDef::new(Games::ForbidPanning).boolean().not_null())
                    .col(ColumnDef::new(Games::ForbidZooming).boolean().not_null())
                    // Seconds
                    .col(ColumnDef::new(Games::TimeLimit).integer())
                    .col(ColumnDef::new(Games::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rounds::GameId).string().not_null())
                    // JSON {lat, lng, panoId, heading, pitch}
                    .col(ColumnDef::new(Rounds::Location).string().not_null())
                    // Country code of the target
                    .col(ColumnDef::new(Rounds::Country).string())
                    .col(ColumnDef::new(Rounds::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_game_id")
                            .from(Rounds::Table, Rounds::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Guesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guesses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guesses::UserId).string().not_null())
                    .col(ColumnDef::new(Guesses::RoundId).string().not_null())
                    // User color at the time the guess was made
                    .col(ColumnDef::new(Guesses::Color).string())
                    // User flag at the time the guess was made
                    .col(ColumnDef::new(Guesses::Flag).string())
                    // JSON {lat, lng}
                    .col(ColumnDef::new(Guesses::Location).string().not_null())
                    // Country code where the guess was placed
                    .col(ColumnDef::new(Guesses::Country).string())
                    .col(
                        ColumnDef::new(Guesses::Streak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    // Metres, as computed by the caller
                    .col(ColumnDef::new(Guesses::Distance).double().not_null())
                    .col(ColumnDef::new(Guesses::Score).integer().not_null())
                    .col(ColumnDef::new(Guesses::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guesses_user_id")
                            .from(Guesses::Table, Guesses::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guesses_round_id")
                            .from(Guesses::Table, Guesses::RoundId)
                            .to(Rounds::Table, Rounds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guesses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    Flag,
    PreviousGuess,
    LastLocation,
    ResetAt,
}

#[derive(DeriveIden)]
pub(crate) enum Games {
    Table,
    Id,
    Map,
    MapName,
    MapBounds,
    ForbidMoving,
    ForbidPanning,
    ForbidZooming,
    TimeLimit,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Rounds {
    Table,
    Id,
    GameId,
    Location,
    Country,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Guesses {
    Table,
    Id,
    UserId,
    RoundId,
    Color,
    Flag,
    Location,
    Country,
    Streak,
    Distance,
    Score,
    CreatedAt,
}
