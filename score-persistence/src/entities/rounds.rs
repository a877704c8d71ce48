use sea_orm::entity::prelude::*;

/// One target location within a game. The current round of a game is the
/// most recently created one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub game_id: String,
    /// JSON `{lat, lng, panoId, heading, pitch}`.
    pub location: String,
    /// Resolved country code of the target, filled in late.
    pub country: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Games,
    #[sea_orm(has_many = "super::guesses::Entity")]
    Guesses,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Games.def()
    }
}

impl Related<super::guesses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guesses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
