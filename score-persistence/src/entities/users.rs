use sea_orm::entity::prelude::*;

/// A chat user. Never hard-deleted; a stats reset only advances `reset_at`
/// and clears the current-streak pointer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Chat platform account id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Last seen display name.
    pub username: String,
    pub flag: Option<String>,
    /// JSON `{lat, lng}`.
    pub previous_guess: Option<String>,
    /// JSON `{lat, lng}`.
    pub last_location: Option<String>,
    /// Unix seconds; guesses at or before this are excluded from stats.
    pub reset_at: i64,
    pub current_streak_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::guesses::Entity")]
    Guesses,
    #[sea_orm(has_many = "super::streaks::Entity")]
    Streaks,
}

impl Related<super::guesses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guesses.def()
    }
}

impl Related<super::streaks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Streaks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
