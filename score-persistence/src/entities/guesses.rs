use sea_orm::entity::prelude::*;

/// One user's submission for a round. Color, flag and streak are snapshots
/// taken at submission time; `created_at` carries original submission order
/// and survives in-place updates.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "guesses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub round_id: String,
    pub color: Option<String>,
    pub flag: Option<String>,
    /// JSON `{lat, lng}`.
    pub location: String,
    pub country: Option<String>,
    pub streak: i32,
    /// Kilometres, as computed by the caller.
    pub distance: f64,
    pub score: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id"
    )]
    Rounds,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
