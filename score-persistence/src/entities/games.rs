use sea_orm::entity::prelude::*;

/// One played game session. Immutable once created.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    /// Session token from the game provider.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub map: String,
    pub map_name: String,
    /// JSON `{min: LatLng, max: LatLng}`, input to the scoring scale.
    pub map_bounds: String,
    pub forbid_moving: bool,
    pub forbid_panning: bool,
    pub forbid_zooming: bool,
    /// Seconds.
    pub time_limit: Option<i32>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rounds::Entity")]
    Rounds,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
