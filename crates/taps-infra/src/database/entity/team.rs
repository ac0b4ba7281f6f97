//! Team entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub token: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tag::Entity")]
    Tag,
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Team.
impl From<Model> for taps_core::domain::Team {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            token: model.token,
        }
    }
}

/// Conversion from Domain Team to SeaORM ActiveModel.
impl From<taps_core::domain::Team> for ActiveModel {
    fn from(team: taps_core::domain::Team) -> Self {
        Self {
            id: Set(team.id),
            name: Set(team.name),
            token: Set(team.token),
        }
    }
}
