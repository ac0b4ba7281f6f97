//! Tag entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_uid: i64,
    pub team_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Team,
    #[sea_orm(has_many = "super::tap::Entity")]
    Tap,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::tap::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tap.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Tag.
impl From<Model> for taps_core::domain::Tag {
    fn from(model: Model) -> Self {
        Self {
            tag_uid: model.tag_uid,
            team_id: model.team_id,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Tag to SeaORM ActiveModel.
impl From<taps_core::domain::Tag> for ActiveModel {
    fn from(tag: taps_core::domain::Tag) -> Self {
        Self {
            tag_uid: Set(tag.tag_uid),
            team_id: Set(tag.team_id),
            created_at: Set(tag.created_at.into()),
        }
    }
}
