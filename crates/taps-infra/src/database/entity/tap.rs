//! Tap entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "taps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tag_uid: i64,
    pub count: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagUid",
        to = "super::tag::Column::TagUid",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Tag,
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Tap.
impl From<Model> for taps_core::domain::Tap {
    fn from(model: Model) -> Self {
        Self {
            tag_uid: model.tag_uid,
            count: model.count,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Tap to SeaORM ActiveModel. The id is assigned by the database.
impl From<taps_core::domain::Tap> for ActiveModel {
    fn from(tap: taps_core::domain::Tap) -> Self {
        Self {
            id: NotSet,
            tag_uid: Set(tap.tag_uid),
            count: Set(tap.count),
            created_at: Set(tap.created_at.into()),
        }
    }
}
