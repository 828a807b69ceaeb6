use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::decks::DeckFormat;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "created_by")]
    pub created_by: Option<i64>,
    pub name: String,
    /// Unpublished events are invisible to registration.
    #[sea_orm(column_name = "is_published")]
    pub is_published: bool,
    #[sea_orm(column_name = "starts_at")]
    pub starts_at: OffsetDateTime,
    /// Registration capacity; null means unlimited.
    #[sea_orm(column_name = "max_players")]
    pub max_players: Option<i32>,
    /// Play format decks are validated against; null means casual.
    pub format: Option<DeckFormat>,
    /// Point ceiling for Genesys events; null means no ceiling.
    #[sea_orm(column_name = "genesys_points_cap")]
    pub genesys_points_cap: Option<i32>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::event_registrations::Entity")]
    EventRegistrations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::event_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRegistrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
