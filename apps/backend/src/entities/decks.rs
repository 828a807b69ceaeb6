use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Play format a deck (or event) is built for. Stored as its storefront
/// string; absent means casual play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "deck_format")]
pub enum DeckFormat {
    #[sea_orm(string_value = "TCG")]
    Tcg,
    #[sea_orm(string_value = "OCG")]
    Ocg,
    #[sea_orm(string_value = "GOAT")]
    Goat,
    #[sea_orm(string_value = "EDISON")]
    Edison,
    #[sea_orm(string_value = "GENESYS")]
    Genesys,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "decks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "owner_id")]
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub format: Option<DeckFormat>,
    /// Soft-delete flag: deleted decks stay referenced by past registrations.
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::deck_cards::Entity")]
    DeckCards,
    #[sea_orm(has_many = "super::event_registrations::Entity")]
    EventRegistrations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::deck_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeckCards.def()
    }
}

impl Related<super::event_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRegistrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
