use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Which sub-deck a card row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "deck_section")]
pub enum Section {
    #[sea_orm(string_value = "MAIN")]
    Main,
    #[sea_orm(string_value = "EXTRA")]
    Extra,
    #[sea_orm(string_value = "SIDE")]
    Side,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deck_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "deck_id")]
    pub deck_id: i64,
    /// Numeric catalog id (passcode).
    #[sea_orm(column_name = "card_id")]
    pub card_id: i64,
    pub quantity: i32,
    pub section: Section,
    /// Frozen catalog snapshot captured when the card was added.
    #[sea_orm(column_name = "card_data")]
    pub card_data: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::decks::Entity",
        from = "Column::DeckId",
        to = "super::decks::Column::Id"
    )]
    Deck,
}

impl Related<super::decks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
