//! SeaORM adapter for decks and their card rows - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{deck_cards, decks};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<Option<decks::Model>, sea_orm::DbErr> {
    decks::Entity::find_by_id(deck_id).one(conn).await
}

/// Card rows of a deck, in insertion order.
pub async fn find_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<Vec<deck_cards::Model>, sea_orm::DbErr> {
    deck_cards::Entity::find()
        .filter(deck_cards::Column::DeckId.eq(deck_id))
        .order_by_asc(deck_cards::Column::Id)
        .all(conn)
        .await
}

/// New card row for a full-replace edit.
#[derive(Debug, Clone)]
pub struct DeckCardCreate {
    pub card_id: i64,
    pub quantity: i32,
    pub section: deck_cards::Section,
    pub card_data: serde_json::Value,
}

pub async fn delete_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = deck_cards::Entity::delete_many()
        .filter(deck_cards::Column::DeckId.eq(deck_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn insert_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
    cards: Vec<DeckCardCreate>,
) -> Result<(), sea_orm::DbErr> {
    if cards.is_empty() {
        return Ok(());
    }
    let now = time::OffsetDateTime::now_utc();
    let rows = cards.into_iter().map(|card| deck_cards::ActiveModel {
        id: NotSet,
        deck_id: Set(deck_id),
        card_id: Set(card.card_id),
        quantity: Set(card.quantity),
        section: Set(card.section),
        card_data: Set(card.card_data),
        created_at: Set(now),
    });
    deck_cards::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// Soft-delete: the row stays for past registrations to reference.
pub async fn mark_inactive<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck: decks::Model,
) -> Result<decks::Model, sea_orm::DbErr> {
    let mut active: decks::ActiveModel = deck.into();
    active.is_active = Set(false);
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(conn).await
}
