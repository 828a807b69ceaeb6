//! Deck repository functions for the domain layer.
//!
//! Snapshot JSON stored on each card row is decoded exactly once, here, when
//! a deck is loaded. A snapshot that no longer decodes is data corruption,
//! not a validation failure.

use sea_orm::ConnectionTrait;

use crate::adapters::decks_sea as decks_adapter;
use crate::domain::banlist::Format;
use crate::domain::cards::CardSnapshot;
use crate::domain::deck::{DeckEntry, DeckList, DeckSection};
use crate::entities::deck_cards::Section;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Deck domain model: row-level facts plus the decoded card list.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub id: i64,
    pub owner_id: i64,
    pub is_active: bool,
    pub list: DeckList,
}

impl From<Section> for DeckSection {
    fn from(value: Section) -> Self {
        match value {
            Section::Main => DeckSection::Main,
            Section::Extra => DeckSection::Extra,
            Section::Side => DeckSection::Side,
        }
    }
}

impl From<DeckSection> for Section {
    fn from(value: DeckSection) -> Self {
        match value {
            DeckSection::Main => Section::Main,
            DeckSection::Extra => Section::Extra,
            DeckSection::Side => Section::Side,
        }
    }
}

fn decode_snapshot(deck_id: i64, card_id: i64, raw: serde_json::Value) -> Result<CardSnapshot, DomainError> {
    serde_json::from_value(raw).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("deck {deck_id}: undecodable snapshot for card {card_id}: {e}"),
        )
    })
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<Option<Deck>, DomainError> {
    let Some(model) = decks_adapter::find_by_id(conn, deck_id).await? else {
        return Ok(None);
    };
    let rows = decks_adapter::find_cards(conn, deck_id).await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        entries.push(DeckEntry {
            card_id: row.card_id,
            quantity: u32::try_from(row.quantity).unwrap_or(0),
            section: row.section.into(),
            card: decode_snapshot(deck_id, row.card_id, row.card_data)?,
        });
    }

    Ok(Some(Deck {
        id: model.id,
        owner_id: model.owner_id,
        is_active: model.is_active,
        list: DeckList {
            name: model.name,
            description: model.description,
            format: model.format.map(Format::from),
            entries,
        },
    }))
}

/// Find deck by ID or return a domain error if it does not exist.
pub async fn require_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<Deck, DomainError> {
    find_by_id(conn, deck_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Deck, format!("deck {deck_id} not found"))
    })
}

/// One card of a full-replace edit, snapshot already captured.
#[derive(Debug, Clone)]
pub struct NewDeckCard {
    pub card_id: i64,
    pub quantity: u32,
    pub section: DeckSection,
    pub card: CardSnapshot,
}

/// Replace a deck's entire card collection (edit semantics are full-replace,
/// never incremental). The caller provides the surrounding transaction.
pub async fn replace_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
    cards: Vec<NewDeckCard>,
) -> Result<(), DomainError> {
    let mut rows = Vec::with_capacity(cards.len());
    for card in cards {
        let card_data = serde_json::to_value(&card.card).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("unencodable snapshot for card {}: {e}", card.card_id),
            )
        })?;
        rows.push(decks_adapter::DeckCardCreate {
            card_id: card.card_id,
            quantity: i32::try_from(card.quantity).unwrap_or(i32::MAX),
            section: card.section.into(),
            card_data,
        });
    }
    decks_adapter::delete_cards(conn, deck_id).await?;
    decks_adapter::insert_cards(conn, deck_id, rows).await?;
    Ok(())
}

/// Soft-delete a deck. Guarding against live registrations is the service's
/// job; this only flips the flag.
pub async fn mark_inactive<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<(), DomainError> {
    let model = decks_adapter::find_by_id(conn, deck_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Deck, format!("deck {deck_id} not found"))
        })?;
    decks_adapter::mark_inactive(conn, model).await?;
    Ok(())
}
