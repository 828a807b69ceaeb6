//! Event repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::events_sea as events_adapter;
use crate::domain::banlist::Format;
use crate::entities::decks::DeckFormat;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Event domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub created_by: Option<i64>,
    pub name: String,
    pub is_published: bool,
    pub starts_at: OffsetDateTime,
    pub max_players: Option<u32>,
    pub format: Option<Format>,
    pub genesys_points_cap: Option<u32>,
}

impl From<DeckFormat> for Format {
    fn from(value: DeckFormat) -> Self {
        match value {
            DeckFormat::Tcg => Format::Tcg,
            DeckFormat::Ocg => Format::Ocg,
            DeckFormat::Goat => Format::Goat,
            DeckFormat::Edison => Format::Edison,
            DeckFormat::Genesys => Format::Genesys,
        }
    }
}

impl From<Format> for DeckFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Tcg => DeckFormat::Tcg,
            Format::Ocg => DeckFormat::Ocg,
            Format::Goat => DeckFormat::Goat,
            Format::Edison => DeckFormat::Edison,
            Format::Genesys => DeckFormat::Genesys,
        }
    }
}

impl From<crate::entities::events::Model> for Event {
    fn from(model: crate::entities::events::Model) -> Self {
        Self {
            id: model.id,
            created_by: model.created_by,
            name: model.name,
            is_published: model.is_published,
            starts_at: model.starts_at,
            max_players: model.max_players.and_then(|n| u32::try_from(n).ok()),
            format: model.format.map(Format::from),
            genesys_points_cap: model
                .genesys_points_cap
                .and_then(|n| u32::try_from(n).ok()),
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Option<Event>, DomainError> {
    let event = events_adapter::find_by_id(conn, event_id).await?;
    Ok(event.map(Event::from))
}

/// Find event by ID or return a domain error if it does not exist.
pub async fn require_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Event, DomainError> {
    find_by_id(conn, event_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Event, format!("event {event_id} not found"))
    })
}
