//! Deck services: validation on demand, full-replace edits, guarded deletion.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;

use crate::domain::banlist::{deck_genesys_total, Format};
use crate::domain::banlist_check::{validate_against_banlist, BanlistViolation};
use crate::domain::deck_rules::validate_deck;
use crate::domain::validation::DeckReport;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{decks, registrations};

/// Combined validation outcome for one deck under one format.
#[derive(Debug, Clone, Serialize)]
pub struct DeckValidation {
    pub format: Option<Format>,
    pub report: DeckReport,
    pub banlist_violations: Vec<BanlistViolation>,
    pub genesys_points: u32,
}

impl DeckValidation {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid() && self.banlist_violations.is_empty()
    }
}

/// Deck domain service.
pub struct DeckService;

impl DeckService {
    pub fn new() -> Self {
        Self
    }

    /// Run structural and banlist validation for a deck the user owns.
    ///
    /// `format_override` lets the deck editor preview legality under a format
    /// other than the one saved on the deck.
    pub async fn validate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        deck_id: i64,
        user_id: i64,
        format_override: Option<Format>,
    ) -> Result<DeckValidation, DomainError> {
        let deck = decks::require_deck(conn, deck_id).await?;
        if deck.owner_id != user_id {
            // Foreign decks are indistinguishable from missing ones.
            return Err(DomainError::not_found(
                NotFoundKind::Deck,
                format!("deck {deck_id} not found"),
            ));
        }

        let format = format_override.or(deck.list.format);
        Ok(DeckValidation {
            format,
            report: validate_deck(&deck.list),
            banlist_violations: validate_against_banlist(&deck.list.entries, format),
            genesys_points: deck_genesys_total(&deck.list.entries),
        })
    }

    /// Replace a deck's card collection (edits are always full-replace) and
    /// report the structural validation of the result. An invalid deck is
    /// still saved: validity only gates event registration.
    pub async fn replace_cards<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        deck_id: i64,
        user_id: i64,
        cards: Vec<decks::NewDeckCard>,
    ) -> Result<DeckReport, DomainError> {
        let deck = decks::require_deck(conn, deck_id).await?;
        if deck.owner_id != user_id {
            return Err(DomainError::not_found(
                NotFoundKind::Deck,
                format!("deck {deck_id} not found"),
            ));
        }
        if !deck.is_active {
            return Err(DomainError::validation("El mazo no está activo"));
        }

        let mut list = deck.list;
        list.entries = cards
            .iter()
            .map(|card| crate::domain::deck::DeckEntry {
                card_id: card.card_id,
                quantity: card.quantity,
                section: card.section,
                card: card.card.clone(),
            })
            .collect();

        decks::replace_cards(conn, deck_id, cards).await?;
        info!(deck_id, cards = list.entries.len(), "deck cards replaced");
        Ok(validate_deck(&list))
    }

    /// Soft-delete a deck. Blocked while any pending or approved registration
    /// still references it.
    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        deck_id: i64,
        user_id: i64,
    ) -> Result<(), DomainError> {
        let deck = decks::require_deck(conn, deck_id).await?;
        if deck.owner_id != user_id {
            return Err(DomainError::not_found(
                NotFoundKind::Deck,
                format!("deck {deck_id} not found"),
            ));
        }
        if registrations::deck_is_in_use(conn, deck_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::DeckInUse,
                "El mazo está inscrito en un evento activo",
            ));
        }
        decks::mark_inactive(conn, deck_id).await?;
        info!(deck_id, "deck soft-deleted");
        Ok(())
    }
}

impl Default for DeckService {
    fn default() -> Self {
        Self::new()
    }
}
