//! Deck structure: sections, entries and the deck list itself.

use serde::{Deserialize, Serialize};

use crate::domain::banlist::Format;
use crate::domain::cards::CardSnapshot;

/// The three sub-decks of a Yu-Gi-Oh deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeckSection {
    Main,
    Extra,
    Side,
}

/// One row of a deck: a card reference plus its frozen catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Numeric catalog id (passcode).
    pub card_id: i64,
    pub quantity: u32,
    pub section: DeckSection,
    pub card: CardSnapshot,
}

/// A deck as the validators see it. Ownership and lifecycle live in the
/// persistence layer; this type is pure data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckList {
    pub name: String,
    pub description: Option<String>,
    /// `None` means casual play: no banlist, no date restriction.
    pub format: Option<Format>,
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    /// Total card count in a section, quantity-weighted.
    pub fn section_count(&self, section: DeckSection) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.section == section)
            .map(|e| e.quantity)
            .sum()
    }

}
