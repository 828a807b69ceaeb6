//! Core card snapshot types: category, frame, banlist flags.
//!
//! A `CardSnapshot` is the frozen copy of the external catalog's metadata
//! captured when a card is added to a deck. Validation never talks to the
//! catalog; it only ever sees these snapshots.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::banlist::BanlistStatus;

/// Card classification, resolved once at snapshot capture.
///
/// Replaces the catalog's free-form type line ("Fusion Monster", "Trap Card",
/// ...) with a closed set so validation never re-parses strings.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Normal,
    Effect,
    Ritual,
    Fusion,
    Synchro,
    Xyz,
    Link,
    Spell,
    Trap,
}

impl CardCategory {
    /// Fusion, Synchro, Xyz and Link monsters are summoned from the Extra Deck.
    pub fn is_extra_deck(self) -> bool {
        matches!(self, Self::Fusion | Self::Synchro | Self::Xyz | Self::Link)
    }
}

/// Frame type as reported by the catalog, collapsed to what the rules need.
///
/// The Pendulum family ("effect_pendulum", "xyz_pendulum", ...) is folded into
/// a single variant: the only rule keyed on it (the Genesys frame ban) does
/// not distinguish its members.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    Normal,
    Effect,
    Ritual,
    Fusion,
    Synchro,
    Xyz,
    Link,
    Pendulum,
    Spell,
    Trap,
}

impl FrameType {
    /// Genesys categorically bans Link and Pendulum cards.
    pub fn is_genesys_banned(self) -> bool {
        matches!(self, Self::Link | Self::Pendulum)
    }
}

/// Per-format banlist flags copied from the catalog's banlist_info block.
///
/// An absent flag means the card is unrestricted in that format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanlistFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcg: Option<BanlistStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocg: Option<BanlistStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goat: Option<BanlistStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edison: Option<BanlistStatus>,
}

/// Frozen catalog metadata for one card, stored as JSON on the deck card row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub name: String,
    pub category: CardCategory,
    pub frame: FrameType,
    #[serde(default)]
    pub banlist: BanlistFlags,
    /// First TCG release, when the catalog knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcg_date: Option<Date>,
    /// First OCG release, when the catalog knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocg_date: Option<Date>,
    /// Genesys point cost; cards without an assigned value cost 0.
    #[serde(default)]
    pub genesys_points: u32,
}

impl CardSnapshot {
    /// Earliest known release date, preferring the TCG date over the OCG one.
    pub fn earliest_release(&self) -> Option<Date> {
        self.tcg_date.or(self.ocg_date)
    }
}
