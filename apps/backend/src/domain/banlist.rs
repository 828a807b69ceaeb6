//! Banlist and format legality: per-format copy limits, historical date
//! cutoffs and the Genesys point system.

use serde::{Deserialize, Serialize};
use time::macros::date;
use time::Date;

use crate::domain::cards::CardSnapshot;
use crate::domain::deck::DeckEntry;
use crate::errors::domain::DomainError;

/// Supported play formats. A deck or event without a format is casual play.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Format {
    Tcg,
    Ocg,
    Goat,
    Edison,
    Genesys,
}

impl Format {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcg => "TCG",
            Self::Ocg => "OCG",
            Self::Goat => "GOAT",
            Self::Edison => "EDISON",
            Self::Genesys => "GENESYS",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_ascii_uppercase().as_str() {
            "TCG" => Ok(Self::Tcg),
            "OCG" => Ok(Self::Ocg),
            "GOAT" => Ok(Self::Goat),
            "EDISON" => Ok(Self::Edison),
            "GENESYS" => Ok(Self::Genesys),
            other => Err(DomainError::validation(format!(
                "unknown format: {other}"
            ))),
        }
    }

    /// Historical formats only admit cards released on or before a fixed date.
    pub const fn release_cutoff(self) -> Option<Date> {
        match self {
            Self::Goat => Some(date!(2005 - 04 - 01)),
            Self::Edison => Some(date!(2010 - 03 - 01)),
            Self::Tcg | Self::Ocg | Self::Genesys => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restriction level of a card under a format's banlist.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BanlistStatus {
    Forbidden,
    Limited,
    #[serde(rename = "Semi-Limited")]
    SemiLimited,
    Unlimited,
}

impl BanlistStatus {
    pub const fn max_copies(self) -> u32 {
        match self {
            Self::Forbidden => 0,
            Self::Limited => 1,
            Self::SemiLimited => 2,
            Self::Unlimited => 3,
        }
    }

    /// User-facing label, as printed in violation messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forbidden => "Prohibida",
            Self::Limited => "Limitada",
            Self::SemiLimited => "Semi-Limitada",
            Self::Unlimited => "Ilimitada",
        }
    }
}

/// Banlist status of a card under a format.
///
/// No format means no restriction. Genesys ignores ban flags entirely: its
/// constraints are the frame ban and the point budget, not copy limits.
pub fn status_for(card: &CardSnapshot, format: Option<Format>) -> BanlistStatus {
    let flags = &card.banlist;
    match format {
        None | Some(Format::Genesys) => BanlistStatus::Unlimited,
        Some(Format::Tcg) => flags.tcg.unwrap_or(BanlistStatus::Unlimited),
        Some(Format::Ocg) => flags.ocg.unwrap_or(BanlistStatus::Unlimited),
        Some(Format::Goat) => flags.goat.unwrap_or(BanlistStatus::Unlimited),
        Some(Format::Edison) => flags.edison.unwrap_or(BanlistStatus::Unlimited),
    }
}

/// Whether a card may appear at all in a format, independent of copy counts.
///
/// Historical formats check the earliest known release date against the
/// format cutoff; cards the catalog has no dates for are presumed legal
/// (incomplete external data is not held against the player). Genesys bans
/// Link and Pendulum frames outright.
pub fn is_legal_in_format(card: &CardSnapshot, format: Option<Format>) -> bool {
    let Some(format) = format else {
        return true;
    };
    if format == Format::Genesys {
        return !card.frame.is_genesys_banned();
    }
    let Some(cutoff) = format.release_cutoff() else {
        return true;
    };
    match card.earliest_release() {
        Some(released) => released <= cutoff,
        None => true,
    }
}

/// Genesys point cost of a card. Cards without an assigned value cost 0.
pub fn genesys_points(card: &CardSnapshot) -> u32 {
    card.genesys_points
}

/// Quantity-weighted Genesys point total across every entry of a deck.
///
/// The per-event point ceiling is enforced by the registration layer; this
/// only computes the sum.
pub fn deck_genesys_total(entries: &[DeckEntry]) -> u32 {
    entries
        .iter()
        .map(|e| e.quantity * genesys_points(&e.card))
        .sum()
}

/// Answer for the interactive deck editor: may one more copy be added?
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyCheck {
    pub can_add: bool,
    pub max_copies: u32,
    pub status: BanlistStatus,
}

/// Copy-limit check against the format banlist only; date and frame legality
/// are a separate signal ([`is_legal_in_format`]). Does not mutate anything.
pub fn can_add_card(card: &CardSnapshot, format: Option<Format>, current_count: u32) -> CopyCheck {
    let status = status_for(card, format);
    let max_copies = status.max_copies();
    CopyCheck {
        can_add: current_count < max_copies,
        max_copies,
        status,
    }
}
