//! Builders for card snapshots and decks used across the domain tests.

use time::macros::date;

use crate::domain::banlist::{BanlistStatus, Format};
use crate::domain::cards::{BanlistFlags, CardCategory, CardSnapshot, FrameType};
use crate::domain::deck::{DeckEntry, DeckList, DeckSection};

pub fn snapshot(name: &str, category: CardCategory, frame: FrameType) -> CardSnapshot {
    CardSnapshot {
        name: name.to_string(),
        category,
        frame,
        banlist: BanlistFlags::default(),
        tcg_date: Some(date!(2004 - 03 - 01)),
        ocg_date: Some(date!(2003 - 10 - 01)),
        genesys_points: 0,
    }
}

pub fn effect_monster(name: &str) -> CardSnapshot {
    snapshot(name, CardCategory::Effect, FrameType::Effect)
}

pub fn fusion_monster(name: &str) -> CardSnapshot {
    snapshot(name, CardCategory::Fusion, FrameType::Fusion)
}

pub fn link_monster(name: &str) -> CardSnapshot {
    snapshot(name, CardCategory::Link, FrameType::Link)
}

pub fn entry(card_id: i64, quantity: u32, section: DeckSection, card: CardSnapshot) -> DeckEntry {
    DeckEntry {
        card_id,
        quantity,
        section,
        card,
    }
}

/// A legal 45/10/5 deck: 45 distinct Main monsters, 10 distinct Extra
/// fusions, 5 distinct Side monsters, one copy each.
pub fn legal_deck(format: Option<Format>) -> DeckList {
    let mut entries = Vec::new();
    for i in 0..45 {
        entries.push(entry(
            1000 + i,
            1,
            DeckSection::Main,
            effect_monster(&format!("Main {i}")),
        ));
    }
    for i in 0..10 {
        entries.push(entry(
            2000 + i,
            1,
            DeckSection::Extra,
            fusion_monster(&format!("Extra {i}")),
        ));
    }
    for i in 0..5 {
        entries.push(entry(
            3000 + i,
            1,
            DeckSection::Side,
            effect_monster(&format!("Side {i}")),
        ));
    }
    DeckList {
        name: "Mazo de prueba".to_string(),
        description: None,
        format,
        entries,
    }
}

pub fn with_ban(mut card: CardSnapshot, format: Format, status: BanlistStatus) -> CardSnapshot {
    match format {
        Format::Tcg => card.banlist.tcg = Some(status),
        Format::Ocg => card.banlist.ocg = Some(status),
        Format::Goat => card.banlist.goat = Some(status),
        Format::Edison => card.banlist.edison = Some(status),
        Format::Genesys => {}
    }
    card
}
