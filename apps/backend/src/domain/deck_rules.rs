//! Structural deck validation: size bounds, section placement, copy cap.

use std::collections::BTreeMap;

use crate::domain::deck::{DeckList, DeckSection};
use crate::domain::validation::DeckReport;

pub const MAIN_MIN: u32 = 40;
pub const MAIN_MAX: u32 = 60;
pub const EXTRA_MAX: u32 = 15;
pub const SIDE_MAX: u32 = 15;
/// Flat per-card cap, counted across all three sections regardless of format.
pub const COPY_LIMIT: u32 = 3;
pub const NAME_MAX_CHARS: usize = 100;

/// Validate a deck's structure. Pure and total: every violation is collected,
/// nothing is thrown, and warnings never affect validity.
pub fn validate_deck(deck: &DeckList) -> DeckReport {
    let mut report = DeckReport::default();

    if deck.name.trim().is_empty() {
        report.push_error("name", "El nombre del mazo es obligatorio");
    } else if deck.name.chars().count() > NAME_MAX_CHARS {
        report.push_error(
            "name",
            format!("El nombre del mazo no puede superar los {NAME_MAX_CHARS} caracteres"),
        );
    }

    let main = deck.section_count(DeckSection::Main);
    let extra = deck.section_count(DeckSection::Extra);
    let side = deck.section_count(DeckSection::Side);

    if main < MAIN_MIN {
        report.push_error(
            "main_deck",
            format!("El Main Deck debe tener al menos {MAIN_MIN} cartas (actual: {main})"),
        );
    }
    if main > MAIN_MAX {
        report.push_error(
            "main_deck",
            format!("El Main Deck no puede tener más de {MAIN_MAX} cartas (actual: {main})"),
        );
    }
    if extra > EXTRA_MAX {
        report.push_error(
            "extra_deck",
            format!("El Extra Deck no puede tener más de {EXTRA_MAX} cartas (actual: {extra})"),
        );
    }
    if side > SIDE_MAX {
        report.push_error(
            "side_deck",
            format!("El Side Deck no puede tener más de {SIDE_MAX} cartas (actual: {side})"),
        );
    }

    for entry in &deck.entries {
        if entry.quantity == 0 {
            report.push_error(
                "cards",
                format!("\"{}\" tiene una cantidad inválida", entry.card.name),
            );
        }
        // The Side Deck accepts both kinds; only Main and Extra are restricted.
        match entry.section {
            DeckSection::Main if entry.card.category.is_extra_deck() => {
                report.push_error(
                    "cards",
                    format!(
                        "\"{}\" es un monstruo de Extra Deck y no puede ir en el Main Deck",
                        entry.card.name
                    ),
                );
            }
            DeckSection::Extra if !entry.card.category.is_extra_deck() => {
                report.push_error(
                    "cards",
                    format!(
                        "\"{}\" no es un monstruo de Extra Deck y no puede ir en el Extra Deck",
                        entry.card.name
                    ),
                );
            }
            _ => {}
        }
    }

    // Flat copy cap, summed across Main, Extra and Side together. Format
    // banlists tighten this further, but never here.
    let mut totals: BTreeMap<i64, (u32, &str)> = BTreeMap::new();
    for entry in &deck.entries {
        let slot = totals
            .entry(entry.card_id)
            .or_insert((0, entry.card.name.as_str()));
        slot.0 += entry.quantity;
    }
    for (total, name) in totals.values() {
        if *total > COPY_LIMIT {
            report.push_error(
                "cards",
                format!(
                    "\"{name}\" tiene {total} copias; el máximo permitido es {COPY_LIMIT}"
                ),
            );
        }
    }

    if main > MAIN_MIN && main <= MAIN_MAX {
        report.push_warning(
            "main_deck",
            format!(
                "Se recomienda un Main Deck de exactamente {MAIN_MIN} cartas para mayor consistencia (actual: {main})"
            ),
        );
    }
    if extra == 0 {
        report.push_warning("extra_deck", "El Extra Deck está vacío");
    }

    report
}
