//! Whole-deck banlist validation: copy limits over Main+Side, legality over
//! every section.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::banlist::{self, Format};
use crate::domain::cards::CardSnapshot;
use crate::domain::deck::{DeckEntry, DeckSection};

/// One banlist violation. `reason` is user-facing Spanish, surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanlistViolation {
    pub card_name: String,
    pub reason: String,
    pub quantity: u32,
    pub allowed: u32,
}

/// Validate a deck's entries against a format's banlist.
///
/// Copy counting covers Main and Side only: Extra Deck copies are not held
/// against banlist limits (the flat 3-copy cap in `deck_rules` still counts
/// them). Legality (release date, Genesys frame ban) is checked for every
/// section. A card can collect both a copy violation and a legality
/// violation in the same pass; nothing is deduplicated.
pub fn validate_against_banlist(
    entries: &[DeckEntry],
    format: Option<Format>,
) -> Vec<BanlistViolation> {
    let mut violations = Vec::new();
    if format.is_none() {
        return violations;
    }

    let mut counted: BTreeMap<i64, (u32, &CardSnapshot)> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.section != DeckSection::Extra) {
        let slot = counted.entry(entry.card_id).or_insert((0, &entry.card));
        slot.0 += entry.quantity;
    }
    for (quantity, card) in counted.values() {
        let status = banlist::status_for(card, format);
        let allowed = status.max_copies();
        if *quantity > allowed {
            violations.push(BanlistViolation {
                card_name: card.name.clone(),
                reason: format!("{}: máximo {} copia(s)", status.label(), allowed),
                quantity: *quantity,
                allowed,
            });
        }
    }

    let mut seen: BTreeMap<i64, (u32, &CardSnapshot)> = BTreeMap::new();
    for entry in entries {
        let slot = seen.entry(entry.card_id).or_insert((0, &entry.card));
        slot.0 += entry.quantity;
    }
    for (quantity, card) in seen.values() {
        if !banlist::is_legal_in_format(card, format) {
            let reason = match format {
                Some(Format::Genesys) => {
                    "las cartas Link y Péndulo no están permitidas en Genesys".to_string()
                }
                Some(f) => format!(
                    "no es legal en el formato {f}: publicada después de la fecha de corte"
                ),
                None => unreachable!("format checked above"),
            };
            violations.push(BanlistViolation {
                card_name: card.name.clone(),
                reason,
                quantity: *quantity,
                allowed: 0,
            });
        }
    }

    violations
}
