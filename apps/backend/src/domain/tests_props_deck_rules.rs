//! Property-based tests for the structural validator and banlist evaluator.

use proptest::prelude::*;

use crate::domain::banlist::{can_add_card, status_for, BanlistStatus, Format};
use crate::domain::cards::{CardCategory, FrameType};
use crate::domain::deck::{DeckList, DeckSection};
use crate::domain::deck_rules::validate_deck;
use crate::domain::test_fixtures::{entry, snapshot, with_ban};

fn category() -> impl Strategy<Value = CardCategory> {
    prop_oneof![
        Just(CardCategory::Normal),
        Just(CardCategory::Effect),
        Just(CardCategory::Ritual),
        Just(CardCategory::Fusion),
        Just(CardCategory::Synchro),
        Just(CardCategory::Xyz),
        Just(CardCategory::Link),
        Just(CardCategory::Spell),
        Just(CardCategory::Trap),
    ]
}

fn section() -> impl Strategy<Value = DeckSection> {
    prop_oneof![
        Just(DeckSection::Main),
        Just(DeckSection::Extra),
        Just(DeckSection::Side),
    ]
}

fn format() -> impl Strategy<Value = Format> {
    prop_oneof![
        Just(Format::Tcg),
        Just(Format::Ocg),
        Just(Format::Goat),
        Just(Format::Edison),
        Just(Format::Genesys),
    ]
}

fn ban_status() -> impl Strategy<Value = BanlistStatus> {
    prop_oneof![
        Just(BanlistStatus::Forbidden),
        Just(BanlistStatus::Limited),
        Just(BanlistStatus::SemiLimited),
        Just(BanlistStatus::Unlimited),
    ]
}

/// A well-formed deck: sized sections, matching placement, one copy per id.
fn well_formed_deck() -> impl Strategy<Value = DeckList> {
    (40u32..=60, 1u32..=15, 0u32..=15).prop_map(|(main, extra, side)| {
        let mut entries = Vec::new();
        for i in 0..main {
            entries.push(entry(
                i64::from(i),
                1,
                DeckSection::Main,
                snapshot(&format!("M{i}"), CardCategory::Effect, FrameType::Effect),
            ));
        }
        for i in 0..extra {
            entries.push(entry(
                10_000 + i64::from(i),
                1,
                DeckSection::Extra,
                snapshot(&format!("E{i}"), CardCategory::Synchro, FrameType::Synchro),
            ));
        }
        for i in 0..side {
            entries.push(entry(
                20_000 + i64::from(i),
                1,
                DeckSection::Side,
                snapshot(&format!("S{i}"), CardCategory::Trap, FrameType::Trap),
            ));
        }
        DeckList {
            name: "Generado".to_string(),
            description: None,
            format: None,
            entries,
        }
    })
}

/// An arbitrary, possibly malformed deck. Used to pin down totality.
fn arbitrary_deck() -> impl Strategy<Value = DeckList> {
    proptest::collection::vec((0i64..50, 0u32..5, section(), category()), 0..80).prop_map(
        |rows| {
            let entries = rows
                .into_iter()
                .map(|(card_id, quantity, section, cat)| {
                    entry(
                        card_id,
                        quantity,
                        section,
                        snapshot(&format!("C{card_id}"), cat, FrameType::Effect),
                    )
                })
                .collect();
            DeckList {
                name: "Arbitrario".to_string(),
                description: None,
                format: None,
                entries,
            }
        },
    )
}

proptest! {
    /// Well-formed decks always pass structural validation.
    #[test]
    fn prop_well_formed_decks_are_valid(deck in well_formed_deck()) {
        let report = validate_deck(&deck);
        prop_assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    /// The validator is total: any input produces a report, and validity is
    /// exactly "no errors".
    #[test]
    fn prop_validator_is_total(deck in arbitrary_deck()) {
        let report = validate_deck(&deck);
        prop_assert_eq!(report.is_valid(), report.errors.is_empty());
    }

    /// If any card's combined count exceeds the flat cap, the deck is invalid.
    #[test]
    fn prop_flat_copy_cap(deck in arbitrary_deck()) {
        use std::collections::BTreeMap;
        let mut totals: BTreeMap<i64, u32> = BTreeMap::new();
        for e in &deck.entries {
            *totals.entry(e.card_id).or_default() += e.quantity;
        }
        if totals.values().any(|&t| t > 3) {
            prop_assert!(!validate_deck(&deck).is_valid());
        }
    }

    /// Banlist status always maps to at most three copies, and Genesys
    /// ignores every flag.
    #[test]
    fn prop_status_bounds(fmt in format(), status in ban_status()) {
        let card = with_ban(
            snapshot("X", CardCategory::Effect, FrameType::Effect),
            fmt,
            status,
        );
        let resolved = status_for(&card, Some(fmt));
        prop_assert!(resolved.max_copies() <= 3);
        if fmt == Format::Genesys {
            prop_assert_eq!(resolved, BanlistStatus::Unlimited);
        } else {
            prop_assert_eq!(resolved, status);
        }
    }

    /// The editor check refuses an addition exactly when the current count
    /// has reached the status cap.
    #[test]
    fn prop_can_add_matches_cap(fmt in format(), status in ban_status(), count in 0u32..5) {
        let card = with_ban(
            snapshot("X", CardCategory::Effect, FrameType::Effect),
            fmt,
            status,
        );
        let check = can_add_card(&card, Some(fmt), count);
        prop_assert_eq!(check.can_add, count < check.max_copies);
    }
}
