use crate::domain::deck::{DeckList, DeckSection};
use crate::domain::deck_rules::validate_deck;
use crate::domain::test_fixtures::{effect_monster, entry, fusion_monster, legal_deck};

fn main_only_deck(count: u32) -> DeckList {
    let mut deck = DeckList {
        name: "Mazo".to_string(),
        description: None,
        format: None,
        entries: Vec::new(),
    };
    for i in 0..count {
        deck.entries.push(entry(
            i64::from(i) + 1,
            1,
            DeckSection::Main,
            effect_monster(&format!("Carta {i}")),
        ));
    }
    deck
}

#[test]
fn legal_deck_is_valid() {
    let report = validate_deck(&legal_deck(None));
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn main_deck_below_minimum() {
    let report = validate_deck(&main_only_deck(39));
    let mentioning_40: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.message.contains("40"))
        .collect();
    assert_eq!(mentioning_40.len(), 1);
    assert!(mentioning_40[0].message.contains("39"));
    assert!(!report.is_valid());
}

#[test]
fn main_deck_above_maximum() {
    let report = validate_deck(&main_only_deck(61));
    let mentioning_60: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.message.contains("60"))
        .collect();
    assert_eq!(mentioning_60.len(), 1);
    assert!(mentioning_60[0].message.contains("61"));
}

#[test]
fn extra_and_side_caps() {
    let mut deck = legal_deck(None);
    for i in 0..11 {
        deck.entries.push(entry(
            5000 + i,
            1,
            DeckSection::Extra,
            fusion_monster(&format!("Extra extra {i}")),
        ));
    }
    for i in 0..11 {
        deck.entries.push(entry(
            6000 + i,
            1,
            DeckSection::Side,
            effect_monster(&format!("Side extra {i}")),
        ));
    }
    let report = validate_deck(&deck);
    assert!(report.errors.iter().any(|e| e.field == "extra_deck"));
    assert!(report.errors.iter().any(|e| e.field == "side_deck"));
}

#[test]
fn fusion_in_main_is_rejected() {
    let mut deck = main_only_deck(40);
    deck.entries[0] = entry(1, 1, DeckSection::Main, fusion_monster("Cyber End Dragon"));
    let report = validate_deck(&deck);
    assert!(report
        .errors
        .iter()
        .any(|e| e.message.contains("Cyber End Dragon") && e.message.contains("Main Deck")));
}

#[test]
fn fusion_in_extra_is_fine() {
    let mut deck = main_only_deck(40);
    deck.entries.push(entry(
        99,
        1,
        DeckSection::Extra,
        fusion_monster("Cyber End Dragon"),
    ));
    let report = validate_deck(&deck);
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn spell_in_extra_is_rejected() {
    use crate::domain::cards::{CardCategory, FrameType};
    use crate::domain::test_fixtures::snapshot;

    let mut deck = main_only_deck(40);
    deck.entries.push(entry(
        99,
        1,
        DeckSection::Extra,
        snapshot("Pot of Greed", CardCategory::Spell, FrameType::Spell),
    ));
    let report = validate_deck(&deck);
    assert!(report
        .errors
        .iter()
        .any(|e| e.message.contains("Pot of Greed")));
}

#[test]
fn side_deck_accepts_both_kinds() {
    let mut deck = main_only_deck(40);
    deck.entries.push(entry(
        98,
        1,
        DeckSection::Side,
        fusion_monster("Fusión lateral"),
    ));
    deck.entries.push(entry(
        99,
        1,
        DeckSection::Side,
        effect_monster("Efecto lateral"),
    ));
    let report = validate_deck(&deck);
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn copy_cap_counts_all_sections() {
    // Two copies in Main, one in Side and one in Extra of the same id: four
    // total, over the flat cap even though no single section holds four.
    let mut deck = main_only_deck(38);
    deck.entries.push(entry(700, 2, DeckSection::Main, effect_monster("Repetida")));
    deck.entries.push(entry(700, 1, DeckSection::Side, effect_monster("Repetida")));
    deck.entries.push(entry(700, 1, DeckSection::Extra, fusion_monster("Repetida")));
    let report = validate_deck(&deck);
    let copy_errors: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.message.contains("Repetida") && e.message.contains("copias"))
        .collect();
    assert_eq!(copy_errors.len(), 1);
    assert!(copy_errors[0].message.contains('4'));
    assert!(copy_errors[0].message.contains('3'));
}

#[test]
fn fourth_copy_in_main_yields_exactly_one_copy_error() {
    let mut deck = legal_deck(None);
    // legal_deck uses one copy per distinct id; bump one entry to 4 copies.
    deck.entries[0].quantity = 4;
    let name = deck.entries[0].card.name.clone();
    let report = validate_deck(&deck);
    let copy_errors: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.message.contains("copias"))
        .collect();
    assert_eq!(copy_errors.len(), 1);
    assert!(copy_errors[0].message.contains(&name));
    assert!(copy_errors[0].message.contains('4'));
    assert!(copy_errors[0].message.contains('3'));
}

#[test]
fn name_is_required_and_bounded() {
    let mut deck = main_only_deck(40);
    deck.name = "   ".to_string();
    assert!(validate_deck(&deck)
        .errors
        .iter()
        .any(|e| e.field == "name"));

    deck.name = "x".repeat(101);
    assert!(validate_deck(&deck)
        .errors
        .iter()
        .any(|e| e.field == "name"));

    deck.name = "x".repeat(100);
    assert!(validate_deck(&deck).is_valid());
}

#[test]
fn zero_quantity_entry_is_an_error_not_a_panic() {
    let mut deck = main_only_deck(40);
    deck.entries[0].quantity = 0;
    let report = validate_deck(&deck);
    assert!(report
        .errors
        .iter()
        .any(|e| e.message.contains("cantidad inválida")));
}

#[test]
fn warnings_do_not_affect_validity() {
    // 45 Main cards and an empty Extra Deck: two warnings, zero errors.
    let mut deck = main_only_deck(45);
    deck.entries.retain(|e| e.section != DeckSection::Extra);
    let report = validate_deck(&deck);
    assert!(report.is_valid());
    assert!(report.warnings.iter().any(|w| w.field == "main_deck"));
    assert!(report.warnings.iter().any(|w| w.field == "extra_deck"));
}

#[test]
fn exactly_forty_main_has_no_size_warning() {
    let deck = main_only_deck(40);
    let report = validate_deck(&deck);
    assert!(!report.warnings.iter().any(|w| w.field == "main_deck"));
}
