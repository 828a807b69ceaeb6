use time::macros::date;

use crate::domain::banlist::{
    can_add_card, deck_genesys_total, is_legal_in_format, status_for, BanlistStatus, Format,
};
use crate::domain::banlist_check::validate_against_banlist;
use crate::domain::deck::DeckSection;
use crate::domain::test_fixtures::{
    effect_monster, entry, fusion_monster, legal_deck, link_monster, with_ban,
};

#[test]
fn no_format_means_unlimited() {
    let card = effect_monster("Cualquiera");
    assert_eq!(status_for(&card, None), BanlistStatus::Unlimited);
    assert!(is_legal_in_format(&card, None));
}

#[test]
fn absent_flag_defaults_to_unlimited() {
    let card = effect_monster("Sin marca");
    assert_eq!(status_for(&card, Some(Format::Tcg)), BanlistStatus::Unlimited);
    assert_eq!(
        status_for(&card, Some(Format::Edison)),
        BanlistStatus::Unlimited
    );
}

#[test]
fn per_format_flags_are_independent() {
    let card = with_ban(
        with_ban(effect_monster("Marcada"), Format::Tcg, BanlistStatus::Forbidden),
        Format::Ocg,
        BanlistStatus::Limited,
    );
    assert_eq!(status_for(&card, Some(Format::Tcg)), BanlistStatus::Forbidden);
    assert_eq!(status_for(&card, Some(Format::Ocg)), BanlistStatus::Limited);
    assert_eq!(
        status_for(&card, Some(Format::Goat)),
        BanlistStatus::Unlimited
    );
}

#[test]
fn max_copies_mapping() {
    assert_eq!(BanlistStatus::Forbidden.max_copies(), 0);
    assert_eq!(BanlistStatus::Limited.max_copies(), 1);
    assert_eq!(BanlistStatus::SemiLimited.max_copies(), 2);
    assert_eq!(BanlistStatus::Unlimited.max_copies(), 3);
}

#[test]
fn genesys_ignores_ban_flags() {
    let card = with_ban(
        effect_monster("Prohibida en TCG"),
        Format::Tcg,
        BanlistStatus::Forbidden,
    );
    assert_eq!(
        status_for(&card, Some(Format::Genesys)),
        BanlistStatus::Unlimited
    );
}

#[test]
fn link_is_always_illegal_in_genesys() {
    let card = link_monster("Decode Talker");
    assert!(!is_legal_in_format(&card, Some(Format::Genesys)));
    // Ban flags are irrelevant to the frame ban.
    let flagged = with_ban(
        link_monster("Decode Talker"),
        Format::Tcg,
        BanlistStatus::Forbidden,
    );
    assert!(!is_legal_in_format(&flagged, Some(Format::Genesys)));
    // The same card is date-legal in modern formats.
    assert!(is_legal_in_format(&card, Some(Format::Tcg)));
}

#[test]
fn pendulum_is_illegal_in_genesys() {
    use crate::domain::cards::{CardCategory, FrameType};
    use crate::domain::test_fixtures::snapshot;
    let card = snapshot("Odd-Eyes", CardCategory::Effect, FrameType::Pendulum);
    assert!(!is_legal_in_format(&card, Some(Format::Genesys)));
}

#[test]
fn goat_cutoff_is_inclusive() {
    let mut card = effect_monster("Frontera");
    card.tcg_date = Some(date!(2005 - 04 - 01));
    card.ocg_date = None;
    assert!(is_legal_in_format(&card, Some(Format::Goat)));

    card.tcg_date = Some(date!(2005 - 04 - 02));
    assert!(!is_legal_in_format(&card, Some(Format::Goat)));
}

#[test]
fn edison_prefers_tcg_date_over_ocg() {
    // OCG release predates the cutoff but the preferred TCG date does not:
    // the card is out.
    let mut card = effect_monster("Tardía");
    card.tcg_date = Some(date!(2011 - 01 - 01));
    card.ocg_date = Some(date!(2009 - 01 - 01));
    assert!(!is_legal_in_format(&card, Some(Format::Edison)));

    // Without a TCG date the OCG date decides.
    card.tcg_date = None;
    assert!(is_legal_in_format(&card, Some(Format::Edison)));
}

#[test]
fn undated_cards_get_benefit_of_the_doubt() {
    let mut card = effect_monster("Sin fecha");
    card.tcg_date = None;
    card.ocg_date = None;
    assert!(is_legal_in_format(&card, Some(Format::Goat)));
    assert!(is_legal_in_format(&card, Some(Format::Edison)));
}

#[test]
fn modern_formats_have_no_date_restriction() {
    let mut card = effect_monster("Nueva");
    card.tcg_date = Some(date!(2024 - 01 - 01));
    assert!(is_legal_in_format(&card, Some(Format::Tcg)));
    assert!(is_legal_in_format(&card, Some(Format::Ocg)));
}

#[test]
fn can_add_respects_status() {
    let limited = with_ban(
        effect_monster("Limitada"),
        Format::Tcg,
        BanlistStatus::Limited,
    );
    let check = can_add_card(&limited, Some(Format::Tcg), 0);
    assert!(check.can_add);
    assert_eq!(check.max_copies, 1);
    assert_eq!(check.status, BanlistStatus::Limited);

    let check = can_add_card(&limited, Some(Format::Tcg), 1);
    assert!(!check.can_add);

    let forbidden = with_ban(
        effect_monster("Prohibida"),
        Format::Tcg,
        BanlistStatus::Forbidden,
    );
    assert!(!can_add_card(&forbidden, Some(Format::Tcg), 0).can_add);
}

#[test]
fn forbidden_card_in_main_triggers_copy_violation() {
    let mut deck = legal_deck(Some(Format::Tcg));
    deck.entries[0].card = with_ban(
        effect_monster("Pot of Greed"),
        Format::Tcg,
        BanlistStatus::Forbidden,
    );
    let violations = validate_against_banlist(&deck.entries, Some(Format::Tcg));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].card_name, "Pot of Greed");
    assert_eq!(violations[0].allowed, 0);
    assert_eq!(violations[0].quantity, 1);
    assert!(violations[0].reason.contains("Prohibida"));
    assert!(violations[0].reason.contains("máximo 0 copia(s)"));
}

#[test]
fn copy_count_spans_main_and_side_but_not_extra() {
    let mut deck = legal_deck(Some(Format::Tcg));
    let semi = with_ban(
        effect_monster("Semi"),
        Format::Tcg,
        BanlistStatus::SemiLimited,
    );
    // Two in Main and one in Side: three counted copies against a cap of 2.
    deck.entries.push(entry(9000, 2, DeckSection::Main, semi.clone()));
    deck.entries.push(entry(9000, 1, DeckSection::Side, semi.clone()));
    // Extra Deck copies of a different card are never counted.
    let extra_semi = with_ban(
        fusion_monster("Fusión semi"),
        Format::Tcg,
        BanlistStatus::SemiLimited,
    );
    deck.entries.push(entry(9001, 3, DeckSection::Extra, extra_semi));

    let violations = validate_against_banlist(&deck.entries, Some(Format::Tcg));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].card_name, "Semi");
    assert_eq!(violations[0].quantity, 3);
    assert_eq!(violations[0].allowed, 2);
}

#[test]
fn copy_and_date_violations_accumulate_for_one_card() {
    let mut deck = legal_deck(Some(Format::Goat));
    let mut card = with_ban(
        effect_monster("Doble falta"),
        Format::Goat,
        BanlistStatus::Limited,
    );
    card.tcg_date = Some(date!(2008 - 01 - 01));
    card.ocg_date = None;
    deck.entries.push(entry(9100, 2, DeckSection::Main, card));

    let violations = validate_against_banlist(&deck.entries, Some(Format::Goat));
    let for_card: Vec<_> = violations
        .iter()
        .filter(|v| v.card_name == "Doble falta")
        .collect();
    assert_eq!(for_card.len(), 2);
    assert!(for_card.iter().any(|v| v.reason.contains("máximo 1 copia(s)")));
    assert!(for_card.iter().any(|v| v.reason.contains("GOAT")));
}

#[test]
fn casual_deck_has_no_violations() {
    let mut deck = legal_deck(None);
    deck.entries[0].card = with_ban(
        effect_monster("Prohibida"),
        Format::Tcg,
        BanlistStatus::Forbidden,
    );
    assert!(validate_against_banlist(&deck.entries, None).is_empty());
}

#[test]
fn genesys_total_is_quantity_weighted_across_all_sections() {
    let mut deck = legal_deck(Some(Format::Genesys));
    deck.entries[0].card.genesys_points = 10;
    deck.entries[0].quantity = 3;
    deck.entries[45].card.genesys_points = 5; // an Extra Deck entry
    assert_eq!(deck_genesys_total(&deck.entries), 35);
}
