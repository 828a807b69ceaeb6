use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::domain::banlist::Format;
use crate::domain::eligibility::{
    evaluate, DeckAccess, EligibilityReport, EventSummary, RegistrationCheck,
};
use crate::domain::test_fixtures::legal_deck;

const NOW: OffsetDateTime = datetime!(2026-08-01 12:00:00 UTC);

fn open_event(format: Option<Format>) -> EventSummary {
    EventSummary {
        id: 1,
        is_published: true,
        starts_at: NOW + Duration::days(7),
        max_players: Some(16),
        format,
        genesys_points_cap: None,
    }
}

fn fields(report: &EligibilityReport) -> Vec<&'static str> {
    report.errors.iter().map(|e| e.field).collect()
}

#[test]
fn happy_path_is_eligible() {
    let deck = legal_deck(None);
    let event = open_event(None);
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 0,
        konami_id: Some("ABC12345"),
    });
    assert!(report.is_valid(), "unexpected: {:?}", report.errors);
}

#[test]
fn missing_event_short_circuits() {
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: false,
        event: None,
        already_registered: true,
        deck: None,
        approved_count: 0,
        konami_id: None,
    });
    // The missing user is still reported, but nothing past the event check is.
    assert_eq!(fields(&report), vec!["user", "event"]);
}

#[test]
fn missing_user_does_not_stop_other_checks() {
    let deck = legal_deck(None);
    let event = open_event(None);
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: false,
        event: Some(&event),
        already_registered: true,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 0,
        konami_id: None,
    });
    assert!(fields(&report).contains(&"user"));
    assert!(fields(&report).contains(&"registration"));
}

#[test]
fn unpublished_and_past_events_are_rejected() {
    let deck = legal_deck(None);
    let mut event = open_event(None);
    event.is_published = false;
    event.starts_at = NOW - Duration::hours(1);
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 0,
        konami_id: None,
    });
    let event_errors = report.errors.iter().filter(|e| e.field == "event").count();
    assert_eq!(event_errors, 2);
}

#[test]
fn event_starting_exactly_now_is_closed() {
    let deck = legal_deck(None);
    let mut event = open_event(None);
    event.starts_at = NOW;
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 0,
        konami_id: None,
    });
    assert!(fields(&report).contains(&"event"));
}

#[test]
fn duplicate_registration_is_field_tagged() {
    let deck = legal_deck(None);
    let event = open_event(None);
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: true,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 0,
        konami_id: None,
    });
    assert_eq!(fields(&report), vec!["registration"]);
}

#[test]
fn deck_problems_are_field_tagged() {
    let mut deck = legal_deck(None);
    deck.entries.truncate(10); // Main Deck far below minimum
    let event = open_event(None);
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 11, // not ours either
            is_active: false,
        }),
        approved_count: 0,
        konami_id: None,
    });
    let deck_errors: Vec<_> = report.errors.iter().filter(|e| e.field == "deck").collect();
    assert!(deck_errors.iter().any(|e| e.message.contains("no pertenece")));
    assert!(deck_errors.iter().any(|e| e.message.contains("no está activo")));
    assert!(deck_errors.iter().any(|e| e.message.contains("no es válido")));
}

#[test]
fn banlist_violations_surface_through_the_deck_field() {
    use crate::domain::banlist::BanlistStatus;
    use crate::domain::test_fixtures::{effect_monster, with_ban};

    let mut deck = legal_deck(Some(Format::Tcg));
    deck.entries[0].card = with_ban(
        effect_monster("Pot of Greed"),
        Format::Tcg,
        BanlistStatus::Forbidden,
    );
    let event = open_event(Some(Format::Tcg));
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 0,
        konami_id: None,
    });
    assert!(report
        .errors
        .iter()
        .any(|e| e.field == "deck" && e.message.contains("Pot of Greed")));
}

#[test]
fn genesys_cap_is_enforced_at_registration() {
    let mut deck = legal_deck(Some(Format::Genesys));
    deck.entries[0].card.genesys_points = 80;
    let mut event = open_event(Some(Format::Genesys));
    event.genesys_points_cap = Some(50);
    let report = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 0,
        konami_id: None,
    });
    assert!(report
        .errors
        .iter()
        .any(|e| e.field == "deck" && e.message.contains("80") && e.message.contains("50")));
}

#[test]
fn capacity_counts_only_approved() {
    let deck = legal_deck(None);
    let mut event = open_event(None);
    event.max_players = Some(2);

    // Two approved registrations fill the event for a third player.
    let full = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 2,
        konami_id: None,
    });
    assert_eq!(fields(&full), vec!["event"]);

    // One approved (and any number pending) leaves room.
    let open = evaluate(&RegistrationCheck {
        now: NOW,
        user_id: 10,
        user_exists: true,
        event: Some(&event),
        already_registered: false,
        deck: Some(DeckAccess {
            deck: &deck,
            owner_id: 10,
            is_active: true,
        }),
        approved_count: 1,
        konami_id: None,
    });
    assert!(open.is_valid());
}

#[test]
fn konami_id_format_is_checked_when_present() {
    let deck = legal_deck(None);
    let event = open_event(None);
    let check = |konami_id: Option<&str>| {
        evaluate(&RegistrationCheck {
            now: NOW,
            user_id: 10,
            user_exists: true,
            event: Some(&event),
            already_registered: false,
            deck: Some(DeckAccess {
                deck: &deck,
                owner_id: 10,
                is_active: true,
            }),
            approved_count: 0,
            konami_id,
        })
    };
    assert!(check(None).is_valid());
    assert!(check(Some("ABC123")).is_valid());
    assert!(check(Some("123456789012")).is_valid());
    assert!(!check(Some("corto")).is_valid());
    assert!(!check(Some("con espacios!")).is_valid());
    assert!(!check(Some("1234567890123")).is_valid());
}
