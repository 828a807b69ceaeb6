//! Deck service tests against a mock database.

use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, Value};
use time::macros::datetime;
use time::OffsetDateTime;

use crate::domain::banlist::Format;
use crate::entities::{deck_cards, decks};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::services::decks::DeckService;

const NOW: OffsetDateTime = datetime!(2026-08-01 12:00:00 UTC);

fn deck_row(id: i64, owner_id: i64, format: Option<decks::DeckFormat>) -> decks::Model {
    decks::Model {
        id,
        owner_id,
        name: "Mazo de torneo".to_string(),
        description: None,
        format,
        is_active: true,
        created_at: NOW,
        updated_at: NOW,
    }
}

fn card_rows(deck_id: i64, main_count: i64) -> Vec<deck_cards::Model> {
    use crate::domain::cards::{BanlistFlags, CardCategory, CardSnapshot, FrameType};

    (0..main_count)
        .map(|i| {
            let snapshot = CardSnapshot {
                name: format!("Carta {i}"),
                category: CardCategory::Effect,
                frame: FrameType::Effect,
                banlist: BanlistFlags::default(),
                tcg_date: None,
                ocg_date: None,
                genesys_points: 0,
            };
            deck_cards::Model {
                id: i + 1,
                deck_id,
                card_id: 1000 + i,
                quantity: 1,
                section: deck_cards::Section::Main,
                card_data: serde_json::to_value(&snapshot).expect("snapshot encodes"),
                created_at: NOW,
            }
        })
        .collect()
}

fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
}

#[tokio::test]
async fn validate_reports_structure_and_format() {
    // 30 Main cards: one structural error, no banlist violations.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![deck_row(1, 10, Some(decks::DeckFormat::Tcg))]])
        .append_query_results([card_rows(1, 30)])
        .into_connection();

    let validation = DeckService::new()
        .validate(&conn, 1, 10, None)
        .await
        .expect("validate");

    assert_eq!(validation.format, Some(Format::Tcg));
    assert!(!validation.is_valid());
    assert!(!validation.report.is_valid());
    assert!(validation.banlist_violations.is_empty());
    assert_eq!(validation.genesys_points, 0);
}

#[tokio::test]
async fn validate_hides_foreign_decks() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![deck_row(1, 99, None)]])
        .append_query_results([card_rows(1, 40)])
        .into_connection();

    let err = DeckService::new()
        .validate(&conn, 1, 10, None)
        .await
        .expect_err("must fail");
    assert!(matches!(err, DomainError::NotFound(_, _)));
}

#[tokio::test]
async fn delete_blocked_while_registration_references_deck() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![deck_row(1, 10, None)]])
        .append_query_results([card_rows(1, 40)])
        .append_query_results([vec![count_row(1)]])
        .into_connection();

    let err = DeckService::new()
        .delete(&conn, 1, 10)
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DeckInUse, _)
    ));
}

#[tokio::test]
async fn undecodable_snapshot_is_data_corruption() {
    let mut rows = card_rows(1, 1);
    rows[0].card_data = serde_json::json!({"name": "truncado"});

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![deck_row(1, 10, None)]])
        .append_query_results([rows])
        .into_connection();

    let err = DeckService::new()
        .validate(&conn, 1, 10, None)
        .await
        .expect_err("must fail");
    assert!(matches!(err, DomainError::Infra(_, _)));
}
