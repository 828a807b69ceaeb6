//! Registration service tests against a mock database.
//!
//! Each test scripts the exact query results the service will consume, in
//! execution order: user, event, existing registration, deck (+ cards),
//! approved count, insert/delete.

use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::entities::event_registrations::{self, RegistrationStatus};
use crate::entities::{deck_cards, decks, events, users};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::services::registrations::{RegistrationOutcome, RegistrationService};

const NOW: OffsetDateTime = datetime!(2026-08-01 12:00:00 UTC);

fn user_row(id: i64) -> users::Model {
    users::Model {
        id,
        sub: format!("sub-{id}"),
        username: Some(format!("user{id}")),
        created_at: NOW,
        updated_at: NOW,
    }
}

fn event_row(id: i64, max_players: Option<i32>) -> events::Model {
    events::Model {
        id,
        created_by: None,
        name: "Torneo semanal".to_string(),
        is_published: true,
        starts_at: NOW + Duration::days(7),
        max_players,
        format: None,
        genesys_points_cap: None,
        created_at: NOW,
        updated_at: NOW,
    }
}

fn deck_row(id: i64, owner_id: i64) -> decks::Model {
    decks::Model {
        id,
        owner_id,
        name: "Mazo principal".to_string(),
        description: None,
        format: None,
        is_active: true,
        created_at: NOW,
        updated_at: NOW,
    }
}

/// 40 distinct Main Deck card rows, one copy each.
fn card_rows(deck_id: i64) -> Vec<deck_cards::Model> {
    use crate::domain::cards::{BanlistFlags, CardCategory, CardSnapshot, FrameType};

    (0..40)
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

fn registration_row(id: i64, event_id: i64, user_id: i64, deck_id: i64) -> event_registrations::Model {
    event_registrations::Model {
        id,
        event_id,
        user_id,
        deck_id,
        status: RegistrationStatus::Pendiente,
        konami_id: None,
        created_at: NOW,
        updated_at: NOW,
    }
}

fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
}

#[tokio::test]
async fn validate_reports_missing_event() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(10)]])
        .append_query_results([Vec::<events::Model>::new()])
        .into_connection();

    let report = RegistrationService::new()
        .validate(&conn, 10, 999, 1, None, NOW)
        .await
        .expect("validate");

    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "event");
}

#[tokio::test]
async fn validate_reports_duplicate_registration() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(10)]])
        .append_query_results([vec![event_row(5, None)]])
        .append_query_results([vec![registration_row(77, 5, 10, 1)]])
        .append_query_results([vec![deck_row(1, 10)]])
        .append_query_results([card_rows(1)])
        .into_connection();

    let report = RegistrationService::new()
        .validate(&conn, 10, 5, 1, None, NOW)
        .await
        .expect("validate");

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "registration");
}

#[tokio::test]
async fn validate_reports_full_event() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(10)]])
        .append_query_results([vec![event_row(5, Some(2))]])
        .append_query_results([Vec::<event_registrations::Model>::new()])
        .append_query_results([vec![deck_row(1, 10)]])
        .append_query_results([card_rows(1)])
        .append_query_results([vec![count_row(2)]])
        .into_connection();

    let report = RegistrationService::new()
        .validate(&conn, 10, 5, 1, None, NOW)
        .await
        .expect("validate");

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "event");
}

#[tokio::test]
async fn register_creates_pending_registration() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(10)]])
        .append_query_results([vec![event_row(5, Some(8))]])
        .append_query_results([Vec::<event_registrations::Model>::new()])
        .append_query_results([vec![deck_row(1, 10)]])
        .append_query_results([card_rows(1)])
        .append_query_results([vec![count_row(0)]])
        // INSERT ... RETURNING consumes a query result on Postgres.
        .append_query_results([vec![registration_row(42, 5, 10, 1)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 42,
            rows_affected: 1,
        }])
        .into_connection();

    let outcome = RegistrationService::new()
        .register(&conn, 10, 5, 1, None, NOW)
        .await
        .expect("register");

    match outcome {
        RegistrationOutcome::Registered(registration) => {
            assert_eq!(registration.id, 42);
            assert_eq!(registration.status, RegistrationStatus::Pendiente);
        }
        RegistrationOutcome::Ineligible(report) => {
            panic!("expected registration, got {:?}", report.errors)
        }
    }
}

#[tokio::test]
async fn register_returns_report_when_ineligible() {
    let mut event = event_row(5, None);
    event.is_published = false;

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(10)]])
        .append_query_results([vec![event]])
        .append_query_results([Vec::<event_registrations::Model>::new()])
        .append_query_results([vec![deck_row(1, 10)]])
        .append_query_results([card_rows(1)])
        .into_connection();

    let outcome = RegistrationService::new()
        .register(&conn, 10, 5, 1, None, NOW)
        .await
        .expect("register");

    match outcome {
        RegistrationOutcome::Ineligible(report) => {
            assert!(report.errors.iter().any(|e| e.field == "event"));
        }
        RegistrationOutcome::Registered(_) => panic!("expected ineligible"),
    }
}

#[tokio::test]
async fn cancel_rejects_foreign_registration() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![registration_row(7, 5, 99, 1)]])
        .into_connection();

    let err = RegistrationService::new()
        .cancel(&conn, 7, 10, NOW)
        .await
        .expect_err("must fail");
    assert!(matches!(err, DomainError::NotFound(_, _)));
}

#[tokio::test]
async fn cancel_rejects_non_pending_registration() {
    let mut registration = registration_row(7, 5, 10, 1);
    registration.status = RegistrationStatus::Aprobado;

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![registration]])
        .into_connection();

    let err = RegistrationService::new()
        .cancel(&conn, 7, 10, NOW)
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::RegistrationNotPending, _)
    ));
}

#[tokio::test]
async fn cancel_rejects_started_event() {
    let mut event = event_row(5, None);
    event.starts_at = NOW - Duration::hours(1);

    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![registration_row(7, 5, 10, 1)]])
        .append_query_results([vec![event]])
        .into_connection();

    let err = RegistrationService::new()
        .cancel(&conn, 7, 10, NOW)
        .await
        .expect_err("must fail");
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn cancel_deletes_pending_registration() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![registration_row(7, 5, 10, 1)]])
        .append_query_results([vec![event_row(5, None)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    RegistrationService::new()
        .cancel(&conn, 7, 10, NOW)
        .await
        .expect("cancel");
}
