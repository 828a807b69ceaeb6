//! Event registration service: the async half of the eligibility gate.
//!
//! Loads the state the pure check needs, delegates the decision, and owns
//! the PENDIENTE insert and cancellation. The reference instant is always a
//! parameter so callers (and tests) control the clock.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::eligibility::{
    evaluate, DeckAccess, EligibilityReport, EventSummary, RegistrationCheck,
};
use crate::entities::event_registrations::RegistrationStatus;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::events::Event;
use crate::repos::registrations::Registration;
use crate::repos::{decks, events, registrations, users};

fn event_summary(event: &Event) -> EventSummary {
    EventSummary {
        id: event.id,
        is_published: event.is_published,
        starts_at: event.starts_at,
        max_players: event.max_players,
        format: event.format,
        genesys_points_cap: event.genesys_points_cap,
    }
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered(Registration),
    Ineligible(EligibilityReport),
}

/// Registration domain service.
pub struct RegistrationService;

impl RegistrationService {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the full eligibility chain without writing anything.
    pub async fn validate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        event_id: i64,
        deck_id: i64,
        konami_id: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<EligibilityReport, DomainError> {
        let user = users::find_by_id(conn, user_id).await?;

        let Some(event) = events::find_by_id(conn, event_id).await? else {
            // Without an event no further check is meaningful.
            return Ok(evaluate(&RegistrationCheck {
                now,
                user_id,
                user_exists: user.is_some(),
                event: None,
                already_registered: false,
                deck: None,
                approved_count: 0,
                konami_id,
            }));
        };

        let existing = registrations::find_by_event_and_user(conn, event_id, user_id).await?;
        let deck = decks::find_by_id(conn, deck_id).await?;
        let approved_count = if event.max_players.is_some() {
            registrations::count_approved_for_event(conn, event_id).await?
        } else {
            0
        };

        let summary = event_summary(&event);
        let check = RegistrationCheck {
            now,
            user_id,
            user_exists: user.is_some(),
            event: Some(&summary),
            already_registered: existing.is_some(),
            deck: deck.as_ref().map(|d| DeckAccess {
                deck: &d.list,
                owner_id: d.owner_id,
                is_active: d.is_active,
            }),
            approved_count,
            konami_id,
        };
        Ok(evaluate(&check))
    }

    /// Attempt the `∅ → PENDIENTE` transition.
    ///
    /// The pre-check and the insert are separate reads, so a concurrent
    /// registration can slip between them; the unique index on
    /// (event_id, user_id) turns that race into an AlreadyRegistered
    /// conflict instead of a duplicate row.
    pub async fn register<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        event_id: i64,
        deck_id: i64,
        konami_id: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<RegistrationOutcome, DomainError> {
        let report = self
            .validate(conn, user_id, event_id, deck_id, konami_id, now)
            .await?;
        if !report.is_valid() {
            return Ok(RegistrationOutcome::Ineligible(report));
        }

        let registration = registrations::create_pending(
            conn,
            event_id,
            user_id,
            deck_id,
            konami_id.map(str::to_string),
        )
        .await?;
        info!(
            registration_id = registration.id,
            event_id, user_id, deck_id, "registration created"
        );
        Ok(RegistrationOutcome::Registered(registration))
    }

    /// Cancel a pending registration: registrant only, PENDIENTE only, and
    /// only while the event has not started.
    pub async fn cancel<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        registration_id: i64,
        user_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let registration = registrations::require_registration(conn, registration_id).await?;
        if registration.user_id != user_id {
            // Foreign registrations are indistinguishable from missing ones.
            return Err(DomainError::not_found(
                NotFoundKind::Registration,
                format!("registration {registration_id} not found"),
            ));
        }
        if registration.status != RegistrationStatus::Pendiente {
            return Err(DomainError::conflict(
                ConflictKind::RegistrationNotPending,
                "Solo se pueden cancelar inscripciones pendientes",
            ));
        }
        let event = events::require_event(conn, registration.event_id).await?;
        if event.starts_at <= now {
            return Err(DomainError::validation("El evento ya ha comenzado"));
        }

        registrations::delete(conn, registration_id).await?;
        info!(registration_id, user_id, "registration cancelled");
        Ok(())
    }
}

impl Default for RegistrationService {
    fn default() -> Self {
        Self::new()
    }
}
