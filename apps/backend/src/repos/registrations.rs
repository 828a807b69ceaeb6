//! Event registration repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::registrations_sea as registrations_adapter;
use crate::entities::event_registrations::RegistrationStatus;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Registration domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub deck_id: i64,
    pub status: RegistrationStatus,
    pub konami_id: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<crate::entities::event_registrations::Model> for Registration {
    fn from(model: crate::entities::event_registrations::Model) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            user_id: model.user_id,
            deck_id: model.deck_id,
            status: model.status,
            konami_id: model.konami_id,
            created_at: model.created_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration_id: i64,
) -> Result<Option<Registration>, DomainError> {
    let registration = registrations_adapter::find_by_id(conn, registration_id).await?;
    Ok(registration.map(Registration::from))
}

pub async fn require_registration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration_id: i64,
) -> Result<Registration, DomainError> {
    find_by_id(conn, registration_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Registration,
            format!("registration {registration_id} not found"),
        )
    })
}

pub async fn find_by_event_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
    user_id: i64,
) -> Result<Option<Registration>, DomainError> {
    let registration =
        registrations_adapter::find_by_event_and_user(conn, event_id, user_id).await?;
    Ok(registration.map(Registration::from))
}

pub async fn count_approved_for_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<u64, DomainError> {
    let count = registrations_adapter::count_by_event_and_status(
        conn,
        event_id,
        RegistrationStatus::Aprobado,
    )
    .await?;
    Ok(count)
}

/// Whether any pending or approved registration still references a deck.
pub async fn deck_is_in_use<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<bool, DomainError> {
    let count = registrations_adapter::count_active_for_deck(conn, deck_id).await?;
    Ok(count > 0)
}

/// Create a PENDIENTE registration. The storage-level unique constraint on
/// (event_id, user_id) closes the race left open by the pre-check; its
/// violation is reported as an already-registered conflict.
pub async fn create_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
    user_id: i64,
    deck_id: i64,
    konami_id: Option<String>,
) -> Result<Registration, DomainError> {
    let dto = registrations_adapter::RegistrationCreate {
        event_id,
        user_id,
        deck_id,
        konami_id,
    };
    let model = registrations_adapter::create(conn, dto)
        .await
        .map_err(|err| match crate::infra::db_errors::map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueViolation, _) => DomainError::conflict(
                ConflictKind::AlreadyRegistered,
                "Ya existe una inscripción para este evento",
            ),
            other => other,
        })?;
    Ok(Registration::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration_id: i64,
) -> Result<(), DomainError> {
    registrations_adapter::delete_by_id(conn, registration_id).await?;
    Ok(())
}
