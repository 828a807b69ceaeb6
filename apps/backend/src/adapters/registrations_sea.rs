//! SeaORM adapter for event registrations - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::event_registrations::{self, RegistrationStatus};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration_id: i64,
) -> Result<Option<event_registrations::Model>, sea_orm::DbErr> {
    event_registrations::Entity::find_by_id(registration_id)
        .one(conn)
        .await
}

/// The (event, user) pair is unique; at most one row can exist.
pub async fn find_by_event_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
    user_id: i64,
) -> Result<Option<event_registrations::Model>, sea_orm::DbErr> {
    event_registrations::Entity::find()
        .filter(event_registrations::Column::EventId.eq(event_id))
        .filter(event_registrations::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn count_by_event_and_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
    status: RegistrationStatus,
) -> Result<u64, sea_orm::DbErr> {
    event_registrations::Entity::find()
        .filter(event_registrations::Column::EventId.eq(event_id))
        .filter(event_registrations::Column::Status.eq(status))
        .count(conn)
        .await
}

/// Count of non-terminal (pending or approved) registrations holding a deck.
pub async fn count_active_for_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    event_registrations::Entity::find()
        .filter(event_registrations::Column::DeckId.eq(deck_id))
        .filter(
            event_registrations::Column::Status
                .is_in([RegistrationStatus::Pendiente, RegistrationStatus::Aprobado]),
        )
        .count(conn)
        .await
}

#[derive(Debug, Clone)]
pub struct RegistrationCreate {
    pub event_id: i64,
    pub user_id: i64,
    pub deck_id: i64,
    pub konami_id: Option<String>,
}

/// Insert a new registration with status PENDIENTE. The unique index on
/// (event_id, user_id) is the last line of defense against double
/// registration; a violation surfaces as DbErr.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RegistrationCreate,
) -> Result<event_registrations::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let registration = event_registrations::ActiveModel {
        id: NotSet,
        event_id: Set(dto.event_id),
        user_id: Set(dto.user_id),
        deck_id: Set(dto.deck_id),
        status: Set(RegistrationStatus::Pendiente),
        konami_id: Set(dto.konami_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    registration.insert(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = event_registrations::Entity::delete_by_id(registration_id)
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
