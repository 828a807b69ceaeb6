//! SeaORM adapter for event lookups - generic over ConnectionTrait.

use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entities::events;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Option<events::Model>, sea_orm::DbErr> {
    events::Entity::find_by_id(event_id).one(conn).await
}
