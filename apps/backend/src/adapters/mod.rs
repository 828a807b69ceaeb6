//! SeaORM adapters: the only modules that build queries against the entities.

pub mod decks_sea;
pub mod events_sea;
pub mod registrations_sea;
pub mod users_sea;
