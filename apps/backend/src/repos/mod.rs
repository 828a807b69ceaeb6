//! Repository layer: domain models over the SeaORM adapters.

pub mod decks;
pub mod events;
pub mod registrations;
pub mod users;
