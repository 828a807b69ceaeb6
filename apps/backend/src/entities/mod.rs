//! SeaORM entity models for the storefront schema.

pub mod deck_cards;
pub mod decks;
pub mod event_registrations;
pub mod events;
pub mod users;
