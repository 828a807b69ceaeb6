//! HTTP route configuration.

pub mod decks;
pub mod health;
pub mod registrations;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    decks::configure_routes(cfg);
    registrations::configure_routes(cfg);
}
