//! Event registration eligibility: the pure gate behind `∅ → PENDIENTE`.
//!
//! The service layer loads everything this check needs (user, event, deck,
//! existing registration, approved count) and hands it over together with the
//! reference instant. Nothing here reads a clock or touches storage, so the
//! whole gate is deterministic under test.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::banlist::{deck_genesys_total, Format};
use crate::domain::banlist_check::validate_against_banlist;
use crate::domain::deck::DeckList;
use crate::domain::deck_rules::validate_deck;

/// A field-tagged eligibility failure. Fields: `user`, `event`,
/// `registration`, `konami_id`, `deck`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub errors: Vec<FieldError>,
}

impl EligibilityReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn joined(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Event state relevant to registration, as loaded by the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub id: i64,
    pub is_published: bool,
    pub starts_at: OffsetDateTime,
    pub max_players: Option<u32>,
    pub format: Option<Format>,
    pub genesys_points_cap: Option<u32>,
}

/// A candidate deck plus the ownership facts needed to judge it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckAccess<'a> {
    pub deck: &'a DeckList,
    pub owner_id: i64,
    pub is_active: bool,
}

/// Everything the gate looks at. `now` is injected by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationCheck<'a> {
    pub now: OffsetDateTime,
    pub user_id: i64,
    pub user_exists: bool,
    pub event: Option<&'a EventSummary>,
    pub already_registered: bool,
    pub deck: Option<DeckAccess<'a>>,
    /// Count of APROBADO registrations for the event. Pending registrations
    /// do not count against capacity: not all of them convert.
    pub approved_count: u64,
    pub konami_id: Option<&'a str>,
}

/// Evaluate the registration gate. Failures accumulate; only a missing event
/// short-circuits, since no later check is meaningful without one.
pub fn evaluate(check: &RegistrationCheck<'_>) -> EligibilityReport {
    let mut report = EligibilityReport::default();

    if !check.user_exists {
        report.push("user", "El usuario no existe");
    }

    let Some(event) = check.event else {
        report.push("event", "El evento no existe");
        return report;
    };

    if !event.is_published {
        report.push("event", "El evento no está publicado");
    }
    if event.starts_at <= check.now {
        report.push("event", "El evento ya ha comenzado");
    }

    if check.already_registered {
        report.push("registration", "Ya existe una inscripción para este evento");
    }

    if let Some(konami_id) = check.konami_id {
        if !lazy_regex::regex_is_match!(r"^[A-Za-z0-9]{6,12}$", konami_id) {
            report.push(
                "konami_id",
                "El Konami ID debe tener entre 6 y 12 caracteres alfanuméricos",
            );
        }
    }

    match &check.deck {
        None => report.push("deck", "El mazo no existe"),
        Some(access) => {
            if access.owner_id != check.user_id {
                report.push("deck", "El mazo no pertenece al usuario");
            }
            if !access.is_active {
                report.push("deck", "El mazo no está activo");
            }

            let structure = validate_deck(access.deck);
            if !structure.is_valid() {
                report.push(
                    "deck",
                    format!("El mazo no es válido: {}", structure.joined_errors()),
                );
            }

            if let Some(format) = event.format {
                let violations = validate_against_banlist(&access.deck.entries, Some(format));
                if !violations.is_empty() {
                    let reasons = violations
                        .iter()
                        .map(|v| format!("\"{}\": {}", v.card_name, v.reason))
                        .collect::<Vec<_>>()
                        .join("; ");
                    report.push(
                        "deck",
                        format!("El mazo no es legal en {format}: {reasons}"),
                    );
                }
                if format == Format::Genesys {
                    if let Some(cap) = event.genesys_points_cap {
                        let total = deck_genesys_total(&access.deck.entries);
                        if total > cap {
                            report.push(
                                "deck",
                                format!(
                                    "El mazo suma {total} puntos Genesys; el máximo del evento es {cap}"
                                ),
                            );
                        }
                    }
                }
            }
        }
    }

    if let Some(max_players) = event.max_players {
        if check.approved_count >= u64::from(max_players) {
            report.push(
                "event",
                format!("El evento está completo ({max_players} jugadores)"),
            );
        }
    }

    report
}
