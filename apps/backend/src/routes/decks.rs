//! Deck-related HTTP routes: on-demand validation, full-replace card edits
//! and guarded deletion.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;
use time::macros::format_description;
use time::Date;

use crate::db::txn::with_txn;
use crate::domain::banlist::Format;
use crate::domain::cards::{BanlistFlags, CardCategory, CardSnapshot, FrameType};
use crate::domain::deck::DeckSection;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::repos::decks::NewDeckCard;
use crate::services::decks::DeckService;
use crate::state::app_state::AppState;

#[derive(Deserialize)]
struct ValidateParams {
    /// Optional format override, e.g. `?format=GOAT`.
    format: Option<String>,
}

/// POST /api/decks/{deck_id}/validate
///
/// Runs structural and banlist validation for one of the caller's decks and
/// returns the full report: errors, warnings, banlist violations and the
/// Genesys point total. Nothing is persisted.
async fn validate_deck(
    http_req: HttpRequest,
    path: web::Path<i64>,
    params: web::Query<ValidateParams>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck_id = path.into_inner();
    let format_override = params
        .format
        .as_deref()
        .map(Format::parse)
        .transpose()
        .map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidFormat,
                format!("unknown format: {:?}", params.format),
            )
        })?;

    let validation = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = DeckService::new();
            Ok(service.validate(txn, deck_id, user.id, format_override).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(validation))
}

/// One card of a full-replace deck edit. The catalog's free-form type line
/// and frame string are resolved to closed enums here, once, as the snapshot
/// is captured.
#[derive(Deserialize)]
struct DeckCardPayload {
    card_id: i64,
    quantity: u32,
    section: DeckSection,
    name: String,
    type_line: String,
    frame: String,
    #[serde(default)]
    banlist: BanlistFlags,
    tcg_date: Option<String>,
    ocg_date: Option<String>,
    #[serde(default)]
    genesys_points: u32,
}

fn parse_date(value: Option<&str>) -> Result<Option<Date>, AppError> {
    let format = format_description!("[year]-[month]-[day]");
    value
        .map(|raw| {
            Date::parse(raw, &format).map_err(|_| {
                AppError::bad_request(ErrorCode::BadRequest, format!("invalid date: {raw}"))
            })
        })
        .transpose()
}

fn capture_snapshot(payload: DeckCardPayload) -> Result<NewDeckCard, AppError> {
    let category = CardCategory::from_type_line(&payload.type_line).map_err(AppError::from)?;
    let frame = FrameType::from_catalog(&payload.frame).map_err(AppError::from)?;
    Ok(NewDeckCard {
        card_id: payload.card_id,
        quantity: payload.quantity,
        section: payload.section,
        card: CardSnapshot {
            name: payload.name,
            category,
            frame,
            banlist: payload.banlist,
            tcg_date: parse_date(payload.tcg_date.as_deref())?,
            ocg_date: parse_date(payload.ocg_date.as_deref())?,
            genesys_points: payload.genesys_points,
        },
    })
}

/// PUT /api/decks/{deck_id}/cards
///
/// Replaces the deck's whole card collection and returns the structural
/// report of the result. An invalid deck is still saved; validity only gates
/// event registration.
async fn replace_cards(
    http_req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<Vec<DeckCardPayload>>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck_id = path.into_inner();
    let cards = body
        .into_inner()
        .into_iter()
        .map(capture_snapshot)
        .collect::<Result<Vec<_>, _>>()?;

    let report = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = DeckService::new();
            Ok(service.replace_cards(txn, deck_id, user.id, cards).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// DELETE /api/decks/{deck_id}
///
/// Soft delete; refused while a pending or approved registration references
/// the deck.
async fn delete_deck(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck_id = path.into_inner();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = DeckService::new();
            Ok(service.delete(txn, deck_id, user.id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/decks/{deck_id}/validate").route(web::post().to(validate_deck)),
    );
    cfg.service(web::resource("/api/decks/{deck_id}/cards").route(web::put().to(replace_cards)));
    cfg.service(web::resource("/api/decks/{deck_id}").route(web::delete().to(delete_deck)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_capture_resolves_enums() {
        let payload = DeckCardPayload {
            card_id: 46986414,
            quantity: 1,
            section: DeckSection::Main,
            name: "Dark Magician".to_string(),
            type_line: "Normal Monster".to_string(),
            frame: "normal".to_string(),
            banlist: BanlistFlags::default(),
            tcg_date: Some("2002-03-08".to_string()),
            ocg_date: None,
            genesys_points: 15,
        };
        let card = capture_snapshot(payload).unwrap();
        assert_eq!(card.card.category, CardCategory::Normal);
        assert_eq!(card.card.frame, FrameType::Normal);
        assert_eq!(card.card.genesys_points, 15);
        assert!(card.card.tcg_date.is_some());
    }

    #[test]
    fn snapshot_capture_rejects_bad_dates_and_types() {
        let payload = DeckCardPayload {
            card_id: 1,
            quantity: 1,
            section: DeckSection::Main,
            name: "X".to_string(),
            type_line: "Planeswalker".to_string(),
            frame: "normal".to_string(),
            banlist: BanlistFlags::default(),
            tcg_date: None,
            ocg_date: None,
            genesys_points: 0,
        };
        assert!(capture_snapshot(payload).is_err());

        let payload = DeckCardPayload {
            card_id: 1,
            quantity: 1,
            section: DeckSection::Main,
            name: "X".to_string(),
            type_line: "Effect Monster".to_string(),
            frame: "effect".to_string(),
            banlist: BanlistFlags::default(),
            tcg_date: Some("08/03/2002".to_string()),
            ocg_date: None,
            genesys_points: 0,
        };
        assert!(capture_snapshot(payload).is_err());
    }
}
