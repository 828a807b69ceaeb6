//! Event registration HTTP routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::eligibility::FieldError;
use crate::entities::event_registrations::RegistrationStatus;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::registrations::{RegistrationOutcome, RegistrationService};
use crate::state::app_state::AppState;

#[derive(Deserialize)]
struct CreateRegistrationRequest {
    deck_id: i64,
    konami_id: Option<String>,
}

#[derive(Serialize)]
struct RegistrationResponse {
    id: i64,
    event_id: i64,
    deck_id: i64,
    status: RegistrationStatus,
    konami_id: Option<String>,
    created_at: OffsetDateTime,
}

/// Eligibility failures are surfaced verbatim, all at once, so the player
/// sees every problem in one response.
#[derive(Serialize)]
struct IneligibleResponse {
    valid: bool,
    errors: Vec<FieldError>,
}

/// POST /api/events/{event_id}/registrations
///
/// Attempts the `∅ → PENDIENTE` transition for the calling user. Returns 201
/// with the new registration, or 422 with the full field-tagged error list.
async fn create_registration(
    http_req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CreateRegistrationRequest>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let event_id = path.into_inner();
    let request = body.into_inner();
    let now = OffsetDateTime::now_utc();

    let outcome = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = RegistrationService::new();
            Ok(service
                .register(
                    txn,
                    user.id,
                    event_id,
                    request.deck_id,
                    request.konami_id.as_deref(),
                    now,
                )
                .await?)
        })
    })
    .await?;

    match outcome {
        RegistrationOutcome::Registered(registration) => {
            Ok(HttpResponse::Created().json(RegistrationResponse {
                id: registration.id,
                event_id: registration.event_id,
                deck_id: registration.deck_id,
                status: registration.status,
                konami_id: registration.konami_id,
                created_at: registration.created_at,
            }))
        }
        RegistrationOutcome::Ineligible(report) => {
            Ok(HttpResponse::UnprocessableEntity().json(IneligibleResponse {
                valid: false,
                errors: report.errors,
            }))
        }
    }
}

/// DELETE /api/registrations/{registration_id}
///
/// Cancels the caller's own pending registration while the event has not
/// started.
async fn cancel_registration(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let registration_id = path.into_inner();
    let now = OffsetDateTime::now_utc();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = RegistrationService::new();
            Ok(service.cancel(txn, registration_id, user.id, now).await?)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/events/{event_id}/registrations")
            .route(web::post().to(create_registration)),
    );
    cfg.service(
        web::resource("/api/registrations/{registration_id}")
            .route(web::delete().to(cancel_registration)),
    );
}
