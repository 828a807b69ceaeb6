//! Authenticated user extractor.
//!
//! Verifies the Bearer token against the configured JWT secret and resolves
//! the claims to a users row. Session issuance lives elsewhere; handlers only
//! ever see the resolved `CurrentUser`.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Serialize;

use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::db::txn::SharedTxn;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
}

fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?;
    let auth_str = header_value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    match auth_str.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(&req)?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = verify_access_token(&token, &app_state.security)?;

            // Honor a shared test transaction when one is injected.
            let user = if let Some(shared_txn) = SharedTxn::from_req(&req) {
                users::find_by_sub(shared_txn.transaction(), &claims.sub).await?
            } else {
                let db = require_db(app_state)?;
                users::find_by_sub(db, &claims.sub).await?
            };

            let user = user.ok_or_else(AppError::forbidden_user_not_found)?;

            Ok(CurrentUser {
                id: user.id,
                sub: user.sub,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn missing_header_is_rejected() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::UnauthorizedMissingBearer)
        ));
    }

    #[test]
    fn malformed_header_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::UnauthorizedMissingBearer)
        ));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::UnauthorizedMissingBearer)
        ));
    }

    #[test]
    fn bearer_token_is_extracted() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }
}
