use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access token lifetime.
const TOKEN_TTL_SECS: i64 = 15 * 60;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// External user identifier (users.sub)
    pub sub: String,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mint a HS256 JWT access token with a 15-minute TTL. The issue instant is a
/// parameter so token lifetimes are testable.
pub fn mint_access_token(
    sub: &str,
    email: &str,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now.unix_timestamp();
    let exp = iat + TOKEN_TTL_SECS;

    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a JWT and return its claims.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use backend_test_support::unique_helpers::{unique_email, unique_str};
    use time::Duration;

    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let sub = unique_str("sub");
        let email = unique_email("alice");
        let now = OffsetDateTime::now_utc();
        let token = mint_access_token(&sub, &email, now, &security()).unwrap();
        let claims = verify_access_token(&token, &security()).unwrap();

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email, email);
        assert_eq!(claims.iat, now.unix_timestamp());
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Minted 20 minutes ago; the 15-minute token is expired.
        let then = OffsetDateTime::now_utc() - Duration::minutes(20);
        let token = mint_access_token("sub-2", "bob@example.test", then, &security()).unwrap();

        let result = verify_access_token(&token, &security());
        assert!(matches!(result, Err(AppError::UnauthorizedExpiredJwt)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = mint_access_token(
            "sub-3",
            "eve@example.test",
            OffsetDateTime::now_utc(),
            &SecurityConfig::new("secret-A".as_bytes()),
        )
        .unwrap();

        let result = verify_access_token(&token, &SecurityConfig::new("secret-B".as_bytes()));
        assert!(matches!(result, Err(AppError::UnauthorizedInvalidJwt)));
    }
}
