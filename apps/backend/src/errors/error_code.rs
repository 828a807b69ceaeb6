//! Error codes for the storefront backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// User not found in database
    ForbiddenUserNotFound,

    // Request Validation
    /// General validation error
    ValidationError,
    /// Unknown play format in a request parameter
    InvalidFormat,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Event not found
    EventNotFound,
    /// Deck not found
    DeckNotFound,
    /// Registration not found
    RegistrationNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// A registration for this (user, event) pair already exists
    AlreadyRegistered,
    /// Deck is referenced by a pending or approved registration
    DeckInUse,
    /// Only pending registrations can be cancelled
    RegistrationNotPending,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Database Constraint Violations
    /// Unique constraint violation (generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (generic 409)
    FkViolation,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::DeckNotFound => "DECK_NOT_FOUND",
            Self::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::DeckInUse => "DECK_IN_USE",
            Self::RegistrationNotPending => "REGISTRATION_NOT_PENDING",
            Self::Conflict => "CONFLICT",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::Unauthorized.as_str(), "UNAUTHORIZED");
        assert_eq!(
            ErrorCode::UnauthorizedMissingBearer.as_str(),
            "UNAUTHORIZED_MISSING_BEARER"
        );
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::EventNotFound.as_str(), "EVENT_NOT_FOUND");
        assert_eq!(ErrorCode::DeckNotFound.as_str(), "DECK_NOT_FOUND");
        assert_eq!(ErrorCode::AlreadyRegistered.as_str(), "ALREADY_REGISTERED");
        assert_eq!(ErrorCode::DeckInUse.as_str(), "DECK_IN_USE");
        assert_eq!(
            ErrorCode::RegistrationNotPending.as_str(),
            "REGISTRATION_NOT_PENDING"
        );
        assert_eq!(ErrorCode::UniqueViolation.as_str(), "UNIQUE_VIOLATION");
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::Unauthorized), "UNAUTHORIZED");
        assert_eq!(format!("{}", ErrorCode::DeckInUse), "DECK_IN_USE");
    }
}
