//! Mapping of SeaORM database errors onto domain errors.
//!
//! Repos call adapters that return `DbErr`; the `?` operator funnels every
//! database failure through [`map_db_err`] so constraint violations keep
//! their meaning instead of collapsing into a generic 500.

use sea_orm::{DbErr, SqlErr};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

pub fn map_db_err(err: DbErr) -> DomainError {
    if let Some(sql_err) = err.sql_err() {
        return match sql_err {
            SqlErr::UniqueConstraintViolation(detail) => {
                DomainError::conflict(ConflictKind::UniqueViolation, detail)
            }
            SqlErr::ForeignKeyConstraintViolation(detail) => {
                DomainError::conflict(ConflictKind::FkViolation, detail)
            }
            other => DomainError::infra(InfraErrorKind::Other(format!("{other:?}")), "sql error"),
        };
    }

    match err {
        DbErr::ConnectionAcquire(detail) => {
            DomainError::infra(InfraErrorKind::DbUnavailable, format!("{detail:?}"))
        }
        DbErr::RecordNotFound(detail) => DomainError::not_found(NotFoundKind::Other(detail), ""),
        other => DomainError::infra(InfraErrorKind::Other("db".to_string()), other.to_string()),
    }
}

impl From<DbErr> for DomainError {
    fn from(err: DbErr) -> Self {
        map_db_err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_errors_map_to_infra() {
        let err = map_db_err(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, DomainError::Infra(_, _)));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = map_db_err(DbErr::RecordNotFound("deck".to_string()));
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }
}
