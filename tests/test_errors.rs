use std::{error::Error as StdError, fmt};

use axum::http::StatusCode;
use lecturer_assess_be::errors::{AppError, constraint_error};
use sqlx::error::{DatabaseError, ErrorKind};

/// Database error carrying only a constraint kind.
#[derive(Debug)]
struct ConstraintViolation(ErrorKind);

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint violated: {:?}", self.0)
    }
}

impl StdError for ConstraintViolation {}

impl DatabaseError for ConstraintViolation {
    fn message(&self) -> &str {
        "constraint violated"
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        match self.0 {
            ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
            ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
            _ => ErrorKind::Other,
        }
    }
}

fn violation(kind: ErrorKind) -> sqlx::Error {
    sqlx::Error::Database(Box::new(ConstraintViolation(kind)))
}

#[test]
fn test_unique_violation_is_conflict() {
    let err = constraint_error(
        violation(ErrorKind::UniqueViolation),
        "Admin with this email already exists",
        "Failed to create admin",
    );

    assert!(matches!(&err, AppError::Conflict(msg) if msg == "Admin with this email already exists"));
    assert_eq!(err.to_response().0, StatusCode::CONFLICT);
}

#[test]
fn test_foreign_key_violation_is_conflict() {
    let err = constraint_error(
        violation(ErrorKind::ForeignKeyViolation),
        "Module has ratings; deactivate it instead",
        "Failed to delete module",
    );

    assert_eq!(err.to_response().0, StatusCode::CONFLICT);
}

#[test]
fn test_other_database_failures_stay_server_errors() {
    let err = constraint_error(
        violation(ErrorKind::CheckViolation),
        "unused",
        "Failed to create admin",
    );
    assert!(matches!(&err, AppError::DatabaseError(msg) if msg.starts_with("Failed to create admin")));

    let (status, body) = constraint_error(sqlx::Error::PoolTimedOut, "unused", "Failed").to_response();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("Failed"));
}
