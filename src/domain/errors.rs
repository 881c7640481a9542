//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug, PartialEq)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Username is already registered
    DuplicateUser,
    /// Unknown user or password mismatch
    InvalidCredentials,
    /// No valid session presented
    Unauthorized,
    /// A review references a book that does not exist
    ForeignKeyViolation,
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::DuplicateUser => write!(f, "Username already taken"),
            DomainError::InvalidCredentials => write!(f, "Invalid credentials"),
            DomainError::Unauthorized => write!(f, "Not logged in"),
            DomainError::ForeignKeyViolation => write!(f, "Referenced book does not exist"),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer).
// Constraint violations are expected business outcomes, not faults.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateUser,
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
                DomainError::ForeignKeyViolation
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}
