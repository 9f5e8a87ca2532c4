//! Repository implementations using SeaORM

pub mod game_repository;
pub mod progress_repository;
pub mod question_repository;
pub mod user_repository;
pub mod word_repository;

pub use game_repository::SeaOrmGameRepository;
pub use progress_repository::SeaOrmProgressRepository;
pub use question_repository::SeaOrmQuestionRepository;
pub use user_repository::SeaOrmUserRepository;
pub use word_repository::SeaOrmWordRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Map a unique-index violation to `Conflict`, anything else to `Database`.
pub(crate) fn conflict_or_db(e: DbErr, conflict: impl FnOnce() -> String) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(conflict()),
        _ => DomainError::from(e),
    }
}

pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
