//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only domain types, their rules, trait definitions and domain error types.

pub mod errors;
pub mod game;
pub mod progress;
pub mod question;
pub mod repositories;

pub use errors::DomainError;
pub use game::*;
pub use progress::*;
pub use question::*;
pub use repositories::*;
