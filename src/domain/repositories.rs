//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DomainError;
use super::game::{Game, GameFilter, GamePatch, NewGame};
use super::progress::{Progress, ProgressUpdate};
use super::question::{GameType, NewQuestion, Question, QuestionFilter, QuestionPatch};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("Unknown role '{}'", other))),
        }
    }
}

/// User data for API responses (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

/// Profile plus stored credentials, used by login only
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub profile: UserProfile,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserProfile>, DomainError>;

    /// Look up a user with credentials by email (case-insensitive)
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;

    async fn list(&self) -> Result<Vec<UserProfile>, DomainError>;

    /// Fails with `Conflict` when the username or email is taken
    async fn create(&self, user: NewUser) -> Result<UserProfile, DomainError>;

    async fn update(&self, id: i32, patch: UserPatch) -> Result<UserProfile, DomainError>;

    /// Delete a user and, through the foreign key, their progress
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Game entity
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn list(&self, filter: GameFilter) -> Result<Vec<Game>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Game>, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Game>, DomainError>;

    /// `game.slug` must already be resolved; fails with `Conflict` on a taken slug
    async fn create(&self, game: NewGame) -> Result<Game, DomainError>;

    async fn update(&self, id: i32, patch: GamePatch) -> Result<Game, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for the question bank
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn list(
        &self,
        game_slug: &str,
        filter: QuestionFilter,
    ) -> Result<Vec<Question>, DomainError>;

    /// Up to `count` active questions in random order
    async fn random(
        &self,
        game_slug: &str,
        count: usize,
        game_type: Option<GameType>,
    ) -> Result<Vec<Question>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Question>, DomainError>;

    async fn create(&self, game_slug: &str, question: NewQuestion)
    -> Result<Question, DomainError>;

    async fn update(&self, id: i32, patch: QuestionPatch) -> Result<Question, DomainError>;

    /// Soft delete: the row stays, `is_active` becomes false
    async fn deactivate(&self, id: i32) -> Result<Question, DomainError>;
}

/// Repository trait for UserProgress entity
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find(&self, user_id: i32, game: &Game) -> Result<Option<Progress>, DomainError>;

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Progress>, DomainError>;

    /// Create the (user, game) row or update the existing one; never duplicates
    async fn upsert(
        &self,
        user_id: i32,
        game: &Game,
        update: ProgressUpdate,
    ) -> Result<Progress, DomainError>;
}

/// Word of the day for API responses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOfTheDay {
    pub id: i32,
    pub word: String,
    pub arabic: Option<String>,
    pub transliteration: Option<String>,
    pub meaning: String,
    pub example: Option<String>,
    pub reference: Option<String>,
    pub date_active: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub word: String,
    pub arabic: Option<String>,
    pub transliteration: Option<String>,
    pub meaning: String,
    pub example: Option<String>,
    pub reference: Option<String>,
    pub date_active: NaiveDate,
}

/// Repository trait for WordOfTheDay entity
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Most recent word whose active date is on or before `date`
    async fn find_for_date(&self, date: NaiveDate) -> Result<Option<WordOfTheDay>, DomainError>;

    async fn list(&self) -> Result<Vec<WordOfTheDay>, DomainError>;

    /// Fails with `Conflict` when a word is already scheduled for that date
    async fn create(&self, word: NewWord) -> Result<WordOfTheDay, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
