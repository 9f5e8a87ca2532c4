//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    GameRepository, ProgressRepository, QuestionRepository, UserRepository, WordRepository,
};
use crate::infrastructure::{
    SeaOrmGameRepository, SeaOrmProgressRepository, SeaOrmQuestionRepository,
    SeaOrmUserRepository, SeaOrmWordRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub user_repo: Arc<dyn UserRepository>,
    pub game_repo: Arc<dyn GameRepository>,
    pub question_repo: Arc<dyn QuestionRepository>,
    pub progress_repo: Arc<dyn ProgressRepository>,
    pub word_repo: Arc<dyn WordRepository>,
    jwt_secret: Arc<str>,
    /// Lifetime of issued tokens
    pub token_ttl_hours: i64,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            user_repo: Arc::new(SeaOrmUserRepository::new(db.clone())),
            game_repo: Arc::new(SeaOrmGameRepository::new(db.clone())),
            question_repo: Arc::new(SeaOrmQuestionRepository::new(db.clone())),
            progress_repo: Arc::new(SeaOrmProgressRepository::new(db.clone())),
            word_repo: Arc::new(SeaOrmWordRepository::new(db.clone())),
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: 24,
            db,
        }
    }

    pub fn with_token_ttl(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }

    /// Secret that signs and verifies tokens
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
