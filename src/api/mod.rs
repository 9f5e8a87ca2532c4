pub mod auth;
pub mod error;
pub mod games;
pub mod health;
pub mod progress;
pub mod questions;
pub mod user;
pub mod word_of_the_day;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::infrastructure::AppState;

/// Every route served under `/api`.
///
/// `:game` is a game id or slug depending on the route; the router needs one parameter
/// name per segment.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Users
        .route("/users", get(user::list_users))
        .route(
            "/users/profile/:id",
            get(user::get_profile)
                .put(user::update_profile)
                .delete(user::delete_profile),
        )
        // Games
        .route("/games", get(games::list_games).post(games::create_game))
        .route(
            "/games/:game",
            get(games::get_game)
                .put(games::update_game)
                .delete(games::delete_game),
        )
        // Questions
        .route(
            "/games/:game/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/games/:game/questions/random",
            get(questions::random_questions),
        )
        .route(
            "/games/:game/questions/:id",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
        // Progress
        .route("/progress", get(progress::list_progress))
        .route(
            "/progress/:game",
            get(progress::get_progress).put(progress::update_progress),
        )
        // Word of the day
        .route(
            "/word-of-the-day",
            get(word_of_the_day::list_words).post(word_of_the_day::create_word),
        )
        .route("/word-of-the-day/today", get(word_of_the_day::today))
        .route("/word-of-the-day/date/:date", get(word_of_the_day::by_date))
        .route("/word-of-the-day/:id", delete(word_of_the_day::delete_word))
        .with_state(state)
}
