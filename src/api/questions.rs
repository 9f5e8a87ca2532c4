use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::error::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult};
use crate::auth::{AdminUser, AuthUser};
use crate::domain::{
    Difficulty, Game, GameType, NewQuestion, Question, QuestionFilter, QuestionPatch,
};
use crate::infrastructure::AppState;

pub const DEFAULT_RANDOM_COUNT: usize = 10;
pub const MAX_RANDOM_COUNT: usize = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListQuery {
    pub game_type: Option<GameType>,
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomQuery {
    pub count: Option<usize>,
    pub game_type: Option<GameType>,
}

async fn game_by_slug(state: &AppState, slug: &str) -> ApiResult<Game> {
    state
        .game_repo
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Game"))
}

/// A question is only reachable under the game it belongs to.
async fn question_in_game(state: &AppState, slug: &str, id: i32) -> ApiResult<Question> {
    state
        .question_repo
        .find_by_id(id)
        .await?
        .filter(|q| q.game_slug == slug)
        .ok_or_else(|| ApiError::not_found("Question"))
}

#[utoipa::path(
    get,
    path = "/api/games/{game}/questions",
    params(("game" = String, Path, description = "Game slug")),
    responses(
        (status = 200, description = "Questions of the game"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn list_questions(
    caller: Option<AuthUser>,
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(query): ApiQuery<QuestionListQuery>,
) -> ApiResult<ApiResponse<Vec<Question>>> {
    let game = game_by_slug(&state, &slug).await?;
    let is_admin = caller.is_some_and(|u| u.is_admin());

    let filter = QuestionFilter {
        game_type: query.game_type,
        difficulty: query.difficulty,
        include_inactive: query.include_inactive && is_admin,
    };
    let questions = state.question_repo.list(&game.slug, filter).await?;
    Ok(ApiResponse::list(questions))
}

#[utoipa::path(
    get,
    path = "/api/games/{game}/questions/random",
    params(
        ("game" = String, Path, description = "Game slug"),
        ("count" = Option<usize>, Query, description = "Number of questions, 1 to 50"),
        ("gameType" = Option<String>, Query, description = "Only this kind of question")
    ),
    responses(
        (status = 200, description = "Random selection of active questions")
    )
)]
pub async fn random_questions(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(query): ApiQuery<RandomQuery>,
) -> ApiResult<ApiResponse<Vec<Question>>> {
    let game = game_by_slug(&state, &slug).await?;
    let count = query
        .count
        .unwrap_or(DEFAULT_RANDOM_COUNT)
        .clamp(1, MAX_RANDOM_COUNT);

    let questions = state
        .question_repo
        .random(&game.slug, count, query.game_type)
        .await?;
    Ok(ApiResponse::list(questions))
}

#[utoipa::path(
    get,
    path = "/api/games/{game}/questions/{id}",
    params(
        ("game" = String, Path, description = "Game slug"),
        ("id" = i32, Path, description = "Question id")
    ),
    responses(
        (status = 200, description = "Question found"),
        (status = 404, description = "Question not found, or inactive for non-admins")
    )
)]
pub async fn get_question(
    caller: Option<AuthUser>,
    State(state): State<AppState>,
    ApiPath((slug, id)): ApiPath<(String, i32)>,
) -> ApiResult<ApiResponse<Question>> {
    let question = question_in_game(&state, &slug, id).await?;
    if !question.is_active && !caller.is_some_and(|u| u.is_admin()) {
        return Err(ApiError::not_found("Question"));
    }
    Ok(ApiResponse::ok(question))
}

#[utoipa::path(
    post,
    path = "/api/games/{game}/questions",
    params(("game" = String, Path, description = "Game slug")),
    responses(
        (status = 201, description = "Question created"),
        (status = 400, description = "Invalid question payload"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn create_question(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiJson(payload): ApiJson<NewQuestion>,
) -> ApiResult<(StatusCode, ApiResponse<Question>)> {
    let game = game_by_slug(&state, &slug).await?;
    let question = state.question_repo.create(&game.slug, payload).await?;
    Ok(ApiResponse::created(question))
}

#[utoipa::path(
    put,
    path = "/api/games/{game}/questions/{id}",
    params(
        ("game" = String, Path, description = "Game slug"),
        ("id" = i32, Path, description = "Question id")
    ),
    responses(
        (status = 200, description = "Question updated"),
        (status = 400, description = "Invalid question payload"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn update_question(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath((slug, id)): ApiPath<(String, i32)>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<ApiResponse<Question>> {
    let patch = QuestionPatch::from_json(body)?;
    question_in_game(&state, &slug, id).await?;

    let question = state.question_repo.update(id, patch).await?;
    Ok(ApiResponse::ok(question))
}

/// Soft delete: the question stays in the bank but is no longer served.
#[utoipa::path(
    delete,
    path = "/api/games/{game}/questions/{id}",
    params(
        ("game" = String, Path, description = "Game slug"),
        ("id" = i32, Path, description = "Question id")
    ),
    responses(
        (status = 200, description = "Question deactivated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn delete_question(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath((slug, id)): ApiPath<(String, i32)>,
) -> ApiResult<ApiResponse<Question>> {
    question_in_game(&state, &slug, id).await?;
    let question = state.question_repo.deactivate(id).await?;
    Ok(ApiResponse::ok(question))
}
