use axum::extract::State;

use super::error::{ApiError, ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::auth::AuthUser;
use crate::domain::{Game, Progress, ProgressUpdate};
use crate::infrastructure::AppState;

async fn game_by_slug(state: &AppState, slug: &str) -> ApiResult<Game> {
    state
        .game_repo
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Game"))
}

#[utoipa::path(
    get,
    path = "/api/progress",
    responses(
        (status = 200, description = "Caller's progress across games, most recent first"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_progress(
    user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<Progress>>> {
    let progress = state.progress_repo.list_for_user(user.id).await?;
    Ok(ApiResponse::list(progress))
}

#[utoipa::path(
    get,
    path = "/api/progress/{game}",
    params(("game" = String, Path, description = "Game slug")),
    responses(
        (status = 200, description = "Caller's progress, zeroed when never played"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_progress(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<ApiResponse<Progress>> {
    let game = game_by_slug(&state, &slug).await?;
    let progress = state
        .progress_repo
        .find(user.id, &game)
        .await?
        .unwrap_or_else(|| Progress::fresh(user.id, game.id, game.slug));
    Ok(ApiResponse::ok(progress))
}

#[utoipa::path(
    put,
    path = "/api/progress/{game}",
    params(("game" = String, Path, description = "Game slug")),
    responses(
        (status = 200, description = "Progress saved"),
        (status = 400, description = "Invalid score, level or challenge"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_progress(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiJson(update): ApiJson<ProgressUpdate>,
) -> ApiResult<ApiResponse<Progress>> {
    update.validate()?;
    let game = game_by_slug(&state, &slug).await?;

    let progress = state.progress_repo.upsert(user.id, &game, update).await?;
    Ok(ApiResponse::ok(progress))
}
