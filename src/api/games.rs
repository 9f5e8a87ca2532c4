use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use super::error::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult};
use crate::auth::{AdminUser, AuthUser};
use crate::domain::{Game, GameFilter, GamePatch, NewGame};
use crate::infrastructure::AppState;
use crate::utils::{slugify, validate_slug};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

fn require_text(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Resolve the `:game` segment: a numeric id, otherwise a slug.
pub(crate) async fn find_game(state: &AppState, key: &str) -> ApiResult<Game> {
    let game = match key.parse::<i32>() {
        Ok(id) => state.game_repo.find_by_id(id).await?,
        Err(_) => state.game_repo.find_by_slug(key).await?,
    };
    game.ok_or_else(|| ApiError::not_found("Game"))
}

#[utoipa::path(
    get,
    path = "/api/games",
    responses(
        (status = 200, description = "Active games, coming-soon entries last")
    )
)]
pub async fn list_games(
    caller: Option<AuthUser>,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GameListQuery>,
) -> ApiResult<ApiResponse<Vec<Game>>> {
    let is_admin = caller.is_some_and(|u| u.is_admin());
    let filter = GameFilter {
        category: query.category,
        include_inactive: query.include_inactive && is_admin,
    };

    let games = state.game_repo.list(filter).await?;
    Ok(ApiResponse::list(games))
}

#[utoipa::path(
    get,
    path = "/api/games/{game}",
    params(("game" = String, Path, description = "Game id or slug")),
    responses(
        (status = 200, description = "Game found"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_game(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<ApiResponse<Game>> {
    let game = find_game(&state, &key).await?;
    Ok(ApiResponse::ok(game))
}

#[utoipa::path(
    post,
    path = "/api/games",
    responses(
        (status = 201, description = "Game created"),
        (status = 400, description = "Missing title or category, or no usable slug"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Slug already taken")
    )
)]
pub async fn create_game(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<NewGame>,
) -> ApiResult<(StatusCode, ApiResponse<Game>)> {
    require_text("title", &payload.title)?;
    require_text("category", &payload.category)?;

    let slug = match payload.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_owned(),
        _ => derive_slug(&payload.title)?,
    };
    validate_slug(&slug)?;
    payload.slug = Some(slug);

    let game = state.game_repo.create(payload).await?;
    Ok(ApiResponse::created(game))
}

/// Titles written only in Arabic or another non-Latin script give no slug
fn derive_slug(title: &str) -> ApiResult<String> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Cannot derive a slug from the title '{}', provide a slug",
            title.trim()
        )));
    }
    Ok(slug)
}

#[utoipa::path(
    put,
    path = "/api/games/{game}",
    params(("game" = i32, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game updated"),
        (status = 400, description = "Invalid title, category or slug"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Game not found"),
        (status = 409, description = "Slug already taken")
    )
)]
pub async fn update_game(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(mut patch): ApiJson<GamePatch>,
) -> ApiResult<ApiResponse<Game>> {
    if let Some(title) = &patch.title {
        require_text("title", title)?;
    }
    if let Some(category) = &patch.category {
        require_text("category", category)?;
    }
    if let Some(slug) = patch.slug.take() {
        let slug = slug.trim().to_owned();
        validate_slug(&slug)?;
        patch.slug = Some(slug);
    }

    let game = state.game_repo.update(id, patch).await?;
    Ok(ApiResponse::ok(game))
}

#[utoipa::path(
    delete,
    path = "/api/games/{game}",
    params(("game" = i32, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game, its questions and its progress rows deleted"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn delete_game(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<Value>> {
    state.game_repo.delete(id).await?;
    tracing::info!("Game {} deleted by admin {}", id, admin.id);
    Ok(ApiResponse::ok(json!({ "id": id })))
}
