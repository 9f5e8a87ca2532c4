use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use super::auth::{validate_email, validate_password, validate_username};
use super::error::{ApiError, ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::auth::{AdminUser, AuthUser, hash_password};
use crate::domain::{Role, UserPatch, UserProfile};
use crate::infrastructure::AppState;

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<Role>,
}

fn ensure_access(user: &AuthUser, id: i32) -> ApiResult<()> {
    if user.can_access(id) {
        Ok(())
    } else {
        tracing::warn!("User {} tried to reach the profile of user {}", user.id, id);
        Err(ApiError::Forbidden("You can only access your own profile"))
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<UserProfile>>> {
    let users = state.user_repo.list().await?;
    Ok(ApiResponse::list(users))
}

#[utoipa::path(
    get,
    path = "/api/users/profile/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_profile(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<UserProfile>> {
    ensure_access(&user, id)?;
    let profile = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    Ok(ApiResponse::ok(profile))
}

#[utoipa::path(
    put,
    path = "/api/users/profile/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Invalid username, email or password"),
        (status = 403, description = "Not your profile, or a role change by a non-admin"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email taken")
    )
)]
pub async fn update_profile(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> ApiResult<ApiResponse<UserProfile>> {
    ensure_access(&user, id)?;
    if payload.role.is_some() && !user.is_admin() {
        return Err(ApiError::Forbidden("Only admins can change roles"));
    }

    let username = payload.username.map(|u| u.trim().to_owned());
    if let Some(username) = &username {
        validate_username(username)?;
    }
    let email = payload.email.map(|e| e.trim().to_lowercase());
    if let Some(email) = &email {
        validate_email(email)?;
    }
    let password_hash = match payload.password {
        Some(password) => {
            validate_password(&password)?;
            Some(hash_password(&password).map_err(ApiError::Internal)?)
        }
        None => None,
    };

    let profile = state
        .user_repo
        .update(
            id,
            UserPatch {
                username,
                email,
                password_hash,
                role: payload.role,
            },
        )
        .await?;

    if let Some(role) = payload.role {
        tracing::info!("User {} set role of user {} to {}", user.id, id, role);
    }
    Ok(ApiResponse::ok(profile))
}

#[utoipa::path(
    delete,
    path = "/api/users/profile/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User and their progress deleted"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_profile(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<Value>> {
    ensure_access(&user, id)?;
    state.user_repo.delete(id).await?;
    tracing::info!("User {} deleted by {}", id, user.id);
    Ok(ApiResponse::ok(json!({ "id": id })))
}
