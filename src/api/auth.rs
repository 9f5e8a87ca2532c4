use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiJson, ApiResponse, ApiResult};
use crate::auth::{AuthUser, create_jwt, hash_password, verify_password};
use crate::domain::{NewUser, Role, UserProfile};
use crate::infrastructure::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    token: String,
    user: UserProfile,
}

pub(crate) fn validate_username(username: &str) -> Result<(), ApiError> {
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        return Err(ApiError::BadRequest(
            "username must be between 3 and 30 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::BadRequest(
            "username may only contain letters, digits, '_' and '-'".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Invalid email '{}'", email)))
    }
}

pub(crate) fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn issue_token(state: &AppState, user: &UserProfile) -> ApiResult<String> {
    create_jwt(state.jwt_secret(), user.id, user.role, state.token_ttl_hours)
        .map_err(ApiError::Internal)
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid username, email or password"),
        (status = 409, description = "Username or email taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, ApiResponse<AuthResponse>)> {
    let username = payload.username.trim().to_owned();
    let email = payload.email.trim().to_lowercase();
    validate_username(&username)?;
    validate_email(&email)?;
    validate_password(&payload.password)?;

    let password_hash = hash_password(&payload.password).map_err(ApiError::Internal)?;
    let user = state
        .user_repo
        .create(NewUser {
            username,
            email,
            password_hash,
            role: Role::User,
        })
        .await?;

    let token = issue_token(&state, &user)?;
    Ok(ApiResponse::created(AuthResponse { token, user }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Token issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthResponse>> {
    tracing::info!("Login attempt for: {}", payload.email);

    let Some(credentials) = state.user_repo.find_credentials(&payload.email).await? else {
        tracing::warn!("User not found: {}", payload.email);
        return Err(ApiError::Unauthorized("Invalid credentials"));
    };

    match verify_password(&payload.password, &credentials.password_hash) {
        Ok(true) => {
            let user = credentials.profile;
            tracing::info!("Password verified for user: {}", user.username);
            let token = issue_token(&state, &user)?;
            Ok(ApiResponse::ok(AuthResponse { token, user }))
        }
        Ok(false) => {
            tracing::warn!("Password verification failed for: {}", payload.email);
            Err(ApiError::Unauthorized("Invalid credentials"))
        }
        Err(e) => {
            tracing::error!("Stored hash for {} is unreadable: {}", payload.email, e);
            Err(ApiError::Unauthorized("Invalid credentials"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Profile of the caller"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn me(
    user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<UserProfile>> {
    let profile = state
        .user_repo
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    Ok(ApiResponse::ok(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("abu_bakr").is_ok());
        assert!(validate_username("عمر").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("fatima@example.org").is_ok());
        assert!(validate_email("fatima@localhost").is_err());
        assert!(validate_email("@example.org").is_err());
        assert!(validate_email("a@b@example.org").is_err());
        assert!(validate_email("a b@example.org").is_err());
    }

    #[test]
    fn password_length() {
        assert!(validate_password("bismillah").is_ok());
        assert!(validate_password("short").is_err());
    }
}
