use axum::{extract::State, http::StatusCode};
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};

use super::error::{ApiError, ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::auth::AdminUser;
use crate::domain::{NewWord, WordOfTheDay};
use crate::infrastructure::AppState;

pub(crate) fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

async fn word_for(state: &AppState, date: NaiveDate) -> ApiResult<ApiResponse<WordOfTheDay>> {
    let word = state
        .word_repo
        .find_for_date(date)
        .await?
        .ok_or_else(|| ApiError::not_found("Word of the day"))?;
    Ok(ApiResponse::ok(word))
}

#[utoipa::path(
    get,
    path = "/api/word-of-the-day/today",
    responses(
        (status = 200, description = "Latest word active today (UTC)"),
        (status = 404, description = "No word scheduled yet")
    )
)]
pub async fn today(State(state): State<AppState>) -> ApiResult<ApiResponse<WordOfTheDay>> {
    word_for(&state, Utc::now().date_naive()).await
}

#[utoipa::path(
    get,
    path = "/api/word-of-the-day/date/{date}",
    params(("date" = String, Path, description = "YYYY-MM-DD")),
    responses(
        (status = 200, description = "Latest word active on that date"),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "No word on or before that date")
    )
)]
pub async fn by_date(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
) -> ApiResult<ApiResponse<WordOfTheDay>> {
    let date = parse_date(&raw)?;
    word_for(&state, date).await
}

#[utoipa::path(
    get,
    path = "/api/word-of-the-day",
    responses(
        (status = 200, description = "All scheduled words, newest date first"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_words(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<WordOfTheDay>>> {
    let words = state.word_repo.list().await?;
    Ok(ApiResponse::list(words))
}

#[utoipa::path(
    post,
    path = "/api/word-of-the-day",
    responses(
        (status = 201, description = "Word scheduled"),
        (status = 400, description = "Missing word or meaning, or malformed date"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "A word is already scheduled for that date")
    )
)]
pub async fn create_word(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewWord>,
) -> ApiResult<(StatusCode, ApiResponse<WordOfTheDay>)> {
    let word = state.word_repo.create(payload).await?;
    Ok(ApiResponse::created(word))
}

#[utoipa::path(
    delete,
    path = "/api/word-of-the-day/{id}",
    params(("id" = i32, Path, description = "Word id")),
    responses(
        (status = 200, description = "Word deleted"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Word not found")
    )
)]
pub async fn delete_word(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<Value>> {
    state.word_repo.delete(id).await?;
    Ok(ApiResponse::ok(json!({ "id": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("01/03/2025").is_err());
        assert!(parse_date("today").is_err());
    }
}
