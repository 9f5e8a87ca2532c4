use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use ilmquest::auth::{create_jwt, hash_password};
use ilmquest::db;
use ilmquest::domain::{NewUser, Role};
use ilmquest::infrastructure::AppState;
use ilmquest::server;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

async fn setup() -> (Router, String) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(db, "error-test-secret");
    let admin = state
        .user_repo
        .create(NewUser {
            username: "admin".to_string(),
            email: "admin@example.org".to_string(),
            password_hash: hash_password("password123").unwrap(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    let token = create_jwt(state.jwt_secret(), admin.id, Role::Admin, 1).unwrap();
    (server::build_router(state, &[]), token)
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut req = Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json");
    if let Some(token) = token {
        req = req.header("Authorization", format!("Bearer {}", token));
    }
    let req = req.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send_raw(app, method, uri, token, &body.to_string()).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn assert_error(body: &Value) {
    assert_eq!(body["success"], false, "{body}");
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn test_unknown_game_is_404_with_envelope() {
    let (app, _) = setup().await;

    for uri in [
        "/api/games/999",
        "/api/games/no-such-game",
        "/api/games/no-such-game/questions",
        "/api/games/no-such-game/questions/random",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_error(&body);
    }
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (app, token) = setup().await;

    let (status, body) = send_raw(&app, "POST", "/api/games", Some(&token), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);

    // Missing required field
    let (status, body) = send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "No Category" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}

#[tokio::test]
async fn test_game_validation() {
    let (app, token) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "   ", "category": "quran" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    // Numeric slugs would be read as ids
    let (status, _) = send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "Numbers", "category": "quran", "slug": "123" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "Bad", "category": "quran", "difficulty": "impossible" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_arabic_title_needs_an_explicit_slug() {
    let (app, token) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "الأسماء الحسنى", "category": "aqeedah" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
    assert_eq!(
        body["error"],
        "Cannot derive a slug from the title 'الأسماء الحسنى', provide a slug"
    );

    let (status, body) = send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "الأسماء الحسنى", "category": "aqeedah", "slug": " asma-ul-husna " }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["slug"], "asma-ul-husna");
    assert_eq!(body["data"]["title"], "الأسماء الحسنى");
}

#[tokio::test]
async fn test_duplicate_slug_is_409() {
    let (app, token) = setup().await;
    let game = json!({ "title": "Quran Quiz", "category": "quran" });

    let (status, _) = send(&app, "POST", "/api/games", Some(&token), game.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/games", Some(&token), game).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A game with slug 'quran-quiz' already exists");
}

#[tokio::test]
async fn test_invalid_questions_are_400() {
    let (app, token) = setup().await;
    send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "Quiz", "category": "general" }),
    )
    .await;

    let invalid = [
        json!({ "gameType": "snakes-and-ladders", "question": "?" }),
        json!({ "gameType": "true-false", "statement": "Missing the answer" }),
        json!({
            "gameType": "multiple-choice",
            "question": "Out of range",
            "options": ["a", "b"],
            "correctOptionIndex": 2
        }),
        json!({
            "gameType": "quiz",
            "question": "Answer not offered",
            "options": ["a", "b"],
            "correctAnswer": "c"
        }),
        json!({ "gameType": "word-search", "words": ["MUHAMMAD"], "gridSize": 5 }),
        json!({ "gameType": "word-hunt", "word": "two words", "hint": "letters only" }),
        json!({
            "gameType": "crossword",
            "title": "Too long",
            "size": 4,
            "clues": [
                { "number": 1, "direction": "across", "clue": "Prayer", "answer": "SALAH", "row": 0, "col": 0 }
            ]
        }),
    ];

    for body in invalid {
        let (status, response) = send(
            &app,
            "POST",
            "/api/games/quiz/questions",
            Some(&token),
            body.clone(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_error(&response);
    }
}

#[tokio::test]
async fn test_question_for_unknown_game_is_404() {
    let (app, token) = setup().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/games/missing/questions",
        Some(&token),
        json!({ "gameType": "true-false", "statement": "Hello", "isTrue": true }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Game not found");
}

#[tokio::test]
async fn test_bad_path_and_query_values_are_400() {
    let (app, token) = setup().await;

    let (status, body) = get(&app, "/api/word-of-the-day/date/2025-13-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid date '2025-13-01', expected YYYY-MM-DD"
    );

    let (status, body) = send(
        &app,
        "PUT",
        "/api/games/not-a-number",
        Some(&token),
        json!({ "title": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);

    send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "Quiz", "category": "general" }),
    )
    .await;
    let (status, body) = get(&app, "/api/games/quiz/questions?gameType=chess").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}

#[tokio::test]
async fn test_progress_validation() {
    let (app, token) = setup().await;
    send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        json!({ "title": "Quiz", "category": "general" }),
    )
    .await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/progress/quiz",
        Some(&token),
        json!({ "score": -5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "score cannot be negative");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/progress/unknown",
        Some(&token),
        json!({ "score": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_word_date_is_409() {
    let (app, token) = setup().await;
    let word = json!({ "word": "Sabr", "meaning": "Patience", "dateActive": "2025-02-01" });

    let (status, _) = send(&app, "POST", "/api/word-of-the-day", Some(&token), word.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/word-of-the-day", Some(&token), word).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A word is already scheduled for 2025-02-01");

    let (status, body) = send_raw(&app, "DELETE", "/api/word-of-the-day/4242", Some(&token), "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Word not found");
}
