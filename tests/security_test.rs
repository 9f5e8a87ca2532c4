use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use ilmquest::auth::{create_jwt, decode_jwt, hash_password, verify_password};
use ilmquest::db;
use ilmquest::domain::{NewUser, Role};
use ilmquest::infrastructure::AppState;
use ilmquest::models::user_progress;
use ilmquest::server;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

const JWT_SECRET: &str = "security-test-secret";

async fn setup() -> (Router, AppState) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(db, JWT_SECRET);
    (server::build_router(state.clone(), &[]), state)
}

async fn create_user(state: &AppState, username: &str, role: Role) -> (i32, String) {
    let user = state
        .user_repo
        .create(NewUser {
            username: username.to_string(),
            email: format!("{}@example.org", username),
            password_hash: hash_password("password123").unwrap(),
            role,
        })
        .await
        .expect("Failed to create user");
    let token = create_jwt(JWT_SECRET, user.id, role, 1).unwrap();
    (user.id, token)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        req = req.header("Authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => req
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap())),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_password_hashing() {
    let password = "super_secret_password";
    let hash = hash_password(password).expect("Failed to hash password");

    assert_ne!(password, hash);
    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());
}

#[tokio::test]
async fn test_jwt_creation_and_verification() {
    let token = create_jwt(JWT_SECRET, 7, Role::Admin, 1).expect("Failed to create JWT");
    assert!(!token.is_empty());

    let claims = decode_jwt(JWT_SECRET, &token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, "7");
    assert_eq!(claims.role, "admin");
    assert!(decode_jwt(JWT_SECRET, "not-a-token").is_err());
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let (app, _) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "aisha",
            "email": "Aisha@Example.org",
            "password": "bismillah123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["role"], "user");
    assert_eq!(body["data"]["user"]["email"], "aisha@example.org");
    assert!(body["data"]["user"].get("passwordHash").is_none());

    // Email lookup ignores case
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "AISHA@example.org", "password": "bismillah123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "aisha");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "aisha@example.org", "password": "wrong_password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.org", "password": "bismillah123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let (app, state) = setup().await;
    create_user(&state, "yusuf", Role::User).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "someone",
            "email": "YUSUF@example.org",
            "password": "bismillah123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_admin_routes_require_authentication() {
    let (app, _) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/games",
        None,
        Some(json!({ "title": "Quran Quiz", "category": "quran" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "DELETE", "/api/games/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/word-of-the-day", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/users", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_forbid_regular_users() {
    let (app, state) = setup().await;
    let (_, token) = create_user(&state, "bilal", Role::User).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/games",
        Some(&token),
        Some(json!({ "title": "Quran Quiz", "category": "quran" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Admin access required");

    let (status, _) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_is_read_from_the_database() {
    let (app, state) = setup().await;
    let (id, _) = create_user(&state, "khalid", Role::User).await;

    // A token claiming admin does not grant admin rights
    let forged = create_jwt(JWT_SECRET, id, Role::Admin, 1).unwrap();
    let (status, _) = send(&app, "GET", "/api/users", Some(&forged), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A token for a deleted account stops working
    state.user_repo.delete(id).await.unwrap();
    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User no longer exists");
}

#[tokio::test]
async fn test_profiles_are_private() {
    let (app, state) = setup().await;
    let (maryam, maryam_token) = create_user(&state, "maryam", Role::User).await;
    let (umar, _) = create_user(&state, "umar", Role::User).await;
    let (_, admin_token) = create_user(&state, "admin", Role::Admin).await;

    let uri = format!("/api/users/profile/{}", umar);
    let (status, _) = send(&app, "GET", &uri, Some(&maryam_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "umar");

    // Users edit themselves but cannot promote themselves
    let own = format!("/api/users/profile/{}", maryam);
    let (status, body) = send(
        &app,
        "PUT",
        &own,
        Some(&maryam_token),
        Some(json!({ "username": "maryam_b" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "maryam_b");

    let (status, _) = send(
        &app,
        "PUT",
        &own,
        Some(&maryam_token),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &own,
        Some(&admin_token),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");

    let (status, _) = send(&app, "DELETE", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_a_user_removes_their_progress() {
    let (app, state) = setup().await;
    let (bilal, bilal_token) = create_user(&state, "bilal", Role::User).await;
    let (aisha, aisha_token) = create_user(&state, "aisha", Role::User).await;
    let (_, admin_token) = create_user(&state, "admin", Role::Admin).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/games",
        Some(&admin_token),
        Some(json!({ "title": "Seerah Quiz", "category": "seerah" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for token in [&bilal_token, &aisha_token] {
        let (status, _) = send(
            &app,
            "PUT",
            "/api/progress/seerah-quiz",
            Some(token),
            Some(json!({ "score": 30, "completedChallenge": "hijrah" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let progress_rows = |user_id: i32| {
        user_progress::Entity::find()
            .filter(user_progress::Column::UserId.eq(user_id))
            .count(state.db())
    };
    assert_eq!(progress_rows(bilal).await.unwrap(), 1);

    let uri = format!("/api/users/profile/{}", bilal);
    let (status, body) = send(&app, "DELETE", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], bilal);

    assert_eq!(progress_rows(bilal).await.unwrap(), 0);
    // Other users keep theirs
    assert_eq!(progress_rows(aisha).await.unwrap(), 1);
}

#[tokio::test]
async fn test_password_change_is_hashed() {
    let (app, state) = setup().await;
    let (id, token) = create_user(&state, "hamza", Role::User).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/profile/{}", id),
        Some(&token),
        Some(json!({ "password": "new-password-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let credentials = state
        .user_repo
        .find_credentials("hamza@example.org")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(credentials.password_hash, "new-password-1");
    assert!(verify_password("new-password-1", &credentials.password_hash).unwrap());
}
