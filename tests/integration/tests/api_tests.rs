//! API Integration Tests
//!
//! Drive the real axum app over HTTP. Most tests run against in-memory
//! stores; the Postgres test at the bottom needs `DATABASE_URL`.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_database_env, fixtures::*, refresh_cookie, TestServer,
};
use reqwest::StatusCode;

/// Register and log in a fresh user, returning (credentials, access, refresh)
async fn login_new_user(server: &TestServer) -> (Credentials, String, String) {
    let creds = Credentials::unique();
    let response = server.post("/api/auth/registration", &creds).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/auth/login", &creds).await.unwrap();
    let refresh = refresh_cookie(&response).expect("login sets refresh cookie");
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    (creds, token.token, refresh)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/auth/registration", &Credentials::unique())
        .await
        .unwrap();
    let body: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body.id, 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();

    server.post("/api/auth/registration", &creds).await.unwrap();

    let response = server
        .post("/api/auth/registration", &creds.with_password("password2"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "USER_EXISTS");
}

#[tokio::test]
async fn test_register_short_password() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/auth/registration",
            &Credentials::unique().with_password("short"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_sets_refresh_cookie() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    server.post("/api/auth/registration", &creds).await.unwrap();

    let response = server.post("/api/auth/login", &creds).await.unwrap();
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();

    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/api/auth"));

    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!token.token.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    server.post("/api/auth/registration", &creds).await.unwrap();

    let wrong_password = server
        .post("/api/auth/login", &creds.with_password("password2"))
        .await
        .unwrap();
    let wrong_password: ErrorBody = assert_json(wrong_password, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let unknown = server
        .post("/api/auth/login", &Credentials::unique())
        .await
        .unwrap();
    let unknown: ErrorBody = assert_json(unknown, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(wrong_password.error.code, "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.error.code, unknown.error.code);
    assert_eq!(wrong_password.error.message, unknown.error.message);
}

#[tokio::test]
async fn test_refresh_rotation() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, access, refresh) = login_new_user(&server).await;

    let response = server
        .put_with_refresh_cookie("/api/auth/refresh", &refresh)
        .await
        .unwrap();
    let rotated = refresh_cookie(&response).expect("refresh sets a new cookie");
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_ne!(rotated, refresh);
    assert_ne!(token.token, access);

    // The old refresh token no longer resolves
    let response = server
        .put_with_refresh_cookie("/api/auth/refresh", &refresh)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "REFRESH_TOKEN_NOT_FOUND");

    // The new access token is accepted
    let response = server.get_auth("/api/notes", &token.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_logins_keep_one_valid_refresh_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    server.post("/api/auth/registration", &creds).await.unwrap();

    let logins = (0..4).map(|_| server.post("/api/auth/login", &creds));
    let responses = futures::future::join_all(logins).await;

    let mut refresh_tokens = Vec::new();
    for response in responses {
        let response = response.unwrap();
        refresh_tokens.push(refresh_cookie(&response).unwrap());
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    // Only the token stored last still resolves
    let mut accepted = 0;
    for token in &refresh_tokens {
        let response = server
            .put_with_refresh_cookie("/api/auth/refresh", token)
            .await
            .unwrap();
        match response.status() {
            StatusCode::OK => accepted += 1,
            status => assert_eq!(status, StatusCode::UNAUTHORIZED),
        }
    }
    assert_eq!(accepted, 1);
}

// ============================================================================
// Note Tests
// ============================================================================

#[tokio::test]
async fn test_notes_require_auth() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/notes").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTH");

    let response = server.get_auth("/api/notes", "garbage").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_create_and_list_notes() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, access, _) = login_new_user(&server).await;

    for i in 1..=3 {
        let response = server
            .post_auth("/api/notes", &access, &CreateNoteRequest::new(format!("note {i}")))
            .await
            .unwrap();
        let created: CreateNoteResponse =
            assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(created.id, i);
        assert!(created.spelling_errors.is_empty());
    }

    let response = server.get_auth("/api/notes", &access).await.unwrap();
    let all: NotesResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.notes.len(), 3);
    assert!(!all.notes[0].created_at.is_empty());

    let response = server
        .get_auth("/api/notes?page=2&limit=2", &access)
        .await
        .unwrap();
    let page: NotesResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.notes.len(), 1);
    assert_eq!(page.notes[0].note, "note 3");

    let response = server
        .get_auth("/api/notes?page=abc&limit=2", &access)
        .await
        .unwrap();
    let fallback: NotesResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fallback.notes.len(), 3);
}

#[tokio::test]
async fn test_notes_are_private() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice, _) = login_new_user(&server).await;
    let (_, bob, _) = login_new_user(&server).await;

    server
        .post_auth("/api/notes", &alice, &CreateNoteRequest::new("alice only"))
        .await
        .unwrap();

    let response = server.get_auth("/api/notes", &bob).await.unwrap();
    let notes: NotesResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(notes.notes.is_empty());
}

#[tokio::test]
async fn test_empty_note_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, access, _) = login_new_user(&server).await;

    let response = server
        .post_auth("/api/notes", &access, &CreateNoteRequest::new("   "))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Postgres-backed flow
// ============================================================================

#[tokio::test]
async fn test_postgres_login_and_refresh() {
    if !check_database_env() {
        return;
    }

    let server = TestServer::start_postgres()
        .await
        .expect("Failed to start server");
    let (_, _, refresh) = login_new_user(&server).await;

    let response = server
        .put_with_refresh_cookie("/api/auth/refresh", &refresh)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .put_with_refresh_cookie("/api/auth/refresh", &refresh)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
