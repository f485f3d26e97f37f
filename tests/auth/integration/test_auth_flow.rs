use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::support::{read_json, send_request, setup_test_app};
use learngate::auth::TokenPair;

#[tokio::test]
async fn register_login_and_fetch_principal() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "alice_student",
            "password": "Str0ngP@ss!",
            "email": "alice@example.com",
            "fullName": "José Álvarez"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let account: Value = read_json(response).await;
    assert_eq!(account["username"], "alice_student");
    assert!(account.get("passwordHash").is_none());

    let pair = app.login("alice_student", "Str0ngP@ss!").await;

    let response = send_request(
        &app,
        Method::GET,
        "/api/v1/auth/me",
        Some(&pair.access_token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let principal: Value = read_json(response).await;
    assert_eq!(principal["username"], "alice_student");
    assert_eq!(principal["email"], "alice@example.com");
    // Diacritics are stripped from the display name on the principal.
    assert_eq!(principal["fullName"], "Jose Alvarez");
}

#[tokio::test]
async fn login_failures_share_one_error_message() {
    let app = setup_test_app().await;
    app.register_account("bob_student", "Str0ngP@ss!").await;

    let wrong_password = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "bob_student", "password": "incorrect" })),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: Value = read_json(wrong_password).await;

    let unknown_user = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "nobody_here", "password": "incorrect" })),
    )
    .await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user: Value = read_json(unknown_user).await;

    // A caller cannot tell a bad password from a missing account.
    assert_eq!(wrong_password["message"], unknown_user["message"]);
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let app = setup_test_app().await;
    app.register_account("carol_student", "Str0ngP@ss!").await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "carol_student", "password": "An0therP@ss!" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_short_usernames() {
    let app = setup_test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "abcd", "password": "Str0ngP@ss!" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_token_rotates_into_a_working_pair() {
    let app = setup_test_app().await;
    app.register_account("dave_student", "Str0ngP@ss!").await;
    let pair = app.login("dave_student", "Str0ngP@ss!").await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refreshToken": pair.refresh_token })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated: TokenPair = read_json(response).await;
    assert_ne!(rotated.access_token, pair.access_token);

    let response = send_request(
        &app,
        Method::GET,
        "/api/v1/auth/me",
        Some(&rotated.access_token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let principal: Value = read_json(response).await;
    assert_eq!(principal["username"], "dave_student");
}

#[tokio::test]
async fn refresh_rejects_an_access_token() {
    let app = setup_test_app().await;
    app.register_account("erin_student", "Str0ngP@ss!").await;
    let pair = app.login("erin_student", "Str0ngP@ss!").await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refreshToken": pair.access_token })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_update_rehashes_only_when_password_supplied() {
    let app = setup_test_app().await;
    let account = app.register_account("frank_student", "Str0ngP@ss!").await;
    let pair = app.login("frank_student", "Str0ngP@ss!").await;

    // Update contact details without touching the password.
    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/v1/accounts/{}", account.id),
        Some(&pair.access_token),
        Some(json!({ "email": "frank@example.com" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old password still works.
    app.login("frank_student", "Str0ngP@ss!").await;

    // Now change the password.
    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/v1/accounts/{}", account.id),
        Some(&pair.access_token),
        Some(json!({ "password": "N3wS3cret!pw" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "frank_student", "password": "Str0ngP@ss!" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.login("frank_student", "N3wS3cret!pw").await;
}

#[tokio::test]
async fn profile_update_is_restricted_to_the_caller() {
    let app = setup_test_app().await;
    app.register_account("grace_student", "Str0ngP@ss!").await;
    let other = app.register_account("heidi_student", "Str0ngP@ss!").await;
    let pair = app.login("grace_student", "Str0ngP@ss!").await;

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/v1/accounts/{}", other.id),
        Some(&pair.access_token),
        Some(json!({ "email": "grace@example.com" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_is_refused_for_disabled_accounts() {
    let app = setup_test_app().await;
    let account = app.register_account("ivan_student", "Str0ngP@ss!").await;

    app.set_account_flags(
        account.id,
        learngate::auth::UpdateAccount { is_deleted: Some(true), ..Default::default() },
    )
    .await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "ivan_student", "password": "Str0ngP@ss!" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn healthz_reports_account_count() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["accounts"], 0);

    app.register_account("judy_student", "Str0ngP@ss!").await;

    let response = send_request(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["accounts"], 1);
}
