use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::Value;

use crate::support::{
    read_json, send_request, send_request_with_header, setup_test_app, TEST_SECRET,
};
use learngate::auth::codec::{self, Header};
use learngate::auth::{Claims, TokenKind, UpdateAccount};

#[tokio::test]
async fn requests_without_credentials_are_unauthorized() {
    let app = setup_test_app().await;

    let response = send_request_with_header(&app, Method::GET, "/api/v1/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unsupported_scheme_is_indistinguishable_from_missing_credentials() {
    let app = setup_test_app().await;
    app.register_account("alice_student", "Str0ngP@ss!").await;
    let pair = app.login("alice_student", "Str0ngP@ss!").await;

    let missing = send_request_with_header(&app, Method::GET, "/api/v1/auth/me", None).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let missing: Value = read_json(missing).await;

    let basic = send_request_with_header(
        &app,
        Method::GET,
        "/api/v1/auth/me",
        Some(&format!("Basic {}", pair.access_token)),
    )
    .await;
    assert_eq!(basic.status(), StatusCode::UNAUTHORIZED);
    let basic: Value = read_json(basic).await;

    assert_eq!(missing["message"], basic["message"]);
}

#[tokio::test]
async fn jwt_scheme_is_accepted() {
    let app = setup_test_app().await;
    app.register_account("bob_student", "Str0ngP@ss!").await;
    let pair = app.login("bob_student", "Str0ngP@ss!").await;

    let response = send_request_with_header(
        &app,
        Method::GET,
        "/api/v1/auth/me",
        Some(&format!("JWT {}", pair.access_token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_tokens_never_authenticate_requests() {
    let app = setup_test_app().await;
    app.register_account("carol_student", "Str0ngP@ss!").await;
    let pair = app.login("carol_student", "Str0ngP@ss!").await;

    let response =
        send_request(&app, Method::GET, "/api/v1/auth/me", Some(&pair.refresh_token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_tokens_are_rejected() {
    let app = setup_test_app().await;
    app.register_account("dave_student", "Str0ngP@ss!").await;
    let pair = app.login("dave_student", "Str0ngP@ss!").await;

    let mut tampered = pair.access_token.clone();
    // Flip a character in the payload segment.
    let dot = tampered.find('.').unwrap() + 1;
    let original = tampered.as_bytes()[dot];
    let replacement = if original == b'A' { b'B' } else { b'A' };
    tampered.replace_range(dot..dot + 1, std::str::from_utf8(&[replacement]).unwrap());

    let response = send_request(&app, Method::GET, "/api/v1/auth/me", Some(&tampered), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_tokens_are_rejected_even_when_correctly_signed() {
    let app = setup_test_app().await;
    let account = app.register_account("erin_student", "Str0ngP@ss!").await;

    let now = Utc::now().timestamp();
    let claims = Claims {
        user_id: account.id.to_string(),
        username: account.username.clone(),
        full_name: None,
        kind: TokenKind::Access,
        iat: now - 100,
        exp: now - 10,
        jti: "expired-token-test".to_string(),
        iss: "learngate".to_string(),
        aud: "learngate-platform".to_string(),
    };
    let token = codec::encode(&Header::hs512(), &claims, TEST_SECRET.as_bytes()).unwrap();

    let response = send_request(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blocked_account_is_unauthorized_despite_valid_token() {
    let app = setup_test_app().await;
    let account = app.register_account("frank_student", "Str0ngP@ss!").await;
    let pair = app.login("frank_student", "Str0ngP@ss!").await;

    // Token verifies, but the account status gate rejects the request.
    app.set_account_flags(
        account.id,
        UpdateAccount { is_blocked: Some(true), ..Default::default() },
    )
    .await;

    let response =
        send_request(&app, Method::GET, "/api/v1/auth/me", Some(&pair.access_token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn status_changes_apply_to_already_issued_tokens() {
    let app = setup_test_app().await;
    let account = app.register_account("grace_student", "Str0ngP@ss!").await;
    let pair = app.login("grace_student", "Str0ngP@ss!").await;

    for update in [
        UpdateAccount { is_suspended: Some(true), ..Default::default() },
        UpdateAccount { is_suspended: Some(false), is_deleted: Some(true), ..Default::default() },
        UpdateAccount { is_deleted: Some(false), is_active: Some(false), ..Default::default() },
    ] {
        app.set_account_flags(account.id, update).await;
        let response =
            send_request(&app, Method::GET, "/api/v1/auth/me", Some(&pair.access_token), None)
                .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Restoring the account restores access.
    app.set_account_flags(
        account.id,
        UpdateAccount { is_active: Some(true), ..Default::default() },
    )
    .await;
    let response =
        send_request(&app, Method::GET, "/api/v1/auth/me", Some(&pair.access_token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_account_row_is_unauthorized() {
    let app = setup_test_app().await;
    let account = app.register_account("heidi_student", "Str0ngP@ss!").await;
    let pair = app.login("heidi_student", "Str0ngP@ss!").await;

    sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(account.id.as_i64())
        .execute(&app.pool)
        .await
        .unwrap();

    let response =
        send_request(&app, Method::GET, "/api/v1/auth/me", Some(&pair.access_token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
