//! HTTP handlers for the auth endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::auth::models::{Principal, TokenPair};
use crate::auth::validation::{
    LoginRequest, RefreshRequest, RegisterRequest, UpdateAccountRequest,
};
use crate::auth::AccountResponse;
use crate::domain::AccountId;
use crate::observability::metrics;

/// Health probe backed by an account-store read. Returns 503 when the store
/// is unreachable.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let accounts = state.accounts.count().await.map_err(|err| {
        ApiError::ServiceUnavailable(format!("account store unreachable: {}", err))
    })?;

    Ok(Json(json!({ "status": "ok", "accounts": accounts })))
}

/// `POST /api/v1/auth/register`: create a new account.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let account = state.accounts.register(payload).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// `POST /api/v1/auth/login`: authenticate and mint a token pair.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let account = state.login.login(&payload).await?;
    let pair = state.tokens.issue_pair(
        account.id,
        &account.username,
        account.display_name(),
    )?;

    metrics::record_pair_issued("login");
    Ok(Json(pair))
}

/// `POST /api/v1/auth/refresh`: rotate a refresh token into a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state.tokens.refresh(&payload.refresh_token)?;

    metrics::record_pair_issued("refresh");
    Ok(Json(pair))
}

/// `GET /api/v1/auth/me`: return the authenticated principal.
pub async fn current_principal(Extension(principal): Extension<Principal>) -> Json<Principal> {
    Json(principal)
}

/// `PUT /api/v1/accounts/{id}`: update the caller's own profile.
pub async fn update_account(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = AccountId::from_i64(id);
    if principal.account_id != id {
        return Err(ApiError::forbidden("forbidden: cannot modify another account"));
    }

    let account = state.accounts.update_profile(id, payload).await?;
    Ok(Json(account.into()))
}
