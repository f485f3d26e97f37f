//! Data models used by the session-token subsystem.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::account::Account;
use crate::domain::AccountId;
use crate::errors::Error;
use crate::utils::text::strip_diacritics;

/// Classification of a session token. A refresh token can never stand in for
/// an access token, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "ACCESS",
            TokenKind::Refresh => "REFRESH",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = TokenKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCESS" => Ok(TokenKind::Access),
            "REFRESH" => Ok(TokenKind::Refresh),
            other => Err(TokenKindParseError(other.to_string())),
        }
    }
}

/// Error returned when token kind parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid token kind: {0}")]
pub struct TokenKindParseError(pub String);

/// Payload carried by every session token.
///
/// Field names are part of the wire format and must not change: existing
/// tokens are verified against this exact serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Parse the subject account id. `None` when the claim does not hold a
    /// positive integer.
    pub fn account_id(&self) -> Option<AccountId> {
        AccountId::parse(&self.user_id).ok()
    }
}

/// A freshly minted access/refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Why an otherwise-authenticated account was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    Inactive,
    Deleted,
    Suspended,
    Blocked,
}

impl DisabledReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisabledReason::Inactive => "inactive",
            DisabledReason::Deleted => "deleted",
            DisabledReason::Suspended => "suspended",
            DisabledReason::Blocked => "blocked",
        }
    }
}

impl Display for DisabledReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised while authenticating a request.
///
/// Every variant except `Persistence` collapses into the same opaque 401 at
/// the API boundary; the precise reason is only logged and counted
/// server-side.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized: no credential presented")]
    MissingCredential,
    #[error("unauthorized: unrecognized authorization scheme")]
    UnsupportedScheme,
    #[error("unauthorized: token signature rejected")]
    InvalidSignature,
    #[error("unauthorized: token expired")]
    Expired,
    #[error("unauthorized: wrong token kind")]
    WrongTokenKind,
    #[error("unauthorized: account not found")]
    AccountNotFound,
    #[error("unauthorized: account {0}")]
    AccountDisabled(DisabledReason),
    #[error(transparent)]
    Persistence(#[from] Error),
}

impl AuthError {
    /// Short label used for the authentication outcome counter.
    pub fn metric_label(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::UnsupportedScheme => "unsupported_scheme",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::WrongTokenKind => "wrong_kind",
            AuthError::AccountNotFound => "account_not_found",
            AuthError::AccountDisabled(_) => "account_disabled",
            AuthError::Persistence(_) => "error",
        }
    }
}

/// Request-scoped identity derived from a verified access token plus a fresh
/// account lookup. Lives only for the duration of one request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub account_id: AccountId,
    pub username: String,
    pub email: String,
    pub phone: String,
    /// Display name with diacritics stripped for normalized matching.
    pub full_name: String,
    /// Expiry of the access token that authenticated this request (Unix seconds).
    pub expires_at: i64,
}

impl Principal {
    pub fn from_account(account: &Account, expires_at: i64) -> Self {
        Self {
            account_id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            full_name: strip_diacritics(&account.full_name),
            expires_at,
        }
    }
}
