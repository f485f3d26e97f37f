//! Account domain models and data structures.
//!
//! Defines the stored account entity, its creation/update payloads, and the
//! API-facing response shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::models::DisabledReason;
use crate::domain::AccountId;

/// Stored representation of a registered account.
///
/// The password hash never leaves the storage layer; this struct carries
/// everything else.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub is_blocked: bool,
    pub is_suspended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// First status flag that bars this account from authenticating, if any.
    ///
    /// Flags are checked in a fixed order: inactive, deleted, suspended,
    /// blocked. Callers surface a uniform rejection regardless of which flag
    /// tripped.
    pub fn signin_block(&self) -> Option<DisabledReason> {
        if !self.is_active {
            Some(DisabledReason::Inactive)
        } else if self.is_deleted {
            Some(DisabledReason::Deleted)
        } else if self.is_suspended {
            Some(DisabledReason::Suspended)
        } else if self.is_blocked {
            Some(DisabledReason::Blocked)
        } else {
            None
        }
    }

    /// Display name as an optional value; the store defaults it to empty.
    pub fn display_name(&self) -> Option<&str> {
        if self.full_name.is_empty() {
            None
        } else {
            Some(&self.full_name)
        }
    }
}

/// New account creation payload. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone: String,
    pub full_name: String,
}

/// Update payload for an existing account.
///
/// `None` fields are left untouched. `password_hash` is only ever `Some` when
/// the caller supplied a new plaintext password; the previous hash is
/// retained otherwise.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub full_name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
    pub is_blocked: Option<bool>,
    pub is_suspended: Option<bool>,
}

/// API-facing account shape. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            phone: account.phone,
            full_name: account.full_name,
            is_active: account.is_active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
