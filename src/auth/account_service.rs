//! Business logic for account registration and profile maintenance.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::account::{Account, NewAccount, UpdateAccount};
use crate::auth::hashing;
use crate::auth::validation::{RegisterRequest, UpdateAccountRequest};
use crate::domain::AccountId;
use crate::errors::{Error, Result};
use crate::observability::metrics;
use crate::storage::repositories::{AccountRepository, SqlxAccountRepository};
use crate::storage::DbPool;
use validator::Validate;

/// Service for creating and updating accounts.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(Arc::new(SqlxAccountRepository::new(pool)))
    }

    /// Register a new account, hashing the supplied password.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> Result<Account> {
        request.validate().map_err(Error::from)?;

        if self.repository.get_account_by_username(&request.username).await?.is_some() {
            return Err(Error::conflict(
                format!("Username '{}' is already taken", request.username),
                "account",
            ));
        }

        let password_hash = hashing::hash_password(&request.password)?;

        let account = self
            .repository
            .create_account(NewAccount {
                username: request.username,
                password_hash,
                email: request.email.unwrap_or_default(),
                phone: request.phone.unwrap_or_default(),
                full_name: request.full_name.unwrap_or_default(),
            })
            .await?;

        metrics::record_registration();
        info!(account_id = %account.id, "account registered");
        Ok(account)
    }

    /// Fetch an account by id.
    pub async fn get(&self, id: AccountId) -> Result<Account> {
        self.repository
            .get_account(id)
            .await?
            .ok_or_else(|| Error::not_found("account", id.to_string()))
    }

    /// Count registered accounts. Doubles as a cheap store-reachability probe.
    pub async fn count(&self) -> Result<i64> {
        self.repository.count_accounts().await
    }

    /// Update an account's profile fields.
    ///
    /// The password is re-hashed only when the request carries a new
    /// plaintext password; otherwise the stored hash is untouched.
    #[instrument(skip(self, request), fields(account_id = %id))]
    pub async fn update_profile(
        &self,
        id: AccountId,
        request: UpdateAccountRequest,
    ) -> Result<Account> {
        request.validate().map_err(Error::from)?;

        let password_hash = match request.password.as_deref() {
            Some(plaintext) => Some(hashing::hash_password(plaintext)?),
            None => None,
        };

        let account = self
            .repository
            .update_account(
                id,
                UpdateAccount {
                    email: request.email,
                    phone: request.phone,
                    full_name: request.full_name,
                    password_hash,
                    ..Default::default()
                },
            )
            .await?;

        info!(account_id = %account.id, "account profile updated");
        Ok(account)
    }
}
