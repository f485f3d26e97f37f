//! Account repository for the account store.
//!
//! Provides point reads and writes for registered accounts, including the
//! password-hash lookup used by login and the by-id lookup used by the auth
//! gateway.

use crate::auth::account::{Account, NewAccount, UpdateAccount};
use crate::domain::AccountId;
use crate::errors::{Error, Result};
use crate::storage::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::instrument;

#[derive(Debug, Clone, FromRow)]
struct AccountRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
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

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            id: AccountId::from_i64(self.id),
            username: self.username,
            email: self.email,
            phone: self.phone,
            full_name: self.full_name,
            is_active: self.is_active,
            is_deleted: self.is_deleted,
            is_blocked: self.is_blocked,
            is_suspended: self.is_suspended,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Account lookup and mutation capabilities consumed by the auth services.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create a new account
    async fn create_account(&self, account: NewAccount) -> Result<Account>;

    /// Get an account by ID
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>>;

    /// Get an account by username
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Get an account with its password hash for authentication
    async fn get_account_with_password(&self, username: &str)
        -> Result<Option<(Account, String)>>;

    /// Update an account's details
    async fn update_account(&self, id: AccountId, update: UpdateAccount) -> Result<Account>;

    /// Count total accounts
    async fn count_accounts(&self) -> Result<i64>;
}

/// SQLite-backed implementation of [`AccountRepository`].
#[derive(Debug, Clone)]
pub struct SqlxAccountRepository {
    pool: DbPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_row(&self, id: i64) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to fetch account".to_string(),
            })?;
        Ok(row)
    }
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    #[instrument(skip(self, account), fields(username = %account.username), name = "db_create_account")]
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO accounts
                (username, password_hash, email, phone, full_name,
                 is_active, is_deleted, is_blocked, is_suspended,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 1, 0, 0, 0, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.email)
        .bind(&account.phone)
        .bind(&account.full_name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to create account".to_string(),
        })?;

        self.get_account(AccountId::from_i64(id))
            .await?
            .ok_or_else(|| Error::internal("Account vanished immediately after insert"))
    }

    #[instrument(skip(self), name = "db_get_account")]
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.fetch_row(id.as_i64()).await?.map(AccountRow::into_account))
    }

    #[instrument(skip(self, username), name = "db_get_account_by_username")]
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to fetch account by username".to_string(),
            })?;
        Ok(row.map(AccountRow::into_account))
    }

    #[instrument(skip(self, username), name = "db_get_account_with_password")]
    async fn get_account_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(Account, String)>> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to fetch account credentials".to_string(),
            })?;

        Ok(row.map(|row| {
            let hash = row.password_hash.clone();
            (row.into_account(), hash)
        }))
    }

    #[instrument(skip(self, update), name = "db_update_account")]
    async fn update_account(&self, id: AccountId, update: UpdateAccount) -> Result<Account> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                full_name = COALESCE($4, full_name),
                password_hash = COALESCE($5, password_hash),
                is_active = COALESCE($6, is_active),
                is_deleted = COALESCE($7, is_deleted),
                is_blocked = COALESCE($8, is_blocked),
                is_suspended = COALESCE($9, is_suspended),
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.full_name)
        .bind(&update.password_hash)
        .bind(update.is_active)
        .bind(update.is_deleted)
        .bind(update.is_blocked)
        .bind(update.is_suspended)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to update account".to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("account", id.to_string()));
        }

        self.get_account(id)
            .await?
            .ok_or_else(|| Error::not_found("account", id.to_string()))
    }

    #[instrument(skip(self), name = "db_count_accounts")]
    async fn count_accounts(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to count accounts".to_string(),
            })?;
        Ok(count)
    }
}
