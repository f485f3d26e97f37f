//! Login service for username/password authentication.

use std::sync::{Arc, LazyLock};

use tracing::{info, instrument, warn};

use crate::auth::account::Account;
use crate::auth::hashing;
use crate::auth::validation::LoginRequest;
use crate::errors::{AuthErrorType, Error, Result};
use crate::observability::metrics;
use crate::storage::repositories::{AccountRepository, SqlxAccountRepository};
use crate::storage::DbPool;

/// Pre-computed dummy hash for timing-safe user enumeration prevention.
/// When a non-existent username is used, we still run a full PBKDF2
/// verification against this hash so the response time matches real
/// verification.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hashing::hash_password("dummy_startup_value").unwrap_or_else(|_| "00:00".to_string())
});

/// Service for handling username/password authentication.
///
/// All failure modes surface as the same "invalid username or password"
/// error; the precise reason is only logged and counted.
#[derive(Clone)]
pub struct LoginService {
    repository: Arc<dyn AccountRepository>,
}

impl LoginService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(Arc::new(SqlxAccountRepository::new(pool)))
    }

    /// Authenticate with username and password, returning the account.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Account> {
        let (account, password_hash) =
            match self.repository.get_account_with_password(&request.username).await? {
                Some(result) => result,
                None => {
                    // Prevent timing-based user enumeration: perform dummy hash
                    // verification so response time matches real verification
                    if let Err(e) = hashing::verify_password(&request.password, &DUMMY_HASH) {
                        warn!(error = %e, "dummy hash verification failed unexpectedly");
                    }
                    warn!(username = %request.username, "login attempt for non-existent account");
                    metrics::record_authentication("invalid_credentials");
                    return Err(invalid_credentials());
                }
            };

        let password_matches = hashing::verify_password(&request.password, &password_hash)?;
        if !password_matches {
            warn!(account_id = %account.id, "login attempt with incorrect password");
            metrics::record_authentication("invalid_credentials");
            return Err(invalid_credentials());
        }

        if let Some(reason) = account.signin_block() {
            warn!(account_id = %account.id, reason = %reason, "login attempt for disabled account");
            metrics::record_authentication("account_disabled");
            return Err(invalid_credentials());
        }

        metrics::record_authentication("success");
        info!(account_id = %account.id, "account logged in");
        Ok(account)
    }
}

fn invalid_credentials() -> Error {
    Error::auth("Invalid username or password", AuthErrorType::InvalidCredentials)
}
