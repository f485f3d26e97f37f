//! Shared application state wired into the axum router.

use std::sync::Arc;

use crate::auth::gateway::{AuthGateway, GatewayState};
use crate::auth::{AccountService, LoginService, TokenService};
use crate::config::AppConfig;
use crate::storage::repositories::SqlxAccountRepository;
use crate::storage::DbPool;

/// Handler-facing service bundle. Cloning is cheap; services share the pool
/// and repository behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub login: LoginService,
    pub tokens: TokenService,
    pub gateway: GatewayState,
}

impl AppState {
    pub fn build(pool: DbPool, config: &AppConfig) -> Self {
        let repository = Arc::new(SqlxAccountRepository::new(pool));
        let tokens = TokenService::from_config(&config.auth, config.environment);
        let gateway = Arc::new(AuthGateway::new(tokens.clone(), repository.clone()));

        Self {
            accounts: AccountService::new(repository.clone()),
            login: LoginService::new(repository),
            tokens,
            gateway,
        }
    }
}
