//! # Learngate
//!
//! Learngate is the authentication and session gateway for a multi-tenant
//! e-learning platform. It owns the credential lifecycle: password hashing,
//! a compact HMAC-signed session token format, access/refresh pair issuance
//! and rotation, and the request-time gateway that turns a bearer header
//! into an authenticated principal.
//!
//! ## Architecture
//!
//! ```text
//! REST API Layer → Auth Gateway → Token Service → Token Codec
//!      ↓               ↓
//! Login/Account    Account Store
//!   Services        (SQLite)
//! ```
//!
//! ## Core Components
//!
//! - **Password Hasher**: salted PBKDF2-HMAC-SHA512 derivation and
//!   constant-time verification
//! - **Token Codec**: HS512-signed three-segment token encoding/decoding
//! - **Token Service**: access/refresh pair issuance, verification and
//!   stateless rotation
//! - **Auth Gateway**: bearer extraction, token verification, account
//!   status gates and principal assembly
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use learngate::{api, config::AppConfig, storage, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_env()?;
//!     config.validate()?;
//!     let pool = storage::create_pool(&config.database).await?;
//!     let state = api::AppState::build(pool, &config);
//!     api::start_api_server(&config.server, state).await
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod storage;
pub mod utils;

// Re-export commonly used types and traits
pub use errors::{Error, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
