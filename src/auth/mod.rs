//! Authentication module entry point.
//!
//! Exposes the authentication stack: password hashing, the signed token
//! codec, the token service, account/login services and the request gateway.

pub mod account;
pub mod account_service;
pub mod codec;
pub mod gateway;
mod hashing;
pub mod login_service;
pub mod models;
pub mod token_service;
pub mod validation;

pub use account::{Account, AccountResponse, NewAccount, UpdateAccount};
pub use account_service::AccountService;
pub use gateway::AuthGateway;
pub use hashing::{hash_password, verify_password};
pub use login_service::LoginService;
pub use models::{AuthError, Claims, Principal, TokenKind, TokenPair};
pub use token_service::TokenService;
pub use validation::{LoginRequest, RefreshRequest, RegisterRequest, UpdateAccountRequest};
