//! # Storage Layer
//!
//! Connection pooling, embedded migrations and repositories for the
//! account store.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use migrations::run_migrations;
pub use pool::{create_pool, DbPool};
