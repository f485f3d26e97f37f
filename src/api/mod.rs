//! # REST API Layer
//!
//! Axum router, handlers, shared state and the API error envelope.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use server::start_api_server;
pub use state::AppState;
