//! # Configuration Management
//!
//! Environment-driven configuration for the Learngate auth service.

mod settings;

pub use settings::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, ObservabilityConfig, ServerConfig,
};
