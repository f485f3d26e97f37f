//! # Error Handling
//!
//! This module provides error handling for the Learngate auth service.
//! It defines custom error types using `thiserror`.

mod types;

pub use types::{AuthErrorType, Error, Result};
