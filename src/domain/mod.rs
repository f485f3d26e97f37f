//! Core domain types shared across the service.

mod id;

pub use id::AccountId;
