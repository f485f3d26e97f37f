//! Repository implementations backed by the SQL store.

mod account;

pub use account::{AccountRepository, SqlxAccountRepository};
