//! Domain ID Types with NewType Pattern
//!
//! Type-safe wrappers for domain identifiers to prevent ID mixing errors at
//! compile time. Account identifiers are positive integers assigned by the
//! account store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Identifier of a registered account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap a raw database identifier.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parse and validate an identifier string. Identifiers are positive.
    pub fn parse(s: &str) -> crate::errors::Result<Self> {
        let id: i64 = s
            .parse()
            .map_err(|_| crate::errors::Error::validation(format!("Invalid account id '{}'", s)))?;
        if id <= 0 {
            return Err(crate::errors::Error::validation(format!(
                "Account id must be positive, got {}",
                id
            )));
        }
        Ok(Self(id))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = crate::errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<AccountId> for i64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
