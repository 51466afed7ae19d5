//! Marketplace principals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MarketplaceError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Vendor,
}

/// An email address, normalized to lowercase.
///
/// Validation is structural only: a single `@` with a non-empty local part
/// and domain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Err(MarketplaceError::Validation("email must not be empty".into()));
        }
        let Some(at) = s.find('@') else {
            return Err(MarketplaceError::Validation(format!(
                "email is missing an @ symbol: {s}"
            )));
        };
        if at == 0 || at == s.len() - 1 || s[at + 1..].contains('@') {
            return Err(MarketplaceError::Validation(format!("malformed email: {s}")));
        }
        Ok(Self(s))
    }

    /// Wraps an address that was validated before, e.g. one restored from a
    /// session snapshot or seeded demo data.
    pub(crate) fn trusted(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = MarketplaceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The authenticated principal, as persisted in the session snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Email,
    pub role: Role,
}
