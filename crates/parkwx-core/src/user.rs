//! User account records.
//!
//! No endpoint exposes users yet. The password is kept as given, in
//! plaintext, because there is no authentication flow to protect.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CoreError::InvalidUser("username must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn into_user(self, id: RecordId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}
