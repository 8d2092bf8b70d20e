use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Username cannot be empty")]
    EmptyUsername,
}

/// The label the current session is logged in under.
///
/// There is no credential behind it; any non-blank name is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    username: String,
}

impl User {
    pub fn new(username: &str) -> Result<Self, Error> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::EmptyUsername);
        }
        Ok(Self {
            username: username.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.username.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_username() {
        let user = User::new("  alice ").unwrap();

        assert_eq!(user.username(), "alice");
    }

    #[test]
    fn new_rejects_blank_username() {
        assert_eq!(User::new(""), Err(Error::EmptyUsername));
        assert_eq!(User::new("   "), Err(Error::EmptyUsername));
    }

    #[test]
    fn serializes_as_username_object() {
        let user = User::new("bob").unwrap();

        let json = serde_json::to_string(&user).unwrap();

        assert_eq!(json, r#"{"username":"bob"}"#);
    }
}
