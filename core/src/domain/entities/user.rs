//! User identity record resolved by the identity lookup.

use serde::{Deserialize, Serialize};

/// Identity of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, carried in the identity claim
    pub id: String,

    /// Display name, carried in the name claim
    #[serde(rename = "userName", alias = "user_name")]
    pub user_name: String,
}

impl User {
    pub fn new(id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
        }
    }
}
