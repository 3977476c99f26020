//! In-memory identity lookup for tests and tooling

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::IdentityLookup;

/// Identity lookup backed by a map of users keyed by id
#[derive(Clone, Default)]
pub struct InMemoryIdentityLookup {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryIdentityLookup {
    /// Create an empty lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lookup pre-populated with users
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Add or replace a user
    pub async fn insert(&self, user: User) {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
    }

    /// Remove a user, returning whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        let mut users = self.users.write().await;
        users.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityLookup for InMemoryIdentityLookup {
    async fn get_user(&self, id: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }
}
