//! Claims carried by identity tokens.

use serde::{Deserialize, Serialize};

use super::user::User;

/// Well-known claim types
///
/// These are the compact names standard verifiers use for the
/// name-identifier and name claims.
pub mod claim_types {
    /// Unique user identifier
    pub const NAME_IDENTIFIER: &str = "nameid";

    /// Display name
    pub const NAME: &str = "unique_name";
}

/// A typed fact about the token subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type (payload key)
    #[serde(rename = "type")]
    pub claim_type: String,

    /// Claim value
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// Ordered sequence of claims attached to a token
///
/// A claim set is built up front and then only read; the factory borrows it
/// while signing and never changes it.
///
/// Signed tokens key claims by type, so a set read back from a token has its
/// repeated types grouped at the position of their first occurrence. Sets
/// without interleaved repeats come back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Creates an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimal claim set for a user: identity and display name
    pub fn for_user(user: &User) -> Self {
        Self::new()
            .with(claim_types::NAME_IDENTIFIER, user.id.as_str())
            .with(claim_types::NAME, user.user_name.as_str())
    }

    /// Returns the set with one more claim appended
    pub fn with(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    /// First claim of the given type
    pub fn find(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }

    /// Value of the first claim of the given type
    pub fn value(&self, claim_type: &str) -> Option<&str> {
        self.find(claim_type).map(|c| c.value.as_str())
    }

    /// The identity claim value, if present
    pub fn identity(&self) -> Option<&str> {
        self.value(claim_types::NAME_IDENTIFIER)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_set_for_user() {
        let user = User::new("42", "alice");
        let claims = ClaimSet::for_user(&user);

        assert_eq!(claims.len(), 2);
        assert_eq!(claims.identity(), Some("42"));
        assert_eq!(claims.value(claim_types::NAME), Some("alice"));
    }

    #[test]
    fn test_claim_set_preserves_order() {
        let claims = ClaimSet::new()
            .with("role", "admin")
            .with("role", "auditor")
            .with("tenant", "north");

        let types: Vec<&str> = claims.iter().map(|c| c.claim_type.as_str()).collect();
        assert_eq!(types, vec!["role", "role", "tenant"]);
        // First match wins
        assert_eq!(claims.value("role"), Some("admin"));
    }

    #[test]
    fn test_empty_claim_set() {
        let claims = ClaimSet::new();
        assert!(claims.is_empty());
        assert_eq!(claims.identity(), None);
    }

    #[test]
    fn test_claim_set_from_iterator() {
        let claims: ClaimSet = vec![Claim::new("a", "1"), Claim::new("b", "2")]
            .into_iter()
            .collect();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims.find("b"), Some(&Claim::new("b", "2")));
    }
}
