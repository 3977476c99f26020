//! Unit tests for the refresh coordinator

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::claim::{claim_types, ClaimSet};
use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, RefreshError, TokenError};
use crate::repositories::{IdentityLookup, InMemoryIdentityLookup};
use crate::services::refresh::RefreshCoordinator;
use crate::services::token::tests::{create_test_factory, create_test_validator};

use super::mocks::{FailingLookup, RecordingLookup};

fn refresh_claims(id: &str) -> ClaimSet {
    ClaimSet::new()
        .with(claim_types::NAME_IDENTIFIER, id)
        .with(claim_types::NAME, "stale-name")
}

fn create_coordinator(lookup: Arc<RecordingLookup>) -> RefreshCoordinator<RecordingLookup> {
    RefreshCoordinator::new(Arc::new(create_test_factory()), lookup)
}

#[tokio::test]
async fn test_refresh_issues_access_token_for_known_user() {
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("42", "alice")]));
    let coordinator = create_coordinator(lookup.clone());
    let validator = create_test_validator();

    let before = Utc::now();
    let token = coordinator
        .refresh_access_token(&refresh_claims("42"))
        .await
        .unwrap();

    let validated = validator.validate(token.content(), TokenKind::Access).unwrap();
    assert_eq!(validated.claims.identity(), Some("42"));
    assert_eq!(validated.audience, "test-api");
    assert!(token.expires_at() > before + Duration::minutes(14));
    assert_eq!(lookup.requested_ids(), vec!["42".to_string()]);
}

#[tokio::test]
async fn test_refresh_uses_current_user_record() {
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("42", "alice")]));
    let coordinator = create_coordinator(lookup);
    let validator = create_test_validator();

    let token = coordinator
        .refresh_access_token(&refresh_claims("42"))
        .await
        .unwrap();

    let validated = validator.validate(token.content(), TokenKind::Access).unwrap();
    assert_eq!(validated.claims.value(claim_types::NAME), Some("alice"));
}

#[tokio::test]
async fn test_refresh_drops_extra_claims() {
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("42", "alice")]));
    let coordinator = create_coordinator(lookup);
    let validator = create_test_validator();
    let claims = refresh_claims("42")
        .with("role", "admin")
        .with("tenant", "north");

    let token = coordinator.refresh_access_token(&claims).await.unwrap();

    let validated = validator.validate(token.content(), TokenKind::Access).unwrap();
    assert_eq!(validated.claims, ClaimSet::for_user(&User::new("42", "alice")));
    assert!(validated.claims.find("role").is_none());
    assert!(validated.claims.find("tenant").is_none());
}

#[tokio::test]
async fn test_refresh_without_identity_claim() {
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("42", "alice")]));
    let coordinator = create_coordinator(lookup.clone());
    let claims = ClaimSet::new().with(claim_types::NAME, "alice");

    let result = coordinator.refresh_access_token(&claims).await;

    assert!(matches!(
        result,
        Err(DomainError::Refresh(RefreshError::IdentityClaimMissing))
    ));
    assert!(lookup.requested_ids().is_empty());
}

#[tokio::test]
async fn test_refresh_with_empty_identity_claim() {
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("", "nobody")]));
    let coordinator = create_coordinator(lookup.clone());

    let result = coordinator.refresh_access_token(&refresh_claims("")).await;

    assert!(matches!(
        result,
        Err(DomainError::Refresh(RefreshError::IdentityClaimMissing))
    ));
    assert!(lookup.requested_ids().is_empty());
}

#[tokio::test]
async fn test_refresh_for_unknown_user() {
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("42", "alice")]));
    let coordinator = create_coordinator(lookup);

    let result = coordinator.refresh_access_token(&refresh_claims("999")).await;

    match result {
        Err(DomainError::Refresh(RefreshError::UserNotFound { id })) => assert_eq!(id, "999"),
        other => panic!("expected UserNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_propagates_lookup_failure() {
    let coordinator = RefreshCoordinator::new(Arc::new(create_test_factory()), Arc::new(FailingLookup));

    let result = coordinator.refresh_access_token(&refresh_claims("42")).await;

    let error = result.unwrap_err();
    assert!(matches!(error, DomainError::Internal { .. }));
    assert!(!error.is_refresh_denied());
}

#[tokio::test]
async fn test_refresh_with_dyn_lookup() {
    let lookup: Arc<dyn IdentityLookup> =
        Arc::new(InMemoryIdentityLookup::with_users(vec![User::new("42", "alice")]));
    let coordinator = RefreshCoordinator::new(Arc::new(create_test_factory()), lookup);

    let token = coordinator
        .refresh_access_token(&refresh_claims("42"))
        .await
        .unwrap();
    assert!(!token.content().is_empty());
}

#[tokio::test]
async fn test_refresh_with_refresh_token() {
    let factory = Arc::new(create_test_factory());
    let validator = create_test_validator();
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("42", "alice")]));
    let coordinator = RefreshCoordinator::new(factory.clone(), lookup);

    let pair = factory.create_token_pair(&User::new("42", "alice")).unwrap();
    let token = coordinator
        .refresh_with_token(&validator, pair.refresh_token.content())
        .await
        .unwrap();

    let validated = validator.validate(token.content(), TokenKind::Access).unwrap();
    assert_eq!(validated.claims.identity(), Some("42"));
}

#[tokio::test]
async fn test_refresh_with_access_token_is_denied() {
    let factory = Arc::new(create_test_factory());
    let validator = create_test_validator();
    let lookup = Arc::new(RecordingLookup::new(vec![User::new("42", "alice")]));
    let coordinator = RefreshCoordinator::new(factory.clone(), lookup.clone());

    let pair = factory.create_token_pair(&User::new("42", "alice")).unwrap();
    let error = coordinator
        .refresh_with_token(&validator, pair.access_token.content())
        .await
        .unwrap_err();

    assert!(matches!(error, DomainError::Token(TokenError::InvalidAudience)));
    assert!(error.is_refresh_denied());
    assert!(lookup.requested_ids().is_empty());
}

#[tokio::test]
async fn test_concurrent_refreshes_share_one_coordinator() {
    let lookup = Arc::new(RecordingLookup::new(vec![
        User::new("1", "one"),
        User::new("2", "two"),
    ]));
    let coordinator = Arc::new(create_coordinator(lookup.clone()));

    let mut handles = Vec::new();
    for id in ["1", "2", "1", "2"] {
        let coordinator = coordinator.clone();
        handles.push(tokio::spawn(async move {
            coordinator.refresh_access_token(&refresh_claims(id)).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(lookup.requested_ids().len(), 4);
}
