//! Tests for token issuing and validation


use idt_shared::TokenConfig;

use crate::services::token::{TokenFactory, TokenValidator};

pub(crate) const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

pub(crate) fn test_config() -> TokenConfig {
    TokenConfig::new(TEST_SECRET)
        .with_issuer("identity-tokens-test")
        .with_audiences("test-api", "test-refresh")
        .with_access_ttl_minutes(15)
        .with_refresh_ttl_minutes(60 * 24)
}

pub(crate) fn create_test_factory() -> TokenFactory {
    TokenFactory::new(&test_config()).expect("Failed to create token factory")
}

pub(crate) fn create_test_validator() -> TokenValidator {
    TokenValidator::new(&test_config()).expect("Failed to create token validator")
}
