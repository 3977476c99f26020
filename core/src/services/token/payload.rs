//! JWT payload encoding for claim sets
//!
//! Claims become top-level payload members keyed by claim type. A type that
//! appears more than once is written as a JSON array, which is how standard
//! verifiers represent multi-valued claims. The registered members (`iss`,
//! `aud`, `nbf`, `iat`, `exp`) belong to the factory.

use serde_json::{Map, Value};

use crate::domain::entities::claim::{Claim, ClaimSet};
use crate::errors::TokenError;

/// Payload members owned by the factory
pub const REGISTERED_CLAIMS: [&str; 5] = ["iss", "aud", "nbf", "iat", "exp"];

/// Registered payload members of a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredClaims {
    pub iss: String,
    pub aud: String,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
}

pub fn is_registered(claim_type: &str) -> bool {
    REGISTERED_CLAIMS.contains(&claim_type)
}

/// Builds the JSON payload for a claim set
///
/// Caller claims whose type is a registered member are dropped.
pub fn encode_payload(claims: &ClaimSet, registered: &RegisteredClaims) -> Map<String, Value> {
    let mut payload = Map::new();

    for claim in claims {
        if is_registered(&claim.claim_type) {
            tracing::warn!(
                claim_type = %claim.claim_type,
                event = "registered_claim_dropped",
                "Claim collides with a registered token claim and was dropped"
            );
            continue;
        }

        let value = Value::String(claim.value.clone());
        match payload.get_mut(&claim.claim_type) {
            None => {
                payload.insert(claim.claim_type.clone(), value);
            }
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    payload.insert("iss".to_string(), Value::from(registered.iss.as_str()));
    payload.insert("aud".to_string(), Value::from(registered.aud.as_str()));
    payload.insert("nbf".to_string(), Value::from(registered.nbf));
    payload.insert("iat".to_string(), Value::from(registered.iat));
    payload.insert("exp".to_string(), Value::from(registered.exp));

    payload
}

/// Splits a decoded payload back into the claim set and registered members
///
/// Array members yield one claim per element, in order. A type repeated with
/// other claims in between therefore comes back grouped at its first
/// position. Non-string values
/// (from tokens minted elsewhere) keep their JSON text as the claim value.
pub fn decode_payload(payload: Map<String, Value>) -> Result<(ClaimSet, RegisteredClaims), TokenError> {
    let mut iss = None;
    let mut aud = None;
    let mut nbf = None;
    let mut iat = None;
    let mut exp = None;
    let mut claims = Vec::new();

    for (key, value) in payload {
        if !is_registered(&key) {
            match value {
                Value::Array(values) => claims.extend(
                    values
                        .into_iter()
                        .map(|v| Claim::new(key.clone(), claim_value(v))),
                ),
                other => claims.push(Claim::new(key, claim_value(other))),
            }
            continue;
        }

        match key.as_str() {
            "iss" => iss = value.as_str().map(str::to_owned),
            "aud" => aud = value.as_str().map(str::to_owned),
            "nbf" => nbf = value.as_i64(),
            "iat" => iat = value.as_i64(),
            _ => exp = value.as_i64(),
        }
    }

    let registered = RegisteredClaims {
        iss: iss.ok_or(TokenError::InvalidClaims)?,
        aud: aud.ok_or(TokenError::InvalidClaims)?,
        nbf: nbf.ok_or(TokenError::InvalidClaims)?,
        // Not every issuer writes `iat`; fall back to `nbf`
        iat: iat.or(nbf).ok_or(TokenError::InvalidClaims)?,
        exp: exp.ok_or(TokenError::InvalidClaims)?,
    };

    Ok((claims.into_iter().collect(), registered))
}

fn claim_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registered() -> RegisteredClaims {
        RegisteredClaims {
            iss: "issuer".to_string(),
            aud: "api".to_string(),
            nbf: 1_700_000_000,
            iat: 1_700_000_000,
            exp: 1_700_000_900,
        }
    }

    #[test]
    fn test_encode_single_and_repeated_claims() {
        let claims = ClaimSet::new()
            .with("nameid", "42")
            .with("role", "admin")
            .with("role", "auditor")
            .with("role", "owner");

        let payload = encode_payload(&claims, &registered());

        assert_eq!(payload["nameid"], json!("42"));
        assert_eq!(payload["role"], json!(["admin", "auditor", "owner"]));
        assert_eq!(payload["aud"], json!("api"));
        assert_eq!(payload["exp"], json!(1_700_000_900));
    }

    #[test]
    fn test_registered_claims_cannot_be_overridden() {
        let claims = ClaimSet::new().with("aud", "someone-else").with("exp", "0");

        let payload = encode_payload(&claims, &registered());

        assert_eq!(payload["aud"], json!("api"));
        assert_eq!(payload["exp"], json!(1_700_000_900));
        assert_eq!(payload.len(), REGISTERED_CLAIMS.len());
    }

    #[test]
    fn test_decode_restores_claims_in_order() {
        let claims = ClaimSet::new()
            .with("nameid", "42")
            .with("unique_name", "alice")
            .with("role", "admin")
            .with("role", "auditor");

        let payload = encode_payload(&claims, &registered());
        let (decoded, registered_claims) = decode_payload(payload).unwrap();

        assert_eq!(decoded, claims);
        assert_eq!(registered_claims, registered());
    }

    #[test]
    fn test_interleaved_repeats_decode_grouped_by_type() {
        let claims = ClaimSet::new()
            .with("nameid", "42")
            .with("role", "a")
            .with("tenant", "x")
            .with("role", "b");

        let payload = encode_payload(&claims, &registered());
        assert_eq!(payload["role"], json!(["a", "b"]));

        let (decoded, _) = decode_payload(payload).unwrap();
        let expected = ClaimSet::new()
            .with("nameid", "42")
            .with("role", "a")
            .with("role", "b")
            .with("tenant", "x");
        assert_eq!(decoded, expected);
        assert_ne!(decoded, claims);
    }

    #[test]
    fn test_decode_foreign_value_types() {
        let payload = json!({
            "iss": "issuer",
            "aud": "api",
            "nbf": 10,
            "exp": 20,
            "admin": true,
            "level": 3
        });
        let Value::Object(payload) = payload else {
            panic!("expected object");
        };

        let (claims, registered_claims) = decode_payload(payload).unwrap();

        assert_eq!(claims.value("admin"), Some("true"));
        assert_eq!(claims.value("level"), Some("3"));
        assert_eq!(registered_claims.iat, 10);
    }

    #[test]
    fn test_decode_missing_registered_claim() {
        let Value::Object(payload) = json!({ "iss": "issuer", "nbf": 1, "exp": 2 }) else {
            panic!("expected object");
        };

        assert_eq!(decode_payload(payload), Err(TokenError::InvalidClaims));
    }
}
