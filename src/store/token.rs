//! Session token codec.
//!
//! Tokens are three dot-joined base64 segments shaped like a JWT, but the
//! signature segment is a placeholder and nothing is verified beyond the
//! embedded expiry. This is a simulation, not a credential scheme.

use crate::models::user::User;
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tokens expire 24 hours after issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims carried in the token payload segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: u64,
    pub email: String,
    pub name: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Issue a token for a user at the given instant.
pub fn issue(user: &User, now: DateTime<Utc>) -> String {
    let header = STANDARD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = serde_json::json!({
        "sub": user.id,
        "email": user.email,
        "name": user.name,
        "iat": now.timestamp(),
        "exp": now.timestamp() + TOKEN_TTL_SECS,
    });
    let payload = STANDARD.encode(claims.to_string());
    let signature = STANDARD.encode("fake-signature");

    format!("{header}.{payload}.{signature}")
}

/// Decode the claims from the middle segment of a token.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::TokenDecode("missing payload segment".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|err| Error::TokenDecode(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| Error::TokenDecode(err.to_string()))
}

/// Check a token's embedded expiry against the given instant.
///
/// Any decode failure counts as invalid.
pub fn is_valid(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp > now.timestamp(),
        Err(_) => false,
    }
}
