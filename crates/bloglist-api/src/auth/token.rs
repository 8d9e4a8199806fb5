//! Signed bearer tokens.
//!
//! ## Format
//!
//! ```text
//! hex(claims_json) "." hex(HMAC-SHA256(secret, claims_json))
//! ```
//!
//! The MAC is checked (in constant time) before the claims are parsed, and
//! expiry is checked last against the injected [`TimeSource`].

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::types::{User, UserId};
use crate::ports::{SystemTimeSource, TimeSource};

type HmacSha256 = Hmac<Sha256>;

/// Identity carried by a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user
    pub id: UserId,
    pub username: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds); absent for non-expiring tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Token verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not `<hex>.<hex>` or claims are not valid JSON
    #[error("malformed token")]
    Malformed,

    /// MAC does not match the payload
    #[error("token signature mismatch")]
    BadSignature,

    /// `exp` is in the past
    #[error("token expired")]
    Expired,
}

/// Issues and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl: Option<Duration>,
    clock: Arc<dyn TimeSource>,
}

impl TokenSigner {
    /// `ttl` of zero issues tokens without an expiry.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
        Self {
            mac,
            ttl: (!ttl.is_zero()).then_some(ttl),
            clock: Arc::new(SystemTimeSource),
        }
    }

    /// Replace the clock (tests).
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue a token for `user`.
    pub fn issue(&self, user: &User) -> String {
        let now = self.clock.now();
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            iat: now,
            exp: self
                .ttl
                .map(|ttl| now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> String {
        // Claims contain only strings and integers; serialization cannot fail.
        let payload = serde_json::to_vec(claims).unwrap_or_default();

        let mut mac = self.mac.clone();
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();

        format!("{}.{}", hex::encode(&payload), hex::encode(signature))
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (payload_hex, signature_hex) = token.trim().split_once('.').ok_or(TokenError::Malformed)?;
        let payload = hex::decode(payload_hex).map_err(|_| TokenError::Malformed)?;
        let signature = hex::decode(signature_hex).map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(&payload);
        mac.verify_slice(&signature).map_err(|_| TokenError::BadSignature)?;

        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if let Some(exp) = claims.exp {
            if self.clock.now() >= exp {
                return Err(TokenError::Expired);
            }
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
