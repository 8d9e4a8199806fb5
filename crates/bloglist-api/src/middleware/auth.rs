//! Bearer token extraction.
//!
//! [`TokenLayer`] never rejects a request. It verifies the `Authorization:
//! Bearer <token>` header (if any) and stores the outcome as a
//! [`RequestToken`] extension; handlers that need an identity call
//! [`RequestToken::require`].

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Request},
};
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

use crate::auth::{Claims, TokenError, TokenSigner};
use crate::domain::ApiError;

/// Outcome of token extraction for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestToken {
    /// No bearer credentials sent
    Missing,
    /// Credentials sent but rejected
    Invalid(TokenError),
    /// Verified identity
    Valid(Claims),
}

impl RequestToken {
    /// Verified claims, or `401 token missing or invalid`.
    pub fn require(&self) -> Result<&Claims, ApiError> {
        match self {
            RequestToken::Valid(claims) => Ok(claims),
            RequestToken::Missing => Err(ApiError::token_missing_or_invalid()),
            RequestToken::Invalid(e) => Err((*e).into()),
        }
    }

    fn from_headers(headers: &HeaderMap, signer: &TokenSigner) -> Self {
        match bearer_token(headers) {
            None => RequestToken::Missing,
            Some(token) => match signer.verify(token) {
                Ok(claims) => RequestToken::Valid(claims),
                Err(e) => {
                    debug!(error = %e, "Rejected bearer token");
                    RequestToken::Invalid(e)
                }
            },
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestToken>()
            .cloned()
            .unwrap_or(RequestToken::Missing))
    }
}

/// Token value from `Authorization`, scheme matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Token extraction layer
#[derive(Clone)]
pub struct TokenLayer {
    signer: Arc<TokenSigner>,
}

impl TokenLayer {
    pub fn new(signer: Arc<TokenSigner>) -> Self {
        Self { signer }
    }
}

impl<S> Layer<S> for TokenLayer {
    type Service = TokenService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TokenService {
            inner,
            signer: Arc::clone(&self.signer),
        }
    }
}

/// Token extraction service
#[derive(Clone)]
pub struct TokenService<S> {
    inner: S,
    signer: Arc<TokenSigner>,
}

impl<S> Service<Request<Body>> for TokenService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let token = RequestToken::from_headers(req.headers(), &self.signer);
        req.extensions_mut().insert(token);
        self.inner.call(req)
    }
}
