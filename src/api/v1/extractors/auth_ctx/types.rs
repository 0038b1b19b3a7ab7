/*
 * Responsibility
 * - Authenticated context visible to handlers
 * - The access middleware verifies the token and stores this in request extensions
 */
use crate::services::spa_auth::Payload;

/// How the access token reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Bearer,
    SplitCookies,
}

#[derive(Debug, Clone)]
pub struct AuthCtx {
    /// Verified claims, including `iat`/`exp`.
    pub claims: Payload,
    pub source: TokenSource,
}

impl AuthCtx {
    pub fn new(claims: Payload, source: TokenSource) -> Self {
        Self { claims, source }
    }
}
