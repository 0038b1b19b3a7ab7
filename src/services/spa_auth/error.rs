use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpaAuthError>;

/// Failures of token issuance and verification.
///
/// Nothing here is retried or recovered internally; every variant goes
/// straight back to the caller.
#[derive(Debug, Error)]
pub enum SpaAuthError {
    /// A secret required by the requested token kind is not configured.
    #[error("({0}) field is required")]
    Configuration(&'static str),

    #[error("payload must serialize to a JSON object")]
    InvalidPayload(#[source] Option<serde_json::Error>),

    /// Signature mismatch, malformed structure or expiry.
    #[error("token is invalid: {0}")]
    TokenInvalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("signed token has {segments} segments, expected 3")]
    UnexpectedTokenShape { segments: usize },
}

impl SpaAuthError {
    /// `true` when verification failed only because `exp` has passed.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::TokenInvalid(e) if matches!(e.kind(), ErrorKind::ExpiredSignature))
    }
}
