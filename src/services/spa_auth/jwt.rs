use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error};

use crate::services::spa_auth::activation_period::ActivationPeriod;
use crate::services::spa_auth::error::{Result, SpaAuthError};
use crate::services::spa_auth::service::Payload;

/// HS256 signer/verifier for one token kind.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct HmacJwt {
    kind: &'static str,
    activation_period: ActivationPeriod,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for HmacJwt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacJwt")
            .field("kind", &self.kind)
            .field("activation_period", &self.activation_period)
            .finish()
    }
}

impl HmacJwt {
    pub fn new(kind: &'static str, secret: &str, activation_period: ActivationPeriod) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock tolerance; a token is expired once `now >= exp`.
        validation.leeway = 0;
        validation.reject_tokens_expiring_in_less_than = 1;
        // `nbf` is enforced only when the payload carries it.
        validation.validate_nbf = true;
        // Payloads are opaque; an `aud` claim is carried, not enforced.
        validation.validate_aud = false;

        Self {
            kind,
            activation_period,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign `payload` with `iat = now` and `exp = now + activation period`.
    ///
    /// Any `iat`/`exp` already present in the payload is overwritten.
    pub fn sign<P: Serialize + ?Sized>(&self, payload: &P) -> Result<String> {
        let mut claims = into_claims(payload)?;

        let now = Utc::now().timestamp();
        let exp = now + self.activation_period.as_secs();
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert("exp".to_string(), Value::from(exp));

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(kind = self.kind, error = %e, "failed to sign JWT");
            SpaAuthError::Signing(e)
        })?;

        debug!(kind = self.kind, exp, "issued token");
        Ok(token)
    }

    // Verify signature + exp (+ nbf when present) and decode claims.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        jsonwebtoken::decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(kind = self.kind, error = %e, "token verification failed");
                SpaAuthError::TokenInvalid(e)
            })
    }
}

fn into_claims<P: Serialize + ?Sized>(payload: &P) -> Result<Payload> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(SpaAuthError::InvalidPayload(None)),
        Err(e) => Err(SpaAuthError::InvalidPayload(Some(e))),
    }
}
