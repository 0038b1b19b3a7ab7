use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::services::spa_auth::cookies::{
    AccessTokenCookies, CookieObject, CookieOptions, join_cookie_values, split_signed_token,
};
use crate::services::spa_auth::error::{Result, SpaAuthError};
use crate::services::spa_auth::jwt::HmacJwt;
use crate::services::spa_auth::options::SpaAuthOptions;

/// Opaque claims of the authenticated principal.
pub type Payload = serde_json::Map<String, serde_json::Value>;

const ACCESS_SECRET_FIELD: &str = "jwtAccessSecretKey";
const REFRESH_SECRET_FIELD: &str = "jwtRefreshSecretKey";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies access/refresh JWTs.
///
/// Stateless apart from the keys derived once from `SpaAuthOptions`.
/// A token kind whose secret is empty is kept as `None` and every call
/// touching that kind fails with `SpaAuthError::Configuration`.
#[derive(Clone, Debug)]
pub struct SpaAuthService {
    access: Option<HmacJwt>,
    refresh: Option<HmacJwt>,
}

impl SpaAuthService {
    pub fn new(options: SpaAuthOptions) -> Self {
        let access_secret = options.use_access_token.secret_key.as_str();
        let access = (!access_secret.is_empty()).then(|| {
            HmacJwt::new(
                "access",
                access_secret,
                options.use_access_token.activation_period,
            )
        });

        let refresh = options
            .use_refresh_token
            .as_ref()
            .filter(|r| !r.secret_key.is_empty())
            .map(|r| HmacJwt::new("refresh", &r.secret_key, r.activation_period()));

        if let Some(r) = &options.use_refresh_token
            && !access_secret.is_empty()
            && r.secret_key == access_secret
        {
            warn!("access and refresh tokens share a secret; each kind will accept the other");
        }

        Self { access, refresh }
    }

    fn access(&self) -> Result<&HmacJwt> {
        self.access
            .as_ref()
            .ok_or(SpaAuthError::Configuration(ACCESS_SECRET_FIELD))
    }

    fn refresh(&self) -> Result<&HmacJwt> {
        self.refresh
            .as_ref()
            .ok_or(SpaAuthError::Configuration(REFRESH_SECRET_FIELD))
    }

    pub fn generate_access_token<P: Serialize + ?Sized>(&self, payload: &P) -> Result<String> {
        self.access()?.sign(payload)
    }

    pub fn generate_refresh_token<P: Serialize + ?Sized>(&self, payload: &P) -> Result<String> {
        self.refresh()?.sign(payload)
    }

    /// Issue both tokens; fails as a whole if either kind fails.
    pub fn generate_tokens<P: Serialize + ?Sized>(&self, payload: &P) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(payload)?,
            refresh_token: self.generate_refresh_token(payload)?,
        })
    }

    /// Issue an access token and split it for two-cookie delivery.
    pub fn generate_access_token_as_two_cookies<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        first_cookie_options: CookieOptions,
        second_cookie_options: CookieOptions,
    ) -> Result<AccessTokenCookies> {
        let token = self.generate_access_token(payload)?;
        let (header_and_payload, signature) = split_signed_token(&token)?;

        Ok(AccessTokenCookies {
            first_cookie: CookieObject {
                value: header_and_payload,
                options: first_cookie_options,
            },
            second_cookie: CookieObject {
                value: signature,
                options: second_cookie_options,
            },
            token,
        })
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Payload> {
        self.verify_access_token_as(token)
    }

    pub fn verify_access_token_as<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        self.access()?.verify(token)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Payload> {
        self.verify_refresh_token_as(token)
    }

    pub fn verify_refresh_token_as<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        self.refresh()?.verify(token)
    }

    /// Verify an access token delivered as (`header.payload`, `signature`) cookies.
    pub fn verify_access_token_from_cookies(
        &self,
        header_and_payload: &str,
        signature: &str,
    ) -> Result<Payload> {
        self.verify_access_token(&join_cookie_values(header_and_payload, signature))
    }
}
