//! Split-cookie transport for access tokens.
//!
//! A compact JWT `header.payload.signature` travels as two cookies:
//! the first carries `header.payload` (script-readable, so the SPA can decode
//! its claims), the second carries `signature` (typically HttpOnly).
//! Cookie attributes are supplied by the caller and passed through untouched.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::services::spa_auth::error::{Result, SpaAuthError};

/// Cookie attributes, chosen by the host and never altered here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub domain: Option<String>,
    pub path: Option<String>,
    pub max_age: Option<Duration>,
    pub expires: Option<OffsetDateTime>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl CookieOptions {
    pub fn build_cookie(&self, name: impl Into<String>, value: impl Into<String>) -> Cookie<'static> {
        let mut builder = Cookie::build((name.into(), value.into()))
            .http_only(self.http_only)
            .secure(self.secure);

        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        if let Some(path) = &self.path {
            builder = builder.path(path.clone());
        }
        if let Some(max_age) = self.max_age {
            builder = builder.max_age(max_age);
        }
        if let Some(expires) = self.expires {
            builder = builder.expires(expires);
        }
        if let Some(same_site) = self.same_site {
            builder = builder.same_site(same_site);
        }

        builder.build()
    }
}

/// A cookie value plus its delivery attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieObject {
    pub value: String,
    pub options: CookieOptions,
}

impl CookieObject {
    pub fn to_cookie(&self, name: impl Into<String>) -> Cookie<'static> {
        self.options.build_cookie(name, self.value.clone())
    }
}

/// Result of issuing an access token as two cookies.
///
/// `join_cookie_values(&first_cookie.value, &second_cookie.value) == token` always holds.
#[derive(Clone, Debug)]
pub struct AccessTokenCookies {
    pub first_cookie: CookieObject,
    pub second_cookie: CookieObject,
    pub token: String,
}

/// Split a compact token into (`header.payload`, `signature`).
pub fn split_signed_token(token: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = parts.as_slice() else {
        return Err(SpaAuthError::UnexpectedTokenShape {
            segments: parts.len(),
        });
    };

    Ok((format!("{}.{}", header, payload), (*signature).to_string()))
}

/// Rebuild the compact token from the two cookie values.
pub fn join_cookie_values(header_and_payload: &str, signature: &str) -> String {
    format!("{}.{}", header_and_payload, signature)
}
