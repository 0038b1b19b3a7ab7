/*
 * Responsibility
 * - Names and attributes of the two access-token cookies
 * - Cookie policy lives here (host side); SpaAuthService only splits the value
 */
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::config::CookieSettings;
use crate::services::spa_auth::CookieOptions;

/// `header.payload` half, readable by frontend script.
pub const ACCESS_HEADER_PAYLOAD_COOKIE: &str = "access_hp";
/// `signature` half, HttpOnly.
pub const ACCESS_SIGNATURE_COOKIE: &str = "access_sig";

fn base_options(settings: &CookieSettings) -> CookieOptions {
    CookieOptions {
        domain: settings.domain.clone(),
        path: Some("/".to_string()),
        max_age: Some(Duration::seconds(settings.expiration_seconds)),
        expires: None,
        http_only: false,
        secure: settings.secure,
        same_site: Some(SameSite::Strict),
    }
}

pub fn header_payload_options(settings: &CookieSettings) -> CookieOptions {
    base_options(settings)
}

pub fn signature_options(settings: &CookieSettings) -> CookieOptions {
    CookieOptions {
        http_only: true,
        ..base_options(settings)
    }
}

/// Expired copies of both cookies, for logout.
pub fn removal_cookies(settings: &CookieSettings) -> [Cookie<'static>; 2] {
    let expire = |options: CookieOptions, name: &str| {
        CookieOptions {
            max_age: Some(Duration::ZERO),
            ..options
        }
        .build_cookie(name, "")
    };

    [
        expire(header_payload_options(settings), ACCESS_HEADER_PAYLOAD_COOKIE),
        expire(signature_options(settings), ACCESS_SIGNATURE_COOKIE),
    ]
}
