/*!
 * SPA authentication
 *
 * Responsibility:
 * - Access/refresh JWT issuance and verification with independent secrets
 * - Split-cookie delivery of access tokens (`header.payload` + `signature`)
 *
 * Public API:
 * - SpaAuthService, TokenPair, Payload
 * - SpaAuthOptions (+ access/refresh sections), ActivationPeriod
 * - CookieOptions, CookieObject, AccessTokenCookies
 * - SpaAuthError
 */

pub mod activation_period;
pub mod cookies;
pub mod error;
mod jwt;
pub mod options;
mod service;

pub use activation_period::{ActivationPeriod, ActivationPeriodError};
pub use cookies::{AccessTokenCookies, CookieObject, CookieOptions, join_cookie_values};
pub use error::SpaAuthError;
pub use options::{
    AccessTokenOptions, DEFAULT_REFRESH_ACTIVATION_PERIOD, RefreshTokenOptions, SpaAuthOptions,
};
pub use service::{Payload, SpaAuthService, TokenPair};
