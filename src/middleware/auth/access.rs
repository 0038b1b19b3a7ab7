//! Access token verification -> AuthCtx in request extensions.
//!
//! Accepted transports, in order:
//! 1. `Authorization: Bearer <jwt>`
//! 2. the split cookie pair (`header.payload` + `signature`), rejoined by SpaAuthService

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::v1::cookies::{ACCESS_HEADER_PAYLOAD_COOKIE, ACCESS_SIGNATURE_COOKIE};
use crate::api::v1::extractors::{AuthCtx, TokenSource};
use crate::error::AppError;
use crate::middleware::http::REQUEST_ID_HEADER;
use crate::services::spa_auth::{Payload, SpaAuthError, SpaAuthService};
use crate::state::AppState;

/// Credential as presented by the client, before verification.
enum PresentedToken {
    Bearer(String),
    SplitCookies {
        header_and_payload: String,
        signature: String,
    },
}

impl PresentedToken {
    fn source(&self) -> TokenSource {
        match self {
            Self::Bearer(_) => TokenSource::Bearer,
            Self::SplitCookies { .. } => TokenSource::SplitCookies,
        }
    }

    fn verify(&self, auth: &SpaAuthService) -> Result<Payload, SpaAuthError> {
        match self {
            Self::Bearer(token) => auth.verify_access_token(token),
            Self::SplitCookies {
                header_and_payload,
                signature,
            } => auth.verify_access_token_from_cookies(header_and_payload, signature),
        }
    }
}

/// Require a valid access token on every route of `router`.
///
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let Some(presented) = extract_token(&req, &jar) else {
        tracing::debug!(%request_id, "no access token presented");
        return Err(AppError::Unauthorized);
    };
    let source = presented.source();

    let claims = match presented.verify(&state.auth) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(%request_id, error = %err, ?source, "access token verification failed");
            return Err(err.into());
        }
    };

    req.extensions_mut().insert(AuthCtx::new(claims, source));

    Ok(next.run(req).await)
}

fn extract_token(req: &Request<Body>, jar: &CookieJar) -> Option<PresentedToken> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(PresentedToken::Bearer(token.to_string()));
    }

    let header_and_payload = jar.get(ACCESS_HEADER_PAYLOAD_COOKIE)?;
    let signature = jar.get(ACCESS_SIGNATURE_COOKIE)?;

    Some(PresentedToken::SplitCookies {
        header_and_payload: header_and_payload.value().to_string(),
        signature: signature.value().to_string(),
    })
}
