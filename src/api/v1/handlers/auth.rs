/*
 * Responsibility
 * - /auth handlers: issue, issue-as-cookies, refresh, logout, me
 * - Request bodies for issuance are the claims object itself
 * - Credential checks happen before these are reached (host application)
 */
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::api::v1::cookies::{
    ACCESS_HEADER_PAYLOAD_COOKIE, ACCESS_SIGNATURE_COOKIE, header_payload_options,
    removal_cookies, signature_options,
};
use crate::api::v1::dto::tokens::{AccessTokenResponse, RefreshRequest, TokensResponse};
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::services::spa_auth::Payload;
use crate::state::AppState;

// Registered claims re-derived on every issuance.
const REISSUED_CLAIMS: [&str; 2] = ["iat", "exp"];

pub async fn issue_tokens(
    State(state): State<AppState>,
    Json(payload): Json<Payload>,
) -> Result<(StatusCode, Json<TokensResponse>), AppError> {
    let pair = state.auth.generate_tokens(&payload)?;
    Ok((StatusCode::CREATED, Json(pair.into())))
}

pub async fn issue_cookies(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<Payload>,
) -> Result<(StatusCode, CookieJar, Json<AccessTokenResponse>), AppError> {
    let out = state.auth.generate_access_token_as_two_cookies(
        &payload,
        header_payload_options(&state.cookies),
        signature_options(&state.cookies),
    )?;

    let jar = jar
        .add(out.first_cookie.to_cookie(ACCESS_HEADER_PAYLOAD_COOKIE))
        .add(out.second_cookie.to_cookie(ACCESS_SIGNATURE_COOKIE));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AccessTokenResponse {
            access_token: out.token,
        }),
    ))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokensResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::BadRequest(msg.to_string()))?;

    let mut claims = state.auth.verify_refresh_token(&req.refresh_token)?;
    for claim in REISSUED_CLAIMS {
        claims.remove(claim);
    }

    let pair = state.auth.generate_tokens(&claims)?;
    Ok(Json(pair.into()))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (StatusCode, CookieJar) {
    let jar = removal_cookies(&state.cookies)
        .into_iter()
        .fold(jar, |jar, cookie| jar.add(cookie));

    (StatusCode::NO_CONTENT, jar)
}

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<Payload> {
    Json(ctx.claims)
}
