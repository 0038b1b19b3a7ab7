/*
 * Responsibility
 * - v1 URL structure
 * - Public: /health, token issuance, refresh, logout
 * - Access token required: /auth/me
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    auth::{issue_cookies, issue_tokens, logout, me, refresh},
    health::health,
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = middleware::auth::access::apply(
        Router::new().route("/auth/me", get(me)),
        state,
    );

    Router::new()
        .route("/health", get(health))
        .route("/auth/tokens", post(issue_tokens))
        .route("/auth/cookies", post(issue_cookies))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .merge(protected)
}
