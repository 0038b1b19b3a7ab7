/*
 * Responsibility
 * - Public interface of the middleware layer
 * - http: request id / trace / limits, cors: SPA origins, auth: access token
 */
pub mod auth;
pub mod cors;
pub mod http;
