//! SPA authentication service: access/refresh JWT issuance and verification,
//! with optional split-cookie delivery of access tokens.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
