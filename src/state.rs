/*
 * Responsibility
 * - Shared context attached to the Router (cheap to clone)
 */
use std::sync::Arc;

use crate::config::CookieSettings;
use crate::services::spa_auth::SpaAuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<SpaAuthService>,
    pub cookies: Arc<CookieSettings>,
}

impl AppState {
    pub fn new(auth: Arc<SpaAuthService>, cookies: CookieSettings) -> Self {
        Self {
            auth,
            cookies: Arc::new(cookies),
        }
    }
}
