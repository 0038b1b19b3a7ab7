/*
 * Responsibility
 * - Immutable token configuration handed to `SpaAuthService::new`
 * - Accepts the host's JSON shape:
 *   { "useAccessToken": { "jwtAccessSecretKey", "jwtAccessActivationPeriod" },
 *     "useRefreshToken": { "jwtRefreshSecretKey", "jwtRefreshActivationPeriod"? } }
 */
use serde::Deserialize;

use crate::services::spa_auth::activation_period::ActivationPeriod;

/// Refresh tokens live this long unless configured otherwise.
pub const DEFAULT_REFRESH_ACTIVATION_PERIOD: ActivationPeriod = ActivationPeriod::days(5);

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaAuthOptions {
    pub use_access_token: AccessTokenOptions,
    #[serde(default)]
    pub use_refresh_token: Option<RefreshTokenOptions>,
}

#[derive(Clone, Deserialize)]
pub struct AccessTokenOptions {
    #[serde(rename = "jwtAccessSecretKey", default)]
    pub secret_key: String,
    #[serde(rename = "jwtAccessActivationPeriod")]
    pub activation_period: ActivationPeriod,
}

#[derive(Clone, Deserialize)]
pub struct RefreshTokenOptions {
    #[serde(rename = "jwtRefreshSecretKey", default)]
    pub secret_key: String,
    #[serde(rename = "jwtRefreshActivationPeriod", default)]
    pub activation_period: Option<ActivationPeriod>,
}

impl RefreshTokenOptions {
    pub fn activation_period(&self) -> ActivationPeriod {
        self.activation_period
            .unwrap_or(DEFAULT_REFRESH_ACTIVATION_PERIOD)
    }
}

// Secrets are never printed.
impl std::fmt::Debug for AccessTokenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenOptions")
            .field("secret_key_set", &!self.secret_key.is_empty())
            .field("activation_period", &self.activation_period)
            .finish()
    }
}

impl std::fmt::Debug for RefreshTokenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenOptions")
            .field("secret_key_set", &!self.secret_key.is_empty())
            .field("activation_period", &self.activation_period)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_host_shape() {
        let options: SpaAuthOptions = serde_json::from_str(
            r#"{
                "useAccessToken": {
                    "jwtAccessSecretKey": "access",
                    "jwtAccessActivationPeriod": "15m"
                },
                "useRefreshToken": { "jwtRefreshSecretKey": "refresh" }
            }"#,
        )
        .unwrap();

        assert_eq!(options.use_access_token.secret_key, "access");
        assert_eq!(options.use_access_token.activation_period.as_secs(), 900);

        let refresh = options.use_refresh_token.unwrap();
        assert_eq!(refresh.secret_key, "refresh");
        assert_eq!(refresh.activation_period(), ActivationPeriod::days(5));
    }

    #[test]
    fn refresh_section_is_optional() {
        let options: SpaAuthOptions = serde_json::from_str(
            r#"{ "useAccessToken": { "jwtAccessActivationPeriod": "1h" } }"#,
        )
        .unwrap();

        assert!(options.use_access_token.secret_key.is_empty());
        assert!(options.use_refresh_token.is_none());
    }

    #[test]
    fn debug_hides_secrets() {
        let options = AccessTokenOptions {
            secret_key: "super-secret".to_string(),
            activation_period: ActivationPeriod::from_secs(60),
        };
        let printed = format!("{:?}", options);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("secret_key_set: true"));
    }
}
