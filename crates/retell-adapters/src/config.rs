//! Process configuration.
//!
//! Values are read from the environment (after `.env` has been loaded by the
//! binary).  The primary API key is mandatory; the bearer token and org id for
//! the undocumented endpoints are optional and only checked when a
//! test-case-definition tool runs.

use crate::error::{AdapterError, Result};

/// Environment variable holding the Retell API key.
pub const API_KEY_VAR: &str = "RETELL_API_KEY";
/// Environment variable holding the bearer token for undocumented endpoints.
pub const BEARER_TOKEN_VAR: &str = "RETELL_UNDOCUMENTED_BEARER_TOKEN";
/// Environment variable holding the organization id for undocumented endpoints.
pub const ORG_ID_VAR: &str = "RETELL_UNDOCUMENTED_ORG_ID";
/// Environment variable overriding the upstream origin.
pub const BASE_URL_VAR: &str = "RETELL_BASE_URL";

/// Default upstream origin.
pub const DEFAULT_BASE_URL: &str = "https://api.retellai.com";

/// Credentials for the bearer-token API surface.
#[derive(Clone)]
pub struct UndocumentedCredentials {
    pub bearer_token: String,
    pub org_id: String,
}

impl std::fmt::Debug for UndocumentedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndocumentedCredentials")
            .field("bearer_token", &"<redacted>")
            .field("org_id", &self.org_id)
            .finish()
    }
}

/// Resolved configuration for the Retell clients.
#[derive(Clone)]
pub struct RetellConfig {
    /// API key for the documented API.
    pub api_key: String,
    /// Upstream origin, without a trailing slash.
    pub base_url: String,
    /// Bearer token and org id, when both were supplied.
    pub undocumented: Option<UndocumentedCredentials>,
}

impl std::fmt::Debug for RetellConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetellConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("undocumented", &self.undocumented)
            .finish()
    }
}

impl RetellConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or_else(|| {
            AdapterError::ConfigError(format!("{API_KEY_VAR} environment variable is required"))
        })?;

        let base_url = get(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&base_url).map_err(|e| {
            AdapterError::ConfigError(format!("{BASE_URL_VAR} is not a valid URL ({base_url}): {e}"))
        })?;

        let undocumented = match (get(BEARER_TOKEN_VAR), get(ORG_ID_VAR)) {
            (Some(bearer_token), Some(org_id)) => Some(UndocumentedCredentials {
                bearer_token,
                org_id,
            }),
            _ => None,
        };

        Ok(Self {
            api_key,
            base_url,
            undocumented,
        })
    }

    /// Credentials for the undocumented endpoints, or a descriptive error
    /// naming whichever variable is missing.
    pub fn require_undocumented(&self) -> Result<&UndocumentedCredentials> {
        self.undocumented.as_ref().ok_or_else(missing_undocumented_credentials)
    }
}

/// The error reported when a test-case-definition tool runs without the
/// bearer token or org id configured.
pub fn missing_undocumented_credentials() -> AdapterError {
    AdapterError::ConfigError(format!(
        "{BEARER_TOKEN_VAR} and {ORG_ID_VAR} environment variables are required for \
         the undocumented Test Case Definition APIs. Add them to your .env file if you \
         want to use test case definition tools."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = RetellConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AdapterError::ConfigError(_)));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = RetellConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn defaults_base_url_and_skips_undocumented() {
        let config = RetellConfig::from_lookup(lookup(&[(API_KEY_VAR, "key_123")])).unwrap();
        assert_eq!(config.api_key, "key_123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.undocumented.is_none());
        assert!(config.require_undocumented().is_err());
    }

    #[test]
    fn base_url_override_is_trimmed() {
        let config = RetellConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "key"),
            (BASE_URL_VAR, "http://127.0.0.1:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = RetellConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "key"),
            (BASE_URL_VAR, "not a url"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(BASE_URL_VAR));
    }

    #[test]
    fn undocumented_requires_both_values() {
        let config = RetellConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "key"),
            (BEARER_TOKEN_VAR, "tok"),
        ]))
        .unwrap();
        assert!(config.undocumented.is_none());

        let config = RetellConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "key"),
            (BEARER_TOKEN_VAR, "tok"),
            (ORG_ID_VAR, "org_1"),
        ]))
        .unwrap();
        let creds = config.require_undocumented().unwrap();
        assert_eq!(creds.bearer_token, "tok");
        assert_eq!(creds.org_id, "org_1");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = RetellConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret_key"),
            (BEARER_TOKEN_VAR, "secret_tok"),
            (ORG_ID_VAR, "org_1"),
        ]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret_key"));
        assert!(!rendered.contains("secret_tok"));
        assert!(rendered.contains("org_1"));
    }
}
