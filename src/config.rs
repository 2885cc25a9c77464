use thiserror::Error;

pub const SECRET_ENV: &str = "SUMSUB_SECRET";
pub const APP_TOKEN_ENV: &str = "APP_TOKEN";
pub const BASE_URL_ENV: &str = "BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(String),
}

/// Credential triple for the Sumsub API. Built once at startup and handed to
/// the client; request logic never touches the environment.
#[derive(Debug, Clone)]
pub struct SumsubConfig {
    pub secret: String,
    pub app_token: String,
    pub base_url: String,
}

impl SumsubConfig {
    pub fn new(
        secret: impl Into<String>,
        app_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        let app_token = app_token.into();
        let base_url = base_url.into();

        if secret.is_empty() {
            return Err(ConfigError::Missing(SECRET_ENV.to_string()));
        }
        if app_token.is_empty() {
            return Err(ConfigError::Missing(APP_TOKEN_ENV.to_string()));
        }
        if base_url.is_empty() {
            return Err(ConfigError::Missing(BASE_URL_ENV.to_string()));
        }

        Ok(SumsubConfig {
            secret,
            app_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Read the credential triple from the environment. Missing or empty
    /// variables fail here rather than surfacing later as an upstream
    /// authentication error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let read = |name: &str| -> Result<String, ConfigError> {
            std::env::var(name).map_err(|_| ConfigError::Missing(name.to_string()))
        };

        SumsubConfig::new(
            read(SECRET_ENV)?,
            read(APP_TOKEN_ENV)?,
            read(BASE_URL_ENV)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = SumsubConfig::new("secret", "token", "https://api.sumsub.com").unwrap();
        assert_eq!(config.secret, "secret");
        assert_eq!(config.app_token, "token");
        assert_eq!(config.base_url, "https://api.sumsub.com");
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let config = SumsubConfig::new("secret", "token", "https://api.sumsub.com/").unwrap();
        assert_eq!(config.base_url, "https://api.sumsub.com");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = SumsubConfig::new("", "token", "https://api.sumsub.com").unwrap_err();
        assert!(err.to_string().contains(SECRET_ENV));
    }

    #[test]
    fn test_empty_app_token_rejected() {
        let err = SumsubConfig::new("secret", "", "https://api.sumsub.com").unwrap_err();
        assert!(err.to_string().contains(APP_TOKEN_ENV));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = SumsubConfig::new("secret", "token", "").unwrap_err();
        assert!(err.to_string().contains(BASE_URL_ENV));
    }
}
