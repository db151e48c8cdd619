/// Checkout configuration
/// Selects the gateway environment and the placeholder e-mail used in sandbox mode

use crate::error::ConfigError;
use crate::checkout::rules::sender_email_rules;
use crate::validation::check_field;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Buyer e-mail the sandbox accepts for every checkout
pub const SANDBOX_EMAIL: &str = "teste@sandbox.pagseguro.com.br";

/// Gateway environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    #[default]
    Production,
}

impl Environment {
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Configuration handed to the request builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_sandbox_email")]
    pub sandbox_email: String,
}

fn default_sandbox_email() -> String {
    SANDBOX_EMAIL.to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl CheckoutConfig {
    pub fn sandbox() -> Self {
        Self {
            environment: Environment::Sandbox,
            sandbox_email: default_sandbox_email(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            sandbox_email: default_sandbox_email(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `PAGSEGURO_ENVIRONMENT`: `sandbox` or `production` (default `production`)
    /// - `PAGSEGURO_SANDBOX_EMAIL`: placeholder buyer e-mail for sandbox checkouts
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`CheckoutConfig::from_env`], reading through `lookup`
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("PAGSEGURO_ENVIRONMENT")
            .unwrap_or_else(|| "production".to_string())
            .parse::<Environment>()?;

        let sandbox_email =
            lookup("PAGSEGURO_SANDBOX_EMAIL").unwrap_or_else(default_sandbox_email);

        let config = CheckoutConfig {
            environment,
            sandbox_email,
        };
        config.validate()?;

        info!(
            "Checkout configuration loaded: environment={}",
            config.environment
        );

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: CheckoutConfig = toml::from_str(&content)?;
        config.validate()?;

        info!(
            "Checkout configuration loaded from {}: environment={}",
            path.display(),
            config.environment
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Checkout configuration saved to {}", path.display());
        Ok(())
    }

    /// The sandbox placeholder must itself pass the `senderEmail` rules
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_field("sandboxEmail", Some(&self.sandbox_email), &sender_email_rules())
            .map_err(ConfigError::InvalidConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_production() {
        let config = CheckoutConfig::default();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.sandbox_email, SANDBOX_EMAIL);
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert_eq!(
            " Production ".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(ConfigError::InvalidEnvironment(_))
        ));
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = CheckoutConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, CheckoutConfig::production());
    }

    #[test]
    fn test_from_vars_sandbox_with_custom_email() {
        let config = CheckoutConfig::from_vars(vars(&[
            ("PAGSEGURO_ENVIRONMENT", "SANDBOX"),
            ("PAGSEGURO_SANDBOX_EMAIL", "c12345@sandbox.pagseguro.com.br"),
        ]))
        .unwrap();
        assert!(config.environment.is_sandbox());
        assert_eq!(config.sandbox_email, "c12345@sandbox.pagseguro.com.br");
    }

    #[test]
    fn test_from_vars_rejects_invalid_sandbox_email() {
        let result = CheckoutConfig::from_vars(vars(&[
            ("PAGSEGURO_ENVIRONMENT", "sandbox"),
            ("PAGSEGURO_SANDBOX_EMAIL", "not-an-email"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_sandbox_email_must_fit_sender_email_length() {
        let long_email = format!("{}@sandbox.pagseguro.com.br", "c".repeat(40));
        assert_eq!(long_email.len(), 65);

        let config = CheckoutConfig {
            sandbox_email: long_email,
            ..CheckoutConfig::sandbox()
        };
        match config.validate() {
            Err(ConfigError::InvalidConfig(message)) => assert_eq!(
                message,
                "The sandbox email may not be greater than 60 characters."
            ),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }

        let config = CheckoutConfig {
            sandbox_email: format!("{}@sandbox.pagseguro.com.br", "c".repeat(35)),
            ..CheckoutConfig::sandbox()
        };
        assert!(config.validate().is_ok());
    }
}
