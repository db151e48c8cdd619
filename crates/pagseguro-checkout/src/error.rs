use thiserror::Error;

/// The single error a checkout setter can raise.
///
/// Carries the first failing rule for the field group being validated. The
/// `Display` output is the human readable message alone, so it can be shown
/// to the buyer as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while parsing a pipe-separated rule expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("Empty rule expression")]
    Empty,
    #[error("Unknown validation rule: {0}")]
    UnknownRule(String),
    #[error("Invalid parameter for rule '{rule}': {value}")]
    InvalidParameter { rule: String, value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_displays_message_only() {
        let failure = ValidationFailure::new("senderName", "The sender name field is required.");
        assert_eq!(failure.to_string(), "The sender name field is required.");
        assert_eq!(failure.field, "senderName");
    }

    #[test]
    fn test_rule_parse_error_message() {
        let err = RuleParseError::InvalidParameter {
            rule: "max".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter for rule 'max': abc");
    }
}
