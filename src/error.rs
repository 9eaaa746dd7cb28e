//! Configuration error types for the PrestaShop webservice client.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use prestashop_webservice::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building the client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Webservice key cannot be empty.
    #[error("Webservice key cannot be empty. Please provide the key generated in the PrestaShop back office.")]
    EmptyApiKey,

    /// Shop URL is invalid.
    #[error("Invalid shop URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://mystore.com').")]
    InvalidShopUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A PrestaShop version string could not be parsed.
    #[error("Invalid PrestaShop version '{version}'. Expected dotted numbers (e.g., '1.6.1.0').")]
    InvalidVersion {
        /// The version string that was provided.
        version: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_error_message() {
        let message = ConfigError::EmptyApiKey.to_string();
        assert!(message.contains("key cannot be empty"));
    }

    #[test]
    fn test_invalid_shop_url_error_message() {
        let error = ConfigError::InvalidShopUrl {
            url: "mystore".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("mystore"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "api_key" };
        let message = error.to_string();
        assert!(message.contains("api_key"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiKey;
        let _: &dyn std::error::Error = &error;
    }
}
