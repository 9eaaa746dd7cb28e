//! Configuration types for the PrestaShop webservice client.
//!
//! # Overview
//!
//! - [`WebserviceConfig`]: shop URL, key, and transport settings
//! - [`WebserviceConfigBuilder`]: a builder for [`WebserviceConfig`]
//! - [`ApiKey`]: a validated webservice key with masked debug output
//! - [`ShopUrl`]: a validated shop root URL
//! - [`PsVersion`]: a PrestaShop version and the compatibility window
//!
//! # Example
//!
//! ```rust
//! use prestashop_webservice::{WebserviceConfig, ApiKey, ShopUrl};
//!
//! let config = WebserviceConfig::builder()
//!     .shop_url(ShopUrl::new("https://mystore.com").unwrap())
//!     .api_key(ApiKey::new("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ").unwrap())
//!     .debug(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.debug());
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{ApiKey, ShopUrl};
pub use version::{PsVersion, MAX_COMPATIBLE_VERSION, MIN_COMPATIBLE_VERSION};

use crate::error::ConfigError;

/// Configuration for a [`WebserviceClient`](crate::clients::WebserviceClient).
///
/// # Thread Safety
///
/// `WebserviceConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct WebserviceConfig {
    shop_url: ShopUrl,
    api_key: ApiKey,
    debug: bool,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl WebserviceConfig {
    /// Creates a new builder for constructing a `WebserviceConfig`.
    #[must_use]
    pub fn builder() -> WebserviceConfigBuilder {
        WebserviceConfigBuilder::new()
    }

    /// Returns the shop root URL.
    #[must_use]
    pub const fn shop_url(&self) -> &ShopUrl {
        &self.shop_url
    }

    /// Returns the webservice key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns whether request and response dumps are emitted.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the per-request timeout, if configured.
    ///
    /// When `None`, the transport default applies.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify WebserviceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebserviceConfig>();
};

/// Builder for constructing [`WebserviceConfig`] instances.
///
/// `shop_url` and `api_key` are required.
///
/// # Defaults
///
/// - `debug`: `false`
/// - `timeout`: `None` (transport default)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct WebserviceConfigBuilder {
    shop_url: Option<ShopUrl>,
    api_key: Option<ApiKey>,
    debug: Option<bool>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl WebserviceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop root URL (required).
    #[must_use]
    pub fn shop_url(mut self, url: ShopUrl) -> Self {
        self.shop_url = Some(url);
        self
    }

    /// Sets the webservice key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Enables or disables the request/response dump.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`WebserviceConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop_url` or
    /// `api_key` are not set.
    pub fn build(self) -> Result<WebserviceConfig, ConfigError> {
        let shop_url = self
            .shop_url
            .ok_or(ConfigError::MissingRequiredField { field: "shop_url" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(WebserviceConfig {
            shop_url,
            api_key,
            debug: self.debug.unwrap_or(false),
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop_url() -> ShopUrl {
        ShopUrl::new("https://mystore.com").unwrap()
    }

    #[test]
    fn test_builder_requires_shop_url() {
        let result = WebserviceConfigBuilder::new()
            .api_key(ApiKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop_url" })
        ));
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = WebserviceConfigBuilder::new().shop_url(shop_url()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = WebserviceConfig::builder()
            .shop_url(shop_url())
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        assert!(!config.debug());
        assert!(config.timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = WebserviceConfig::builder()
            .shop_url(shop_url())
            .api_key(ApiKey::new("key").unwrap())
            .debug(true)
            .timeout(Duration::from_secs(15))
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert!(config.debug());
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.shop_url().as_ref(), "https://mystore.com");
    }

    #[test]
    fn test_config_debug_output_masks_key() {
        let config = WebserviceConfig::builder()
            .shop_url(shop_url())
            .api_key(ApiKey::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("WebserviceConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
