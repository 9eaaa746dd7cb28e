//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated webservice key.
///
/// PrestaShop authenticates webservice calls with HTTP Basic auth, using the
/// key as the user name and an empty password. The key is masked in debug
/// output so it does not leak into logs.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice::ApiKey;
///
/// let key = ApiKey::new("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ").unwrap();
/// assert_eq!(key.as_ref(), "ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated webservice key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated root URL of a shop.
///
/// The URL must carry a scheme and a host. Trailing slashes are dropped so
/// that `{shop_url}/api/...` never produces a double slash.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice::ShopUrl;
///
/// let url = ShopUrl::new("http://mystore.com/").unwrap();
/// assert_eq!(url.as_ref(), "http://mystore.com");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "mystore.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ShopUrl {
    /// Creates a new validated shop URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopUrl`] if the URL has no scheme or
    /// no host, or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidShopUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidShopUrl { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() || url.contains(['?', '#']) {
            return Err(ConfigError::InvalidShopUrl { url });
        }

        // Host ends at port, path, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidShopUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns the webservice entry point, `{shop_url}/api`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/api", self.url)
    }
}

impl AsRef<str> for ShopUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ShopUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for ShopUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ShopUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
