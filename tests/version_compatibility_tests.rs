//! Integration tests for PrestaShop version handling and configuration.

use prestashop_webservice::{
    ApiKey, ConfigError, PsVersion, ShopUrl, WebserviceConfig, MAX_COMPATIBLE_VERSION,
    MIN_COMPATIBLE_VERSION,
};
use std::time::Duration;

// =============================================================================
// Compatibility Window Tests
// =============================================================================

#[test]
fn test_window_bounds_are_compatible() {
    let min: PsVersion = MIN_COMPATIBLE_VERSION.parse().unwrap();
    let max: PsVersion = MAX_COMPATIBLE_VERSION.parse().unwrap();

    assert!(min.is_compatible());
    assert!(max.is_compatible());
    assert_eq!(min, PsVersion::min_compatible());
    assert_eq!(max, PsVersion::max_compatible());
}

#[test]
fn test_versions_outside_window() {
    for version in ["1.3.0.0", "1.3.99.99", "1.8.0.0", "8.0.0"] {
        let version: PsVersion = version.parse().unwrap();
        assert!(!version.is_compatible(), "{version} should be rejected");
    }
}

#[test]
fn test_versions_inside_window() {
    for version in ["1.4.0.1", "1.5.6.2", "1.6.1.0", "1.6.1.24", "1.7.8.11"] {
        let version: PsVersion = version.parse().unwrap();
        assert!(version.is_compatible(), "{version} should be accepted");
    }
}

#[test]
fn test_version_ordering_is_numeric() {
    let a: PsVersion = "1.6.1.9".parse().unwrap();
    let b: PsVersion = "1.6.1.10".parse().unwrap();
    assert!(a < b);

    let short: PsVersion = "1.7".parse().unwrap();
    let long: PsVersion = "1.7.0".parse().unwrap();
    assert!(short < long);
}

#[test]
fn test_unparsable_versions() {
    for version in ["", "dev", "1..2", "1.6.x"] {
        assert!(
            matches!(
                version.parse::<PsVersion>(),
                Err(ConfigError::InvalidVersion { .. })
            ),
            "{version:?} should not parse"
        );
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_requires_shop_url_and_key() {
    let result = WebserviceConfig::builder()
        .api_key(ApiKey::new("KEY").unwrap())
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "shop_url" })
    ));

    let result = WebserviceConfig::builder()
        .shop_url(ShopUrl::new("https://mystore.com").unwrap())
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "api_key" })
    ));
}

#[test]
fn test_config_carries_transport_settings() {
    let config = WebserviceConfig::builder()
        .shop_url(ShopUrl::new("https://mystore.com/shop/").unwrap())
        .api_key(ApiKey::new("KEY").unwrap())
        .timeout(Duration::from_secs(5))
        .user_agent_prefix("Sync/2.0")
        .build()
        .unwrap();

    assert_eq!(config.shop_url().api_url(), "https://mystore.com/shop/api");
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.user_agent_prefix(), Some("Sync/2.0"));
    assert!(!config.debug());
}

#[test]
fn test_api_key_is_masked_in_debug_output() {
    let config = WebserviceConfig::builder()
        .shop_url(ShopUrl::new("https://mystore.com").unwrap())
        .api_key(ApiKey::new("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ").unwrap())
        .build()
        .unwrap();

    let debug = format!("{config:?}");
    assert!(!debug.contains("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ"));
}
