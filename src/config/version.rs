//! PrestaShop version handling.
//!
//! The webservice announces its version in the `PSWS-Version` response
//! header. This module provides [`PsVersion`] to parse and order those
//! values, and the window of versions this client is compatible with.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Oldest PrestaShop version this client works with.
pub const MIN_COMPATIBLE_VERSION: &str = "1.4.0.0";

/// Newest PrestaShop version this client works with.
pub const MAX_COMPATIBLE_VERSION: &str = "1.7.99.99";

/// A dotted numeric PrestaShop version such as `1.6.1.0`.
///
/// Versions compare component by component. When one version is a prefix of
/// the other, the shorter one sorts first, so `1.7 < 1.7.0`.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice::PsVersion;
///
/// let version: PsVersion = "1.6.1.0".parse().unwrap();
/// assert!(version.is_compatible());
/// assert_eq!(version.to_string(), "1.6.1.0");
///
/// let newer: PsVersion = "8.0.0".parse().unwrap();
/// assert!(newer > version);
/// assert!(!newer.is_compatible());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PsVersion {
    parts: Vec<u32>,
}

impl PsVersion {
    /// Returns the numeric components of the version.
    #[must_use]
    pub fn parts(&self) -> &[u32] {
        &self.parts
    }

    /// Returns the oldest compatible version.
    #[must_use]
    pub fn min_compatible() -> Self {
        Self {
            parts: vec![1, 4, 0, 0],
        }
    }

    /// Returns the newest compatible version.
    #[must_use]
    pub fn max_compatible() -> Self {
        Self {
            parts: vec![1, 7, 99, 99],
        }
    }

    /// Returns `true` if the version lies inside the inclusive window
    /// [`MIN_COMPATIBLE_VERSION`, `MAX_COMPATIBLE_VERSION`].
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        *self >= Self::min_compatible() && *self <= Self::max_compatible()
    }
}

impl fmt::Display for PsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for PsVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidVersion {
            version: s.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let parts = trimmed
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { parts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_constants_match_bounds() {
        assert_eq!(
            MIN_COMPATIBLE_VERSION.parse::<PsVersion>().unwrap(),
            PsVersion::min_compatible()
        );
        assert_eq!(
            MAX_COMPATIBLE_VERSION.parse::<PsVersion>().unwrap(),
            PsVersion::max_compatible()
        );
    }

    #[test]
    fn test_compatibility_window_is_inclusive() {
        assert!("1.4.0.0".parse::<PsVersion>().unwrap().is_compatible());
        assert!("1.7.99.99".parse::<PsVersion>().unwrap().is_compatible());
        assert!("1.6.1.0".parse::<PsVersion>().unwrap().is_compatible());
        assert!("1.7.8.11".parse::<PsVersion>().unwrap().is_compatible());
    }

    #[test]
    fn test_versions_outside_window_are_rejected() {
        assert!(!"1.3.0.0".parse::<PsVersion>().unwrap().is_compatible());
        assert!(!"1.8.0.0".parse::<PsVersion>().unwrap().is_compatible());
        assert!(!"1.7.100.0".parse::<PsVersion>().unwrap().is_compatible());
        assert!(!"8.1.2".parse::<PsVersion>().unwrap().is_compatible());
    }

    #[test]
    fn test_numeric_not_lexicographic_ordering() {
        let a: PsVersion = "1.7.10.0".parse().unwrap();
        let b: PsVersion = "1.7.9.0".parse().unwrap();
        assert!(a > b);
    }

    #[test]
    fn test_shorter_prefix_sorts_first() {
        let short: PsVersion = "1.7".parse().unwrap();
        let long: PsVersion = "1.7.0".parse().unwrap();
        assert!(short < long);
        // "1.4" sits just below the window's lower bound
        assert!(!"1.4".parse::<PsVersion>().unwrap().is_compatible());
    }

    #[test]
    fn test_display_round_trips() {
        let version: PsVersion = " 1.6.1.24 ".parse().unwrap();
        assert_eq!(version.to_string(), "1.6.1.24");
        assert_eq!(version.parts(), &[1, 6, 1, 24]);
    }

    #[test]
    fn test_rejects_malformed_versions() {
        assert!("".parse::<PsVersion>().is_err());
        assert!("1..0".parse::<PsVersion>().is_err());
        assert!("1.6.x".parse::<PsVersion>().is_err());
        assert!(matches!(
            "unknown".parse::<PsVersion>(),
            Err(ConfigError::InvalidVersion { version }) if version == "unknown"
        ));
    }
}
