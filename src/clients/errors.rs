//! Error types for webservice calls.
//!
//! Every failure of a call is surfaced as a [`WebserviceError`]. Nothing is
//! retried or swallowed, and no partial result is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_webservice::{RequestOptions, WebserviceError};
//!
//! let options = RequestOptions::builder().resource("customers").id(1).build()?;
//! match client.get(&options).await {
//!     Ok(content) => println!("{}", content.as_json().unwrap_or_default()),
//!     Err(WebserviceError::HttpStatus { code, reason }) => {
//!         println!("PrestaShop answered {code} ({reason})");
//!     }
//!     Err(WebserviceError::IncompatibleVersion { version }) => {
//!         println!("Unsupported PrestaShop {version}");
//!     }
//!     Err(e) => println!("Webservice error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::error::ConfigError;

/// Unified error type for webservice calls.
#[derive(Debug, Error)]
pub enum WebserviceError {
    /// The request options are missing a required value or conflict.
    ///
    /// Raised before any network traffic happens.
    #[error("Bad parameters given: {reason}")]
    BadParameters {
        /// What is wrong with the options.
        reason: String,
    },

    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response could not be split into headers and body.
    #[error("Bad HTTP response")]
    MalformedResponse,

    /// The server announced a PrestaShop version outside the supported window.
    #[error("This library is not compatible with PrestaShop version {version}. Please upgrade/downgrade this library")]
    IncompatibleVersion {
        /// The version announced in the `PSWS-Version` header.
        version: String,
    },

    /// The server answered with one of the documented failure codes.
    #[error("This call to PrestaShop Web Services failed and returned an HTTP status of {code}. That means: {reason}.")]
    HttpStatus {
        /// The HTTP status code.
        code: u16,
        /// The fixed reason phrase for the code.
        reason: &'static str,
    },

    /// The server answered with a code outside the documented table.
    #[error("This call to PrestaShop Web Services returned an unexpected HTTP status of: {code}")]
    UnexpectedHttpStatus {
        /// The HTTP status code.
        code: u16,
    },

    /// The body was requested as XML but is not well-formed.
    #[error("HTTP XML response is not parsable: {details}")]
    UnparsableXml {
        /// Parser diagnostics.
        details: String,
    },

    /// The body was empty where content was expected.
    #[error("HTTP response is empty")]
    EmptyResponse,

    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WebserviceError {
    pub(crate) fn bad_parameters(reason: impl Into<String>) -> Self {
        Self::BadParameters {
            reason: reason.into(),
        }
    }
}
