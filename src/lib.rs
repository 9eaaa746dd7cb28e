//! # PrestaShop Webservice Client
//!
//! A Rust client for the PrestaShop webservice, the REST-style API every
//! PrestaShop shop exposes under `{shop_url}/api`.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`WebserviceConfig`] and [`WebserviceConfigBuilder`]
//! - Validated newtypes for the shop URL and the webservice key
//! - Typed request options via [`RequestOptions`], validated on construction
//! - An async client performing add, get, edit, delete and head calls with
//!   HTTP Basic authentication
//! - Server version detection and a compatibility check
//! - Raw JSON passthrough or XML parsing into an owned [`XmlElement`] tree
//! - A read-only [`Product`] entity wrapper
//!
//! ## Quick Start
//!
//! ```rust
//! use prestashop_webservice::{ApiKey, RequestOptions, ShopUrl, WebserviceConfig};
//!
//! // Create configuration using the builder pattern
//! let config = WebserviceConfig::builder()
//!     .shop_url(ShopUrl::new("https://mystore.com").unwrap())
//!     .api_key(ApiKey::new("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Describe what to fetch
//! let options = RequestOptions::builder()
//!     .resource("customers")
//!     .id(5)
//!     .filter("name", "x")
//!     .display("full")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     options.build_url(&config.shop_url().api_url(), prestashop_webservice::HttpMethod::Get).unwrap(),
//!     "https://mystore.com/api/customers/5?filter[name]=x&display=full"
//! );
//! ```
//!
//! ## Calling the Webservice
//!
//! ```rust,ignore
//! use prestashop_webservice::{OutputFormat, Product, RequestOptions, WebserviceClient};
//!
//! let mut client = WebserviceClient::new(config)?;
//!
//! // JSON bodies are returned untouched
//! let options = RequestOptions::builder().resource("products").id(7).build()?;
//! let content = client.get(&options).await?;
//! let product = Product::from_json_str(content.as_json().unwrap_or_default())?;
//!
//! // XML bodies are parsed
//! let options = RequestOptions::builder()
//!     .resource("products")
//!     .id(7)
//!     .output_format(OutputFormat::Xml)
//!     .build()?;
//! let content = client.get(&options).await?;
//! if let Some(doc) = content.as_xml() {
//!     let product = Product::from_xml(doc)?;
//!     println!("{} costs {}", product.name(), product.price());
//! }
//!
//! // Delete several orders at once
//! let options = RequestOptions::builder().resource("orders").id(vec![1, 2, 3]).build()?;
//! client.delete(&options).await?;
//!
//! println!("Talking to PrestaShop {}", client.version());
//! ```
//!
//! ## Debugging
//!
//! With [`WebserviceConfigBuilder::debug`] enabled, every call emits
//! `tracing` debug events with the request headers (key masked), the
//! response headers, the sent XML and the returned body. The crate installs
//! no subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and request options validate on construction
//! - **One call at a time**: Client operations take `&mut self` and perform a single round trip
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod entity;
pub mod error;
pub mod xml;

// Re-export public types at crate root for convenience
pub use config::{
    ApiKey, PsVersion, ShopUrl, WebserviceConfig, WebserviceConfigBuilder,
    MAX_COMPATIBLE_VERSION, MIN_COMPATIBLE_VERSION,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    Address, Content, HttpMethod, OutputFormat, RequestOptions, RequestOptionsBuilder,
    ResourceId, ResponseEnvelope, WebserviceClient, WebserviceError,
};

// Re-export entity and document types
pub use entity::{EntityError, Product};
pub use xml::XmlElement;
