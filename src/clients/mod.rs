//! HTTP client types for PrestaShop webservice communication.
//!
//! This module provides the layer that turns typed request options into
//! authenticated HTTP calls and validates the responses.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`WebserviceClient`]: The async client performing add/get/edit/delete/head
//! - [`RequestOptions`]: A validated description of what to address and how
//! - [`ResponseEnvelope`]: Status, raw headers and raw body of one response
//! - [`Content`]: A parsed body, raw JSON text or an XML tree
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE, HEAD)
//! - [`OutputFormat`]: Requested body format (JSON or XML)
//! - [`WebserviceError`]: Every failure a call can produce
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_webservice::{
//!     ApiKey, RequestOptions, ShopUrl, WebserviceClient, WebserviceConfig,
//! };
//!
//! let config = WebserviceConfig::builder()
//!     .shop_url(ShopUrl::new("https://mystore.com")?)
//!     .api_key(ApiKey::new("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ")?)
//!     .build()?;
//! let mut client = WebserviceClient::new(config)?;
//!
//! let options = RequestOptions::builder()
//!     .resource("customers")
//!     .id(5)
//!     .filter("name", "x")
//!     .display("full")
//!     .build()?;
//!
//! // GET https://mystore.com/api/customers/5?filter[name]=x&display=full
//! let content = client.get(&options).await?;
//! ```
//!
//! # Status Handling
//!
//! Calls never retry. The status code of every response is checked:
//!
//! - **200, 201**: Success
//! - **204, 400, 401, 404, 405, 500**: [`WebserviceError::HttpStatus`] with a fixed reason phrase
//! - **Anything else**: [`WebserviceError::UnexpectedHttpStatus`]

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::WebserviceError;
pub use http_client::{WebserviceClient, OUTPUT_FORMAT_HEADER, SDK_VERSION, UNKNOWN_VERSION};
pub use http_request::{
    Address, HttpMethod, OutputFormat, RequestOptions, RequestOptionsBuilder, ResourceId,
};
pub use http_response::{
    check_status_code, parse_header_lines, reason_phrase, Content, ResponseEnvelope,
    VERSION_HEADER,
};
