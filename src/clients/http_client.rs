//! Webservice client for PrestaShop API communication.
//!
//! This module provides the [`WebserviceClient`] type, which turns
//! [`RequestOptions`] into authenticated HTTP calls and validates what comes
//! back.

use std::borrow::Cow;
use std::collections::HashMap;

use reqwest::header::{HeaderMap, AUTHORIZATION};

use crate::clients::errors::WebserviceError;
use crate::clients::http_request::{HttpMethod, OutputFormat, RequestOptions};
use crate::clients::http_response::{Content, ResponseEnvelope};
use crate::config::{PsVersion, WebserviceConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version reported before any response carried a `PSWS-Version` header.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Request header asking the webservice for a given output format.
pub const OUTPUT_FORMAT_HEADER: &str = "Output-Format";

/// Client for the PrestaShop webservice.
///
/// Every operation performs exactly one HTTP round trip with Basic
/// authentication (the webservice key as user name, empty password),
/// checks the announced PrestaShop version, validates the status code and
/// parses the body. Nothing is retried.
///
/// Operations take `&mut self` because each response may update the detected
/// server version. Share a client across tasks only behind your own lock, or
/// give each task its own client.
///
/// # Example
///
/// ```rust,ignore
/// use prestashop_webservice::{
///     ApiKey, OutputFormat, RequestOptions, ShopUrl, WebserviceClient, WebserviceConfig,
/// };
///
/// let config = WebserviceConfig::builder()
///     .shop_url(ShopUrl::new("https://mystore.com")?)
///     .api_key(ApiKey::new("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ")?)
///     .build()?;
/// let mut client = WebserviceClient::new(config)?;
///
/// let options = RequestOptions::builder()
///     .resource("customers")
///     .id(1)
///     .output_format(OutputFormat::Xml)
///     .build()?;
///
/// let content = client.get(&options).await?;
/// println!("PrestaShop {}", client.version());
/// ```
#[derive(Debug)]
pub struct WebserviceClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    config: WebserviceConfig,
    /// Webservice entry point, `{shop_url}/api`.
    api_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Last value of the `PSWS-Version` header.
    version: Option<String>,
}

// Verify WebserviceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebserviceClient>();
};

impl WebserviceClient {
    /// Creates a new client for the configured shop.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::Transport`] if the underlying HTTP client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: WebserviceConfig) -> Result<Self, WebserviceError> {
        let api_url = config.shop_url().api_url();

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}PrestaShop Webservice Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            api_url,
            default_headers,
            version: None,
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &WebserviceConfig {
        &self.config
    }

    /// Returns the webservice entry point, `{shop_url}/api`.
    #[must_use]
    pub fn base_api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the last PrestaShop version announced by the server, or
    /// `"unknown"` before any response carried one.
    ///
    /// The value is recorded even when the version is then rejected as
    /// incompatible.
    #[must_use]
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }

    /// Creates a resource (HTTP POST).
    ///
    /// Requires `url` or `resource` (without `id`), and an XML payload.
    /// `id_shop` / `id_group_shop` are appended to the URL.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::BadParameters`] before any network call if
    /// the payload is missing or the options carry an `id`. Any other
    /// variant comes from the call itself.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let options = RequestOptions::builder()
    ///     .resource("customers")
    ///     .xml(customer_xml)
    ///     .output_format(OutputFormat::Xml)
    ///     .build()?;
    /// let created = client.add(&options).await?;
    /// ```
    pub async fn add(&mut self, options: &RequestOptions) -> Result<Content, WebserviceError> {
        let payload = Self::require_payload(options, "add")?;
        let url = options.build_url(&self.api_url, HttpMethod::Post)?;
        let format = options.output_format();

        let response = self
            .execute(HttpMethod::Post, &url, Some(payload), Some(format))
            .await?;
        response.check_status()?;
        Content::parse(&response.raw_body, format)
    }

    /// Retrieves a resource or a listing (HTTP GET).
    ///
    /// The output format defaults to JSON; JSON bodies are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::BadParameters`] if the options carry a
    /// list of ids, [`WebserviceError::EmptyResponse`] for an empty body,
    /// and any other variant from the call itself.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let options = RequestOptions::builder()
    ///     .resource("products")
    ///     .filter("active", "1")
    ///     .display("[id,name]")
    ///     .limit(10)
    ///     .build()?;
    /// let content = client.get(&options).await?;
    /// println!("{}", content.as_json().unwrap_or_default());
    /// ```
    pub async fn get(&mut self, options: &RequestOptions) -> Result<Content, WebserviceError> {
        let url = options.build_url(&self.api_url, HttpMethod::Get)?;
        let format = options.output_format();

        let response = self
            .execute(HttpMethod::Get, &url, None, Some(format))
            .await?;
        response.check_status()?;
        Content::parse(&response.raw_body, format)
    }

    /// Sends a HEAD request and returns the raw response headers.
    ///
    /// Only filter, display, sort and limit are forwarded.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::BadParameters`] if the options carry a
    /// list of ids, and any other variant from the call itself.
    pub async fn head(&mut self, options: &RequestOptions) -> Result<String, WebserviceError> {
        let url = options.build_url(&self.api_url, HttpMethod::Head)?;

        let response = self.execute(HttpMethod::Head, &url, None, None).await?;
        response.check_status()?;
        Ok(response.raw_headers)
    }

    /// Updates a resource (HTTP PUT).
    ///
    /// Requires `url` or `resource` with `id`, and an XML payload.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::BadParameters`] before any network call if
    /// the payload or the id is missing. Any other variant comes from the
    /// call itself.
    pub async fn edit(&mut self, options: &RequestOptions) -> Result<Content, WebserviceError> {
        let payload = Self::require_payload(options, "edit")?;
        let url = options.build_url(&self.api_url, HttpMethod::Put)?;
        let format = options.output_format();

        let response = self
            .execute(HttpMethod::Put, &url, Some(payload), Some(format))
            .await?;
        response.check_status()?;
        Content::parse(&response.raw_body, format)
    }

    /// Deletes one or several resources (HTTP DELETE).
    ///
    /// Requires `url` or `resource` with `id`; a list of ids is sent as
    /// `?id=[1,2,3]`. The body is never parsed.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::BadParameters`] before any network call if
    /// the id is missing. Any other variant comes from the call itself.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let options = RequestOptions::builder()
    ///     .resource("orders")
    ///     .id(vec![1, 2, 3])
    ///     .build()?;
    /// client.delete(&options).await?;
    /// ```
    pub async fn delete(&mut self, options: &RequestOptions) -> Result<(), WebserviceError> {
        let url = options.build_url(&self.api_url, HttpMethod::Delete)?;

        let response = self.execute(HttpMethod::Delete, &url, None, None).await?;
        response.check_status()
    }

    fn require_payload<'a>(
        options: &'a RequestOptions,
        operation: &str,
    ) -> Result<&'a str, WebserviceError> {
        options.xml().ok_or_else(|| {
            WebserviceError::bad_parameters(format!("{operation} requires an XML payload"))
        })
    }

    /// Performs one round trip and checks the announced version.
    async fn execute(
        &mut self,
        method: HttpMethod,
        url: &str,
        payload: Option<&str>,
        format: Option<OutputFormat>,
    ) -> Result<ResponseEnvelope, WebserviceError> {
        let mut req_builder = self
            .client
            .request(method.as_reqwest(), url)
            .basic_auth(self.config.api_key().as_ref(), Some(""));

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(format) = format {
            req_builder = req_builder.header(OUTPUT_FORMAT_HEADER, format.as_str());
        }
        if let Some(payload) = payload {
            req_builder = req_builder
                .header("Content-Type", "application/xml")
                .body(payload.to_string());
        }

        let request = req_builder.build()?;
        if self.config.debug() {
            Self::dump("HTTP REQUEST HEADER", &Self::describe_request(&request));
        }

        let res = self.client.execute(request).await?;

        let code = res.status().as_u16();
        let raw_headers = Self::describe_response(&res);
        let raw_body = if method == HttpMethod::Head {
            String::new()
        } else {
            res.text().await.map_err(Self::body_error)?
        };
        let response = ResponseEnvelope::new(code, raw_headers, raw_body);

        if self.config.debug() {
            Self::dump("HTTP RESPONSE HEADER", &response.raw_headers);
            if let Some(payload) = payload {
                let decoded = urlencoding::decode(payload).unwrap_or(Cow::Borrowed(payload));
                Self::dump("XML SENT", &decoded);
            }
            if !matches!(method, HttpMethod::Delete | HttpMethod::Head) {
                Self::dump("RETURN HTTP BODY", &response.raw_body);
            }
        }

        self.record_version(&response)?;
        Ok(response)
    }

    /// Stores the announced version and rejects it when out of range.
    fn record_version(&mut self, response: &ResponseEnvelope) -> Result<(), WebserviceError> {
        let Some(announced) = response.version() else {
            return Ok(());
        };
        self.version = Some(announced.to_string());

        let compatible = announced
            .parse::<PsVersion>()
            .is_ok_and(|version| version.is_compatible());
        if !compatible {
            return Err(WebserviceError::IncompatibleVersion {
                version: announced.to_string(),
            });
        }
        Ok(())
    }

    /// A body that arrived but cannot be decoded is malformed; a body cut
    /// short by the connection is a transport failure.
    fn body_error(error: reqwest::Error) -> WebserviceError {
        if error.is_decode() {
            WebserviceError::MalformedResponse
        } else {
            WebserviceError::Transport(error)
        }
    }

    fn describe_request(request: &reqwest::Request) -> String {
        let mut lines = vec![format!("{} {}", request.method(), request.url())];
        lines.extend(Self::header_lines(request.headers()));
        lines.join("\r\n")
    }

    fn describe_response(res: &reqwest::Response) -> String {
        let mut lines = vec![format!("{:?} {}", res.version(), res.status())];
        lines.extend(Self::header_lines(res.headers()));
        lines.join("\r\n")
    }

    fn header_lines(headers: &HeaderMap) -> Vec<String> {
        headers
            .iter()
            .map(|(name, value)| {
                let value = if *name == AUTHORIZATION {
                    "Basic *****"
                } else {
                    value.to_str().unwrap_or_default()
                };
                format!("{name}: {value}")
            })
            .collect()
    }

    fn dump(title: &str, content: &str) {
        tracing::debug!(title = %title, "{}", content);
    }
}
