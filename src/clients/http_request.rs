//! Request options for webservice calls.
//!
//! This module provides [`RequestOptions`] and its builder. Options describe
//! which resource a call targets and which query parameters it carries, and
//! know how to turn themselves into the final request URL.

use std::fmt;
use std::str::FromStr;

use crate::clients::errors::WebserviceError;

/// HTTP methods used by the webservice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
    /// HTTP HEAD method for retrieving headers only.
    Head,
}

impl HttpMethod {
    /// Returns the matching [`reqwest::Method`].
    #[must_use]
    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        };
        f.write_str(method)
    }
}

/// Format the webservice should answer in.
///
/// [`OutputFormat::Json`] bodies are handed back undecoded;
/// [`OutputFormat::Xml`] bodies are parsed into an
/// [`XmlElement`](crate::xml::XmlElement).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// JSON output (`output_format=JSON`).
    #[default]
    Json,
    /// XML output (`output_format=xml`).
    Xml,
}

impl OutputFormat {
    /// Returns the value sent for `output_format`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = WebserviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(WebserviceError::bad_parameters(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}

/// Identifier of the resource(s) a call targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceId {
    /// A single resource, addressed as `/{resource}/{id}`.
    Single(String),
    /// Several resources, addressed as `/{resource}/?id=[1,2,3]`.
    ///
    /// Only `delete` accepts a list.
    Many(Vec<String>),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(id) => f.write_str(id),
            Self::Many(ids) => write!(f, "[{}]", ids.join(",")),
        }
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Single(id)
    }
}

impl<T: ToString> From<Vec<T>> for ResourceId {
    fn from(ids: Vec<T>) -> Self {
        Self::Many(ids.iter().map(ToString::to_string).collect())
    }
}

/// How a call locates its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    /// A full URL supplied by the caller, used as-is.
    Url(String),
    /// A resource name below `{shop_url}/api`, optionally with an id.
    Resource {
        /// Resource name, e.g. `customers`.
        resource: String,
        /// Optional identifier(s).
        id: Option<ResourceId>,
    },
}

/// Which query parameters a URL may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueryScope {
    /// filter, display, sort, limit, `id_shop`, `id_group_shop`, `output_format`
    Full,
    /// filter, display, sort, limit
    Listing,
}

/// Options for a single webservice call.
///
/// Use [`RequestOptions::builder`] to construct options. The builder rejects
/// option sets that name no target, or two conflicting ones.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice::{HttpMethod, RequestOptions};
///
/// let options = RequestOptions::builder()
///     .resource("customers")
///     .id(5)
///     .filter("name", "x")
///     .display("full")
///     .build()
///     .unwrap();
///
/// let url = options.build_url("https://mystore.com/api", HttpMethod::Get).unwrap();
/// assert_eq!(url, "https://mystore.com/api/customers/5?filter[name]=x&display=full");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    address: Address,
    filters: Vec<(String, String)>,
    display: Option<String>,
    sort: Option<String>,
    limit: Option<String>,
    id_shop: Option<String>,
    id_group_shop: Option<String>,
    output_format: Option<OutputFormat>,
    xml: Option<String>,
}

impl RequestOptions {
    /// Creates a new builder for constructing `RequestOptions`.
    #[must_use]
    pub fn builder() -> RequestOptionsBuilder {
        RequestOptionsBuilder::default()
    }

    /// Returns the target of the call.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the filters in insertion order.
    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Returns the XML payload for `add` / `edit`, if any.
    #[must_use]
    pub fn xml(&self) -> Option<&str> {
        self.xml.as_deref()
    }

    /// Returns the effective output format, JSON unless set explicitly.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// Builds the URL a call with `method` is sent to.
    ///
    /// `api_url` is the webservice entry point, `{shop_url}/api`.
    ///
    /// - GET: `{api_url}/{resource}[/{id}]` plus filter, display, sort,
    ///   limit, `id_shop`, `id_group_shop` and an explicit `output_format`.
    /// - HEAD: as GET, limited to filter, display, sort and limit.
    /// - POST: `{api_url}/{resource}` plus shop parameters.
    /// - PUT: `{api_url}/{resource}/{id}` plus shop parameters.
    /// - DELETE: `{api_url}/{resource}/{id}` or `{api_url}/{resource}/?id=[..]`
    ///   plus shop parameters.
    ///
    /// An explicit URL is used as-is for GET and HEAD, and only receives the
    /// shop parameters for the other methods.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::BadParameters`] if the id does not fit the
    /// method: POST takes no id, PUT and DELETE need one, and only DELETE
    /// accepts a list.
    pub fn build_url(&self, api_url: &str, method: HttpMethod) -> Result<String, WebserviceError> {
        match method {
            HttpMethod::Get => self.listing_url(api_url, QueryScope::Full),
            HttpMethod::Head => self.listing_url(api_url, QueryScope::Listing),
            HttpMethod::Post => {
                let url = match &self.address {
                    Address::Url(url) => url.clone(),
                    Address::Resource { resource, id: None } => format!("{api_url}/{resource}"),
                    Address::Resource { id: Some(_), .. } => {
                        return Err(WebserviceError::bad_parameters(
                            "add does not take an `id`",
                        ))
                    }
                };
                Ok(self.with_shop_params(url))
            }
            HttpMethod::Put => {
                let url = match &self.address {
                    Address::Url(url) => url.clone(),
                    Address::Resource {
                        resource,
                        id: Some(ResourceId::Single(id)),
                    } => format!("{api_url}/{resource}/{id}"),
                    Address::Resource { id: None, .. } => {
                        return Err(WebserviceError::bad_parameters(
                            "edit requires `url` or `resource` with `id`",
                        ))
                    }
                    Address::Resource {
                        id: Some(ResourceId::Many(_)),
                        ..
                    } => return Err(Self::id_list_error()),
                };
                Ok(self.with_shop_params(url))
            }
            HttpMethod::Delete => {
                let url = match &self.address {
                    Address::Url(url) => url.clone(),
                    Address::Resource {
                        resource,
                        id: Some(ResourceId::Single(id)),
                    } => format!("{api_url}/{resource}/{id}"),
                    Address::Resource {
                        resource,
                        id: Some(ids @ ResourceId::Many(_)),
                    } => format!("{api_url}/{resource}/?id={ids}"),
                    Address::Resource { id: None, .. } => {
                        return Err(WebserviceError::bad_parameters(
                            "delete requires `url` or `resource` with `id`",
                        ))
                    }
                };
                Ok(self.with_shop_params(url))
            }
        }
    }

    fn listing_url(&self, api_url: &str, scope: QueryScope) -> Result<String, WebserviceError> {
        let (resource, id) = match &self.address {
            Address::Url(url) => return Ok(url.clone()),
            Address::Resource { resource, id } => (resource, id),
        };

        let mut url = format!("{api_url}/{resource}");
        match id {
            Some(ResourceId::Single(id)) => {
                url.push('/');
                url.push_str(id);
            }
            Some(ResourceId::Many(_)) => return Err(Self::id_list_error()),
            None => {}
        }

        let query = self.query_pairs(scope);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(&query));
        }
        Ok(url)
    }

    /// Collects query parameters in allow-list order.
    fn query_pairs(&self, scope: QueryScope) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(field, value)| {
                let key = format!("filter[{}]", urlencoding::encode(field));
                (key, value.clone())
            })
            .collect();

        let mut push = |key: &str, value: Option<&String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        };
        push("display", self.display.as_ref());
        push("sort", self.sort.as_ref());
        push("limit", self.limit.as_ref());

        if scope == QueryScope::Full {
            push("id_shop", self.id_shop.as_ref());
            push("id_group_shop", self.id_group_shop.as_ref());
            if let Some(format) = self.output_format {
                pairs.push(("output_format".to_string(), format.as_str().to_string()));
            }
        }
        pairs
    }

    fn with_shop_params(&self, mut url: String) -> String {
        for (key, value) in [
            ("id_shop", &self.id_shop),
            ("id_group_shop", &self.id_group_shop),
        ] {
            if let Some(value) = value {
                let separator = if url.contains('?') { '&' } else { '?' };
                url.push(separator);
                url.push_str(key);
                url.push('=');
                url.push_str(&urlencoding::encode(value));
            }
        }
        url
    }

    fn id_list_error() -> WebserviceError {
        WebserviceError::bad_parameters("a list of ids is only supported by delete")
    }
}

/// Joins pairs into a query string, percent-encoding the values.
fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builder for constructing [`RequestOptions`] instances.
#[derive(Debug, Default)]
pub struct RequestOptionsBuilder {
    url: Option<String>,
    resource: Option<String>,
    id: Option<ResourceId>,
    filters: Vec<(String, String)>,
    display: Option<String>,
    sort: Option<String>,
    limit: Option<String>,
    id_shop: Option<String>,
    id_group_shop: Option<String>,
    output_format: Option<OutputFormat>,
    xml: Option<String>,
}

impl RequestOptionsBuilder {
    /// Targets an explicit, complete URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Targets a resource below `{shop_url}/api`, e.g. `products`.
    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets the resource identifier, or a list of them for `delete`.
    #[must_use]
    pub fn id(mut self, id: impl Into<ResourceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a `filter[field]=value` parameter.
    ///
    /// Filters keep their insertion order in the query string. Both the
    /// field name and the value are percent-encoded.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Sets the `display` parameter, e.g. `full` or `[id,name]`.
    #[must_use]
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Sets the `sort` parameter, e.g. `[name_ASC]`.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the `limit` parameter, e.g. `10` or `"20,10"`.
    #[must_use]
    pub fn limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Sets the shop the call applies to.
    #[must_use]
    pub fn id_shop(mut self, id_shop: impl ToString) -> Self {
        self.id_shop = Some(id_shop.to_string());
        self
    }

    /// Sets the shop group the call applies to.
    #[must_use]
    pub fn id_group_shop(mut self, id_group_shop: impl ToString) -> Self {
        self.id_group_shop = Some(id_group_shop.to_string());
        self
    }

    /// Requests a specific output format.
    #[must_use]
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Sets the XML payload sent by `add` and `edit`.
    #[must_use]
    pub fn xml(mut self, xml: impl Into<String>) -> Self {
        self.xml = Some(xml.into());
        self
    }

    /// Builds the [`RequestOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::BadParameters`] if neither `url` nor
    /// `resource` is set, if both are set, or if `id` is set without
    /// `resource`.
    pub fn build(self) -> Result<RequestOptions, WebserviceError> {
        let address = match (self.url, self.resource) {
            (Some(_), Some(_)) => {
                return Err(WebserviceError::bad_parameters(
                    "`url` and `resource` are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(WebserviceError::bad_parameters(
                    "either `url` or `resource` is required",
                ))
            }
            (Some(url), None) => {
                if self.id.is_some() {
                    return Err(WebserviceError::bad_parameters("`id` requires `resource`"));
                }
                Address::Url(url)
            }
            (None, Some(resource)) => Address::Resource {
                resource,
                id: self.id,
            },
        };

        Ok(RequestOptions {
            address,
            filters: self.filters,
            display: self.display,
            sort: self.sort,
            limit: self.limit,
            id_shop: self.id_shop,
            id_group_shop: self.id_group_shop,
            output_format: self.output_format,
            xml: self.xml,
        })
    }
}
