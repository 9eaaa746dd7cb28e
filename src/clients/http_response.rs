//! Response types for the PrestaShop webservice client.
//!
//! This module provides [`ResponseEnvelope`], the raw status/headers/body
//! triple of a single call, the status-code table the webservice is checked
//! against, and [`Content`], the parsed body handed back to callers.

use std::collections::HashMap;

use crate::clients::errors::WebserviceError;
use crate::clients::http_request::{HttpMethod, OutputFormat};
use crate::xml::XmlElement;

/// Response header carrying the PrestaShop version.
pub const VERSION_HEADER: &str = "PSWS-Version";

/// Returns the fixed reason phrase for a documented failure code.
///
/// ```rust
/// use prestashop_webservice::clients::reason_phrase;
///
/// assert_eq!(reason_phrase(401), Some("Unauthorized"));
/// assert_eq!(reason_phrase(200), None);
/// ```
#[must_use]
pub const fn reason_phrase(code: u16) -> Option<&'static str> {
    match code {
        204 => Some("No content"),
        400 => Some("Bad Request"),
        401 => Some("Unauthorized"),
        404 => Some("Not Found"),
        405 => Some("Method Not Allowed"),
        500 => Some("Internal Server Error"),
        _ => None,
    }
}

/// Checks a status code against the webservice's status table.
///
/// # Errors
///
/// - 200 and 201 succeed.
/// - 204, 400, 401, 404, 405 and 500 fail with [`WebserviceError::HttpStatus`].
/// - Any other code fails with [`WebserviceError::UnexpectedHttpStatus`].
pub fn check_status_code(code: u16) -> Result<(), WebserviceError> {
    match code {
        200 | 201 => Ok(()),
        _ => match reason_phrase(code) {
            Some(reason) => Err(WebserviceError::HttpStatus { code, reason }),
            None => Err(WebserviceError::UnexpectedHttpStatus { code }),
        },
    }
}

/// Parses raw header lines into `name -> value` pairs.
///
/// Each line is split on `:`; only lines that split into exactly two parts
/// are kept, both trimmed. Status lines, folded lines, and values that
/// themselves contain a colon are therefore dropped. A repeated name keeps
/// its last value.
#[must_use]
pub fn parse_header_lines(raw: &str) -> HashMap<String, String> {
    raw.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(':').map(str::trim).collect();
            match parts.as_slice() {
                [name, value] => Some(((*name).to_string(), (*value).to_string())),
                _ => None,
            }
        })
        .collect()
}

/// The raw outcome of a single webservice call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// The HTTP status code.
    pub status: u16,
    /// The status line and header lines, separated by CRLF.
    pub raw_headers: String,
    /// The undecoded response body.
    pub raw_body: String,
    headers: HashMap<String, String>,
}

impl ResponseEnvelope {
    /// Creates an envelope, parsing the header lines.
    #[must_use]
    pub fn new(status: u16, raw_headers: impl Into<String>, raw_body: impl Into<String>) -> Self {
        let raw_headers = raw_headers.into();
        let headers = parse_header_lines(&raw_headers);
        Self {
            status,
            raw_headers,
            raw_body: raw_body.into(),
            headers,
        }
    }

    /// Splits a raw HTTP message into headers and body.
    ///
    /// The split happens at the first blank line (`\r\n\r\n`). A HEAD
    /// response has no body, so a message without a blank line is all
    /// headers.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::MalformedResponse`] if a response to any
    /// other method has no blank line.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prestashop_webservice::{HttpMethod, ResponseEnvelope};
    ///
    /// let raw = "HTTP/1.1 200 OK\r\nPSWS-Version: 1.6.1.0\r\n\r\n{\"products\":[]}";
    /// let response = ResponseEnvelope::from_raw(200, raw, HttpMethod::Get).unwrap();
    /// assert_eq!(response.version(), Some("1.6.1.0"));
    /// assert_eq!(response.raw_body, "{\"products\":[]}");
    /// ```
    pub fn from_raw(status: u16, raw: &str, method: HttpMethod) -> Result<Self, WebserviceError> {
        match raw.split_once("\r\n\r\n") {
            Some((headers, body)) => Ok(Self::new(status, headers, body)),
            None if method == HttpMethod::Head => Ok(Self::new(status, raw, "")),
            None => Err(WebserviceError::MalformedResponse),
        }
    }

    /// Returns the parsed header map.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the value of the header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the `PSWS-Version` header value, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.header(VERSION_HEADER)
    }

    /// Returns `true` for the two success codes, 200 and 201.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Checks the status code, see [`check_status_code`].
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::HttpStatus`] or
    /// [`WebserviceError::UnexpectedHttpStatus`] for non-success codes.
    pub fn check_status(&self) -> Result<(), WebserviceError> {
        check_status_code(self.status)
    }
}

/// The parsed body of a successful call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// A JSON body, returned exactly as received. Decoding is up to the
    /// caller, e.g. with [`Product::from_json_str`](crate::entity::Product::from_json_str).
    Json(String),
    /// An XML body parsed into its root element.
    Xml(XmlElement),
}

impl Content {
    /// Parses a body according to the requested output format.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::EmptyResponse`] for an empty body and
    /// [`WebserviceError::UnparsableXml`] for malformed XML.
    pub fn parse(body: &str, format: OutputFormat) -> Result<Self, WebserviceError> {
        if body.is_empty() {
            return Err(WebserviceError::EmptyResponse);
        }
        match format {
            OutputFormat::Json => Ok(Self::Json(body.to_string())),
            OutputFormat::Xml => XmlElement::parse(body).map(Self::Xml),
        }
    }

    /// Returns the raw JSON body, if this is JSON content.
    #[must_use]
    pub fn as_json(&self) -> Option<&str> {
        match self {
            Self::Json(body) => Some(body),
            Self::Xml(_) => None,
        }
    }

    /// Returns the XML root element, if this is XML content.
    #[must_use]
    pub const fn as_xml(&self) -> Option<&XmlElement> {
        match self {
            Self::Xml(root) => Some(root),
            Self::Json(_) => None,
        }
    }

    /// Consumes the content and returns the XML root element, if any.
    #[must_use]
    pub fn into_xml(self) -> Option<XmlElement> {
        match self {
            Self::Xml(root) => Some(root),
            Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_codes() {
        assert!(check_status_code(200).is_ok());
        assert!(check_status_code(201).is_ok());
    }

    #[test]
    fn test_documented_failure_codes_map_to_reason_phrases() {
        let table = [
            (204, "No content"),
            (400, "Bad Request"),
            (401, "Unauthorized"),
            (404, "Not Found"),
            (405, "Method Not Allowed"),
            (500, "Internal Server Error"),
        ];
        for (code, expected) in table {
            match check_status_code(code) {
                Err(WebserviceError::HttpStatus { code: c, reason }) => {
                    assert_eq!(c, code);
                    assert_eq!(reason, expected);
                }
                other => panic!("Expected HttpStatus for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_other_codes_are_unexpected() {
        for code in [0, 202, 301, 403, 429, 502, 503] {
            assert!(
                matches!(
                    check_status_code(code),
                    Err(WebserviceError::UnexpectedHttpStatus { code: c }) if c == code
                ),
                "Expected UnexpectedHttpStatus for {code}"
            );
        }
    }

    #[test]
    fn test_header_lines_need_exactly_one_colon() {
        let raw = "HTTP/1.1 200 OK\r\n\
                   Content-Type: application/json\r\n\
                   PSWS-Version: 1.6.1.0\r\n\
                   Date: Mon, 01 Jan 2024 10:00:00 GMT\r\n\
                   Location: http://mystore.com/api/customers/7";
        let headers = parse_header_lines(raw);

        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(headers.get("PSWS-Version"), Some(&"1.6.1.0".to_string()));
        assert!(!headers.contains_key("Date"));
        assert!(!headers.contains_key("Location"));
    }

    #[test]
    fn test_version_header_is_case_insensitive() {
        let response = ResponseEnvelope::new(200, "HTTP/1.1 200 OK\r\npsws-version: 1.7.8.0", "");
        assert_eq!(response.version(), Some("1.7.8.0"));
    }

    #[test]
    fn test_from_raw_splits_at_first_blank_line() {
        let raw = "HTTP/1.1 201 Created\r\nPSWS-Version: 1.6.1.0\r\n\r\n<prestashop/>\r\n\r\ntrailer";
        let response = ResponseEnvelope::from_raw(201, raw, HttpMethod::Post).unwrap();

        assert_eq!(response.raw_headers, "HTTP/1.1 201 Created\r\nPSWS-Version: 1.6.1.0");
        assert_eq!(response.raw_body, "<prestashop/>\r\n\r\ntrailer");
        assert!(response.is_ok());
    }

    #[test]
    fn test_from_raw_without_separator_is_malformed_except_for_head() {
        let raw = "HTTP/1.1 200 OK\r\nPSWS-Version: 1.6.1.0";

        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
        ] {
            assert!(matches!(
                ResponseEnvelope::from_raw(200, raw, method),
                Err(WebserviceError::MalformedResponse)
            ));
        }

        let response = ResponseEnvelope::from_raw(200, raw, HttpMethod::Head).unwrap();
        assert_eq!(response.raw_headers, raw);
        assert!(response.raw_body.is_empty());
        assert_eq!(response.version(), Some("1.6.1.0"));
    }

    #[test]
    fn test_check_status_on_envelope() {
        let response = ResponseEnvelope::new(404, "HTTP/1.1 404 Not Found", "");
        assert!(!response.is_ok());
        assert!(matches!(
            response.check_status(),
            Err(WebserviceError::HttpStatus { code: 404, .. })
        ));
    }

    #[test]
    fn test_json_content_is_returned_verbatim() {
        let body = r#"{"customers":[{"id":1}]}  "#;
        let content = Content::parse(body, OutputFormat::Json).unwrap();
        assert_eq!(content.as_json(), Some(body));
        assert!(content.as_xml().is_none());
    }

    #[test]
    fn test_json_content_is_not_validated() {
        let content = Content::parse("not json at all", OutputFormat::Json).unwrap();
        assert_eq!(content, Content::Json("not json at all".to_string()));
    }

    #[test]
    fn test_xml_content_is_parsed() {
        let content = Content::parse("<prestashop><customer/></prestashop>", OutputFormat::Xml).unwrap();
        let root = content.into_xml().unwrap();
        assert_eq!(root.name(), "prestashop");
        assert!(root.child("customer").is_some());
    }

    #[test]
    fn test_empty_body_is_rejected_for_both_formats() {
        assert!(matches!(
            Content::parse("", OutputFormat::Json),
            Err(WebserviceError::EmptyResponse)
        ));
        assert!(matches!(
            Content::parse("", OutputFormat::Xml),
            Err(WebserviceError::EmptyResponse)
        ));
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        assert!(matches!(
            Content::parse("<prestashop>", OutputFormat::Xml),
            Err(WebserviceError::UnparsableXml { .. })
        ));
    }
}
