//! The `products` resource.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::EntityError;
use crate::xml::XmlElement;

/// Position of the localized entry returned by [`Product::name`] and
/// [`Product::rewrite_link`].
///
/// This is the second slot of the per-language sequence, not a lookup by
/// language id.
pub const LOCALIZED_INDEX: usize = 1;

/// A product as returned by the `products` resource.
///
/// Wraps the decoded attribute map without validating it. Typed accessors
/// coerce loosely: integers are read from the leading numeric part of the
/// value (`"19.99"` reads as `19`) and anything unreadable gives `0`.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice::Product;
/// use serde_json::json;
///
/// let product = Product::new(
///     json!({"id": "7", "price": "19.99"}).as_object().unwrap().clone(),
/// );
///
/// assert_eq!(product.id(), 7);
/// assert_eq!(product.price(), 19);
/// assert!(product.get_raw("reference").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product {
    attributes: Map<String, Value>,
}

impl Product {
    /// Wraps an attribute map.
    #[must_use]
    pub const fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Decodes a JSON body holding one product.
    ///
    /// Accepts both the `{"product": {...}}` envelope returned by the
    /// webservice and a bare attribute object.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidJson`] for malformed JSON and
    /// [`EntityError::InvalidDocument`] when the body is not an object.
    pub fn from_json_str(body: &str) -> Result<Self, EntityError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Object(mut object) => match object.remove("product") {
                Some(Value::Object(attributes)) => Ok(Self::new(attributes)),
                Some(other) => {
                    object.insert("product".to_string(), other);
                    Ok(Self::new(object))
                }
                None => Ok(Self::new(object)),
            },
            _ => Err(invalid_document("expected a JSON object")),
        }
    }

    /// Decodes a JSON listing body, `{"products": [...]}`.
    ///
    /// The webservice answers an empty listing with `[]`, which gives an
    /// empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidJson`] for malformed JSON and
    /// [`EntityError::InvalidDocument`] when the body has no product list.
    pub fn list_from_json_str(body: &str) -> Result<Vec<Self>, EntityError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Array(items) if items.is_empty() => Ok(Vec::new()),
            Value::Object(mut object) => match object.remove("products") {
                Some(Value::Array(items)) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(attributes) => Ok(Self::new(attributes)),
                        _ => Err(invalid_document("product entries must be objects")),
                    })
                    .collect(),
                _ => Err(invalid_document("missing \"products\" list")),
            },
            _ => Err(invalid_document("expected a JSON object")),
        }
    }

    /// Builds a product from an XML document.
    ///
    /// Accepts `<prestashop><product>...</product></prestashop>` or a bare
    /// `<product>` element. Leaf elements become strings, elements holding
    /// `<language id="...">` entries become `[{"id", "value"}]` sequences,
    /// and other nested elements become objects (repeated names become
    /// arrays).
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidDocument`] when no `<product>` element
    /// is found.
    pub fn from_xml(doc: &XmlElement) -> Result<Self, EntityError> {
        let product = if doc.name() == "product" {
            doc
        } else {
            doc.child("product")
                .ok_or_else(|| invalid_document("missing <product> element"))?
        };

        match element_value(product) {
            Value::Object(attributes) => Ok(Self::new(attributes)),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the stored value for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::AttributeNotFound`] when the attribute is
    /// absent or null.
    pub fn get_raw(&self, name: &str) -> Result<&Value, EntityError> {
        self.item(name).ok_or_else(|| EntityError::AttributeNotFound {
            name: name.to_string(),
        })
    }

    /// Alias of [`Product::get_raw`].
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::AttributeNotFound`] when the attribute is
    /// absent or null.
    pub fn get(&self, name: &str) -> Result<&Value, EntityError> {
        self.get_raw(name)
    }

    /// Returns all attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns the `id` attribute as an integer, `0` if unreadable.
    #[must_use]
    pub fn id(&self) -> i64 {
        loose_int(self.item("id"))
    }

    /// Returns the `price` attribute truncated to an integer, `0` if
    /// unreadable.
    #[must_use]
    pub fn price(&self) -> i64 {
        loose_int(self.item("price"))
    }

    /// Returns the `id_default_image` attribute as an integer, `0` if
    /// unreadable.
    #[must_use]
    pub fn default_image_id(&self) -> i64 {
        loose_int(self.item("id_default_image"))
    }

    /// Returns the localized `name` at [`LOCALIZED_INDEX`], or `""`.
    #[must_use]
    pub fn name(&self) -> String {
        self.localized("name")
    }

    /// Returns the localized `link_rewrite` at [`LOCALIZED_INDEX`], or `""`.
    #[must_use]
    pub fn rewrite_link(&self) -> String {
        self.localized("link_rewrite")
    }

    fn item(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|value| !value.is_null())
    }

    fn localized(&self, name: &str) -> String {
        let entry = self
            .item(name)
            .and_then(|list| list.get(LOCALIZED_INDEX))
            .and_then(|entry| entry.get("value"));

        match entry {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(true)) => "1".to_string(),
            _ => String::new(),
        }
    }
}

impl From<Map<String, Value>> for Product {
    fn from(attributes: Map<String, Value>) -> Self {
        Self::new(attributes)
    }
}

fn invalid_document(reason: &str) -> EntityError {
    EntityError::InvalidDocument {
        reason: reason.to_string(),
    }
}

fn element_value(element: &XmlElement) -> Value {
    let children = element.children();
    if children.is_empty() {
        return Value::String(element.text().to_string());
    }

    if children.iter().all(|c| c.name() == "language") {
        return Value::Array(
            children
                .iter()
                .map(|language| {
                    let mut entry = Map::new();
                    entry.insert(
                        "id".to_string(),
                        Value::String(language.attribute("id").unwrap_or_default().to_string()),
                    );
                    entry.insert(
                        "value".to_string(),
                        Value::String(language.text().to_string()),
                    );
                    Value::Object(entry)
                })
                .collect(),
        );
    }

    let mut object = Map::new();
    for child in children {
        let value = element_value(child);
        match object.get_mut(child.name()) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                object.insert(child.name().to_string(), value);
            }
        }
    }
    Value::Object(object)
}

/// Integer coercion of a decoded value.
///
/// Strings yield their leading numeric part, truncated toward zero.
#[allow(clippy::cast_possible_truncation)]
fn loose_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => numeric_prefix(s)
            .parse::<f64>()
            .map_or(0, |f| f.trunc() as i64),
        Some(Value::Bool(b)) => i64::from(*b),
        Some(Value::Array(items)) => i64::from(!items.is_empty()),
        Some(Value::Object(map)) => i64::from(!map.is_empty()),
        Some(Value::Null) | None => 0,
    }
}

/// Returns the longest leading slice of `s` that reads as a decimal number.
fn numeric_prefix(s: &str) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}
