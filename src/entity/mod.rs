//! Read-only entity wrappers over decoded webservice resources.
//!
//! The webservice answers with loosely typed documents. The wrappers in this
//! module keep the decoded attributes as-is and expose a few typed accessors
//! with forgiving coercion, so a missing or odd field never aborts a read.
//! Use [`Product::get_raw`] when a field must be present.
//!
//! # Example
//!
//! ```rust
//! use prestashop_webservice::Product;
//!
//! let product = Product::from_json_str(
//!     r#"{"product":{"id":"7","price":"19.99","name":[{"id":"1","value":"Shirt"},{"id":"2","value":"Chemise"}]}}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(product.id(), 7);
//! assert_eq!(product.price(), 19);
//! assert_eq!(product.name(), "Chemise");
//! ```

mod product;

pub use product::Product;

use thiserror::Error;

/// Errors raised while building or reading an entity.
#[derive(Debug, Error)]
pub enum EntityError {
    /// The attribute is absent (or null).
    #[error("The attribute doesn't exist: {name}")]
    AttributeNotFound {
        /// The requested attribute name.
        name: String,
    },

    /// The body is not valid JSON.
    #[error("Invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The document is well-formed but does not describe the entity.
    #[error("Invalid entity document: {reason}")]
    InvalidDocument {
        /// What was expected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_not_found_message() {
        let error = EntityError::AttributeNotFound {
            name: "reference".to_string(),
        };
        assert_eq!(error.to_string(), "The attribute doesn't exist: reference");
    }

    #[test]
    fn test_invalid_json_from_serde_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = EntityError::from(serde_error);
        assert!(matches!(error, EntityError::InvalidJson(_)));
    }
}
