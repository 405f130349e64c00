//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identifier of a checkout order.
///
/// Order ids are minted server-side by an `OrderIdGenerator` and are also
/// echoed back by the gateway in notifications, so the inner value is an
/// opaque string rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new OrderId, returning error if empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("order_id"));
        }
        Ok(Self(id))
    }

    /// Wraps an id minted by a generator, which never produces blank values.
    pub(crate) fn from_generated(id: String) -> Self {
        debug_assert!(!id.trim().is_empty());
        Self(id)
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_accepts_gateway_style_value() {
        let id = OrderId::new("ORDER-1704067200000-42").unwrap();
        assert_eq!(id.as_str(), "ORDER-1704067200000-42");
    }

    #[test]
    fn order_id_rejects_empty_string() {
        assert!(OrderId::new("").is_err());
    }

    #[test]
    fn order_id_rejects_blank_string() {
        assert!(OrderId::new("   ").is_err());
    }

    #[test]
    fn order_id_serializes_as_plain_string() {
        let id = OrderId::new("ORDER-1-2").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ORDER-1-2\"");
    }

    #[test]
    fn order_id_displays_inner_value() {
        let id = OrderId::new("ORDER-9").unwrap();
        assert_eq!(format!("{}", id), "ORDER-9");
    }
}
