use serde::Serialize;
use serde_json::{Map, Value};

/// JSON key carrying a block's discriminator tag.
pub const DISCRIMINATOR_KEY: &str = "__component";

/// A block exactly as the content source returned it.
///
/// Only the discriminator and identifier are known fields; everything else is
/// variant-specific and left for the rendering strategy to interpret.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawBlock(Map<String, Value>);

impl RawBlock {
    /// Wraps a JSON value, or returns `None` if it is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// The discriminator tag, if present and a string.
    pub fn tag(&self) -> Option<&str> {
        self.0.get(DISCRIMINATOR_KEY).and_then(Value::as_str)
    }

    /// The block identifier. Strapi sends numbers, but nothing here relies on that.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// A field's value when it is a non-empty string.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
