//! Content record entity parsed from a stored JSON document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Structured guide content for one catalog identifier.
///
/// Only `title` is required. The three lists default to empty when missing
/// or `null`, and any other top-level fields are carried in [`Self::extra`]
/// without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub title: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub reasons: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub methods: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub benefits: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentRecord {
    /// Parses a record from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
