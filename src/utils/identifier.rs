//! Identifier normalization for catalog and content lookups.

/// Normalizes a raw path segment into a catalog identifier.
///
/// Lowercases the input and drops every character outside `[a-z0-9]`, so
/// `"Social-Media"` becomes `"socialmedia"`. The result may be empty.
pub fn normalize_identifier(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
