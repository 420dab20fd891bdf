//! Attribute-key derivation.
//!
//! Every model instance is addressed in every backing store by one stable
//! string key derived from its type key and optional instance id. Keys are
//! deterministic, so the same model lands on the same cache entry, object
//! path, or shadow-document node no matter which handler touches it.

/// Separator between the type key and the instance id.
pub(crate) const ID_SEPARATOR: char = ':';

/// Derives the attribute key for a model type and optional instance id.
///
/// The key is the type key alone, or `{type_key}:{id}` when the id is
/// present and non-empty. An empty id and an absent id normalize to the
/// same key, so both address the singleton instance of the type.
///
/// Type keys must not contain `:`; ids may, since the type key is always
/// the prefix up to the first separator.
pub fn attribute_key(type_key: &str, id: Option<&str>) -> String {
    debug_assert!(
        !type_key.contains(ID_SEPARATOR),
        "type keys must not contain the id separator"
    );
    match id {
        Some(id) if !id.is_empty() => format!("{type_key}{ID_SEPARATOR}{id}"),
        _ => type_key.to_string(),
    }
}
