//! Placeholder map and merge policy

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Name used when a placeholder is inserted without a selection
pub const DEFAULT_PLACEHOLDER_NAME: &str = "placeholder";

/// Placeholder-map error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("Placeholder name must not be empty")]
    EmptyName,

    #[error("Placeholder not found: {0}")]
    NotFound(String),
}

/// Result type for placeholder map operations
pub type PlaceholderResult<T> = Result<T, PlaceholderError>;

/// Mapping from placeholder name to value.
///
/// Keys keep their insertion order so listings stay stable while the user
/// edits. Keys are only ever removed through [`PlaceholderMap::remove`].
/// Values supplied by a caller never carry a blank name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlaceholderMap {
    values: IndexMap<String, String>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge names extracted from a template.
    ///
    /// Unknown names are appended with an empty value; known names keep their
    /// value. Names missing from `names` are left untouched. Returns the names
    /// that were added.
    pub fn merge_extracted<I>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = Vec::new();
        for name in names {
            if !self.values.contains_key(&name) {
                self.values.insert(name.clone(), String::new());
                added.push(name);
            }
        }
        added
    }

    /// Add a placeholder or update its value.
    ///
    /// Rejects names that are empty or whitespace-only.
    pub fn add_or_update(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> PlaceholderResult<()> {
        let name = name.into();
        validate_name(&name)?;
        self.values.insert(name, value.into());
        Ok(())
    }

    /// Remove a placeholder, keeping the order of the remaining keys
    pub fn remove(&mut self, name: &str) -> PlaceholderResult<String> {
        self.values
            .shift_remove(name)
            .ok_or_else(|| PlaceholderError::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn validate_name(name: &str) -> PlaceholderResult<()> {
    if name.trim().is_empty() {
        return Err(PlaceholderError::EmptyName);
    }
    Ok(())
}

/// Collects name/value pairs, skipping blank names
impl<K, V> FromIterator<(K, V)> for PlaceholderMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, _)| validate_name(k).is_ok())
                .collect(),
        }
    }
}

impl TryFrom<IndexMap<String, String>> for PlaceholderMap {
    type Error = PlaceholderError;

    fn try_from(values: IndexMap<String, String>) -> PlaceholderResult<Self> {
        values.keys().try_for_each(|name| validate_name(name))?;
        Ok(Self { values })
    }
}

impl<'de> Deserialize<'de> for PlaceholderMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = IndexMap::<String, String>::deserialize(deserializer)?;
        Self::try_from(values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_new_names_with_empty_value() {
        let mut map = PlaceholderMap::new();
        let added = map.merge_extracted(vec!["company".to_string(), "name".to_string()]);

        assert_eq!(added, vec!["company", "name"]);
        assert_eq!(map.get("company"), Some(""));
        assert_eq!(map.get("name"), Some(""));
    }

    #[test]
    fn test_merge_preserves_existing_values() {
        let mut map = PlaceholderMap::new();
        map.add_or_update("company", "Acme").unwrap();

        let added = map.merge_extracted(vec!["company".to_string(), "position".to_string()]);

        assert_eq!(added, vec!["position"]);
        assert_eq!(map.get("company"), Some("Acme"));
    }

    #[test]
    fn test_merge_never_removes_names() {
        let mut map = PlaceholderMap::new();
        map.merge_extracted(vec!["old".to_string()]);
        map.merge_extracted(vec!["new".to_string()]);

        assert!(map.contains("old"));
        assert!(map.contains("new"));
    }

    #[test]
    fn test_add_or_update_rejects_blank_names() {
        let mut map = PlaceholderMap::new();
        assert_eq!(map.add_or_update("", "x"), Err(PlaceholderError::EmptyName));
        assert_eq!(map.add_or_update("   ", "x"), Err(PlaceholderError::EmptyName));
        assert!(map.is_empty());
    }

    #[test]
    fn test_add_or_update_keeps_position() {
        let mut map = PlaceholderMap::new();
        map.add_or_update("a", "1").unwrap();
        map.add_or_update("b", "2").unwrap();
        map.add_or_update("a", "3").unwrap();

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: PlaceholderMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();

        assert_eq!(map.remove("b"), Ok("2".to_string()));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(
            map.remove("b"),
            Err(PlaceholderError::NotFound("b".to_string()))
        );
    }

    #[test]
    fn test_serializes_as_object_in_order() {
        let map: PlaceholderMap = [("z", "last"), ("a", "first")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"z":"last","a":"first"}"#);
    }

    #[test]
    fn test_deserialize_rejects_blank_names() {
        let map: PlaceholderMap = serde_json::from_str(r#"{"b":"2","a":"1"}"#).unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["b", "a"]);

        assert!(serde_json::from_str::<PlaceholderMap>(r#"{"":"x"}"#).is_err());
        assert!(serde_json::from_str::<PlaceholderMap>(r#"{"a":"1"," ":"x"}"#).is_err());
    }

    #[test]
    fn test_collect_skips_blank_names() {
        let map: PlaceholderMap = [("", "x"), ("a", "1"), ("  ", "y")].into_iter().collect();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["a"]);
    }
}
