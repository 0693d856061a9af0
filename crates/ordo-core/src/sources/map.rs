//! Eager, map-backed sources.

use std::collections::HashMap;

use super::errors::SourceError;
use super::traits::{CONFIG_ORDINAL_KEY, ConfigSource, DEFAULT_ORDINAL};
use crate::names::PropertyName;
use crate::value::ConfigValue;

/// Name of the source holding built-in defaults.
pub const DEFAULT_VALUES_NAME: &str = "DefaultValues";

/// Ordinal of the defaults source. Every other source outranks it.
pub const DEFAULT_VALUES_ORDINAL: i32 = i32::MIN;

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    value: String,
    line_number: Option<u32>,
}

/// A source whose properties are fully loaded at construction.
///
/// Lookups match by [`PropertyName`], so `foo-bar` finds an entry stored as
/// `foo.bar`. When two entries fold to the same name the last one wins.
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    ordinal: i32,
    entries: HashMap<PropertyName, Entry>,
}

impl MapSource {
    pub fn new<I, K, V>(name: impl Into<String>, ordinal: i32, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self {
            name: name.into(),
            ordinal,
            entries: HashMap::new(),
        };
        for (key, value) in properties {
            source.insert(key.into(), value.into(), None);
        }
        source
    }

    /// Build a source whose entries carry the line they were read from.
    pub fn with_lines<I>(name: impl Into<String>, ordinal: i32, properties: I) -> Self
    where
        I: IntoIterator<Item = (String, String, u32)>,
    {
        let mut source = Self::new(name, ordinal, Vec::<(String, String)>::new());
        for (key, value, line) in properties {
            source.insert(key, value, Some(line));
        }
        source
    }

    /// Like [`MapSource::new`], but a `config_ordinal` entry in the data
    /// replaces `default_ordinal`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] if `config_ordinal` is not an integer.
    pub fn from_data<I, K, V>(
        name: impl Into<String>,
        default_ordinal: i32,
        properties: I,
    ) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self::new(name, default_ordinal, properties);
        if let Some(entry) = source.entries.get(&PropertyName::new(CONFIG_ORDINAL_KEY)) {
            source.ordinal = entry
                .value
                .trim()
                .parse::<i32>()
                .map_err(|e| SourceError::Parse {
                    path: source.name.clone(),
                    message: format!("invalid {} '{}': {}", CONFIG_ORDINAL_KEY, entry.value, e),
                })?;
        }
        Ok(source)
    }

    /// Built-in defaults, outranked by every other source.
    pub fn defaults<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(DEFAULT_VALUES_NAME, DEFAULT_VALUES_ORDINAL, properties)
    }

    /// Empty programmatic source with the default ordinal.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_ORDINAL, Vec::<(String, String)>::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, value: String, line_number: Option<u32>) {
        self.entries.insert(
            PropertyName::new(name.clone()),
            Entry {
                name,
                value,
                line_number,
            },
        );
    }
}

impl ConfigSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn property_names(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.entries.values().map(|entry| entry.name.clone()).collect())
    }

    fn get_value(&self, name: &str) -> Result<Option<String>, SourceError> {
        Ok(self
            .entries
            .get(&PropertyName::new(name))
            .map(|entry| entry.value.clone()))
    }

    fn get_config_value(&self, name: &str) -> Result<Option<ConfigValue>, SourceError> {
        Ok(self.entries.get(&PropertyName::new(name)).map(|entry| {
            let value = ConfigValue::new(name, entry.value.clone(), &self.name, self.ordinal);
            match entry.line_number {
                Some(line) => value.with_line_number(line),
                None => value,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_name_normalized() {
        let source = MapSource::new("map", 100, [("server.port", "8080")]);
        assert_eq!(source.get_value("SERVER_PORT").unwrap(), Some("8080".to_string()));
        assert_eq!(source.get_value("server-port").unwrap(), Some("8080".to_string()));
        assert_eq!(source.get_value("server.host").unwrap(), None);
    }

    #[test]
    fn test_config_value_uses_requested_name() {
        let source = MapSource::new("map", 150, [("server.port", "8080")]);
        let value = source.get_config_value("server-port").unwrap().unwrap();
        assert_eq!(value.name(), "server-port");
        assert_eq!(value.source_name(), "map");
        assert_eq!(value.source_ordinal(), 150);
    }

    #[test]
    fn test_line_numbers_reach_config_value() {
        let source = MapSource::with_lines(
            "app.properties",
            100,
            [("a".to_string(), "1".to_string(), 7)],
        );
        let value = source.get_config_value("a").unwrap().unwrap();
        assert_eq!(value.line_number(), Some(7));
        assert_eq!(value.location(), "app.properties:7");
    }

    #[test]
    fn test_config_ordinal_override() {
        let source =
            MapSource::from_data("file", 100, [("config_ordinal", "420"), ("a", "1")]).unwrap();
        assert_eq!(source.ordinal(), 420);
    }

    #[test]
    fn test_invalid_config_ordinal_is_parse_error() {
        let result = MapSource::from_data("file", 100, [("config_ordinal", "high")]);
        assert!(matches!(result, Err(SourceError::Parse { .. })));
    }

    #[test]
    fn test_defaults_rank_lowest() {
        let source = MapSource::defaults([("a", "1")]);
        assert_eq!(source.name(), DEFAULT_VALUES_NAME);
        assert_eq!(source.ordinal(), i32::MIN);
    }

    #[test]
    fn test_property_names_keep_spelling() {
        let source = MapSource::new("map", 100, [("Foo-Bar", "1")]);
        assert_eq!(source.property_names().unwrap(), vec!["Foo-Bar".to_string()]);
        assert_eq!(source.len(), 1);
        assert!(MapSource::empty("e").is_empty());
    }
}
