//! Configuration source trait definition.

use super::errors::SourceError;
use crate::value::ConfigValue;

/// Ordinal assumed for sources that do not declare one.
pub const DEFAULT_ORDINAL: i32 = 100;

/// Property that lets a source's own data override its ordinal.
pub const CONFIG_ORDINAL_KEY: &str = "config_ordinal";

/// Trait defining the interface for configuration sources.
///
/// A source is a named, ordinal-ranked provider of raw name/value pairs.
/// Sources are read-only once registered and may be invoked concurrently,
/// so implementations must not rely on interior mutability for lookups.
pub trait ConfigSource: Send + Sync {
    /// Stable name used in diagnostics and [`ConfigValue::source_name`].
    fn name(&self) -> &str;

    /// Priority of this source. Higher wins.
    fn ordinal(&self) -> i32 {
        DEFAULT_ORDINAL
    }

    /// All property names this source defines, in its own spelling.
    fn property_names(&self) -> Result<Vec<String>, SourceError>;

    /// Point lookup of a raw value.
    fn get_value(&self, name: &str) -> Result<Option<String>, SourceError>;

    /// Point lookup returning the full record.
    ///
    /// Default implementation wraps [`get_value`](Self::get_value). Sources
    /// that know line numbers override this.
    fn get_config_value(&self, name: &str) -> Result<Option<ConfigValue>, SourceError> {
        Ok(self
            .get_value(name)?
            .map(|value| ConfigValue::new(name, value, self.name(), self.ordinal())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSource;

    impl ConfigSource for MockSource {
        fn name(&self) -> &str {
            "mock"
        }

        fn property_names(&self) -> Result<Vec<String>, SourceError> {
            Ok(vec!["mock.key".to_string()])
        }

        fn get_value(&self, name: &str) -> Result<Option<String>, SourceError> {
            Ok((name == "mock.key").then(|| "mock-value".to_string()))
        }
    }

    #[test]
    fn test_default_ordinal() {
        assert_eq!(MockSource.ordinal(), DEFAULT_ORDINAL);
    }

    #[test]
    fn test_default_get_config_value_wraps_get_value() {
        let value = MockSource.get_config_value("mock.key").unwrap().unwrap();
        assert_eq!(value.name(), "mock.key");
        assert_eq!(value.value(), Some("mock-value"));
        assert_eq!(value.source_name(), "mock");
        assert_eq!(value.source_ordinal(), 100);
        assert!(MockSource.get_config_value("other").unwrap().is_none());
    }
}
