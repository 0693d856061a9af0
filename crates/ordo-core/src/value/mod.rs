//! The record produced by every lookup.
//!
//! A [`ConfigValue`] is immutable once built. Stages that rewrite a lookup
//! produce a new record with [`ConfigValue::with_name`] and friends, which
//! copy every field they do not override.

use serde::Serialize;

/// One resolution result along with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigValue {
    name: String,
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<String>,
    source_name: String,
    source_ordinal: i32,
    source_position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_number: Option<u32>,
}

impl ConfigValue {
    /// A value as read from a source before any stage touched it.
    ///
    /// `raw_value` starts out equal to `value`.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        source_name: impl Into<String>,
        source_ordinal: i32,
    ) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            raw_value: Some(value.clone()),
            value: Some(value),
            profile: None,
            source_name: source_name.into(),
            source_ordinal,
            source_position: 0,
            line_number: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value before expression expansion.
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    /// The profile whose `%profile.` entry produced this value.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn source_ordinal(&self) -> i32 {
        self.source_ordinal
    }

    /// Index of the source in the registry's resolution order.
    pub fn source_position(&self) -> usize {
        self.source_position
    }

    pub fn line_number(&self) -> Option<u32> {
        self.line_number
    }

    /// `source:line` when the line is known, otherwise the source name.
    pub fn location(&self) -> String {
        match self.line_number {
            Some(line) => format!("{}:{}", self.source_name, line),
            None => self.source_name.clone(),
        }
    }

    /// The name as it was written in the source, including its profile prefix.
    pub fn name_profiled(&self) -> String {
        match &self.profile {
            Some(profile) => format!("%{}.{}", profile, self.name),
            None => self.name.clone(),
        }
    }

    /// Whether this value beats `other`, found first under an alternate name.
    ///
    /// Only a strictly higher source ordinal wins, so ties stay with `other`.
    pub fn outranks(&self, other: &ConfigValue) -> bool {
        self.source_ordinal > other.source_ordinal
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Replace the value, keeping `raw_value` untouched.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..self.clone()
        }
    }

    pub fn with_raw_value(&self, raw_value: impl Into<String>) -> Self {
        Self {
            raw_value: Some(raw_value.into()),
            ..self.clone()
        }
    }

    pub fn with_profile(&self, profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
            ..self.clone()
        }
    }

    pub fn with_source_position(&self, source_position: usize) -> Self {
        Self {
            source_position,
            ..self.clone()
        }
    }

    pub fn with_line_number(&self, line_number: u32) -> Self {
        Self {
            line_number: Some(line_number),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(ordinal: i32, position: usize) -> ConfigValue {
        ConfigValue::new("port", "8080", "test", ordinal).with_source_position(position)
    }

    #[test]
    fn test_new_sets_raw_value() {
        let value = ConfigValue::new("port", "8080", "map", 100);
        assert_eq!(value.value(), Some("8080"));
        assert_eq!(value.raw_value(), Some("8080"));
        assert_eq!(value.source_ordinal(), 100);
        assert_eq!(value.line_number(), None);
    }

    #[test]
    fn test_with_value_keeps_other_fields() {
        let original = ConfigValue::new("url", "${host}", "file", 250).with_line_number(3);
        let expanded = original.with_value("localhost");
        assert_eq!(expanded.value(), Some("localhost"));
        assert_eq!(expanded.raw_value(), Some("${host}"));
        assert_eq!(expanded.location(), "file:3");
        assert_eq!(original.value(), Some("${host}"));
    }

    #[test]
    fn test_name_profiled() {
        let value = ConfigValue::new("port", "9090", "map", 100).with_profile("prod");
        assert_eq!(value.name_profiled(), "%prod.port");
        assert_eq!(value.with_name("server.port").name(), "server.port");
    }

    #[test]
    fn test_equal_ordinal_does_not_outrank() {
        let first = value(100, 0);
        let second = value(100, 1);
        assert!(!second.outranks(&first));
        assert!(!first.outranks(&second));
    }

    #[test]
    fn test_higher_ordinal_outranks() {
        assert!(value(300, 1).outranks(&value(100, 0)));
        assert!(!value(100, 0).outranks(&value(300, 1)));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(ConfigValue::new("port", "8080", "map", 100)).unwrap();
        assert_eq!(json["name"], "port");
        assert_eq!(json["value"], "8080");
        assert_eq!(json["source_ordinal"], 100);
        assert!(json.get("profile").is_none());
    }
}
