//! TOML file source.
//!
//! Tables are flattened into dotted property names:
//!
//! ```toml
//! [server]
//! port = 8080
//! hosts = ["a", "b"]
//!
//! ["%prod".server]
//! port = 9090
//! ```
//!
//! yields `server.port=8080`, `server.hosts=a,b` and `%prod.server.port=9090`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::errors::SourceError;
use super::map::MapSource;
use super::traits::{ConfigSource, DEFAULT_ORDINAL};
use crate::value::ConfigValue;

/// A source loaded from a TOML file at construction time.
#[derive(Debug, Clone)]
pub struct TomlFileSource {
    path: PathBuf,
    inner: MapSource,
}

impl TomlFileSource {
    /// Load `path` with the default ordinal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::load_with_ordinal(path, DEFAULT_ORDINAL)
    }

    /// Load `path`, using `ordinal` unless the file sets `config_ordinal`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read and
    /// [`SourceError::Parse`] if it is not valid TOML.
    pub fn load_with_ordinal(path: impl AsRef<Path>, ordinal: i32) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let source = Self::parse(path, &content, ordinal)?;
        info!(
            event = "core.sources.file_loaded",
            path = %path.display(),
            properties = source.inner.len(),
            ordinal = source.inner.ordinal()
        );
        Ok(source)
    }

    /// Load `path` if it exists.
    ///
    /// A missing file is not an error. Unreadable or malformed files are.
    pub fn load_optional(path: impl AsRef<Path>, ordinal: i32) -> Result<Option<Self>, SourceError> {
        match Self::load_with_ordinal(path.as_ref(), ordinal) {
            Ok(source) => Ok(Some(source)),
            Err(SourceError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    event = "core.sources.file_not_found",
                    path = %path.as_ref().display()
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Parse TOML text as if it had been read from `path`.
    pub fn parse(path: &Path, content: &str, ordinal: i32) -> Result<Self, SourceError> {
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| SourceError::Parse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })?;

        let mut properties = Vec::new();
        flatten(None, &toml::Value::Table(table), &mut properties);

        let inner = MapSource::from_data(path.display().to_string(), ordinal, properties)?;
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn flatten(prefix: Option<&str>, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, value) in table {
                let name = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, key),
                    None => key.clone(),
                };
                flatten(Some(&name), value, out);
            }
        }
        scalar => {
            if let Some(name) = prefix {
                out.push((name.to_string(), render(scalar)));
            }
        }
    }
}

fn render(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
        // Tables nested in arrays have no dotted form; keep their TOML text
        toml::Value::Table(table) => table.to_string().trim().to_string(),
        other => other.to_string(),
    }
}

impl ConfigSource for TomlFileSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn ordinal(&self) -> i32 {
        self.inner.ordinal()
    }

    fn property_names(&self) -> Result<Vec<String>, SourceError> {
        self.inner.property_names()
    }

    fn get_value(&self, name: &str) -> Result<Option<String>, SourceError> {
        self.inner.get_value(name)
    }

    fn get_config_value(&self, name: &str) -> Result<Option<ConfigValue>, SourceError> {
        self.inner.get_config_value(name)
    }
}
