//! Property name canonicalization.
//!
//! Names coming from different sources spell the same property differently
//! (`FOO_BAR` in the environment, `foo-bar` in a file, `foo.bar` in code).
//! [`PropertyName`] folds them onto one canonical form so that equality,
//! hashing and ordering agree at every boundary of the pipeline:
//! source lookup, enumeration, name mapping and secret membership.
//!
//! # Canonical Form
//!
//! - ASCII letters are lowercased
//! - `-` and `_` become `.`
//! - text between double quotes is kept verbatim (quotes included)

mod set;

pub use set::NameSet;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A configuration name compared by its canonical form.
///
/// The original spelling is preserved for display.
#[derive(Debug, Clone)]
pub struct PropertyName {
    name: String,
    canonical: String,
}

impl PropertyName {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let canonical = canonicalize(&name);
        Self { name, canonical }
    }

    /// The name as it was spelled when this value was created.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The folded form used for equality, hashing and ordering.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Strip a leading `%profile.` segment, if any.
    ///
    /// `%prod.db.password` and `db.password` resolve to the same secret.
    pub fn unprofiled(name: &str) -> Self {
        Self::new(strip_profile(name))
    }
}

/// Returns `name` without its `%profile.` prefix.
pub fn strip_profile(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('%')
        && let Some(dot) = rest.find('.')
    {
        return &rest[dot + 1..];
    }
    name
}

/// Canonicalize a name without allocating a [`PropertyName`].
pub fn canonicalize(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut quoted = false;
    for c in name.chars() {
        if c == '"' {
            quoted = !quoted;
            canonical.push(c);
            continue;
        }
        if quoted {
            canonical.push(c);
            continue;
        }
        match c {
            '-' | '_' => canonical.push('.'),
            _ => canonical.push(c.to_ascii_lowercase()),
        }
    }
    canonical
}

impl PartialEq for PropertyName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for PropertyName {}

impl Hash for PropertyName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for PropertyName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PropertyName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for PropertyName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PropertyName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
