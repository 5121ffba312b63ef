//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for node identifiers. Ids are
//! `Copy`, cheap to hash and compare, and resolve back to their original name
//! through a process-wide interner.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a flow node.
///
/// # Examples
///
/// ```
/// use flowdoc_core::identifier::Id;
///
/// let id = Id::new("check_git");
/// assert_eq!(id, "check_git");
/// assert_eq!(id.to_string(), "check_git");
/// assert_eq!(Id::new("check_git"), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str, interning the name if it is new.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns the interned name as an owned string.
    pub fn name(self) -> String {
        interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("parse_args"), Id::new("parse_args"));
        assert_ne!(Id::new("parse_args"), Id::new("inject_env"));
    }

    #[test]
    fn test_display_resolves_name() {
        let id = Id::new("render_title");
        assert_eq!(format!("{id}"), "render_title");
    }

    #[test]
    fn test_str_comparison() {
        let id: Id = "open_ide".into();
        assert!(id == "open_ide");
        assert!(id != "success");
    }
}
