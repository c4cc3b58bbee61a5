//! Case-insensitive skill catalogue keys.
//!
//! Skill names arrive catalogue-exact from the requirements provider and the roster store, but
//! casing is not trusted on either side. Every lookup by skill name goes through [`SkillKey`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Trimmed, lower-cased skill name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillKey(String);

impl SkillKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Map keyed by [`SkillKey`] that accepts raw skill names on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMap<V> {
    entries: BTreeMap<SkillKey, V>,
}

impl<V> Default for SkillMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> SkillMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts under the normalized name, replacing any previous value.
    pub fn insert(&mut self, name: &str, value: V) -> Option<V> {
        self.entries.insert(SkillKey::new(name), value)
    }

    pub(crate) fn insert_if_absent(&mut self, name: &str, value: V) {
        self.entries.entry(SkillKey::new(name)).or_insert(value);
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&SkillKey::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillKey, &V)> {
        self.entries.iter()
    }
}

impl<V> FromIterator<(String, V)> for SkillMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = SkillMap::new();
        for (name, value) in iter {
            map.insert(&name, value);
        }
        map
    }
}
