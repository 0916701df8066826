// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::Part;
use std::collections::BTreeMap;

/// The set of loaded parts, keyed by the name they were loaded under.
///
/// Keys are kept sorted so that execution contexts are spawned in a stable
/// order from run to run. Parts are boxed trait objects; each one is moved
/// into its own execution context when the hub spawns.
#[derive(Default)]
pub struct PartMap(pub BTreeMap<String, Box<dyn Part>>);

impl PartMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a part. A part already loaded under the same name is replaced.
    pub fn insert(&mut self, name: String, part: Box<dyn Part>) {
        self.0.insert(name, part);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Part> {
        self.0.get(name).map(|part| part.as_ref())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for PartMap {
    type Item = (String, Box<dyn Part>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Box<dyn Part>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Debug for PartMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartMap")
            .field("part_count", &self.0.len())
            .field("part_names", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl From<BTreeMap<String, Box<dyn Part>>> for PartMap {
    fn from(map: BTreeMap<String, Box<dyn Part>>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::Idle;

    #[test]
    fn test_names_are_sorted_and_unique() {
        let mut map = PartMap::new();
        map.insert("screen".to_string(), Box::new(Idle));
        map.insert("ear".to_string(), Box::new(Idle));
        map.insert("ear".to_string(), Box::new(Idle));

        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["ear", "screen"]);
        assert_eq!(map.get("ear").map(|p| p.kind()), Some("idle"));
        assert!(map.get("mind").is_none());
    }

    #[test]
    fn test_debug_lists_names() {
        let mut map = PartMap::new();
        map.insert("ear".to_string(), Box::new(Idle));
        let rendered = format!("{map:?}");
        assert!(rendered.contains("part_count: 1"));
        assert!(rendered.contains("\"ear\""));
    }
}
