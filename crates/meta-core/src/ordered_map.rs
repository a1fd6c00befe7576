use serde_json::Value;

/// An insertion-ordered `key -> value` sequence with right-biased merge.
///
/// Used for both [`crate::Parameters`] and [`crate::Annotations`]: the wire
/// shape in the source systems is a `Vec<{key, value}>`, not a `HashMap`, and
/// callers rely on a stable iteration order (canonical JSON serialization of
/// a merged payload must be byte-identical across repeated merges of the
/// same inputs). A plain `Vec` with a linear `position` scan is the simplest
/// thing that gives both properties without pulling in an extra dependency —
/// packages carry at most a handful of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedMap {
    entries: Vec<(String, Value)>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut map = Self::new();
        for (k, v) in pairs {
            map.set(k, v);
        }
        map
    }

    /// Insert or overwrite `key`. If `key` already exists, its value is
    /// replaced in place (position preserved); otherwise it is appended.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Merge `other` into `self`, right-biased: keys in `other` override
    /// keys already present in `self`, new keys are appended in `other`'s
    /// order. Consumes `other`.
    pub fn merge(&mut self, other: OrderedMap) {
        for (k, v) in other.entries {
            self.set(k, v);
        }
    }

    /// Build a `serde_json::Value::Object` preserving insertion order
    /// (serde_json's `Map` is a `BTreeMap` unless the `preserve_order`
    /// feature is enabled; we build a `Map` via `FromIterator` over pairs in
    /// our own order, which `serde_json` preserves for the `indexmap`-backed
    /// default-feature-enabled case and degrades gracefully otherwise).
    pub fn to_json_object(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .cloned()
            .collect();
        Value::Object(map)
    }
}

impl From<OrderedMap> for Value {
    fn from(map: OrderedMap) -> Self {
        map.to_json_object()
    }
}

impl IntoIterator for OrderedMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Value)> for OrderedMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
