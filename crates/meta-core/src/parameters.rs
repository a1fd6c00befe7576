use crate::ordered_map::OrderedMap;
use serde_json::Value;

/// Ordered `{key, value}` sequence where `value` is an arbitrary JSON value.
///
/// Merge is right-biased on key: see [`OrderedMap::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(OrderedMap);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self(OrderedMap::from_pairs(pairs))
    }

    /// Build `Parameters` from a JSON object, in the object's own key order.
    pub fn from_json_object(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self::from_pairs(obj.iter().map(|(k, v)| (k.clone(), v.clone()))))
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter()
    }

    /// Merge `other` on top of `self` (right-biased — `other` wins on key
    /// collision), consuming `other`.
    pub fn merged_with(mut self, other: Parameters) -> Self {
        self.0.merge(other.0);
        self
    }

    pub fn to_json_object(&self) -> Value {
        self.0.to_json_object()
    }
}

impl From<Parameters> for Value {
    fn from(params: Parameters) -> Self {
        params.to_json_object()
    }
}
