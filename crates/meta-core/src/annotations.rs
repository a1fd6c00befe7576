use serde_json::Value;
use std::collections::HashMap;

/// Typed annotation value (design note in `spec.md` §9 — a small closed
/// tagged union over JSON-representable scalars/containers, not an open
/// reflection surface).
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Str(String),
    Num(serde_json::Number),
    Obj(serde_json::Map<String, Value>),
    Arr(Vec<Value>),
    Null,
}

impl AnnotationValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(b) => AnnotationValue::Bool(b),
            Value::String(s) => AnnotationValue::Str(s),
            Value::Number(n) => AnnotationValue::Num(n),
            Value::Object(o) => AnnotationValue::Obj(o),
            Value::Array(a) => AnnotationValue::Arr(a),
            Value::Null => AnnotationValue::Null,
        }
    }
}

/// Annotations: same ordered `{key, value}` shape as [`crate::Parameters`],
/// used for declarative control (`meta=true`, `get="getApi"`, `feed=<name>`)
/// rather than data flow. Last-write-wins on duplicate keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    values: HashMap<String, AnnotationValue>,
    order: Vec<String>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut ann = Self::new();
        for (k, v) in pairs {
            ann.set(k, AnnotationValue::from_json(v));
        }
        ann
    }

    pub fn set(&mut self, key: impl Into<String>, value: AnnotationValue) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }

    pub fn is_truthy_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(AnnotationValue::Bool(true)))
    }

    /// Look up an annotation whose key equals `key` case-sensitively and
    /// whose value is a string — used by `PackageResolver` for per-verb
    /// action mapping (the verb key itself is lower-cased by the caller).
    pub fn string_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AnnotationValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnnotationValue)> {
        self.order.iter().map(move |k| (k.as_str(), &self.values[k]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_true_is_truthy() {
        let ann = Annotations::from_pairs([("meta".into(), json!(true))]);
        assert!(ann.is_truthy_bool("meta"));
    }

    #[test]
    fn meta_false_is_not_truthy() {
        let ann = Annotations::from_pairs([("meta".into(), json!(false))]);
        assert!(!ann.is_truthy_bool("meta"));
    }

    #[test]
    fn string_annotation_lookup() {
        let ann = Annotations::from_pairs([("get".into(), json!("getApi"))]);
        assert_eq!(ann.string_value("get"), Some("getApi"));
        assert_eq!(ann.string_value("post"), None);
    }

    #[test]
    fn non_string_value_does_not_satisfy_string_value() {
        let ann = Annotations::from_pairs([("get".into(), json!(123))]);
        assert_eq!(ann.string_value("get"), None);
    }
}
