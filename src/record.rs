use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single extracted field value: text, number, or null.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Null,
}

impl Value {
    /// Non-empty text rendering, used when composing template strings.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Text(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Number(n) => {
                n.as_f64().map(Value::Number).unwrap_or(Value::Null)
            }
            serde_json::Value::Bool(b) => Value::Text(b.to_string()),
            _ => Value::Null,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(n) => {
                // Whole numbers serialize without a trailing .0
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::Null => serializer.serialize_none(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Flat field-name → value mapping with a fixed, declaration-ordered shape.
/// Assemblers push every declared field exactly once, so two runs over the
/// same document produce identical output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Record { entries: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Record { entries: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
