use anyhow::{anyhow, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// A single scalar cell of a record
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Stringified form used for labels and group keys.
    /// `None` for null and empty text, which callers replace with a placeholder.
    pub fn to_label(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) if s.is_empty() => None,
            other => Some(other.to_string()),
        }
    }

    /// Truthiness as used by the year-pivot detection
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Null => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
        }
    }
}

/// One row of input data. Field declaration order is preserved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces the value if the field already exists
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Number(n as f64) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Number(n as f64) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Ordered sequence of records, assumed schema-homogeneous
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The representative record used for schema inference
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Create a Dataset from parsed CSV, keeping the column order of the header row
    pub fn from_csv(csv: crate::csv_reader::CsvData) -> Self {
        let records = csv
            .rows
            .into_iter()
            .map(|row| Record {
                fields: csv.headers.iter().cloned().zip(row).collect(),
            })
            .collect();
        Self { records }
    }

    /// Create a Dataset from a JSON Array of Objects
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let array = value.as_array().ok_or_else(||
            anyhow!("Input data must be a JSON array of objects")
        )?;

        let mut records = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            let obj = item.as_object().ok_or_else(||
                anyhow!("Item {} in array must be an object", idx + 1)
            )?;

            let mut record = Record::new();
            for (key, val) in obj {
                let value = match val {
                    JsonValue::String(s) => Value::Text(s.clone()),
                    JsonValue::Number(n) => n
                        .as_f64()
                        .map(Value::Number)
                        .ok_or_else(|| anyhow!("Number out of range for field '{}'", key))?,
                    JsonValue::Bool(b) => Value::Bool(*b),
                    JsonValue::Null => Value::Null,
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", key)),
                };
                record.insert(key.clone(), value);
            }
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json(&value)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}
