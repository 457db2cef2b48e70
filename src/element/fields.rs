use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Value of a tagged optional field, or of a required field when
/// looked up by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Char(char),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    Json(serde_json::Value),
}

/// Optional fields of an element, keyed by tag name.
pub type OptionalFields = BTreeMap<String, FieldValue>;

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::Char(c)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join<T: std::fmt::Display>(xs: &[T]) -> String {
            xs.iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(",")
        }

        match self {
            FieldValue::Char(c) => write!(f, "{}", c),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Bytes(bs) => {
                for b in bs {
                    write!(f, "{:02X}", b)?;
                }
                Ok(())
            }
            FieldValue::IntArray(xs) => write!(f, "{}", join(xs)),
            FieldValue::FloatArray(xs) => write!(f, "{}", join(xs)),
            FieldValue::Json(v) => write!(f, "{}", v),
        }
    }
}

/// Rejects optional fields that would hide one of the element's
/// required fields when looked up by name.
pub(crate) fn check_reserved(
    fields: &OptionalFields,
    reserved: &[&str],
) -> Result<(), ValidationError> {
    match fields.keys().find(|k| reserved.contains(&k.as_str())) {
        Some(name) => Err(ValidationError::ReservedField(name.clone())),
        None => Ok(()),
    }
}
