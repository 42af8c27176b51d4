// src/document/fields.rs

use crate::error::WallError;
use serde_json::{Map, Value};

/// Receives named primitive fields, independent of the storage medium.
pub trait FieldSink {
    fn put_int(&mut self, name: &str, value: i32);
    fn put_bool(&mut self, name: &str, value: bool);
}

/// Supplies named primitive fields written by a [`FieldSink`].
pub trait FieldSource {
    fn get_int(&self, name: &str) -> Result<i32, WallError>;
    fn get_bool(&self, name: &str) -> Result<bool, WallError>;
}

/// Flat JSON object of exported fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonFields {
    map: Map<String, Value>,
}

impl JsonFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        JsonFields { map }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn field(&self, name: &str) -> Result<&Value, WallError> {
        self.map
            .get(name)
            .ok_or_else(|| WallError::MissingField(name.to_string()))
    }
}

impl FieldSink for JsonFields {
    fn put_int(&mut self, name: &str, value: i32) {
        self.map.insert(name.to_string(), Value::from(value));
    }

    fn put_bool(&mut self, name: &str, value: bool) {
        self.map.insert(name.to_string(), Value::Bool(value));
    }
}

impl FieldSource for JsonFields {
    fn get_int(&self, name: &str) -> Result<i32, WallError> {
        self.field(name)?
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| WallError::FieldType {
                name: name.to_string(),
                expected: "a 32-bit integer",
            })
    }

    fn get_bool(&self, name: &str) -> Result<bool, WallError> {
        self.field(name)?.as_bool().ok_or_else(|| WallError::FieldType {
            name: name.to_string(),
            expected: "a boolean",
        })
    }
}
