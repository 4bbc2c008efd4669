use crate::error::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Read access to the attributes of a resource.
///
/// An attribute that was never set and an attribute explicitly set to `null` are both reported as
/// absent by the typed accessors.
pub trait Read {
    /// Get the raw value of an attribute. `None` if the attribute is unknown or unset.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Get a string attribute.
    fn get_str(&self, key: &str) -> DataResult<Option<&str>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(DataError::wrong_type(key, "a string", other)),
        }
    }

    /// Get a list (or set) attribute. An absent attribute is an empty list.
    fn get_list(&self, key: &str) -> DataResult<&[Value]> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(values)) => Ok(values.as_slice()),
            Some(other) => Err(DataError::wrong_type(key, "a list", other)),
        }
    }
}

/// Read and write access to the attributes of a resource along with the resource's identity.
pub trait ReadWrite: Read {
    /// The id of the resource instance. Empty if the resource has not been created yet.
    fn id(&self) -> &str;

    /// Set (overwrite) the value of an attribute.
    fn set(&mut self, key: &str, value: Value) -> DataResult<()>;
}

/// The committing attribute store. Every value passed to [`ReadWrite::set`] becomes part of the
/// resource's state.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style helper for populating attributes.
    pub fn with<S, V>(mut self, key: S, value: V) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }
}

impl Read for ResourceData {
    fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl ReadWrite for ResourceData {
    fn id(&self) -> &str {
        &self.id
    }

    fn set(&mut self, key: &str, value: Value) -> DataResult<()> {
        self.attributes.insert(key.to_string(), value);
        Ok(())
    }
}
