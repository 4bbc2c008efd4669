use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The result type returned by [`Read`] and [`ReadWrite`] implementations.
pub type DataResult<T> = std::result::Result<T, DataError>;

/// The error type returned by [`Read`] and [`ReadWrite`] implementations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DataError {
    /// An attribute held a value of a different JSON type than the caller asked for.
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A plan tried to propose a value for an attribute that is not computed.
    NotComputed { key: String },
}

impl DataError {
    pub(crate) fn wrong_type<S>(key: S, expected: &'static str, found: &Value) -> Self
    where
        S: Into<String>,
    {
        DataError::WrongType {
            key: key.into(),
            expected,
            found: json_type_name(found),
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            DataError::WrongType { .. } => "Wrong attribute type",
            DataError::NotComputed { .. } => "Attribute is not computed",
        }
    }
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::WrongType {
                key,
                expected,
                found,
            } => write!(
                f,
                "{}: '{}' should be {} but is {}",
                self.variant_name(),
                key,
                expected,
                found
            ),
            DataError::NotComputed { key } => write!(
                f,
                "{}: a new value for '{}' cannot be set during plan",
                self.variant_name(),
                key
            ),
        }
    }
}

impl Error for DataError {}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
