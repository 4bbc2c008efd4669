/*!

The `resource-data` library holds the attribute store that provider operations read from and
write back to. An attribute store is a string-keyed map of JSON values belonging to one resource
instance.

Provider code is written against the [`Read`] and [`ReadWrite`] traits so that the same logic can
run against a [`ResourceData`], which commits every value it is given, or against a
[`ResourceDiff`], which only records the values proposed during planning.

!*/

mod data;
mod diff;
pub mod error;

pub use data::{Read, ReadWrite, ResourceData};
pub use diff::ResourceDiff;
pub use error::{DataError, DataResult};
pub use serde_json::Value;
