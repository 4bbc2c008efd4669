use crate::data::{Read, ReadWrite, ResourceData};
use crate::error::{DataError, DataResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// The plan-time attribute store. It reads through to the prior state of the resource, but values
/// written to it are only proposals: they are recorded with [`ResourceDiff::set_new`] and
/// [`ResourceDiff::set_new_computed`] and never touch the prior state.
///
/// Only attributes declared as computed when the diff is created can receive new values.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResourceDiff {
    id: String,
    #[serde(skip)]
    prior: BTreeMap<String, Value>,
    #[serde(skip)]
    computed: BTreeSet<String>,
    planned: BTreeMap<String, Value>,
    unknown: BTreeSet<String>,
}

impl ResourceDiff {
    /// Start a plan from the prior state in `data`. `computed` names the attributes whose values
    /// the provider is allowed to propose.
    pub fn new<I, S>(data: &ResourceData, computed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: data.id().to_string(),
            prior: data.attributes().clone(),
            computed: computed.into_iter().map(Into::into).collect(),
            planned: BTreeMap::new(),
            unknown: BTreeSet::new(),
        }
    }

    /// Propose a new value for a computed attribute.
    pub fn set_new(&mut self, key: &str, value: Value) -> DataResult<()> {
        self.ensure_computed(key)?;
        self.unknown.remove(key);
        self.planned.insert(key.to_string(), value);
        Ok(())
    }

    /// Mark a computed attribute as known only after apply.
    pub fn set_new_computed(&mut self, key: &str) -> DataResult<()> {
        self.ensure_computed(key)?;
        self.planned.remove(key);
        self.unknown.insert(key.to_string());
        Ok(())
    }

    /// The values proposed so far.
    pub fn planned(&self) -> &BTreeMap<String, Value> {
        &self.planned
    }

    /// Whether `key` was marked as known only after apply.
    pub fn is_new_computed(&self, key: &str) -> bool {
        self.unknown.contains(key)
    }

    /// Whether the plan changes `key` from its prior value.
    pub fn has_change(&self, key: &str) -> bool {
        self.unknown.contains(key)
            || self
                .planned
                .get(key)
                .map_or(false, |value| self.prior.get(key) != Some(value))
    }

    fn ensure_computed(&self, key: &str) -> DataResult<()> {
        if self.computed.contains(key) {
            Ok(())
        } else {
            Err(DataError::NotComputed {
                key: key.to_string(),
            })
        }
    }
}

impl Read for ResourceDiff {
    fn get(&self, key: &str) -> Option<&Value> {
        if self.unknown.contains(key) {
            return None;
        }
        self.planned.get(key).or_else(|| self.prior.get(key))
    }
}

impl ReadWrite for ResourceDiff {
    fn id(&self) -> &str {
        &self.id
    }

    fn set(&mut self, key: &str, value: Value) -> DataResult<()> {
        self.set_new(key, value)
    }
}
