/*!

IAM identity mappings are the entries of the cluster's `aws-auth` config map. `eksctl` reports
each entry with either a `rolearn` or a `userarn` key, while the declared entries use `iamarn`.
Both spellings are renamed to `iamarn` while deserializing so the two lists have one shape.

!*/

use crate::constants::KEY_AWS_AUTH_CONFIGMAP;
use crate::error::{self, Result};
use json_patch::Patch;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use snafu::ResultExt;
use std::cmp::Ordering;

pub const IAM_ARN_KEY: &str = "iamarn";
const ROLE_ARN_KEY: &str = "rolearn";
const USER_ARN_KEY: &str = "userarn";

/// One `aws-auth` entry, keyed by `iamarn`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IamIdentityMapping(Map<String, Value>);

impl IamIdentityMapping {
    /// Rename `rolearn` and `userarn` keys to `iamarn`. Values are never touched.
    pub fn normalized(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(key, value)| match key.as_str() {
                    ROLE_ARN_KEY | USER_ARN_KEY => (IAM_ARN_KEY.to_string(), value),
                    _ => (key, value),
                })
                .collect(),
        )
    }

    /// The principal ARN, or an empty string when the entry has none.
    pub fn iam_arn(&self) -> &str {
        self.0
            .get(IAM_ARN_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn cmp_for_diff(&self, other: &Self) -> Ordering {
        self.iam_arn().cmp(other.iam_arn()).then_with(|| {
            // Ties are broken by full content.
            Value::Object(self.0.clone())
                .to_string()
                .cmp(&Value::Object(other.0.clone()).to_string())
        })
    }
}

impl<'de> Deserialize<'de> for IamIdentityMapping {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(Self::normalized)
    }
}

/// Parse the output of `eksctl get iamidentitymapping -o json`.
pub fn parse_remote(output: &str) -> Result<Vec<IamIdentityMapping>> {
    serde_json::from_str(output).context(error::ParseIamIdentityMappingSnafu)
}

/// Parse the declared `aws_auth_configmap` entries.
pub fn parse_local(values: &[Value]) -> Result<Vec<IamIdentityMapping>> {
    values
        .iter()
        .map(|value| {
            serde_json::from_value(value.clone()).context(error::ParseAwsAuthSnafu {
                key: KEY_AWS_AUTH_CONFIGMAP,
            })
        })
        .collect()
}

/// Sort ascending by `iamarn`.
pub fn sort(mappings: &mut [IamIdentityMapping]) {
    mappings.sort_by(IamIdentityMapping::cmp_for_diff);
}

/// Sort both lists and compute the structural diff that turns `remote` into `local`. An empty
/// patch means the lists agree.
pub fn compare(
    mut remote: Vec<IamIdentityMapping>,
    mut local: Vec<IamIdentityMapping>,
) -> Patch {
    sort(&mut remote);
    sort(&mut local);
    json_patch::diff(&to_value(&remote), &to_value(&local))
}

fn to_value(mappings: &[IamIdentityMapping]) -> Value {
    Value::Array(
        mappings
            .iter()
            .map(|mapping| Value::Object(mapping.0.clone()))
            .collect(),
    )
}
