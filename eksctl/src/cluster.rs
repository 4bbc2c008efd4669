use crate::constants::{KEY_NAME, KEY_PROFILE, KEY_REGION, KEY_SPEC};
use crate::error::{self, Result};
use provider_utils::impl_display_as_json;
use resource_data::Read;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};

/// The declared configuration of a cluster as read from the resource attributes.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// The declared cluster name. Also the prefix of the cluster's target group names.
    pub name: String,

    /// The region from the `region` attribute, or else from the spec's `metadata.region`.
    pub region: String,

    /// The AWS profile eksctl and the AWS SDK should use.
    pub profile: Option<String>,

    /// The eksctl `ClusterConfig` YAML body.
    pub spec: String,
}

impl_display_as_json!(Cluster);

impl Cluster {
    /// Parse the cluster out of the resource attributes. Fails if `name` is missing or `spec` is
    /// not valid YAML.
    pub fn from_resource<R>(d: &R) -> Result<Self>
    where
        R: Read + ?Sized,
    {
        let name = d
            .get_str(KEY_NAME)
            .context(error::ResourceDataSnafu)?
            .filter(|name| !name.is_empty())
            .context(error::MissingAttributeSnafu { key: KEY_NAME })?
            .to_string();
        let spec = d
            .get_str(KEY_SPEC)
            .context(error::ResourceDataSnafu)?
            .unwrap_or_default()
            .to_string();
        let config = ClusterConfig::parse(&spec)?;
        let region = d
            .get_str(KEY_REGION)
            .context(error::ResourceDataSnafu)?
            .filter(|region| !region.is_empty())
            .map(ToString::to_string)
            .or(config.metadata.region)
            .unwrap_or_default();
        let profile = d
            .get_str(KEY_PROFILE)
            .context(error::ResourceDataSnafu)?
            .filter(|profile| !profile.is_empty())
            .map(ToString::to_string);

        Ok(Self {
            name,
            region,
            profile,
            spec,
        })
    }

    pub fn config(&self) -> Result<ClusterConfig> {
        ClusterConfig::parse(&self.spec)
    }

    /// Whether the spec sets `iam.withOIDC: true`. An unset value is `false`.
    pub fn iam_with_oidc_enabled(&self) -> Result<bool> {
        Ok(self.config()?.iam.with_oidc.unwrap_or(false))
    }
}

/// The parts of an eksctl `ClusterConfig` document the provider looks at.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct ClusterConfig {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub iam: Iam,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct Metadata {
    pub region: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct Iam {
    #[serde(rename = "withOIDC")]
    pub with_oidc: Option<bool>,
}

impl ClusterConfig {
    /// An empty spec is an empty config.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(spec).context(error::ClusterConfigSnafu)
    }
}
