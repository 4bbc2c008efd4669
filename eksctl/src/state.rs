use crate::error::{self, Result};
use provider_utils::impl_display_as_json;
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

const ROLE_ARN_PREFIX: &str = "arn:aws:iam::";
const ISSUER_PREFIX: &str = "https://oidc.eks.";

/// A cluster as reported by `eksctl get cluster -o json`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClusterState {
    pub name: String,
    pub identity: Identity,
    pub role_arn: String,
    pub resources_vpc_config: ResourcesVpcConfig,
}

impl_display_as_json!(ClusterState);

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Identity {
    pub oidc: Oidc,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Oidc {
    pub issuer: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourcesVpcConfig {
    pub cluster_security_group_id: Option<String>,
    pub security_group_ids: Vec<String>,
}

impl ClusterState {
    pub fn oidc_provider_url(&self) -> &str {
        &self.identity.oidc.issuer
    }

    pub fn oidc_provider_arn(&self) -> String {
        oidc_provider_arn(&self.role_arn, &self.identity.oidc.issuer)
    }

    pub fn security_group_ids(&self) -> &[String] {
        &self.resources_vpc_config.security_group_ids
    }
}

/// Derive the IAM OIDC provider ARN of a cluster from its service role ARN and OIDC issuer.
///
/// The role ARN looks like
///   `arn:aws:iam::ACCOUNT:role/eksctl-CLUSTERNAME-cluster-ServiceRole-O7YWRVENASZV`
/// and the issuer like
///   `https://oidc.eks.REGION.amazonaws.com/id/ISSUER_ID`
/// which gives
///   `arn:aws:iam::ACCOUNT:oidc-provider/oidc.eks.REGION.amazonaws.com/id/ISSUER_ID`
///
/// Inputs of any other shape produce an ARN of the same template filled with whatever segments
/// were found.
pub fn oidc_provider_arn(role_arn: &str, issuer: &str) -> String {
    let account = role_arn
        .strip_prefix(ROLE_ARN_PREFIX)
        .unwrap_or(role_arn)
        .split(':')
        .next()
        .unwrap_or_default();
    let region = issuer
        .strip_prefix(ISSUER_PREFIX)
        .unwrap_or(issuer)
        .split('.')
        .next()
        .unwrap_or_default();
    let id = issuer.rsplit('/').next().unwrap_or_default();

    format!(
        "arn:aws:iam::{}:oidc-provider/oidc.eks.{}.amazonaws.com/id/{}",
        account, region, id
    )
}

/// Pick the cluster named exactly `name` out of the `get cluster` results.
pub fn select_cluster(states: Vec<ClusterState>, name: &str) -> Result<ClusterState> {
    states
        .into_iter()
        .find(|state| state.name == name)
        .context(error::ClusterNotFoundSnafu { name })
}
