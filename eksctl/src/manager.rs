use crate::aws::TargetGroups;
use crate::cluster::Cluster;
use crate::command::{self, Run};
use crate::constants::{
    KEY_AWS_AUTH_CONFIGMAP, KEY_NAME, KEY_OIDC_PROVIDER_ARN, KEY_OIDC_PROVIDER_URL,
    KEY_SECURITY_GROUP_IDS, KEY_TARGET_GROUP_ARNS,
};
use crate::error::{self, Result};
use crate::iam::{self, IamIdentityMapping};
use crate::state::{self, ClusterState};
use log::{debug, info, warn};
use provider_utils::json_display;
use resource_data::{ReadWrite, ResourceDiff, Value};
use snafu::{OptionExt, ResultExt};

/// Drives the read and plan flows for one provider instance.
///
/// `R` runs `eksctl`, `T` looks up the cluster's load balancer target groups.
pub struct Manager<R, T>
where
    R: Run,
    T: TargetGroups,
{
    runner: R,
    target_groups: T,
    disable_cluster_name_suffix: bool,
}

impl<R, T> Manager<R, T>
where
    R: Run,
    T: TargetGroups,
{
    pub fn new(runner: R, target_groups: T) -> Self {
        Self {
            runner,
            target_groups,
            disable_cluster_name_suffix: false,
        }
    }

    /// Use the declared `name` when writing the kubeconfig instead of `<name>-<id>`.
    pub fn disable_cluster_name_suffix(mut self, disable: bool) -> Self {
        self.disable_cluster_name_suffix = disable;
        self
    }

    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }

    /// The name `utils write-kubeconfig` is given for the cluster.
    pub fn cluster_name(&self, cluster: &Cluster, id: &str) -> String {
        if self.disable_cluster_name_suffix || id.is_empty() {
            cluster.name.clone()
        } else {
            format!("{}-{}", cluster.name, id)
        }
    }

    /// Refresh `target_group_arns` and parse the declared cluster.
    pub async fn read_cluster_internal<D>(&self, d: &mut D) -> Result<Cluster>
    where
        D: ReadWrite + ?Sized,
    {
        let prefix = d
            .get_str(KEY_NAME)
            .context(error::ResourceDataSnafu)?
            .filter(|name| !name.is_empty())
            .context(error::MissingAttributeSnafu { key: KEY_NAME })?
            .to_string();

        let arns = self.target_groups.arns_with_prefix(&prefix).await?;
        let arns = Value::from(arns);
        if let Err(e) = d.set(KEY_TARGET_GROUP_ARNS, arns) {
            warn!(
                "Unable to set resource data value for key '{}': {}",
                KEY_TARGET_GROUP_ARNS, e
            );
        }

        Cluster::from_resource(&*d)
    }

    /// Refresh the cluster, recreate its kubeconfig if the file has gone missing and report drift
    /// in the IAM identity mappings.
    pub async fn read_cluster<D>(&self, d: &mut D) -> Result<Cluster>
    where
        D: ReadWrite + ?Sized,
    {
        let cluster = self
            .read_cluster_internal(d)
            .await
            .context(error::ReadClusterSnafu)?;
        self.repair_kubeconfig(&*d, &cluster)?;
        self.read_iam_identity_mapping(&*d, &cluster)
            .context(error::ReadIamIdentityMappingSnafu)?;
        Ok(cluster)
    }

    /// The plan-time counterpart of [`Manager::read_cluster`].
    pub async fn plan_cluster(&self, d: &mut ResourceDiff) -> Result<()> {
        let cluster = self.read_cluster_internal(d).await?;
        self.plan_kubeconfig(d, &cluster)
    }

    /// Log the difference between the live IAM identity mappings and `aws_auth_configmap`. Does
    /// nothing unless the cluster has IAM OIDC enabled. A difference is not an error.
    pub fn read_iam_identity_mapping<D>(&self, d: &D, cluster: &Cluster) -> Result<()>
    where
        D: ReadWrite + ?Sized,
    {
        if !cluster.iam_with_oidc_enabled()? {
            debug!("IAM OIDC is not enabled for '{}'", cluster.name);
            return Ok(());
        }

        let remote = self.run_get_iam_identity_mapping(d, cluster)?;
        let local = iam::parse_local(
            d.get_list(KEY_AWS_AUTH_CONFIGMAP)
                .context(error::ResourceDataSnafu)?,
        )?;

        let patch = iam::compare(remote, local);
        if patch.0.is_empty() {
            info!("No aws-auth diff found between remote and '{}'", KEY_AWS_AUTH_CONFIGMAP);
        } else {
            info!(
                "aws-auth diff from remote to '{}':\n{}",
                KEY_AWS_AUTH_CONFIGMAP,
                json_display(&patch)
            );
        }
        Ok(())
    }

    /// Record the cluster's OIDC provider URL and ARN and its security groups. Does nothing unless
    /// the cluster has IAM OIDC enabled.
    pub fn load_oidc_provider_url_and_arn<D>(&self, d: &mut D, cluster: &Cluster) -> Result<()>
    where
        D: ReadWrite + ?Sized,
    {
        if !cluster.iam_with_oidc_enabled()? {
            debug!("IAM OIDC is not enabled for '{}'", cluster.name);
            return Ok(());
        }

        let state = self.run_get_cluster(&*d, cluster)?;
        let url = state.oidc_provider_url().to_string();
        let arn = state.oidc_provider_arn();
        info!("OIDC provider of '{}': {} ({})", state.name, url, arn);

        d.set(KEY_OIDC_PROVIDER_URL, Value::from(url))
            .context(error::ResourceDataSnafu)?;
        d.set(KEY_OIDC_PROVIDER_ARN, Value::from(arn))
            .context(error::ResourceDataSnafu)?;
        d.set(
            KEY_SECURITY_GROUP_IDS,
            Value::from(state.security_group_ids().to_vec()),
        )
        .context(error::ResourceDataSnafu)?;
        Ok(())
    }

    fn run_get_cluster<D>(&self, d: &D, cluster: &Cluster) -> Result<ClusterState>
    where
        D: ReadWrite + ?Sized,
    {
        let output = self
            .runner
            .run(&command::get_cluster(d, &cluster.name)?)?;
        let states: Vec<ClusterState> =
            serde_json::from_str(&output).context(error::ParseClusterStateSnafu)?;
        let state = state::select_cluster(states, &cluster.name)?;
        debug!("Cluster state:\n{}", state);
        Ok(state)
    }

    fn run_get_iam_identity_mapping<D>(
        &self,
        d: &D,
        cluster: &Cluster,
    ) -> Result<Vec<IamIdentityMapping>>
    where
        D: ReadWrite + ?Sized,
    {
        let output = self
            .runner
            .run(&command::get_iam_identity_mapping(d, &cluster.name)?)?;
        let mappings = iam::parse_remote(&output)?;
        debug!("Remote IAM identity mappings:\n{}", json_display(&mappings));
        Ok(mappings)
    }
}
