use crate::aws::TargetGroups;
use crate::cluster::Cluster;
use crate::command::{self, Run};
use crate::constants::KEY_KUBECONFIG_PATH;
use crate::error::{self, Result};
use crate::manager::Manager;
use log::{debug, info, warn};
use resource_data::{Read, ReadWrite, ResourceDiff};
use snafu::ResultExt;
use std::io::ErrorKind;
use std::path::Path;

impl<R, T> Manager<R, T>
where
    R: Run,
    T: TargetGroups,
{
    /// Recreate the file at `kubeconfig_path` if it does not exist on this machine, e.g. when the
    /// state was written elsewhere. Returns whether the file was written.
    pub(crate) fn repair_kubeconfig<D>(&self, d: &D, cluster: &Cluster) -> Result<bool>
    where
        D: ReadWrite + ?Sized,
    {
        let path = match d
            .get_str(KEY_KUBECONFIG_PATH)
            .context(error::ResourceDataSnafu)?
        {
            Some(path) if !path.is_empty() => path,
            _ => return Ok(false),
        };

        match Path::new(path).metadata() {
            Ok(_) => {
                debug!("Kubeconfig found at '{}'", path);
                Ok(false)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No kubeconfig file found at {}='{}', recreating it",
                    KEY_KUBECONFIG_PATH, path
                );
                self.write_kubeconfig(d, cluster, path)
                    .context(error::WriteKubeconfigSnafu { path })?;
                Ok(true)
            }
            Err(e) => {
                warn!("Unable to check kubeconfig at '{}': {}", path, e);
                Ok(false)
            }
        }
    }

    /// Plan `kubeconfig_path`. An unset path is left for the apply to compute, a configured path
    /// is repaired like it is on read.
    pub(crate) fn plan_kubeconfig(&self, d: &mut ResourceDiff, cluster: &Cluster) -> Result<()> {
        let unset = d
            .get_str(KEY_KUBECONFIG_PATH)
            .context(error::ResourceDataSnafu)?
            .map_or(true, str::is_empty);
        if unset {
            debug!("'{}' will be computed", KEY_KUBECONFIG_PATH);
            return d
                .set_new_computed(KEY_KUBECONFIG_PATH)
                .context(error::ResourceDataSnafu);
        }
        self.repair_kubeconfig(&*d, cluster)?;
        Ok(())
    }

    fn write_kubeconfig<D>(&self, d: &D, cluster: &Cluster, path: &str) -> Result<()>
    where
        D: ReadWrite + ?Sized,
    {
        let name = self.cluster_name(cluster, d.id());
        let command = command::write_kubeconfig(d, &name, &cluster.region, path)?;
        self.runner().run(&command)?;
        Ok(())
    }
}
