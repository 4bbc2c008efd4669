use crate::state::StateFile;
use crate::Provider;
use anyhow::{Context, Result};
use clap::Parser;

/// Load the OIDC provider URL and ARN of a cluster with IAM OIDC enabled, along with its security
/// group ids.
#[derive(Debug, Parser)]
pub(crate) struct LoadOidc {
    /// Write the updated state back to the state file.
    #[clap(long = "write")]
    write: bool,
}

impl LoadOidc {
    pub(crate) async fn run(self, provider: Provider, mut state: StateFile) -> Result<()> {
        let cluster = provider
            .read_cluster_internal(state.data_mut())
            .await
            .context("Unable to read cluster")?;
        provider
            .load_oidc_provider_url_and_arn(state.data_mut(), &cluster)
            .context("Unable to load OIDC provider url and arn")?;
        state.finish(self.write)
    }
}
