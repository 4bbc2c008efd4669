use crate::state::StateFile;
use crate::Provider;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;

/// Refresh the cluster's computed attributes, recreate a missing kubeconfig and report drift in
/// the cluster's IAM identity mappings.
#[derive(Debug, Parser)]
pub(crate) struct ReadState {
    /// Write the refreshed state back to the state file.
    #[clap(long = "write")]
    write: bool,
}

impl ReadState {
    pub(crate) async fn run(self, provider: Provider, mut state: StateFile) -> Result<()> {
        let cluster = provider
            .read_cluster(state.data_mut())
            .await
            .context("Unable to read cluster")?;
        info!("Read cluster '{}'", cluster.name);
        state.finish(self.write)
    }
}
