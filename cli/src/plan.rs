use crate::state::StateFile;
use crate::Provider;
use anyhow::{Context, Result};
use clap::Parser;
use eksctl_provider::constants::COMPUTED_KEYS;
use resource_data::ResourceDiff;

/// Plan the cluster's computed attributes without changing the state file.
#[derive(Debug, Parser)]
pub(crate) struct PlanState {}

impl PlanState {
    pub(crate) async fn run(self, provider: Provider, state: StateFile) -> Result<()> {
        let mut diff = ResourceDiff::new(state.data(), COMPUTED_KEYS);
        provider
            .plan_cluster(&mut diff)
            .await
            .context("Unable to plan cluster")?;
        println!(
            "{}",
            serde_json::to_string_pretty(&diff).context("Could not create string from plan.")?
        );
        Ok(())
    }
}
