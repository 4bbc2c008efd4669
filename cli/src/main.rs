/*!

This is the command line interface for reconciling an `eksctl` managed EKS cluster against a
resource state document.

!*/

mod oidc;
mod plan;
mod read;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use eksctl_provider::constants::KEY_ASSUME_ROLE;
use eksctl_provider::{Cluster, Elbv2TargetGroups, Manager, ProcessRunner};
use log::{debug, LevelFilter};
use provider_utils::aws::{aws_config, AwsSettings};
use provider_utils::init_provider_logger;
use resource_data::{Read, ResourceData};
use state::StateFile;
use std::path::PathBuf;

pub(crate) type Provider = Manager<ProcessRunner, Elbv2TargetGroups>;

/// Read, plan or load the OIDC provider of an EKS cluster managed by eksctl.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level")]
    log_level: Option<LevelFilter>,

    /// Path to the resource state document, a JSON object with `id` and `attributes`.
    #[clap(long = "state")]
    state: PathBuf,

    /// Use the declared `name` as the eksctl cluster name instead of `<name>-<id>`.
    #[clap(long = "disable-cluster-name-suffix")]
    disable_cluster_name_suffix: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Refresh the cluster and repair its kubeconfig.
    Read(read::ReadState),
    /// Show the changes a refresh would propose for computed attributes.
    Plan(plan::PlanState),
    /// Record the cluster's OIDC provider URL, ARN and security groups.
    Oidc(oidc::LoadOidc),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_provider_logger(env!("CARGO_CRATE_NAME"), args.log_level);
    if let Err(e) = run(args).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let state = StateFile::load(&args.state)?;
    let settings = aws_settings(state.data())?;
    debug!("Using aws settings {:?}", settings);
    let config = aws_config(&settings).await;
    let provider = Manager::new(ProcessRunner, Elbv2TargetGroups::new(&config))
        .disable_cluster_name_suffix(args.disable_cluster_name_suffix);

    match args.command {
        Command::Read(read) => read.run(provider, state).await,
        Command::Plan(plan) => plan.run(provider, state).await,
        Command::Oidc(oidc) => oidc.run(provider, state).await,
    }
}

/// The AWS settings of a resource. The region and profile are the declared cluster's.
fn aws_settings(data: &ResourceData) -> Result<AwsSettings> {
    let cluster = Cluster::from_resource(data).context("Unable to read cluster from state")?;
    let assume_role = data
        .get_str(KEY_ASSUME_ROLE)
        .with_context(|| format!("Unable to read attribute '{}'", KEY_ASSUME_ROLE))?
        .filter(|role| !role.is_empty())
        .map(ToString::to_string);

    Ok(AwsSettings {
        region: Some(cluster.region).filter(|region| !region.is_empty()),
        profile: cluster.profile,
        assume_role,
    })
}
