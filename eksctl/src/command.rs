use crate::constants::{DEFAULT_EKSCTL_BIN, KEY_EKSCTL_BIN, KEY_PROFILE, KEY_REGION};
use crate::error::{self, Result};
use log::trace;
use resource_data::Read;
use snafu::ResultExt;
use std::fmt::{Display, Formatter};
use std::process::Command;

/// A single `eksctl` invocation: the binary to run and its arguments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EksctlCommand {
    bin: String,
    args: Vec<String>,
}

impl EksctlCommand {
    pub fn new<S: Into<String>>(bin: S) -> Self {
        Self {
            bin: bin.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// The first two arguments, e.g. `get cluster` or `utils write-kubeconfig`.
    pub fn subcommand(&self) -> String {
        self.args
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for EksctlCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bin)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Something that can execute an [`EksctlCommand`] and hand back its standard output.
///
/// A spawn failure or a non-zero exit code is an error.
pub trait Run {
    fn run(&self, command: &EksctlCommand) -> Result<String>;
}

/// Runs commands as child processes of the provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl Run for ProcessRunner {
    fn run(&self, command: &EksctlCommand) -> Result<String> {
        trace!("Calling '{}'", command);
        let output = Command::new(command.bin())
            .args(command.get_args())
            .output()
            .context(error::CommandSpawnSnafu {
                command: command.to_string(),
            })?;
        trace!("'{}' has completed", command);
        provider_utils::cmd_output(output, &command.to_string()).context(error::CommandFailedSnafu)
    }
}

/// Start an `eksctl` command for the resource in `d`, appending `--region` and `--profile` when
/// the resource sets them. The binary defaults to `eksctl` unless `eksctl_bin` is set.
pub fn eksctl_command_with_region_and_profile<R>(d: &R, args: &[&str]) -> Result<EksctlCommand>
where
    R: Read + ?Sized,
{
    let region = d.get_str(KEY_REGION).context(error::ResourceDataSnafu)?;
    eksctl_command_with_profile(d, args, region)
}

fn eksctl_command_with_profile<R>(
    d: &R,
    args: &[&str],
    region: Option<&str>,
) -> Result<EksctlCommand>
where
    R: Read + ?Sized,
{
    let bin = d
        .get_str(KEY_EKSCTL_BIN)
        .context(error::ResourceDataSnafu)?
        .filter(|bin| !bin.is_empty())
        .unwrap_or(DEFAULT_EKSCTL_BIN);
    let mut command = EksctlCommand::new(bin).args(args.iter().copied());
    if let Some(region) = region.filter(|region| !region.is_empty()) {
        command = command.args(["--region", region]);
    }
    if let Some(profile) = d
        .get_str(KEY_PROFILE)
        .context(error::ResourceDataSnafu)?
        .filter(|profile| !profile.is_empty())
    {
        command = command.args(["--profile", profile]);
    }
    Ok(command)
}

/// `eksctl get cluster --name <name> -o json`
pub fn get_cluster<R>(d: &R, cluster_name: &str) -> Result<EksctlCommand>
where
    R: Read + ?Sized,
{
    eksctl_command_with_region_and_profile(
        d,
        &["get", "cluster", "--name", cluster_name, "-o", "json"],
    )
}

/// `eksctl get iamidentitymapping --cluster <name> -o json`
pub fn get_iam_identity_mapping<R>(d: &R, cluster_name: &str) -> Result<EksctlCommand>
where
    R: Read + ?Sized,
{
    eksctl_command_with_region_and_profile(
        d,
        &[
            "get",
            "iamidentitymapping",
            "--cluster",
            cluster_name,
            "-o",
            "json",
        ],
    )
}

/// `eksctl utils write-kubeconfig --cluster <name> --kubeconfig <path>`. The region is the
/// cluster's resolved region rather than the raw attribute.
pub fn write_kubeconfig<R>(
    d: &R,
    cluster_name: &str,
    region: &str,
    kubeconfig_path: &str,
) -> Result<EksctlCommand>
where
    R: Read + ?Sized,
{
    eksctl_command_with_profile(
        d,
        &[
            "utils",
            "write-kubeconfig",
            "--cluster",
            cluster_name,
            "--kubeconfig",
            kubeconfig_path,
        ],
        Some(region),
    )
}
