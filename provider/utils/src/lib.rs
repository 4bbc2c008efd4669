/*!

`provider-utils` is a collection of functions shared by the provider crates.
`aws` builds the AWS SDK configuration a resource's region and profile settings call for.

!*/

use constants::DEFAULT_PROVIDER_LEVEL_FILTER;
use env_logger::Builder;
pub use error::Error;
use log::LevelFilter;
use serde::Serialize;
use std::env;
use std::iter;
use std::process::Output;

pub mod aws;
pub mod constants;
mod error;

/// Our library crates. They log at the requested level alongside the binary's own crate.
const PROVIDER_CRATES: [&str; 3] = ["eksctl_provider", "provider_utils", "resource_data"];

/// Initialize `env_logger`. `RUST_LOG` wins when it is set. Otherwise `bin_crate` and the provider
/// crates log at `log_level` (or `DEFAULT_PROVIDER_LEVEL_FILTER`) and everything else, the AWS SDK
/// included, only logs errors.
pub fn init_provider_logger(bin_crate: &str, log_level: Option<LevelFilter>) {
    let mut builder = Builder::new();
    if env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
        builder.parse_default_env();
    } else {
        let level = log_level.unwrap_or(DEFAULT_PROVIDER_LEVEL_FILTER);
        builder.filter_level(LevelFilter::Error);
        for module in iter::once(bin_crate).chain(PROVIDER_CRATES) {
            builder.filter_module(module, level);
        }
    }
    builder.init();
}

/// Pretty JSON for log messages. Serialization failures are rendered in place of the value.
pub fn json_display<T: Serialize + ?Sized>(object: &T) -> String {
    serde_json::to_string_pretty(object)
        .unwrap_or_else(|e| format!("Serialization failed: {}", e))
}

/// Implement `Display` for a `Serialize` type in terms of [`json_display`].
#[macro_export]
macro_rules! impl_display_as_json {
    ($i:ident) => {
        impl std::fmt::Display for $i {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::json_display(self))
            }
        }
    };
}

/// If the command was successful (exit code zero), returns the command's `stdout`. Otherwise
/// returns an error carrying the exit code and both output streams.
/// - `output`: the `Output` object from a `std::process::Command`
/// - `hint`: the command that was executed, e.g. `eksctl get cluster --name foo`
pub fn cmd_output(output: Output, hint: &str) -> error::Result<String> {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if output.status.success() {
        Ok(stdout)
    } else {
        error::CommandFailedSnafu {
            hint,
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr),
            stdout,
        }
        .fail()
    }
}
