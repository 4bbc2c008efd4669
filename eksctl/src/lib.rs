/*!

`eksctl-provider` reconciles an EKS cluster managed with the `eksctl` command line tool into a
resource attribute store.

A [`Manager`] owns the two external collaborators, something that can [`Run`] `eksctl` and
something that can look up [`TargetGroups`], and implements the read and plan flows:

- [`Manager::read_cluster`] refreshes the cluster from AWS, recreates a kubeconfig file that has
  gone missing locally and reports drift between the declared and live IAM identity mappings.
- [`Manager::plan_cluster`] runs the same refresh against a [`resource_data::ResourceDiff`].
- [`Manager::load_oidc_provider_url_and_arn`] records the cluster's OIDC provider and security
  groups.

!*/

pub mod aws;
pub mod cluster;
pub mod command;
pub mod constants;
pub mod error;
pub mod iam;
mod kubeconfig;
mod manager;
pub mod state;

pub use aws::{Elbv2TargetGroups, TargetGroups};
pub use cluster::Cluster;
pub use command::{EksctlCommand, ProcessRunner, Run};
pub use error::{Error, Result};
pub use manager::Manager;
