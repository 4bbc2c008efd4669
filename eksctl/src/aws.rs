use crate::error::{self, Result};
use aws_sdk_elasticloadbalancingv2::model::TargetGroup;
use aws_types::SdkConfig;
use log::{debug, trace};
use snafu::ResultExt;

/// Looks up the ARNs of the load balancer target groups that belong to a cluster.
///
/// This is provided as a trait so that the AWS dependency is handed to the
/// [`Manager`](crate::Manager) explicitly and mock implementations can be used in tests.
#[async_trait::async_trait]
pub trait TargetGroups: Send + Sync {
    /// The ARNs of all target groups whose name starts with `prefix`.
    async fn arns_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}

/// The [`TargetGroups`] implementation backed by the ELBv2 `DescribeTargetGroups` API.
#[derive(Clone, Debug)]
pub struct Elbv2TargetGroups {
    client: aws_sdk_elasticloadbalancingv2::Client,
}

impl Elbv2TargetGroups {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_elasticloadbalancingv2::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl TargetGroups for Elbv2TargetGroups {
    async fn arns_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let output = self
                .client
                .describe_target_groups()
                .set_marker(marker.take())
                .send()
                .await
                .context(error::TargetGroupsSnafu { prefix })?;
            let page = output.target_groups().unwrap_or_default();
            trace!("Received a page of {} target groups", page.len());
            arns.extend(arns_with_prefix(page, prefix));

            match output.next_marker() {
                Some(next) => marker = Some(next.to_string()),
                None => break,
            }
        }
        debug!("Target groups with prefix '{}': {:?}", prefix, arns);
        Ok(arns)
    }
}

fn arns_with_prefix(target_groups: &[TargetGroup], prefix: &str) -> Vec<String> {
    target_groups
        .iter()
        .filter(|tg| {
            tg.target_group_name()
                .map_or(false, |name| name.starts_with(prefix))
        })
        .filter_map(|tg| tg.target_group_arn())
        .map(ToString::to_string)
        .collect()
}

#[test]
fn filters_target_groups_by_name_prefix() {
    let groups = vec![
        TargetGroup::builder()
            .target_group_name("red-ingress")
            .target_group_arn("arn:tg/red-ingress")
            .build(),
        TargetGroup::builder()
            .target_group_name("blue-ingress")
            .target_group_arn("arn:tg/blue-ingress")
            .build(),
        TargetGroup::builder().target_group_name("red-no-arn").build(),
        TargetGroup::builder()
            .target_group_arn("arn:tg/unnamed")
            .build(),
    ];
    assert_eq!(
        arns_with_prefix(&groups, "red"),
        vec!["arn:tg/red-ingress".to_string()]
    );
}
