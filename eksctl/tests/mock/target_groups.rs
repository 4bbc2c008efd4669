use aws_sdk_elasticloadbalancingv2::types::SdkError;
use eksctl_provider::{Error, TargetGroups};

/// Serves target groups from a fixed list of `(name, arn)` pairs, or fails every lookup.
#[derive(Debug, Default)]
pub(crate) struct MockTargetGroups {
    groups: Vec<(String, String)>,
    fail: bool,
}

impl MockTargetGroups {
    pub(crate) fn new<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|(name, arn)| (name.to_string(), arn.to_string()))
                .collect(),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            groups: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl TargetGroups for MockTargetGroups {
    async fn arns_with_prefix(&self, prefix: &str) -> Result<Vec<String>, Error> {
        if self.fail {
            return Err(Error::TargetGroups {
                prefix: prefix.to_string(),
                source: SdkError::construction_failure("AccessDenied"),
            });
        }
        Ok(self
            .groups
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(_, arn)| arn.clone())
            .collect())
    }
}
