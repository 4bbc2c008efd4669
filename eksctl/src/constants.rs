//! Resource attribute keys and defaults.

pub const KEY_NAME: &str = "name";
pub const KEY_REGION: &str = "region";
pub const KEY_PROFILE: &str = "profile";
pub const KEY_ASSUME_ROLE: &str = "assume_role";
pub const KEY_SPEC: &str = "spec";
pub const KEY_EKSCTL_BIN: &str = "eksctl_bin";
pub const KEY_KUBECONFIG_PATH: &str = "kubeconfig_path";
pub const KEY_TARGET_GROUP_ARNS: &str = "target_group_arns";
pub const KEY_AWS_AUTH_CONFIGMAP: &str = "aws_auth_configmap";
pub const KEY_OIDC_PROVIDER_URL: &str = "oidc_provider_url";
pub const KEY_OIDC_PROVIDER_ARN: &str = "oidc_provider_arn";
pub const KEY_SECURITY_GROUP_IDS: &str = "security_group_ids";

/// Attributes whose values are produced by the provider rather than declared.
pub const COMPUTED_KEYS: [&str; 5] = [
    KEY_KUBECONFIG_PATH,
    KEY_TARGET_GROUP_ARNS,
    KEY_OIDC_PROVIDER_URL,
    KEY_OIDC_PROVIDER_ARN,
    KEY_SECURITY_GROUP_IDS,
];

pub const DEFAULT_EKSCTL_BIN: &str = "eksctl";
