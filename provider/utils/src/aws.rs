use crate::constants::{
    ASSUME_ROLE_SESSION_NAME, DEFAULT_ASSUME_ROLE_SESSION_DURATION, DEFAULT_REGION,
};
use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::sts::AssumeRoleProvider;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_smithy_types::retry::{RetryConfig, RetryMode};
use aws_types::region::Region;
use aws_types::SdkConfig;
use log::info;
use std::time::Duration;

/// The settings a resource may carry to influence how AWS calls are made on its behalf.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub assume_role: Option<String>,
}

/// Set up the config for aws calls using the named `profile` if provided and `sts::assume_role`
/// if a role arn is provided.
pub async fn aws_config(settings: &AwsSettings) -> SdkConfig {
    let region = settings
        .region
        .as_deref()
        .filter(|region| !region.is_empty())
        .unwrap_or(DEFAULT_REGION)
        .to_string();
    info!(
        "Creating a custom region provider for '{}' to be used in the aws config.",
        region
    );

    let config_loader = aws_config::from_env().retry_config(
        RetryConfig::standard()
            .with_retry_mode(RetryMode::Adaptive)
            .with_max_attempts(15),
    );

    let mut chain = DefaultCredentialsChain::builder().region(Region::new(region.clone()));
    if let Some(profile) = settings.profile.as_deref().filter(|p| !p.is_empty()) {
        info!("Using AWS profile '{}'.", profile);
        chain = chain.profile_name(profile);
    }
    let base_provider = SharedCredentialsProvider::new(chain.build().await);

    let config_loader = match &settings.assume_role {
        Some(role_arn) => {
            info!("Assuming role '{}' for aws calls.", role_arn);
            config_loader.credentials_provider(SharedCredentialsProvider::new(
                AssumeRoleProvider::builder(role_arn)
                    .region(Region::new(region.clone()))
                    .session_name(ASSUME_ROLE_SESSION_NAME)
                    .session_length(Duration::from_secs(DEFAULT_ASSUME_ROLE_SESSION_DURATION))
                    .build(base_provider.clone()),
            ))
        }
        None => config_loader.credentials_provider(base_provider),
    };

    config_loader.region(Region::new(region)).load().await
}
