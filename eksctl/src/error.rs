use aws_sdk_elasticloadbalancingv2::error::DescribeTargetGroupsError;
use aws_sdk_elasticloadbalancingv2::types::SdkError;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[allow(clippy::large_enum_variant)]
pub enum Error {
    #[snafu(display("Unable to list target groups with prefix '{}': {}", prefix, source))]
    TargetGroups {
        prefix: String,
        source: SdkError<DescribeTargetGroupsError>,
    },

    #[snafu(display("Failed to start '{}': {}", command, source))]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("{}", source))]
    CommandFailed { source: provider_utils::Error },

    #[snafu(display("Unable to parse get-cluster output as json: {}", source))]
    ParseClusterState { source: serde_json::Error },

    #[snafu(display("Unable to parse get-iamidentitymapping output as json: {}", source))]
    ParseIamIdentityMapping { source: serde_json::Error },

    #[snafu(display("Unable to parse '{}' entries: {}", key, source))]
    ParseAwsAuth {
        key: String,
        source: serde_json::Error,
    },

    #[snafu(display("No cluster found: {}", name))]
    ClusterNotFound { name: String },

    #[snafu(display("Unable to read cluster spec: {}", source))]
    ClusterConfig { source: serde_yaml::Error },

    #[snafu(display("Resource attribute '{}' is missing", key))]
    MissingAttribute { key: String },

    #[snafu(display("{}", source))]
    ResourceData { source: resource_data::DataError },

    #[snafu(display("Unable to read cluster: {}", source))]
    ReadCluster {
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },

    #[snafu(display("Unable to write missing kubeconfig at '{}': {}", path, source))]
    WriteKubeconfig {
        path: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },

    #[snafu(display("Unable to read aws-auth via eksctl get iamidentitymapping: {}", source))]
    ReadIamIdentityMapping {
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
