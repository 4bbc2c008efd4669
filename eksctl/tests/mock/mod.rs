/*!

Mock implementations of `Run` and `TargetGroups` so that the `Manager` flows can be tested
without `eksctl` or AWS.

!*/

pub(crate) mod runner;
pub(crate) mod target_groups;

pub(crate) use runner::MockRunner;
pub(crate) use target_groups::MockTargetGroups;

pub(crate) const SPEC_WITH_OIDC: &str = r#"
apiVersion: eksctl.io/v1alpha5
kind: ClusterConfig
metadata:
  name: red
  region: us-east-1
iam:
  withOIDC: true
"#;

pub(crate) const SPEC_WITHOUT_OIDC: &str = r#"
apiVersion: eksctl.io/v1alpha5
kind: ClusterConfig
metadata:
  name: red
  region: us-east-1
"#;

/// `eksctl get cluster` output with a decoy whose name shares a prefix with `red`.
pub(crate) const GET_CLUSTER: &str = r#"[
  {
    "Name": "red-staging",
    "RoleArn": "arn:aws:iam::9999:role/eksctl-red-staging-cluster-ServiceRole-AAAA",
    "Identity": {"Oidc": {"Issuer": "https://oidc.eks.us-east-1.amazonaws.com/id/DECOY"}},
    "ResourcesVpcConfig": {"SecurityGroupIds": ["sg-9"]}
  },
  {
    "Name": "red",
    "RoleArn": "arn:aws:iam::1234:role/eksctl-red-cluster-ServiceRole-O7YWRVENASZV",
    "Identity": {"Oidc": {"Issuer": "https://oidc.eks.us-east-1.amazonaws.com/id/ABC123"}},
    "ResourcesVpcConfig": {"ClusterSecurityGroupId": "sg-0", "SecurityGroupIds": ["sg-1"]}
  }
]"#;

pub(crate) const GET_IAM_IDENTITY_MAPPING: &str = r#"[
  {"rolearn": "arn:aws:iam::1234:role/nodes", "username": "system:node:{{EC2PrivateDNSName}}", "groups": ["system:bootstrappers", "system:nodes"]},
  {"userarn": "arn:aws:iam::1234:user/admin", "username": "admin", "groups": ["system:masters"]}
]"#;
