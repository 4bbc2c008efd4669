pub(crate) mod mock;

use eksctl_provider::constants::COMPUTED_KEYS;
use eksctl_provider::{Error, Manager};
use mock::{
    MockRunner, MockTargetGroups, GET_CLUSTER, GET_IAM_IDENTITY_MAPPING, SPEC_WITHOUT_OIDC,
    SPEC_WITH_OIDC,
};
use resource_data::{Read, ResourceData, ResourceDiff};
use serde_json::json;
use std::path::Path;

fn red(spec: &str) -> ResourceData {
    ResourceData::new("abc")
        .with("name", "red")
        .with("region", "us-east-1")
        .with("spec", spec)
}

fn target_groups() -> MockTargetGroups {
    MockTargetGroups::new([
        ("red-ingress", "arn:aws:elasticloadbalancing:us-east-1:1234:targetgroup/red-ingress/1"),
        ("blue-ingress", "arn:aws:elasticloadbalancing:us-east-1:1234:targetgroup/blue-ingress/2"),
    ])
}

#[tokio::test]
async fn read_sets_target_groups_and_compares_iam_identity_mappings() {
    let runner = MockRunner::default()
        .with_output("get iamidentitymapping", GET_IAM_IDENTITY_MAPPING);
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITH_OIDC).with(
        "aws_auth_configmap",
        json!([
            {"iamarn": "arn:aws:iam::1234:user/admin", "username": "admin", "groups": ["system:masters"]},
            {"iamarn": "arn:aws:iam::1234:role/nodes", "username": "system:node:{{EC2PrivateDNSName}}", "groups": ["system:bootstrappers", "system:nodes"]}
        ]),
    );

    let cluster = manager.read_cluster(&mut d).await.unwrap();
    assert_eq!(cluster.name, "red");
    assert_eq!(cluster.region, "us-east-1");
    assert_eq!(
        d.get("target_group_arns"),
        Some(&json!([
            "arn:aws:elasticloadbalancing:us-east-1:1234:targetgroup/red-ingress/1"
        ]))
    );

    let commands = runner.commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].to_string(),
        "eksctl get iamidentitymapping --cluster red -o json --region us-east-1"
    );
}

#[tokio::test]
async fn iam_identity_mapping_drift_is_not_an_error() {
    let runner = MockRunner::default()
        .with_output("get iamidentitymapping", GET_IAM_IDENTITY_MAPPING);
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITH_OIDC).with(
        "aws_auth_configmap",
        json!([{"iamarn": "arn:aws:iam::1234:role/other", "username": "other"}]),
    );
    manager.read_cluster(&mut d).await.unwrap();
}

#[tokio::test]
async fn unreadable_iam_identity_mapping_is_wrapped() {
    let runner = MockRunner::default().with_output("get iamidentitymapping", "not json");
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITH_OIDC);
    let err = manager.read_cluster(&mut d).await.unwrap_err();
    match err {
        Error::ReadIamIdentityMapping { source } => {
            assert!(matches!(*source, Error::ParseIamIdentityMapping { .. }))
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn target_group_failure_fails_the_read() {
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, MockTargetGroups::failing());
    let mut d = red(SPEC_WITH_OIDC);
    let err = manager.read_cluster(&mut d).await.unwrap_err();
    match err {
        Error::ReadCluster { source } => {
            assert!(matches!(
                source.as_ref(),
                Error::TargetGroups { prefix, .. } if prefix == "red"
            ))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(runner.commands().is_empty());
    assert!(d.get("target_group_arns").is_none());
}

#[tokio::test]
async fn missing_name_fails_the_read() {
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, target_groups());
    let mut d = ResourceData::new("abc").with("spec", SPEC_WITHOUT_OIDC);
    let err = manager.read_cluster(&mut d).await.unwrap_err();
    assert!(matches!(err, Error::ReadCluster { .. }), "{}", err);
}

#[tokio::test]
async fn missing_kubeconfig_is_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kubeconfig");
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITHOUT_OIDC)
        .with("region", "")
        .with("profile", "ops")
        .with("kubeconfig_path", path.to_str().unwrap());

    manager.read_cluster(&mut d).await.unwrap();
    manager.read_cluster(&mut d).await.unwrap();

    assert!(path.is_file());
    let commands = runner.commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].to_string(),
        format!(
            "eksctl utils write-kubeconfig --cluster red-abc --kubeconfig {} --region us-east-1 --profile ops",
            path.display()
        )
    );
}

#[tokio::test]
async fn present_kubeconfig_is_left_alone() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITHOUT_OIDC).with("kubeconfig_path", file.path().to_str().unwrap());

    manager.read_cluster(&mut d).await.unwrap();
    assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn oidc_disabled_makes_no_calls() {
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITHOUT_OIDC);

    let cluster = manager.read_cluster(&mut d).await.unwrap();
    manager
        .load_oidc_provider_url_and_arn(&mut d, &cluster)
        .unwrap();

    assert!(runner.commands().is_empty());
    assert!(d.get("oidc_provider_url").is_none());
    assert!(d.get("oidc_provider_arn").is_none());
    assert!(d.get("security_group_ids").is_none());
}

#[tokio::test]
async fn loads_oidc_provider_of_red() {
    let runner = MockRunner::default()
        .with_output("get cluster", GET_CLUSTER)
        .with_output("get iamidentitymapping", "[]");
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITH_OIDC);

    let cluster = manager.read_cluster(&mut d).await.unwrap();
    manager
        .load_oidc_provider_url_and_arn(&mut d, &cluster)
        .unwrap();

    assert_eq!(
        d.get_str("oidc_provider_url").unwrap(),
        Some("https://oidc.eks.us-east-1.amazonaws.com/id/ABC123")
    );
    assert_eq!(
        d.get_str("oidc_provider_arn").unwrap(),
        Some("arn:aws:iam::1234:oidc-provider/oidc.eks.us-east-1.amazonaws.com/id/ABC123")
    );
    assert_eq!(d.get("security_group_ids"), Some(&json!(["sg-1"])));
    assert_eq!(
        runner.subcommands(),
        vec!["get iamidentitymapping".to_string(), "get cluster".to_string()]
    );
    assert_eq!(
        runner.commands()[1].to_string(),
        "eksctl get cluster --name red -o json --region us-east-1"
    );
}

#[tokio::test]
async fn unknown_cluster_is_not_found() {
    let runner = MockRunner::default().with_output("get cluster", GET_CLUSTER);
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITH_OIDC).with("name", "re");

    let cluster = manager.read_cluster_internal(&mut d).await.unwrap();
    let err = manager
        .load_oidc_provider_url_and_arn(&mut d, &cluster)
        .unwrap_err();
    assert!(
        matches!(&err, Error::ClusterNotFound { name } if name == "re"),
        "{}",
        err
    );
    assert!(d.get("oidc_provider_arn").is_none());
}

#[tokio::test]
async fn plan_computes_unset_kubeconfig_path() {
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, target_groups());
    let data = red(SPEC_WITH_OIDC);
    let mut diff = ResourceDiff::new(&data, COMPUTED_KEYS);

    manager.plan_cluster(&mut diff).await.unwrap();

    assert!(diff.is_new_computed("kubeconfig_path"));
    assert_eq!(
        diff.planned().get("target_group_arns"),
        Some(&json!([
            "arn:aws:elasticloadbalancing:us-east-1:1234:targetgroup/red-ingress/1"
        ]))
    );
    assert!(runner.commands().is_empty());
    assert!(data.get("target_group_arns").is_none());
}

#[tokio::test]
async fn plan_recreates_missing_kubeconfig() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kubeconfig");
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, target_groups());
    let data = red(SPEC_WITHOUT_OIDC).with("kubeconfig_path", path.to_str().unwrap());
    let mut diff = ResourceDiff::new(&data, COMPUTED_KEYS);

    manager.plan_cluster(&mut diff).await.unwrap();

    assert!(Path::new(&path).is_file());
    assert!(!diff.is_new_computed("kubeconfig_path"));
    assert_eq!(runner.subcommands(), vec!["utils write-kubeconfig".to_string()]);
}

#[tokio::test]
async fn plan_fails_when_target_groups_fail() {
    let runner = MockRunner::default();
    let manager = Manager::new(&runner, MockTargetGroups::failing());
    let data = red(SPEC_WITH_OIDC);
    let mut diff = ResourceDiff::new(&data, COMPUTED_KEYS);

    let err = manager.plan_cluster(&mut diff).await.unwrap_err();
    assert!(matches!(err, Error::TargetGroups { .. }), "{}", err);
    assert!(!diff.is_new_computed("kubeconfig_path"));
}

#[tokio::test]
async fn kubeconfig_is_written_with_suffixed_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kubeconfig");
    let runner = MockRunner::default()
        .with_output("get iamidentitymapping", "[]")
        .with_output("get cluster", GET_CLUSTER);
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITH_OIDC).with("kubeconfig_path", path.to_str().unwrap());

    let cluster = manager.read_cluster(&mut d).await.unwrap();
    manager
        .load_oidc_provider_url_and_arn(&mut d, &cluster)
        .unwrap();

    let commands: Vec<_> = runner.commands().iter().map(ToString::to_string).collect();
    assert_eq!(
        commands,
        vec![
            format!(
                "eksctl utils write-kubeconfig --cluster red-abc --kubeconfig {} --region us-east-1",
                path.display()
            ),
            "eksctl get iamidentitymapping --cluster red -o json --region us-east-1".to_string(),
            "eksctl get cluster --name red -o json --region us-east-1".to_string(),
        ]
    );
}

#[tokio::test]
async fn failed_kubeconfig_write_fails_the_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kubeconfig");
    let runner = MockRunner::default().with_failure("utils write-kubeconfig");
    let manager = Manager::new(&runner, target_groups());
    let mut d = red(SPEC_WITHOUT_OIDC).with("kubeconfig_path", path.to_str().unwrap());

    let err = manager.read_cluster(&mut d).await.unwrap_err();
    match err {
        Error::WriteKubeconfig { path: failed, source } => {
            assert_eq!(failed, path.to_str().unwrap());
            assert!(matches!(source.as_ref(), Error::CommandSpawn { .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn failed_kubeconfig_write_fails_the_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kubeconfig");
    let runner = MockRunner::default().with_failure("utils write-kubeconfig");
    let manager = Manager::new(&runner, target_groups());
    let data = red(SPEC_WITHOUT_OIDC).with("kubeconfig_path", path.to_str().unwrap());
    let mut diff = ResourceDiff::new(&data, COMPUTED_KEYS);

    let err = manager.plan_cluster(&mut diff).await.unwrap_err();
    assert!(matches!(err, Error::WriteKubeconfig { .. }), "{}", err);
    assert_eq!(runner.subcommands(), vec!["utils write-kubeconfig".to_string()]);
}
