//! End-to-end runs of the `fabric-override` binary

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const DEFINITIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/definitions/orderer");

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(instance: &str, template: &str, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fabric-override"))
        .arg("--instance")
        .arg(instance)
        .arg("--template")
        .arg(template)
        .args(extra)
        .env_remove("OVERRIDE_ACTION")
        .env_remove("OUTPUT_FORMAT")
        .output()
        .unwrap()
}

#[test]
fn renders_pvc_as_yaml() {
    let output = run(
        &format!("{}/orderer.yaml", DEFINITIONS),
        &format!("{}/pvc.yaml", DEFINITIONS),
        &[],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("kind: PersistentVolumeClaim"));
    assert!(stdout.contains("storageClassName: manual"));
    assert!(stdout.contains("storage: 100m"));
    assert!(stdout.contains("zone: zone1"));
}

#[test]
fn renders_json_output() {
    let output = run(
        &format!("{}/orderer.yaml", DEFINITIONS),
        &format!("{}/service.yaml", DEFINITIONS),
        &["--output", "json", "--action", "update"],
    );

    assert!(output.status.success());
    let rendered: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["spec"]["type"], "NodePort");
}

#[test]
fn fails_on_invalid_size() {
    let instance = write_temp(
        r#"
apiVersion: ibp.com/v1beta1
kind: IBPOrderer
metadata:
  name: broken
spec:
  storage:
    orderer:
      size: 10x
      class: manual
"#,
    );
    let output = run(
        instance.path().to_str().unwrap(),
        &format!("{}/pvc.yaml", DEFINITIONS),
        &[],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("quantities must match the regular expression"));
}

#[test]
fn fails_on_unknown_action() {
    let output = run(
        &format!("{}/orderer.yaml", DEFINITIONS),
        &format!("{}/pvc.yaml", DEFINITIONS),
        &["--action", "delete"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unsupported action"));
}
