use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const LEDGER: &str = "governance/impact_decisions.json";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write file");
}

fn setup_ledger(ledger: Option<&str>) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path().to_path_buf();
    if let Some(content) = ledger {
        write(&root.join(LEDGER), content);
    }
    (tmp, root)
}

fn run_approvals(root: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_check-impact-approvals"))
        .current_dir(root)
        .output()
        .expect("run check-impact-approvals")
}

#[test]
fn approvals_pass_for_fully_signed_ledger() {
    let (_tmp, root) = setup_ledger(Some(
        r#"{
  "ledger_version": "1.2.0",
  "decisions": [
    {"id": "IMP-001", "financial_impact": true, "finance_approved": true,
     "control_impact": true, "controls_approved": true, "owner": "controller"},
    {"id": "IMP-002", "financial_impact": false, "control_impact": false}
  ]
}"#,
    ));
    let output = run_approvals(&root);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "impact approval check passed\n"
    );
}

#[test]
fn approvals_pass_for_empty_ledger() {
    for ledger in [r#"{"decisions": []}"#, "{}"] {
        let (_tmp, root) = setup_ledger(Some(ledger));
        let output = run_approvals(&root);
        assert!(
            output.status.success(),
            "ledger {} should pass; stderr:\n{}",
            ledger,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn approvals_list_every_violation() {
    let (_tmp, root) = setup_ledger(Some(
        r#"{"decisions": [
  {"id": "IMP-010", "financial_impact": true, "finance_approved": false},
  {"id": "IMP-011", "control_impact": true, "financial_impact": true},
  {"financial_impact": false, "control_impact": true, "controls_approved": false}
]}"#,
    ));
    let output = run_approvals(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "impact approval check failed:\n\
         - IMP-010: finance approval missing\n\
         - IMP-011: finance approval missing\n\
         - IMP-011: controls approval missing\n\
         - unknown: controls approval missing\n"
    );
}

#[test]
fn approvals_missing_ledger_is_fatal() {
    let (_tmp, root) = setup_ledger(None);
    let output = run_approvals(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "missing governance/impact_decisions.json\n"
    );
}

#[test]
fn approvals_malformed_ledger_is_fatal() {
    let (_tmp, root) = setup_ledger(Some("{\"decisions\": [}"));
    let output = run_approvals(&root);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("malformed governance/impact_decisions.json:"),
        "expected malformed ledger diagnostic, got:\n{}",
        stderr
    );
}

#[test]
fn approvals_null_and_boolean_ids_keep_grep_stable_labels() {
    let (_tmp, root) = setup_ledger(Some(
        r#"{"decisions": [
  {"id": null, "financial_impact": true},
  {"id": true, "control_impact": true}
]}"#,
    ));
    let output = run_approvals(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "impact approval check failed:\n\
         - unknown: finance approval missing\n\
         - True: controls approval missing\n"
    );
}
