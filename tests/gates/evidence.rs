use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SPRINT5: &[(&str, &str)] = &[
    (
        "controls/TAMPER_SEALING_VERIFICATION_V1.md",
        "# Tamper Sealing Verification\n\nStatus: PASS\n\nseal_chain_verified: true\n",
    ),
    (
        "controls/ACCESS_REVIEW_REPORTING_V1.md",
        "# Access Review Reporting\n\nStatus: PASS\n\nreview_attestation_complete: true\n",
    ),
    (
        "controls/PCI_SCOPE_CONTROL_OWNERSHIP_MATRIX_V1.md",
        "# PCI Scope Ownership\n\nStatus: PASS\n\n| control | owner |\n\nownership_signoff_complete: true\n",
    ),
];

const SPRINT6: &[(&str, &str)] = &[
    (
        "controls/RELEASE_CONTROL_CHECKLIST_V1.md",
        "# Release Control Checklist\n\nStatus: PASS\n\n## Sprint 6 Release Control Signoff\n\n\
         Signed by controller.\n\n## Pass/Fail Gate Results\n\ncontrol_gate_result: PASS\n",
    ),
    (
        "controls/INCIDENT_RESPONSE_DRILL_REPORT_V1.md",
        "# Incident Response Drill\n\nStatus: PASS\n\n## Drill Scenario\n\nLedger outage.\n\n\
         ## Pass/Fail Outcome\n\ndrill_gate_result: PASS\n",
    ),
    (
        "controls/CONTROL_GATES_REGISTER_V1.md",
        "# Control Gates Register\n\n## Sprint 6 Status\n\n- release_control_signoff: complete\n",
    ),
];

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write file");
}

fn setup_evidence(docs: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path().to_path_buf();
    for (path, content) in docs {
        write(&root.join(path), content);
    }
    (tmp, root)
}

fn run_bin(bin: &str, root: &Path) -> std::process::Output {
    Command::new(bin)
        .current_dir(root)
        .output()
        .expect("run evidence gate")
}

fn run_sprint5(root: &Path) -> std::process::Output {
    run_bin(env!("CARGO_BIN_EXE_validate-sprint5-controls"), root)
}

fn run_sprint6(root: &Path) -> std::process::Output {
    run_bin(env!("CARGO_BIN_EXE_validate-sprint6-controls"), root)
}

#[test]
fn sprint5_passes_with_complete_evidence() {
    let (_tmp, root) = setup_evidence(SPRINT5);
    let output = run_sprint5(&root);
    assert!(
        output.status.success(),
        "sprint5 should pass; stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "sprint5 controls evidence check passed\n"
    );
}

#[test]
fn sprint6_passes_with_complete_evidence() {
    let (_tmp, root) = setup_evidence(SPRINT6);
    let output = run_sprint6(&root);
    assert!(
        output.status.success(),
        "sprint6 should pass; stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "sprint6 controls evidence check passed\n"
    );
}

#[test]
fn sprint5_missing_artifact_aborts() {
    let (_tmp, root) = setup_evidence(&SPRINT5[1..]);
    let output = run_sprint5(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "missing required control artifact: controls/TAMPER_SEALING_VERIFICATION_V1.md\n"
    );
}

#[test]
fn sprint5_reports_only_the_first_missing_snippet() {
    let (_tmp, root) = setup_evidence(SPRINT5);
    write(
        &root.join("controls/ACCESS_REVIEW_REPORTING_V1.md"),
        "# Access Review Reporting\n\nStatus: PENDING\n",
    );
    let output = run_sprint5(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "missing required snippet 'Status: PASS' in controls/ACCESS_REVIEW_REPORTING_V1.md\n"
    );
}

#[test]
fn sprint6_each_removed_snippet_is_named() {
    let snippets = [
        "## Drill Scenario",
        "## Pass/Fail Outcome",
        "drill_gate_result: PASS",
    ];
    for snippet in snippets {
        let (_tmp, root) = setup_evidence(SPRINT6);
        let path = "controls/INCIDENT_RESPONSE_DRILL_REPORT_V1.md";
        write(&root.join(path), &SPRINT6[1].1.replace(snippet, ""));
        let output = run_sprint6(&root);
        assert_eq!(output.status.code(), Some(1));
        assert_eq!(
            String::from_utf8_lossy(&output.stderr),
            format!("missing required snippet '{}' in {}\n", snippet, path)
        );
    }
}

#[test]
fn sprint6_explicit_fail_marker_blocks_even_with_all_snippets() {
    let (_tmp, root) = setup_evidence(SPRINT6);
    let path = "controls/RELEASE_CONTROL_CHECKLIST_V1.md";
    write(
        &root.join(path),
        &format!("{}\n## Retest\n\nStatus: FAIL\n", SPRINT6[0].1),
    );
    let output = run_sprint6(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        format!("explicit FAIL status detected in {}\n", path)
    );
}

#[test]
fn sprint5_has_no_fail_marker_check() {
    let (_tmp, root) = setup_evidence(SPRINT5);
    write(
        &root.join("controls/TAMPER_SEALING_VERIFICATION_V1.md"),
        "Status: FAIL\nStatus: PASS\nseal_chain_verified: true\n",
    );
    assert!(run_sprint5(&root).status.success());
}
