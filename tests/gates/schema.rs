use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SCHEMA: &str = "contracts/canonical_event_v1.schema.json";

fn canonical_schema() -> Value {
    json!({
        "$id": "https://example.invalid/canonical_event_v1.schema.json",
        "title": "CanonicalEvent",
        "type": "object",
        "additionalProperties": false,
        "required": [
            "event_id", "event_type", "schema_version", "source_system",
            "source_event_id", "occurred_at", "business_date", "tenant_id",
            "legal_entity_id", "idempotency_key", "payload"
        ],
        "properties": {
            "event_id": {"type": "string", "format": "uuid"},
            "event_type": {
                "type": "string",
                "enum": ["order.captured.v1", "payment.settled.v1", "refund.v1"]
            },
            "business_date": {"type": "string", "format": "date"},
            "payload": {"type": "object"}
        }
    })
}

fn setup_schema(schema: Option<&Value>) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path().to_path_buf();
    if let Some(schema) = schema {
        let path = root.join(SCHEMA);
        fs::create_dir_all(path.parent().unwrap()).expect("create contracts dir");
        fs::write(path, serde_json::to_string_pretty(schema).unwrap()).expect("write schema");
    }
    (tmp, root)
}

fn run_schema(root: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_validate-canonical-schema"))
        .current_dir(root)
        .output()
        .expect("run validate-canonical-schema")
}

#[test]
fn schema_passes_for_canonical_contract() {
    let (_tmp, root) = setup_schema(Some(&canonical_schema()));
    let output = run_schema(&root);
    assert!(
        output.status.success(),
        "schema should pass; stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "canonical schema check passed\n"
    );
}

#[test]
fn schema_extra_required_fields_are_allowed() {
    let mut schema = canonical_schema();
    schema["required"]
        .as_array_mut()
        .unwrap()
        .push(json!("correlation_id"));
    let (_tmp, root) = setup_schema(Some(&schema));
    assert!(run_schema(&root).status.success());
}

#[test]
fn schema_names_missing_fields_sorted() {
    let mut schema = canonical_schema();
    schema["required"]
        .as_array_mut()
        .unwrap()
        .retain(|f| f != "tenant_id" && f != "business_date");
    let (_tmp, root) = setup_schema(Some(&schema));
    let output = run_schema(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "schema required fields missing: ['business_date', 'tenant_id']\n"
    );
}

#[test]
fn schema_rejects_extra_event_type() {
    let mut schema = canonical_schema();
    schema["properties"]["event_type"]["enum"] = json!([
        "order.captured.v1",
        "payment.settled.v1",
        "refund.v1",
        "payout.v1"
    ]);
    let (_tmp, root) = setup_schema(Some(&schema));
    let output = run_schema(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "event_type enum mismatch: expected ['order.captured.v1', 'payment.settled.v1', 'refund.v1'], \
         got ['order.captured.v1', 'payment.settled.v1', 'payout.v1', 'refund.v1']\n"
    );
}

#[test]
fn schema_reports_fields_before_enum() {
    let mut schema = canonical_schema();
    schema["required"] = json!(["event_id"]);
    schema["properties"]["event_type"]["enum"] = json!([]);
    let (_tmp, root) = setup_schema(Some(&schema));
    let output = run_schema(&root);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("schema required fields missing:"));
    assert!(!stderr.contains("enum mismatch"));
}

#[test]
fn schema_missing_file() {
    let (_tmp, root) = setup_schema(None);
    let output = run_schema(&root);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "canonical schema missing\n"
    );
}
