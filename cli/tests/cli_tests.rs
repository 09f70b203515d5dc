//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("swaggerize").expect("binary should exist")
}

fn simple_document() -> &'static str {
    "openapi: 3.0.0
info:
  title: Simple
  version: '1'
paths:
  /pets:
    post:
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Pet'
      responses:
        200:
          description: ok
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
          nullable: true
"
}

// ── Convert to File ─────────────────────────────────────────────────────────

#[test]
fn test_convert_to_yaml_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    let output = dir.path().join("swagger.yaml");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output).expect("output file should exist");
    assert!(written.starts_with("swagger: '2.0'\n"), "output was:\n{written}");
    let doc: serde_json::Value = serde_yaml::from_str(&written).unwrap();
    assert_eq!(
        doc["paths"]["/pets"]["post"]["parameters"][0]["schema"]["$ref"],
        "#/definitions/Pet"
    );
    assert_eq!(
        doc["definitions"]["Pet"]["properties"]["name"]["type"],
        serde_json::json!(["string", "null"])
    );
}

#[test]
fn test_json_extension_selects_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    let output = dir.path().join("swagger.json");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).expect("output should be JSON");
    assert_eq!(doc["swagger"], "2.0");
}

#[test]
fn test_format_flag_overrides_output_extension() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    let output = dir.path().join("swagger.yaml");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["-o", output.to_str().unwrap()])
        .args(["--format", "json"])
        .assert()
        .success();

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).expect("output should be JSON");
    assert_eq!(doc["swagger"], "2.0");
}

#[test]
fn test_missing_input_with_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("swagger.yaml");

    cmd()
        .arg("/nonexistent/openapi.yaml")
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error on /nonexistent/openapi.yaml"));
    assert!(!output.exists());
}

// ── Convert to Stdout ───────────────────────────────────────────────────────

#[test]
fn test_convert_to_stdout_defaults_to_yaml() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("swagger: '2.0'"))
        .stdout(predicate::str::contains("definitions:"));
}

#[test]
fn test_format_flag_selects_json_on_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    fs::write(&input, simple_document()).unwrap();

    let output = cmd()
        .arg(input.to_str().unwrap())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["swagger"], "2.0");
    assert!(doc.get("components").is_none());
}

#[test]
fn test_input_from_env() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    fs::write(&input, simple_document()).unwrap();

    cmd()
        .env("SWAGGERIZE_INPUT", input.to_str().unwrap())
        .env_remove("SWAGGERIZE_OUTPUT")
        .assert()
        .success()
        .stdout(predicate::str::contains("swagger: '2.0'"));
}

// ── Options ─────────────────────────────────────────────────────────────────

#[test]
fn test_response_media_type_option() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    fs::write(
        &input,
        "openapi: 3.0.0
paths:
  /doc:
    get:
      responses:
        200:
          description: ok
          content:
            application/json:
              schema:
                type: object
            text/plain:
              schema:
                type: string
",
    )
    .unwrap();

    let output = cmd()
        .arg(input.to_str().unwrap())
        .args(["--response-media-type", "text/plain", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        doc["paths"]["/doc"]["get"]["responses"]["200"]["schema"],
        serde_json::json!({ "type": "string" })
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("media type `application/json` ignored"), "stderr: {stderr}");
}

#[test]
fn test_warnings_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.yaml");
    let output = dir.path().join("swagger.yaml");
    let warnings = dir.path().join("warnings.json");
    fs::write(
        &input,
        "openapi: 3.0.0
paths:
  /x:
    get:
      parameters:
        - { in: query, name: a, schema: { type: string } }
        - { in: query, name: a, schema: { type: integer } }
",
    )
    .unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["-o", output.to_str().unwrap()])
        .args(["--warnings", warnings.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: #/paths/~1x/get/parameters/1"));

    let records: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&warnings).unwrap()).unwrap();
    assert_eq!(
        records,
        serde_json::json!([{
            "path": "#/paths/~1x/get/parameters/1",
            "kind": { "type": "duplicate_parameter_removed", "location": "query", "name": "a" }
        }])
    );
}

#[test]
fn test_max_depth_option() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("openapi.json");
    fs::write(
        &input,
        r#"{"openapi":"3.0.0","paths":{},"components":{"schemas":{"A":{"items":{"items":{"items":{}}}}}}}"#,
    )
    .unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["--max-depth", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recursion depth exceeded"));
}

// ── Error Handling ──────────────────────────────────────────────────────────

#[test]
fn test_missing_input_file() {
    cmd()
        .arg("/nonexistent/openapi.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_invalid_document() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "{ not json").unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse document"));
}

#[test]
fn test_conversion_fault_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("swagger.yaml");
    let output = dir.path().join("out.yaml");
    fs::write(&input, "swagger: '2.0'\npaths: {}\n").unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conversion failed"))
        .stderr(predicate::str::contains("openapi"));
    assert!(!output.exists());
}

#[test]
fn test_help_and_version() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Swagger 2.0"))
        .stdout(predicate::str::contains("--response-media-type"));
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("swaggerize"));
}
