// CLI integration tests for normalize/inspect flows.
use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::{Value, json};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_pif");
    Command::new(exe)
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    run_with_stdin_bytes(args, stdin.as_bytes())
}

fn run_with_stdin_bytes(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin)
        .expect("write stdin");
    child.wait_with_output().expect("output")
}

#[test]
fn normalize_file_canonicalizes_and_keeps_unknown_fields() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("value.json");
    std::fs::write(
        &path,
        r#"{"name":"lattice","vectors":[1,2,3],"matrices":[[1,0],[0,1]],"futureField":{"a":1}}"#,
    )
    .expect("write");

    let output = cmd()
        .args(["normalize", path.to_str().unwrap()])
        .output()
        .expect("normalize");
    assert!(output.status.success());
    let value = parse_json(std::str::from_utf8(&output.stdout).expect("utf8"));
    assert_eq!(
        value,
        json!({
            "name": "lattice",
            "vectors": [[1, 2, 3]],
            "matrices": [[[1, 0], [0, 1]]],
            "futureField": {"a": 1}
        })
    );
}

#[test]
fn normalize_stdin_array_stays_array() {
    let output = run_with_stdin(
        &["normalize"],
        r#"[{"scalars":[1]},{"vectors":[[1],[2]],"units":"eV"}]"#,
    );
    assert!(output.status.success());
    let value = parse_json(std::str::from_utf8(&output.stdout).expect("utf8"));
    assert_eq!(
        value,
        json!([{"scalars": [1]}, {"vectors": [[1], [2]], "units": "eV"}])
    );
}

#[test]
fn normalize_pretty_without_color_is_plain_pretty_json() {
    let output = run_with_stdin(
        &["--color", "never", "normalize", "--pretty", "-"],
        r#"{"units":"K","extra":true}"#,
    );
    assert!(output.status.success());
    let text = std::str::from_utf8(&output.stdout).expect("utf8");
    assert!(!text.contains("\u{1b}["));
    assert_eq!(
        text.trim_end(),
        serde_json::to_string_pretty(&json!({"extra": true, "units": "K"})).unwrap()
    );
}

#[test]
fn inspect_emits_one_line_per_record() {
    let output = run_with_stdin(
        &["inspect"],
        r#"[{"name":"a","scalars":[1,2],"zeta":1,"alpha":2},{"matrices":[[[1]],[[2]]]}]"#,
    );
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<Value> = text.lines().map(parse_json).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["name"], "a");
    assert_eq!(lines[0]["scalars"], 2);
    assert_eq!(lines[0]["extra_fields"], json!(["alpha", "zeta"]));
    assert_eq!(lines[1]["matrices"], 2);
    assert_eq!(lines[1]["name"], Value::Null);
}

#[test]
fn shape_error_reports_pointer_and_exit_code() {
    let output = run_with_stdin(&["normalize"], r#"{"matrices":[1,2,3]}"#);
    assert_eq!(output.status.code(), Some(6));
    let err = parse_json(std::str::from_utf8(&output.stderr).expect("utf8").trim());
    assert_eq!(err["error"]["kind"], "Shape");
    assert_eq!(err["error"]["pointer"], "/matrices");
    assert!(err["error"]["hint"].as_str().unwrap().contains("matrices accept"));
}

#[test]
fn malformed_json_is_a_syntax_error() {
    let output = run_with_stdin(&["normalize"], r#"{"name":"#);
    assert_eq!(output.status.code(), Some(4));
    let err = parse_json(std::str::from_utf8(&output.stderr).expect("utf8").trim());
    assert_eq!(err["error"]["kind"], "Syntax");
}

#[test]
fn invalid_utf8_is_a_syntax_error() {
    let output = run_with_stdin_bytes(&["normalize"], b"{\"name\":\"\xff\"}");
    assert_eq!(output.status.code(), Some(4));
    let err = parse_json(std::str::from_utf8(&output.stderr).expect("utf8").trim());
    assert_eq!(err["error"]["kind"], "Syntax");

    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("latin1.json");
    std::fs::write(&path, b"{\"units\":\"\xb5m\"}").expect("write");
    let output = cmd()
        .args(["inspect", path.to_str().unwrap()])
        .output()
        .expect("inspect");
    assert_eq!(output.status.code(), Some(4));
    let err = parse_json(std::str::from_utf8(&output.stderr).expect("utf8").trim());
    assert_eq!(err["error"]["kind"], "Syntax");
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("missing.json");
    let output = cmd()
        .args(["inspect", path.to_str().unwrap()])
        .output()
        .expect("inspect");
    assert_eq!(output.status.code(), Some(3));
    let err = parse_json(std::str::from_utf8(&output.stderr).expect("utf8").trim());
    assert_eq!(err["error"]["kind"], "Io");
    assert_eq!(err["error"]["hint"], "Check the input path.");
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = cmd().args(["normalize", "--bogus"]).output().expect("run");
    assert_eq!(output.status.code(), Some(2));
    let err = parse_json(std::str::from_utf8(&output.stderr).expect("utf8").trim());
    assert_eq!(err["error"]["kind"], "Usage");
}
