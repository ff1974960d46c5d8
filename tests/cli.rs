//! Runs the keyhint binary against snapshot files.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

const PAGE: &str = r#"{
    "url": "https://example.com/",
    "viewport": { "width": 800, "height": 600 },
    "elements": [
        { "tag": "a", "attributes": { "href": "/a" },
          "rect": { "left": 0, "top": 0, "width": 50, "height": 10 } },
        { "tag": "a", "attributes": { "href": "/a" },
          "rect": { "left": 0, "top": 20, "width": 50, "height": 10 } },
        { "tag": "textarea",
          "rect": { "left": 0, "top": 40, "width": 200, "height": 50 } }
    ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn keyhint(config: &NamedTempFile, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_keyhint"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_hints_lists_numbers() {
    let config = write_temp("");
    let page = write_temp(PAGE);
    let output = keyhint(&config, &["hints", "--page", page.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let numbers: Vec<u64> = stdout
        .lines()
        .map(|line| {
            let row: serde_json::Value = serde_json::from_str(line).unwrap();
            row["number"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(numbers, vec![1, 1, 2]);
}

#[test]
fn test_run_reports_signal_and_effects() {
    let config = write_temp("");
    let page = write_temp(PAGE);
    let output = keyhint(
        &config,
        &["run", "--page", page.path().to_str().unwrap(), "--keys", "2"],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["signal"], "mode::insert");
    assert_eq!(report["active"], false);
    assert_eq!(report["effects"][0]["kind"], "focus");
}

#[test]
fn test_run_partial_sequence_stays_active() {
    let config = write_temp("");
    let page = write_temp(PAGE);
    let output = keyhint(
        &config,
        &["run", "--page", page.path().to_str().unwrap(), "--keys", "1"],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["signal"], "ignore");
    assert_eq!(report["active"], true);
    assert_eq!(report["remaining"], serde_json::json!([1, 1]));
}

#[test]
fn test_invalid_config_fails() {
    let config = write_temp("[hints]\nmax_hints = 0\n");
    let page = write_temp(PAGE);
    let output = keyhint(&config, &["hints", "--page", page.path().to_str().unwrap()]);
    assert!(!output.status.success());
}
