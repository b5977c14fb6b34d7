use std::io::Write;

use asset_cli::{show, ShowOptions};
use asset_test_utils::bundle_json;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn show_renders_text_report() {
    let bundle = write_temp(".json", &bundle_json().to_string());
    let out = show(bundle.path(), &ShowOptions::default()).unwrap();
    assert!(out.starts_with("warehouse / orders"));
    assert!(out.contains("No configuration"));
    assert!(out.contains("nightly_refresh"));
    assert!(!out.contains("__ASSET_JOB_0"));
}

#[test]
fn show_json_is_machine_readable() {
    let bundle = write_temp(".json", &bundle_json().to_string());
    let options = ShowOptions {
        json: true,
        ..ShowOptions::default()
    };
    let out = show(bundle.path(), &options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["config"]["state"], "empty");
    assert_eq!(value["required_resources"]["data"][0]["text"], "alerts");
    assert_eq!(value["repository"]["location"], "prod");
}

#[test]
fn show_applies_config_file() {
    let bundle = write_temp(".json", &bundle_json().to_string());
    let config = write_temp(".toml", "[ingest]\nhidden_job_prefix = \"__NONE\"\n");
    let options = ShowOptions {
        json: true,
        config: Some(config.path().to_path_buf()),
        ..ShowOptions::default()
    };
    let out = show(bundle.path(), &options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["annotations"]["jobs"].as_array().unwrap().len(), 2);
}

#[test]
fn show_filters_neighbors() {
    let bundle = write_temp(".json", &bundle_json().to_string());
    let options = ShowOptions {
        filter_neighbors: Some("revenue".to_string()),
        ..ShowOptions::default()
    };
    let out = show(bundle.path(), &options).unwrap();
    assert!(out.contains("No upstream assets match \"revenue\""));
    assert!(out.contains("marts / revenue"));
}

#[test]
fn malformed_bundle_is_an_error() {
    let bundle = write_temp(".json", r#"{"assetNode": {"assetKey": {"path": []}}}"#);
    let err = show(bundle.path(), &ShowOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to ingest"));
}
