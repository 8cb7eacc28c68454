use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SITE: &str = r#"{
    "languages": ["en", "pl"],
    "site_title": {"en": "Handbook", "pl": "Podręcznik"},
    "index_content": {"en": "<p>Welcome</p>", "pl": "<p>Witaj</p>"},
    "pages": [{"slug": "about", "title": {"en": "About", "pl": "O nas"}}],
    "glossary": {
        "topics": [{"id": "basics", "title": {"en": "Basics", "pl": "Podstawy"}, "categories": ["types"]}],
        "categories": [{"id": "types", "title": {"en": "Types", "pl": "Typy"}, "definitions": ["int", "str"]}],
        "definitions": [
            {"id": "int", "label": {"en": "Integer", "pl": "Liczba"}, "tags": ["numbers", "basic"]},
            {"id": "str", "label": {"en": "String", "pl": "Napis"}, "tags": ["basic"], "code": "let s = \"hi\";"}
        ]
    }
}"#;

fn write_site(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("site_config.json");
    fs::write(&path, content).expect("write site");
    path
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("glossite.toml");

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("site_path"));
    assert!(content.contains("tag_script = true"));

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn build_writes_one_page_per_language() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(&dir, SITE);
    let out = dir.path().join("public");

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .arg("build")
        .arg("--site")
        .arg(&site)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 2 page(s)"));

    let en = fs::read_to_string(out.join("index.html")).expect("read en page");
    let pl = fs::read_to_string(out.join("pl").join("index.html")).expect("read pl page");

    assert!(en.contains("Integer"));
    assert!(en.contains(r#"id="tag-index""#));
    assert!(pl.contains("Napis"));
    assert!(pl.contains(r#"lang="pl""#));
}

#[test]
fn build_dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(&dir, SITE);
    let out = dir.path().join("public");

    let mut cmd = cargo_bin_cmd!("glossite");
    let output = cmd
        .current_dir(dir.path())
        .args(["build", "--dry-run", "--json", "--site"])
        .arg(&site)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run build");

    assert!(output.status.success());
    assert!(!out.exists());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["pages"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["pages"][0]["cards"], 2);
}

#[test]
fn build_fails_on_unknown_category() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(
        &dir,
        &SITE.replace(r#""categories": ["types"]"#, r#""categories": ["missing"]"#),
    );
    let out = dir.path().join("public");

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .arg("build")
        .arg("--site")
        .arg(&site)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'missing' not found"));

    assert!(!out.join("index.html").exists());
}

#[test]
fn check_fails_on_unknown_category() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(
        &dir,
        &SITE.replace(r#""categories": ["types"]"#, r#""categories": ["missing"]"#),
    );

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .arg("check")
        .arg("--site")
        .arg(&site)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"))
        .stderr(predicate::str::contains("unknown category 'missing'"));
}

#[test]
fn check_passes_on_valid_site() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(&dir, SITE);

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .arg("check")
        .arg("--site")
        .arg(&site)
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"));
}

#[test]
fn tags_outputs_sorted_json() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(&dir, SITE);

    let mut cmd = cargo_bin_cmd!("glossite");
    let output = cmd
        .current_dir(dir.path())
        .args(["tags", "--json", "--lang", "pl", "--site"])
        .arg(&site)
        .output()
        .expect("run tags");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["lang"], "pl");
    assert_eq!(value["tags"][0]["tag"], "basic");
    assert_eq!(value["tags"][0]["cards"], serde_json::json!(["int", "str"]));
    assert_eq!(value["tags"][1]["tag"], "numbers");
    assert_eq!(value["tags"][1]["cards"], serde_json::json!(["int"]));
}

#[test]
fn tags_rejects_unknown_language() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(&dir, SITE);

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .args(["tags", "--lang", "de", "--site"])
        .arg(&site)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not one of the site languages"));
}

#[test]
fn check_reports_unparsable_document() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(&dir, "{ \"site_title\": ");

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .arg("check")
        .arg("--site")
        .arg(&site)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed: 1 problem(s)"));
}

#[test]
fn tags_rejects_definition_listed_twice() {
    let dir = TempDir::new().expect("temp dir");
    let site = write_site(
        &dir,
        &SITE.replace(
            r#""definitions": ["int", "str"]"#,
            r#""definitions": ["int", "str", "int"]"#,
        ),
    );

    let mut cmd = cargo_bin_cmd!("glossite");
    cmd.current_dir(dir.path())
        .args(["tags", "--site"])
        .arg(&site)
        .assert()
        .failure()
        .stderr(predicate::str::contains("definition 'int' is listed by both"));
}
