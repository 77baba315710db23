use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_uijar-doc")))
}

fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

fn fixture_path(name: &str) -> String {
    format!("{}/{}", fixtures_dir(), name)
}

#[test]
fn json_to_stdout() {
    let assert = cmd()
        .arg(fixtures_dir())
        .arg("--root-dir")
        .arg(fixtures_dir())
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let docs = value["classesWithDocs"].as_array().unwrap();
    assert_eq!(docs.len(), 3);
    // directory inputs are sorted by path
    assert_eq!(docs[0]["componentRefName"], "ChildGenericComponent");
    let foobar = docs
        .iter()
        .find(|d| d["componentRefName"] == "FoobarComponent")
        .unwrap();
    assert_eq!(foobar["fileName"], "foobar.component.ts");
    assert_eq!(foobar["selector"], "x-foobar");
    assert_eq!(foobar["moduleDetails"]["moduleRefName"], "FoobarModule");
    assert_eq!(foobar["apiDetails"]["properties"][3]["propertyName"], "isSmall");

    assert_eq!(value["navigationLinks"][0]["groupName"], "Layout");
    assert_eq!(value["navigationLinks"][0]["links"].as_array().unwrap().len(), 3);
    assert!(value["otherClasses"]["ParentComponent"].is_object());
}

#[test]
fn url_prefix_applies_to_links() {
    let assert = cmd()
        .arg(fixture_path("foobar.component.ts"))
        .args(["--url-prefix", "components"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value["navigationLinks"][0]["links"][0]["path"],
        "components/foobar-component"
    );
}

#[test]
fn markdown_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("docs/api.md");

    cmd()
        .arg(fixture_path("foobar.component.ts"))
        .arg(fixture_path("foobar.module.ts"))
        .args(["-f", "markdown", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("### Foobar"));
    assert!(content.contains("* Selector: `x-foobar`"));
    assert!(content.contains("* Module: `FoobarModule`"));
    assert!(content.contains("`publicMethodWithDescription()`: Description to method should be parsed"));
    assert!(!content.contains("privateMethodShouldNotBeVisibleInParse"));
}

#[test]
fn glob_input() {
    let pattern = format!("{}/*.component.ts", fixtures_dir());
    cmd()
        .arg(pattern)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ChildComponent\""))
        .stdout(predicate::str::contains("FoobarModule").not());
}

#[test]
fn unparsable_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.component.ts");
    std::fs::write(&broken, "export class Broken {\n  open() {\n").unwrap();

    cmd()
        .arg(&broken)
        .arg(fixture_path("foobar.component.ts"))
        .assert()
        .success()
        .stdout(predicate::str::contains("FoobarComponent"))
        .stderr(predicate::str::contains("skipping"));
}

#[test]
fn cyclic_inheritance_fails() {
    let dir = TempDir::new().unwrap();
    let cyclic = dir.path().join("cyclic.component.ts");
    std::fs::write(
        &cyclic,
        "/** @component Loop */\n@Component({ selector: 'x-loop' })\nclass LoopComponent extends Back {}\nclass Back extends LoopComponent {}\n",
    )
    .unwrap();

    cmd()
        .arg(&cyclic)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic inheritance"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .arg(fixture_path("foobar.component.ts"))
        .args(["-f", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn missing_inputs_fail() {
    cmd().assert().failure();
}
