use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn tei(label: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .enumerate()
        .map(|(i, text)| format!("<p xml:id=\"b1d3qun-d1e{}\">{text}</p>\n", i + 1))
        .collect();
    format!(
        "<TEI xmlns=\"http://www.tei-c.org/ns/1.0\">\n\
         <teiHeader><listWit><witness xml:id=\"{label}\"/></listWit></teiHeader>\n\
         <text><body>\n{body}</body></text>\n</TEI>\n"
    )
}

fn fixture(witnesses: &[(&str, &str, &[&str])]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (stem, label, paragraphs) in witnesses {
        fs::write(dir.path().join(format!("{stem}.xml")), tei(label, paragraphs)).expect("write witness");
    }
    dir
}

fn run(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("collator");
    cmd.env_remove("COLLATOR_CONFIG")
        .env_remove("RUST_LOG")
        .arg(dir)
        .args(["--prefix", "b1d3qun", "--output-dir"])
        .arg(dir.join("out"));
    cmd
}

#[test]
fn test_writes_text_report() {
    let dir = fixture(&[
        ("sorb", "S", &["Deus est bonus.", "Circa hoc quaeritur."]),
        ("vat", "V", &["Deus non est bonus.", "Circa hoc quaeritur."]),
    ]);

    run(dir.path())
        .args(["--mode", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output.txt"));

    let text = fs::read_to_string(dir.path().join("out/output.txt")).unwrap();
    assert!(text.contains("b1d3qun-d1e1 (¶1)"));
    assert!(text.contains("#V\n+++ |non|\n"));
    assert!(!dir.path().join("out/output.html").exists());
}

#[test]
fn test_default_modes_and_base_selection() {
    let dir = fixture(&[
        ("ars", "A", &["lorem ipsum"]),
        ("sorb", "S", &["lorem dolor"]),
    ]);

    run(dir.path()).args(["--base", "sorb"]).assert().success();

    let text = fs::read_to_string(dir.path().join("out/output.txt")).unwrap();
    assert!(text.contains("#S\nlorem dolor\n\n#A\n˜˜˜ |dolor|\n+++ |ipsum|\n"));
    let html = fs::read_to_string(dir.path().join("out/output.html")).unwrap();
    assert!(html.contains("<h2>#A</h2>"));
}

#[test]
fn test_unequal_units_fail_without_report() {
    let dir = fixture(&[
        ("a", "A", &["one", "two", "three"]),
        ("b", "B", &["one", "two"]),
        ("c", "C", &["one", "two", "three"]),
    ]);

    run(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("`b` has 2 (-1)"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_unknown_base_is_reported() {
    let dir = fixture(&[("a", "A", &["one"])]);

    run(dir.path())
        .args(["--base", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base witness `missing`"));
}

#[test]
fn test_config_file_is_honoured() {
    let dir = fixture(&[("a", "A", &["alpha"]), ("b", "B", &["alpha beta"])]);
    let config = dir.path().join("collator.toml");
    fs::write(&config, "output_modes = [\"json\"]\n").unwrap();

    run(dir.path()).arg("--config").arg(&config).assert().success();

    let json = fs::read_to_string(dir.path().join("out/output.json")).unwrap();
    assert!(json.contains("\"beta\""));
    assert!(!dir.path().join("out/output.txt").exists());
}
