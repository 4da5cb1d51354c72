use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[test]
fn build_writes_snapshot_and_reports_skips() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let posts = dir.path().join("posts");
    fs::create_dir_all(posts.join("frontend"))?;

    fs::write(
        posts.join("frontend/next.mdx"),
        "---\ntitle: Learning Next.js\ndate: 2024-05-01\noverview: intro\ntags: Next, React\n---\nSome body text",
    )?;
    fs::write(
        posts.join("css.md"),
        "---\ntitle: CSS Tricks\ndate: 2024-03-01\noverview: flex and grid\ntags: CSS\n---\nMore body",
    )?;
    fs::write(posts.join("broken.md"), "---\ntitle: [oops\n---\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("folio")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 2 articles (1 skipped)"))
        .stdout(predicate::str::contains("broken.md"));

    let snapshot = fs::read_to_string(dir.path().join("public/search-index.json"))?;
    let records: Value = serde_json::from_str(&snapshot)?;
    let records = records.as_array().expect("snapshot is an array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["slug"], "frontend/next");
    assert_eq!(records[0]["color"], "#8256d5");
    assert_eq!(records[0]["metadata"]["tags"], "Next,React");
    assert_eq!(records[1]["slug"], "css");
    assert!(records.iter().all(|r| r["content"] == ""));
    assert!(!snapshot.contains("Some body text"));

    Ok(())
}

#[test]
fn build_respects_config_and_output_flag() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("content/blog"))?;
    fs::write(
        dir.path().join("folio.yml"),
        r#"
site:
  title: "Test Blog"
paths:
  content: "content/blog"
build:
  require_tags: false
"#,
    )?;
    fs::write(
        dir.path().join("content/blog/untagged.md"),
        "---\ntitle: No tags here\n---\nbody",
    )?;

    #[allow(deprecated)]
    Command::cargo_bin("folio")?
        .current_dir(dir.path())
        .args(["build", "--output", "out/index.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 1 articles (0 skipped)"));

    let snapshot = fs::read_to_string(dir.path().join("out/index.json"))?;
    let records: Value = serde_json::from_str(&snapshot)?;
    assert_eq!(records[0]["slug"], "untagged");
    assert_eq!(records[0]["metadata"]["tags"], "");
    assert!(!dir.path().join("public/search-index.json").exists());

    Ok(())
}

#[test]
fn build_fails_without_content_root() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    #[allow(deprecated)]
    Command::cargo_bin("folio")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Content directory not found"));

    assert!(!dir.path().join("public/search-index.json").exists());
    Ok(())
}
