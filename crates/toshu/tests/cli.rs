//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective. Every test that
//! touches state points `--data-dir` at its own temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// A command with `--data-dir` set to `<tmp>/data`.
fn cmd_in(tmp: &TempDir) -> Command {
    let mut c = cmd();
    c.arg("--data-dir").arg(tmp.path().join("data"));
    c
}

/// Run with `--json` and parse stdout.
fn run_json(tmp: &TempDir, args: &[&str]) -> Value {
    let output = cmd_in(tmp)
        .arg("--json")
        .args(args)
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_reports_data_dir() {
    let tmp = TempDir::new().unwrap();
    let json = run_json(&tmp, &["info"]);
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    let data_dir = json["config"]["data_dir"].as_str().unwrap();
    assert!(data_dir.ends_with("data"), "unexpected data dir: {data_dir}");
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_and_verbose_flags_accepted() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp).args(["-q", "info"]).assert().success();
    cmd_in(&tmp).args(["-vv", "info"]).assert().success();
}

#[test]
fn color_choices_accepted() {
    let tmp = TempDir::new().unwrap();
    for choice in ["auto", "always", "never"] {
        cmd_in(&tmp)
            .args(["--color", choice, "info"])
            .assert()
            .success();
    }
}

// =============================================================================
// Stats Command
// =============================================================================

#[test]
fn stats_counts_words_in_file() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "draft.txt", "<b>one</b> two three");

    let json = run_json(&tmp, &["stats", &file]);
    assert_eq!(json["wordCount"], 3);
    assert_eq!(json["pageCount"], 1.0);
    assert_eq!(json["readingTime"], "1 min");
    assert!(json.get("sentenceCount").is_none());
}

#[test]
fn stats_detailed_adds_counts() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "draft.txt", "One two. Three four.\n\nFive.");

    let json = run_json(&tmp, &["stats", "--detailed", &file]);
    assert_eq!(json["wordCount"], 5);
    assert_eq!(json["sentenceCount"], 3);
    assert_eq!(json["paragraphCount"], 1);
}

#[test]
fn stats_of_500_words_rounds_reading_time_to_even() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "long.txt", &vec!["word"; 500].join(" "));

    let json = run_json(&tmp, &["stats", &file]);
    assert_eq!(json["readingTimeMinutes"], 2);
    assert_eq!(json["pageCount"], 2.0);
}

#[test]
fn stats_without_file_uses_stored_document() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp)
        .args(["document", "set", "--text", "alpha beta gamma delta"])
        .assert()
        .success();

    let json = run_json(&tmp, &["stats"]);
    assert_eq!(json["wordCount"], 4);
}

#[test]
fn stats_text_output_is_readable() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "draft.txt", "one two three");

    cmd_in(&tmp)
        .args(["--color", "never", "stats", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words: 3"))
        .stdout(predicate::str::contains("Reading time: 1 min"));
}

#[test]
fn piped_output_is_not_colored() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "draft.txt", "one two three");

    cmd_in(&tmp)
        .args(["stats", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words: 3"))
        .stdout(predicate::str::contains('\u{1b}').not());
    cmd_in(&tmp)
        .args(["refs", "add", "A source"])
        .assert()
        .success()
        .stdout(predicate::str::contains('\u{1b}').not());
}

#[test]
fn unusable_log_path_does_not_fail_the_command() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "draft.txt", "one two three");

    cmd_in(&tmp)
        .env("TOSHU_LOG_PATH", tmp.path())
        .args(["stats", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words: 3"))
        .stderr(predicate::str::contains("file logging disabled"));
}

#[test]
fn stats_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp)
        .args(["stats", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn stats_rejects_input_over_limit() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "big.txt", &"word ".repeat(100));
    let config = write(tmp.path(), "limits.toml", "max_input_bytes = 64\n");

    cmd_in(&tmp)
        .args(["--config", &config, "stats", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn stats_save_report_writes_file() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "draft.txt", "one two three");

    cmd_in(&tmp)
        .args(["--color", "never", "stats", &file, "--save-report"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved:"));

    let reports: Vec<_> = fs::read_dir(tmp.path().join("data").join("reports"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("stats_"));
    assert!(reports[0].ends_with(".txt"));
}

// =============================================================================
// Style Command
// =============================================================================

#[test]
fn style_flags_irregular_spacing() {
    let tmp = TempDir::new().unwrap();
    let file = write(
        tmp.path(),
        "draft.txt",
        "one two three four five six seven eight nine ten    eleven",
    );

    let json = run_json(&tmp, &["style", &file]);
    let issues = json.as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["id"], "spacing");
    assert_eq!(issues[0]["type"], "formatting");
}

#[test]
fn style_flags_long_sentence() {
    let tmp = TempDir::new().unwrap();
    let long = vec!["word"; 35].join(" ");
    let file = write(tmp.path(), "draft.txt", &format!("Short start. {long}. End."));

    let json = run_json(&tmp, &["style", &file]);
    assert_eq!(json[0]["id"], "1");
    assert_eq!(json[0]["severity"], "warning");
    assert!(json[0]["text"].as_str().unwrap().ends_with("..."));
}

#[test]
fn style_clean_text_passes() {
    let tmp = TempDir::new().unwrap();
    let file = write(
        tmp.path(),
        "draft.txt",
        "The cat sat on the mat. The dog ran in the yard. Birds sang.",
    );

    cmd_in(&tmp)
        .args(["--color", "never", "style", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("No style issues found."));
}

#[test]
fn style_ignores_markdown_code_blocks() {
    let tmp = TempDir::new().unwrap();
    let file = write(
        tmp.path(),
        "notes.md",
        "# Notes\n\nA short line of prose that has more than ten words in it.\n\n```\nlet    x    =    1;\n```\n",
    );

    let json = run_json(&tmp, &["style", &file]);
    assert!(json.as_array().unwrap().is_empty());
}

// =============================================================================
// Compare Command
// =============================================================================

#[test]
fn compare_reports_three_metrics() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.txt", "the cat sat");
    let b = write(tmp.path(), "b.txt", "the cat ran away");

    let json = run_json(&tmp, &["compare", &a, &b]);
    assert_eq!(json["jaccardPercent"], 40.0);
    assert!(json["cosinePercent"].as_f64().is_some());
    assert!(json["vocabOverlapPercent"].as_f64().unwrap() > 66.0);
}

#[test]
fn compare_text_output_uses_percentages() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.txt", "the cat sat");
    let b = write(tmp.path(), "b.txt", "the cat sat");

    cmd_in(&tmp)
        .args(["--color", "never", "compare", &a, &b])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jaccard (unique word overlap): 100.00%"));
}

#[test]
fn compare_blank_file_fails() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.txt", "   ");
    let b = write(tmp.path(), "b.txt", "some words");

    cmd_in(&tmp)
        .args(["compare", &a, &b])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot compare"));
}

#[test]
fn compare_save_report_uses_custom_prefix() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.txt", "one two");
    let b = write(tmp.path(), "b.txt", "two three");

    cmd_in(&tmp)
        .args(["compare", &a, &b, "--save-report", "essay"])
        .assert()
        .success();

    let entry = fs::read_dir(tmp.path().join("data").join("reports"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    let name = entry.file_name().into_string().unwrap();
    assert!(name.starts_with("essay_"));
    let content = fs::read_to_string(entry.path()).unwrap();
    assert!(content.contains("Jaccard"));
    assert!(!content.contains('\u{1b}'), "report must not contain color codes");
}

// =============================================================================
// Document Command
// =============================================================================

#[test]
fn document_set_and_show_round_trip() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "chapter.txt", "<p>It was a dark night.</p>");

    cmd_in(&tmp).args(["document", "set", &file]).assert().success();

    cmd_in(&tmp)
        .args(["document", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>It was a dark night.</p>"));
    assert!(tmp.path().join("data").join("document.txt").is_file());
}

#[test]
fn document_show_json_counts_words() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp)
        .args(["document", "set", "--text", "three little words"])
        .assert()
        .success();

    let json = run_json(&tmp, &["document", "show"]);
    assert_eq!(json["content"], "three little words");
    assert_eq!(json["wordCount"], 3);
}

#[test]
fn document_word_count_skips_markup() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp)
        .args(["--color", "never", "document", "set", "--text", "<p>three little words</p>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 words)"));

    let json = run_json(&tmp, &["document", "show"]);
    assert_eq!(json["content"], "<p>three little words</p>");
    assert_eq!(json["wordCount"], 3);
}

#[test]
fn document_set_requires_input() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp).args(["document", "set"]).assert().failure();
}

// =============================================================================
// Refs Command
// =============================================================================

#[test]
fn refs_add_list_delete() {
    let tmp = TempDir::new().unwrap();

    let first = run_json(&tmp, &["refs", "add", "Strunk, The Elements of Style"]);
    assert_eq!(first["id"], 1);
    let second = run_json(&tmp, &["refs", "add", "Orwell, Politics and the English Language"]);
    assert_eq!(second["id"], 2);

    let listed = run_json(&tmp, &["refs", "list"]);
    assert_eq!(listed.as_array().unwrap().len(), 2);
    assert_eq!(listed[1]["text"], "Orwell, Politics and the English Language");

    let deleted = run_json(&tmp, &["refs", "delete", "1"]);
    assert_eq!(deleted["deleted"], true);

    let listed = run_json(&tmp, &["refs", "list"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], 2);
}

#[test]
fn refs_delete_unknown_id_succeeds() {
    let tmp = TempDir::new().unwrap();
    let json = run_json(&tmp, &["refs", "delete", "42"]);
    assert_eq!(json["deleted"], false);
}

#[test]
fn refs_add_blank_text_fails() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp)
        .args(["refs", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference text is empty"));
}

#[test]
fn refs_are_persisted_as_json() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp).args(["refs", "add", "Zinsser"]).assert().success();

    let raw = fs::read_to_string(tmp.path().join("data").join("references.json")).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["text"], "Zinsser");
    assert!(json[0]["added"].is_string());
}

// =============================================================================
// Notes Command
// =============================================================================

#[test]
fn notes_set_and_show() {
    let tmp = TempDir::new().unwrap();
    let notes = r##"[{"id": 1, "content": "Check citations", "color": "#FEF3C7"}]"##;

    cmd_in(&tmp)
        .args(["notes", "set", "--json-text", notes])
        .assert()
        .success();

    let json = run_json(&tmp, &["notes", "show"]);
    assert_eq!(json[0]["content"], "Check citations");
    assert_eq!(json[0]["color"], "#FEF3C7");
}

#[test]
fn notes_set_rejects_non_array() {
    let tmp = TempDir::new().unwrap();
    cmd_in(&tmp)
        .args(["notes", "set", "--json-text", r#"{"id": 1}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a JSON array"));
}

#[test]
fn notes_show_empty_by_default() {
    let tmp = TempDir::new().unwrap();
    let json = run_json(&tmp, &["notes", "show"]);
    assert_eq!(json, Value::Array(Vec::new()));
}
