//! CLI behavior tests: exit codes, output formats, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const VAGUE_PROMPT: &str = "Tell me about AI";
const STRONG_PROMPT: &str = "Explain the key concepts of artificial intelligence and its current \
                             applications in healthcare for a high school student, in a numbered \
                             list of 5 items";

fn promptcheck_cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_promptcheck"));
    cmd.current_dir(dir);
    cmd
}

#[test]
fn no_args_returns_error_not_panic() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.assert().failure().code(2);
}

#[test]
fn inline_text_succeeds() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(VAGUE_PROMPT);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Score"));
}

#[test]
fn below_threshold_exit_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(VAGUE_PROMPT).arg("--threshold").arg("90");
    cmd.assert().failure().code(1);
}

#[test]
fn above_threshold_exit_0() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(STRONG_PROMPT).arg("--threshold").arg("60");
    cmd.assert().success();
}

#[test]
fn empty_text_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg("   ");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn stdin_input_works() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--stdin").write_stdin(STRONG_PROMPT);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Score"));
}

#[test]
fn json_output_valid() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(VAGUE_PROMPT).arg("--json");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert!(parsed.get("score").is_some());
    assert!(parsed.get("criteria").is_some());
    assert!(parsed.get("suggestions").is_some());
}

#[test]
fn json_criteria_have_scores_and_evidence() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(STRONG_PROMPT).arg("--json");
    let output = cmd.output().unwrap();
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
    let criteria = parsed["criteria"].as_array().unwrap();
    assert_eq!(criteria.len(), 5);
    for c in criteria {
        assert!(c.get("score").is_some());
        assert!(c.get("matched").is_some());
        assert!(c.get("missing").is_some());
    }
}

#[test]
fn criteria_subset_limits_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text")
        .arg(VAGUE_PROMPT)
        .arg("--json")
        .arg("--criteria")
        .arg("clarity,format");
    let output = cmd.output().unwrap();
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
    assert_eq!(parsed["criteria"].as_array().unwrap().len(), 2);
}

#[test]
fn unknown_criterion_warns_but_continues() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text")
        .arg(VAGUE_PROMPT)
        .arg("--criteria")
        .arg("clarity,tone");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("unknown criterion"));
}

#[test]
fn all_unknown_criteria_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(VAGUE_PROMPT).arg("--criteria").arg("tone");
    cmd.assert().failure().code(2);
}

#[test]
fn invalid_weight_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text")
        .arg(VAGUE_PROMPT)
        .arg("--weight")
        .arg("clarity=-3");
    cmd.assert().failure().code(2);
}

#[test]
fn weight_flag_changes_score() {
    let dir = tempfile::TempDir::new().unwrap();
    let plain = promptcheck_cmd(dir.path())
        .arg("--text")
        .arg(STRONG_PROMPT)
        .arg("--json")
        .output()
        .unwrap();
    let weighted = promptcheck_cmd(dir.path())
        .arg("--text")
        .arg(STRONG_PROMPT)
        .arg("--json")
        .arg("--weight")
        .arg("examples=5.0")
        .output()
        .unwrap();
    let plain_json: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&plain.stdout).trim()).unwrap();
    let weighted_json: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&weighted.stdout).trim()).unwrap();
    assert_ne!(plain_json["score"]["value"], weighted_json["score"]["value"]);
}

#[test]
fn file_not_found_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("nonexistent.prompt");
    cmd.assert().failure().code(2);
}

#[test]
fn prompt_file_is_evaluated() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("draft.prompt");
    fs::write(&file, STRONG_PROMPT).unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("draft.prompt");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("draft.prompt"));
}

#[test]
fn directory_batch_shows_summary() {
    let dir = tempfile::TempDir::new().unwrap();
    let prompts = dir.path().join("prompts");
    fs::create_dir(&prompts).unwrap();
    fs::write(prompts.join("a.txt"), VAGUE_PROMPT).unwrap();
    fs::write(prompts.join("b.txt"), STRONG_PROMPT).unwrap();
    fs::write(prompts.join("ignored.json"), "{}").unwrap();

    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("prompts");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Prompts evaluated: 2"));
}

#[test]
fn quiet_mode_one_line_per_prompt() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("draft.txt");
    fs::write(&file, VAGUE_PROMPT).unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("draft.txt").arg("--quiet").arg("--no-history");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim().lines().count(), 1);
}

#[test]
fn history_records_deltas_between_runs() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("draft.txt");
    fs::write(&file, VAGUE_PROMPT).unwrap();

    promptcheck_cmd(dir.path())
        .arg("draft.txt")
        .arg("--quiet")
        .assert()
        .success();
    assert!(dir.path().join(".promptcheck-history.json").exists());

    promptcheck_cmd(dir.path())
        .arg("draft.txt")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));
}

#[test]
fn no_history_flag_skips_file() {
    let dir = tempfile::TempDir::new().unwrap();
    promptcheck_cmd(dir.path())
        .arg("--text")
        .arg(VAGUE_PROMPT)
        .arg("--no-history")
        .assert()
        .success();
    assert!(!dir.path().join(".promptcheck-history.json").exists());
}

#[test]
fn verbose_shows_evidence() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(STRONG_PROMPT).arg("--verbose");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("found"));
}

#[test]
fn config_threshold_applies() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        dir.path().join(".promptcheckrc.json"),
        r#"{"threshold": 90}"#,
    )
    .unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(VAGUE_PROMPT);
    cmd.assert().failure().code(1);
}

#[test]
fn invalid_config_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        dir.path().join(".promptcheckrc.json"),
        r#"{"weights": {"clarity": 0}}"#,
    )
    .unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("--text").arg(VAGUE_PROMPT);
    cmd.assert().failure().code(2);
}

// --- init ---

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".promptcheckrc.json");
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert().success();
    assert!(config_path.exists(), ".promptcheckrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("threshold"));
    assert!(content.contains("criteria"));
}

#[test]
fn init_with_threshold_option() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = promptcheck_cmd(dir.path());
    cmd.arg("init")
        .arg("--dir")
        .arg(dir.path())
        .arg("--threshold")
        .arg("85");
    cmd.assert().success();

    let content = fs::read_to_string(dir.path().join(".promptcheckrc.json")).unwrap();
    assert!(content.contains("85"));
}

#[test]
fn init_refuses_overwrite() {
    let dir = tempfile::TempDir::new().unwrap();
    promptcheck_cmd(dir.path())
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();
    promptcheck_cmd(dir.path())
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(2);
}

#[test]
fn init_config_is_loadable() {
    let dir = tempfile::TempDir::new().unwrap();
    promptcheck_cmd(dir.path())
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();
    // A freshly initialized config should parse and apply cleanly
    promptcheck_cmd(dir.path())
        .arg("--text")
        .arg(STRONG_PROMPT)
        .assert()
        .success();
}
