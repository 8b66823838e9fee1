use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Rebase todo used by the rewrite tests.
const TODO: &str = "pick 4a5fd18 Add parser\npick 9c2b1f0 Fix tests\npick e77d03c Update docs\n";

fn quill() -> Result<Command> {
    Ok(Command::cargo_bin("quill")?)
}

/// Plain repository fixture: a canonical root carrying a .git directory
/// and one tracked file under src/.
fn plain_repo() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let root = dir.path().canonicalize()?.join("repo");
    fs::create_dir_all(root.join(".git"))?;
    fs::create_dir(root.join("src"))?;
    fs::write(root.join("src/main.rs"), "fn main() {}\n")?;
    Ok((dir, root))
}

/// Test that rev-parse prints every repository variable in order
#[test]
fn test_rev_parse_prints_all_variables() -> Result<()> {
    let (_dir, root) = plain_repo()?;

    let expected = format!(
        "GIT_COMMON_DIR={git}\nGIT_DIR={git}\nGIT_SUPER_WORK_TREE={root}\nGIT_WORK_TREE={root}\n",
        git = root.join(".git").display(),
        root = root.display(),
    );
    quill()?
        .arg("rev-parse")
        .arg(root.join("src/main.rs"))
        .assert()
        .success()
        .stdout(expected);
    Ok(())
}

/// Test that --var prints a single value with no decoration
#[test]
fn test_rev_parse_single_variable() -> Result<()> {
    let (_dir, root) = plain_repo()?;

    quill()?
        .arg("rev-parse")
        .arg(root.join("src/main.rs"))
        .args(["--var", "GIT_WORK_TREE"])
        .assert()
        .success()
        .stdout(format!("{}\n", root.display()));

    quill()?
        .arg("rev-parse")
        .arg(root.join("src/main.rs"))
        .args(["--var", "GIT_DIR"])
        .assert()
        .success()
        .stdout(format!("{}\n", root.join(".git").display()));
    Ok(())
}

/// Test that an unrecognized variable name is rejected
#[test]
fn test_rev_parse_unknown_variable_fails() -> Result<()> {
    let (_dir, root) = plain_repo()?;

    quill()?
        .arg("rev-parse")
        .arg(&root.join("src"))
        .args(["--var", "GIT_BRANCH"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variable: GIT_BRANCH"));
    Ok(())
}

/// Test the JSON rendering of the resolved variables
#[test]
fn test_rev_parse_json_output() -> Result<()> {
    let (_dir, root) = plain_repo()?;

    let assert = quill()?
        .arg("rev-parse")
        .arg(root.join("src/main.rs"))
        .arg("--json")
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;

    assert_eq!(
        value["GIT_WORK_TREE"].as_str(),
        Some(root.display().to_string().as_str())
    );
    assert_eq!(
        value["GIT_COMMON_DIR"].as_str(),
        Some(root.join(".git").display().to_string().as_str())
    );
    assert_eq!(value.as_object().map(|map| map.len()), Some(4));
    Ok(())
}

/// Test the failure mode outside any repository
#[test]
fn test_rev_parse_outside_repository_fails() -> Result<()> {
    let dir = TempDir::new()?;

    quill()?
        .arg("rev-parse")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a git repository"));
    Ok(())
}

/// Test section-name completion inside a header
#[test]
fn test_complete_section_names() -> Result<()> {
    let dir = TempDir::new()?;
    let file = dir.path().join("config");
    fs::write(&file, "[co")?;

    quill()?
        .arg("complete")
        .arg(&file)
        .args(["--at", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core\tsection\tcore\n"))
        .stdout(predicate::str::contains(
            "branch \"<name>\"\tsection\tbranch \"${1:<name>}\"\n",
        ));
    Ok(())
}

/// Test key completion in key position, with the assignment appended
#[test]
fn test_complete_keys_with_assignment() -> Result<()> {
    let dir = TempDir::new()?;
    let file = dir.path().join("config");
    fs::write(&file, "[user]\n\t")?;

    let expected = "email\tkey\temail = \n\
                    name\tkey\tname = \n\
                    signingKey\tkey\tsigningKey = \n\
                    useConfigOnly\tkey\tuseConfigOnly = \n";
    quill()?
        .arg("complete")
        .arg(&file)
        .args(["--at", "8"])
        .assert()
        .success()
        .stdout(expected);
    Ok(())
}

/// Test that value position offers nothing
#[test]
fn test_complete_value_position_is_silent() -> Result<()> {
    let dir = TempDir::new()?;
    let file = dir.path().join("config");
    let text = "[user]\n\tname = J";
    fs::write(&file, text)?;

    quill()?
        .arg("complete")
        .arg(&file)
        .args(["--at", &text.len().to_string()])
        .assert()
        .success()
        .stdout("");
    Ok(())
}

/// Test reading the document from stdin
#[test]
fn test_complete_reads_stdin() -> Result<()> {
    quill()?
        .args(["complete", "-", "--at", "2"])
        .write_stdin("[co")
        .assert()
        .success()
        .stdout(predicate::str::contains("core\tsection\tcore\n"));
    Ok(())
}

/// Test the JSON completion output, including the null no-answer case
#[test]
fn test_complete_json_output() -> Result<()> {
    let dir = TempDir::new()?;
    let file = dir.path().join("config");
    fs::write(&file, "[user]\n\t")?;

    let assert = quill()?
        .arg("complete")
        .arg(&file)
        .args(["--at", "8", "--json"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["inhibit_word_completions"], serde_json::json!(true));
    assert_eq!(value["items"][0]["label"], serde_json::json!("email"));

    // Value position answers null rather than an empty item list.
    let text = "[user]\n\tname = J";
    fs::write(&file, text)?;
    quill()?
        .arg("complete")
        .arg(&file)
        .args(["--at", &text.len().to_string(), "--json"])
        .assert()
        .success()
        .stdout("null\n");
    Ok(())
}

/// Test rewriting selected todo lines by line number
#[test]
fn test_rebase_rewrites_lines() -> Result<()> {
    let dir = TempDir::new()?;
    let todo = dir.path().join("git-rebase-todo");
    fs::write(&todo, TODO)?;

    quill()?
        .args(["rebase", "squash"])
        .arg(&todo)
        .args(["--line", "2"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&todo)?,
        "pick 4a5fd18 Add parser\nsquash 9c2b1f0 Fix tests\npick e77d03c Update docs\n"
    );
    Ok(())
}

/// Test rewriting through a byte-offset selection
#[test]
fn test_rebase_rewrites_at_offset() -> Result<()> {
    let dir = TempDir::new()?;
    let todo = dir.path().join("git-rebase-todo");
    fs::write(&todo, TODO)?;

    // Offset 30 sits in the middle of the second line.
    quill()?
        .args(["rebase", "edit"])
        .arg(&todo)
        .args(["--at", "30"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&todo)?,
        "pick 4a5fd18 Add parser\nedit 9c2b1f0 Fix tests\npick e77d03c Update docs\n"
    );
    Ok(())
}

/// Test that an unknown keyword is rejected before the file is touched
///
/// The error must reach the user on stderr and the todo file must stay
/// byte-for-byte identical.
#[test]
fn test_rebase_rejects_unknown_keyword() -> Result<()> {
    let dir = TempDir::new()?;
    let todo = dir.path().join("git-rebase-todo");
    fs::write(&todo, TODO)?;

    quill()?
        .args(["rebase", "sqaush"])
        .arg(&todo)
        .args(["--line", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: Invalid command: sqaush"));

    assert_eq!(fs::read_to_string(&todo)?, TODO);
    Ok(())
}

/// Test that --dry-run prints the rewrite without saving it
#[test]
fn test_rebase_dry_run_leaves_file_alone() -> Result<()> {
    let dir = TempDir::new()?;
    let todo = dir.path().join("git-rebase-todo");
    fs::write(&todo, TODO)?;

    quill()?
        .args(["rebase", "fixup"])
        .arg(&todo)
        .args(["--line", "3", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fixup e77d03c Update docs"));

    assert_eq!(fs::read_to_string(&todo)?, TODO);
    Ok(())
}

/// Test that out-of-range line numbers warn and change nothing
#[test]
fn test_rebase_skips_lines_past_the_end() -> Result<()> {
    let dir = TempDir::new()?;
    let todo = dir.path().join("git-rebase-todo");
    fs::write(&todo, TODO)?;

    quill()?
        .args(["rebase", "drop"])
        .arg(&todo)
        .args(["--line", "99"])
        .assert()
        .success()
        .stderr(predicate::str::contains("past the end"));

    assert_eq!(fs::read_to_string(&todo)?, TODO);
    Ok(())
}

/// Test that open-file prints the expanded template path
#[test]
fn test_open_file_prints_resolved_path() -> Result<()> {
    let (_dir, root) = plain_repo()?;

    quill()?
        .args(["open-file", "$GIT_DIR/config", "--path"])
        .arg(root.join("src/main.rs"))
        .assert()
        .success()
        .stdout(format!("{}\n", root.join(".git/config").display()));
    Ok(())
}

/// Test the JSON form of an open request
#[test]
fn test_open_file_json_output() -> Result<()> {
    let (_dir, root) = plain_repo()?;

    let assert = quill()?
        .args(["open-file", "$GIT_COMMON_DIR/config", "--path"])
        .arg(root.join("src/main.rs"))
        .args(["--syntax", "Git Config", "--transient", "--json"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;

    assert_eq!(
        value["path"].as_str(),
        Some(root.join(".git/config").display().to_string().as_str())
    );
    assert_eq!(value["syntax"], serde_json::json!("Git Config"));
    assert_eq!(value["transient"], serde_json::json!(true));
    Ok(())
}

/// Test open-file failure outside a repository
#[test]
fn test_open_file_outside_repository_fails() -> Result<()> {
    let dir = TempDir::new()?;
    let stray = dir.path().join("file.txt");
    fs::write(&stray, "")?;

    quill()?
        .args(["open-file", "$GIT_DIR/config", "--path"])
        .arg(&stray)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
    Ok(())
}

/// Test shell completion generation
#[test]
fn test_completions_generates_bash_script() -> Result<()> {
    quill()?
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quill"));
    Ok(())
}

/// Test the unknown-subcommand error path
#[test]
fn test_unknown_subcommand_fails() -> Result<()> {
    quill()?
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: frobnicate"));
    Ok(())
}

/// Test the top-level version flag
#[test]
fn test_version_flag() -> Result<()> {
    quill()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quill 0.4.2"));
    Ok(())
}
