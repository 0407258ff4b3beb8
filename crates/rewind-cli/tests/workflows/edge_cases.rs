//! Error-path workflows: exit codes and messages

use crate::common::cli::RwCommand;
use anyhow::Result;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_commands_outside_repository() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::write(root.join("file.txt"), "content\n")?;

    for args in [
        vec!["add", "file.txt"],
        vec!["update", "file.txt"],
        vec!["diff", "file.txt"],
        vec!["log", "file.txt"],
        vec!["get", "file.txt", "1"],
    ] {
        let result = RwCommand::new(root).args(&args).assert_failure()?;
        assert_eq!(result.exit_code, 1, "wrong exit code for {args:?}");
        assert!(
            result
                .stderr
                .contains("Current directory is not in a repository"),
            "wrong message for {args:?}: {}",
            result.stderr
        );
    }

    Ok(())
}

#[test]
fn test_operations_on_untracked_file() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::write(root.join("file.txt"), "content\n")?;
    RwCommand::new(root).args(&["init"]).assert_success()?;

    for args in [
        vec!["update", "file.txt"],
        vec!["diff", "file.txt"],
        vec!["log", "file.txt"],
        vec!["get", "file.txt", "1"],
    ] {
        let result = RwCommand::new(root).args(&args).assert_failure()?;
        assert_eq!(result.exit_code, 1, "wrong exit code for {args:?}");
        assert!(
            result.stderr.contains("file.txt is not in the repository"),
            "wrong message for {args:?}: {}",
            result.stderr
        );
    }

    Ok(())
}

#[test]
fn test_add_file_outside_repository_root() -> Result<()> {
    let dir = TempDir::new()?;
    let repo = dir.path().join("repo");
    fs::create_dir_all(&repo)?;
    fs::write(dir.path().join("outside.txt"), "content\n")?;

    RwCommand::new(&repo).args(&["init"]).assert_success()?;

    let result = RwCommand::new(&repo)
        .args(&["add", "../outside.txt"])
        .assert_failure()?;
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("is not within the repository"));

    Ok(())
}

#[test]
fn test_init_under_existing_repository() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();
    RwCommand::new(root).args(&["init"]).assert_success()?;

    let sub = root.join("sub");
    fs::create_dir_all(&sub)?;
    let result = RwCommand::new(&sub).args(&["init"]).assert_failure()?;
    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("The repository already exists in"));
    assert!(!sub.join(".rw").exists());

    Ok(())
}

#[test]
fn test_get_unknown_version() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::write(root.join("file.txt"), "first\n")?;
    RwCommand::new(root).args(&["init"]).assert_success()?;
    RwCommand::new(root)
        .args(&["add", "file.txt"])
        .assert_success()?;

    let result = RwCommand::new(root)
        .args(&["get", "file.txt", "5"])
        .assert_failure()?;
    assert_eq!(result.exit_code, 4);
    assert!(result.stderr.contains("file.txt has no version 5"));
    assert_eq!(fs::read_to_string(root.join("file.txt"))?, "first\n");

    Ok(())
}

#[test]
fn test_get_with_corrupt_delta_chain() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::write(root.join("file.txt"), "first\n")?;
    RwCommand::new(root).args(&["init"]).assert_success()?;
    RwCommand::new(root)
        .args(&["add", "file.txt"])
        .assert_success()?;

    fs::write(root.join("file.txt"), "first\nsecond\n")?;
    RwCommand::new(root)
        .args(&["update", "file.txt"])
        .assert_success()?;

    fs::write(
        root.join(".rw/tree/file.txt/versions/1.diff"),
        "scrambled\n",
    )?;

    let result = RwCommand::new(root)
        .args(&["get", "file.txt", "1"])
        .assert_failure()?;
    assert_eq!(result.exit_code, 5);
    assert!(result.stderr.contains("failed to restore file.txt to version 1"));
    // The working copy survives a failed restore.
    assert_eq!(
        fs::read_to_string(root.join("file.txt"))?,
        "first\nsecond\n"
    );

    Ok(())
}

#[test]
fn test_log_with_empty_history() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::write(root.join("file.txt"), "first\n")?;
    RwCommand::new(root).args(&["init"]).assert_success()?;
    RwCommand::new(root)
        .args(&["add", "file.txt"])
        .assert_success()?;

    let result = RwCommand::new(root)
        .args(&["log", "file.txt"])
        .assert_success()?;
    assert_eq!(result.stdout, "");

    Ok(())
}
