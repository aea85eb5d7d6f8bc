use crate::common::command::{repository_dir, run_minigit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn new_repository_initiated_with_metadata_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata_path = repository_dir
        .path()
        .canonicalize()?
        .join(".minigit")
        .display()
        .to_string();

    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty minigit repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(metadata_path));

    repository_dir.child(".minigit/HEAD").assert("");
    repository_dir
        .child(".minigit/objects/blobs")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".minigit/objects/commits")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".minigit/index")
        .assert(predicate::path::is_file());

    Ok(())
}

#[rstest]
fn init_leaves_existing_files_alone(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("notes.txt").write_str("keep me")?;

    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir.child("notes.txt").assert("keep me");

    Ok(())
}

#[rstest]
fn init_twice_fails(repository_dir: TempDir) {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already initialized"));
}

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["show"])]
#[case(&["commit", "-m", "message"])]
#[case(&["ls-files"])]
fn commands_outside_a_repository_fail(repository_dir: TempDir, #[case] args: &[&str]) {
    run_minigit_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a minigit repository"));
}

#[rstest]
fn repository_can_be_named_explicitly(repository_dir: TempDir) {
    let target = repository_dir.path().join("nested").join("project");

    run_minigit_command(
        repository_dir.path(),
        &["-C", target.to_str().unwrap(), "init"],
    )
    .assert()
    .success();

    assert!(target.join(".minigit").is_dir());
    assert!(!repository_dir.path().join(".minigit").exists());
}
