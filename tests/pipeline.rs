//! End-to-end pipeline execution against real processes.
//!
//! These tests drive the library the way the read loop does: record the
//! line, then hand it to the executor. Output assertions go through file
//! redirections so nothing depends on capturing the test harness's streams.

use std::fs;
use std::path::PathBuf;

use shoal::builtins::BuiltinRegistry;
use shoal::exec::StageOutcome;
use shoal::{Session, exec};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shoal-e2e-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run(session: &mut Session, line: &str) -> Vec<StageOutcome> {
    let registry = BuiltinRegistry::new();
    session.record(line);
    exec::run_line(session, &registry, line)
}

fn read(path: &PathBuf) -> String {
    fs::read_to_string(path).expect("read redirect target")
}

#[test]
fn echo_redirects_to_file() {
    let dir = temp_dir("echo-redirect");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    run(&mut session, &format!("echo hello > {}", out.display()));
    assert_eq!(read(&out), "hello\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn redirect_creates_missing_directories() {
    let dir = temp_dir("mkdirs");
    let out = dir.join("deep/nested/out.txt");
    let mut session = Session::from_env();

    run(&mut session, &format!("echo made it > {}", out.display()));
    assert_eq!(read(&out), "made it\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn truncate_replaces_existing_content() {
    let dir = temp_dir("truncate");
    let out = dir.join("out.txt");
    fs::write(&out, "previous contents that are longer\n").expect("seed file");
    let mut session = Session::from_env();

    run(&mut session, &format!("echo new > {}", out.display()));
    assert_eq!(read(&out), "new\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn append_accumulates() {
    let dir = temp_dir("append");
    let out = dir.join("log.txt");
    let mut session = Session::from_env();

    run(&mut session, &format!("echo one >> {}", out.display()));
    run(&mut session, &format!("echo two >> {}", out.display()));
    assert_eq!(read(&out), "one\ntwo\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn builtin_pipes_into_external() {
    let dir = temp_dir("builtin-to-cat");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    let outcomes = run(&mut session, &format!("echo one two | cat > {}", out.display()));
    assert_eq!(read(&out), "one two\n");
    assert!(outcomes.contains(&StageOutcome::Builtin {
        name: "echo".into()
    }));
    assert!(outcomes.contains(&StageOutcome::Exited {
        name: "cat".into(),
        code: Some(0)
    }));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn three_stage_pipeline() {
    let dir = temp_dir("three-stages");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    run(
        &mut session,
        &format!("echo shoal rocks | cat | tr a-z A-Z > {}", out.display()),
    );
    assert_eq!(read(&out), "SHOAL ROCKS\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn stderr_redirects_to_file() {
    let dir = temp_dir("stderr");
    let err = dir.join("err.txt");
    let mut session = Session::from_env();

    let outcomes = run(
        &mut session,
        &format!("cat /definitely/missing/shoal-file 2> {}", err.display()),
    );
    assert!(!read(&err).is_empty());
    assert!(matches!(
        outcomes.as_slice(),
        [StageOutcome::Exited { code, .. }] if *code != Some(0)
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unresolved_command_reports_not_found() {
    let mut session = Session::from_env();
    let outcomes = run(&mut session, "nosuchcmd_shoal_xyz");
    assert_eq!(
        outcomes,
        vec![StageOutcome::NotFound {
            name: "nosuchcmd_shoal_xyz".into()
        }]
    );
}

#[test]
fn unresolved_middle_stage_does_not_abort_siblings() {
    let dir = temp_dir("middle-missing");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    let outcomes = run(
        &mut session,
        &format!("echo hi | nosuchcmd_shoal_xyz | cat > {}", out.display()),
    );
    assert!(outcomes.contains(&StageOutcome::NotFound {
        name: "nosuchcmd_shoal_xyz".into()
    }));
    assert!(outcomes.contains(&StageOutcome::Exited {
        name: "cat".into(),
        code: Some(0)
    }));
    // The middle stage's error destination is its pipe, so the notice is
    // what reaches the final stage.
    assert_eq!(read(&out), "nosuchcmd_shoal_xyz: command not found\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn builtin_as_final_stage_drains_its_input() {
    let dir = temp_dir("builtin-final");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    let outcomes = run(&mut session, &format!("echo upstream | echo bye > {}", out.display()));
    assert_eq!(read(&out), "bye\n");
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, StageOutcome::Builtin { .. }))
            .count(),
        2
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn mutating_builtin_is_rejected_inside_pipelines() {
    let dir = temp_dir("cd-in-pipe");
    let err = dir.join("err.txt");
    let mut session = Session::from_env();

    let outcomes = run(
        &mut session,
        &format!("echo hi | cd /tmp 2> {}", err.display()),
    );
    assert!(outcomes.contains(&StageOutcome::Skipped { name: "cd".into() }));
    assert_eq!(read(&err), "cd: cannot be used inside a pipeline\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cd_changes_the_working_directory() {
    let dir = temp_dir("cd");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    run(&mut session, &format!("cd {}", dir.display()));
    run(&mut session, &format!("pwd > {}", out.display()));
    let expected = fs::canonicalize(&dir).expect("canonicalize");
    assert_eq!(read(&out).trim_end(), expected.display().to_string());
    // Move the test process somewhere stable before cleanup.
    std::env::set_current_dir("/").expect("restore cwd");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn exit_with_non_zero_argument_keeps_the_shell_alive() {
    let mut session = Session::from_env();
    let outcomes = run(&mut session, "exit 1");
    assert_eq!(outcomes, vec![StageOutcome::Builtin { name: "exit".into() }]);
}

#[test]
fn type_classifies_builtins_and_path_entries() {
    let dir = temp_dir("type");
    let out = dir.join("out.txt");
    let err = dir.join("err.txt");
    let mut session = Session::from_env();

    run(&mut session, &format!("type cd > {}", out.display()));
    assert_eq!(read(&out), "cd is a shell builtin\n");

    run(&mut session, &format!("type cat > {}", out.display()));
    let line = read(&out);
    assert!(line.starts_with("cat is /"), "unexpected: {line}");

    run(
        &mut session,
        &format!("type nonexistent_cmd_xyz 2> {}", err.display()),
    );
    assert_eq!(read(&err), "nonexistent_cmd_xyz: not found\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn history_lists_the_last_n_with_absolute_indices() {
    let dir = temp_dir("history");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    run(&mut session, "echo one");
    run(&mut session, "echo two");
    run(&mut session, "echo three");
    run(&mut session, "echo four");
    let line = format!("history 2 > {}", out.display());
    run(&mut session, &line);
    assert_eq!(read(&out), format!("    4  echo four\n    5  {line}\n"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn quoted_arguments_survive_to_external_commands() {
    let dir = temp_dir("quoting");
    let out = dir.join("out.txt");
    let mut session = Session::from_env();

    run(&mut session, &format!("echo 'a|b' \"c d\" > {}", out.display()));
    assert_eq!(read(&out), "a|b c d\n");
    let _ = fs::remove_dir_all(&dir);
}
