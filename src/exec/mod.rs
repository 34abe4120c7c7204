//! Pipeline execution: stage classification, pipe wiring, concurrent
//! dispatch, and the completion barrier.
//!
//! Stages launch left to right. Each non-last stage owns the write end of
//! the pipe to its successor and nothing else holds one, so a downstream
//! reader observes end-of-stream exactly when its producer is done.
//! External stages are OS processes; builtin stages are threads sharing
//! only their stream endpoints and a session snapshot.

mod lookup;
mod stream;

pub use lookup::{find_in_path, is_executable};
pub use stream::{StageInput, StageIo, StageOutput};

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command};
use std::thread;

use anyhow::{Context, Result};
use log::{debug, warn};
use os_pipe::PipeReader;

use crate::builtins::{Builtin, BuiltinIo, BuiltinRegistry};
use crate::parse::{self, ParsedCommand, Redirections};
use crate::session::Session;

/// What became of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// A builtin stage completed.
    Builtin { name: String },
    /// An external process exited (`code` is `None` on signal death).
    Exited { name: String, code: Option<i32> },
    /// The name matched no builtin and no PATH entry; nothing was spawned.
    NotFound { name: String },
    /// Wiring or spawning failed, or the stage was rejected; it did not run.
    Skipped { name: String },
}

/// Execute one raw input line end to end.
pub fn run_line(
    session: &mut Session,
    registry: &BuiltinRegistry,
    line: &str,
) -> Vec<StageOutcome> {
    run_pipeline(session, registry, &parse::segment(line))
}

/// Execute an already-segmented pipeline: wire every stage, launch them
/// left to right, then wait for all of them in any order.
///
/// A stage's failure (unresolved name, spawn error, unopenable redirect
/// target) is local: it is reported on that stage's error destination or
/// the shell's own stderr, recorded in the outcome list, and never aborts
/// sibling stages.
pub fn run_pipeline(
    session: &mut Session,
    registry: &BuiltinRegistry,
    stages: &[String],
) -> Vec<StageOutcome> {
    enum StageHandle<'scope> {
        Builtin(String, thread::ScopedJoinHandle<'scope, std::io::Result<()>>),
        External(String, Child),
    }

    let count = stages.len();
    let mut outcomes = Vec::new();

    thread::scope(|scope| {
        let mut handles: Vec<StageHandle<'_>> = Vec::new();
        let mut prev_reader: Option<PipeReader> = None;

        for (idx, raw) in stages.iter().enumerate() {
            let is_last = idx + 1 == count;

            // Redirections are only meaningful on the final stage; earlier
            // stages' streams are inter-stage pipes.
            let (text, redirs) = if is_last {
                (parse::strip(raw), parse::resolve(raw))
            } else {
                (raw.clone(), Redirections::default())
            };

            let Some(cmd) = parse::tokenize(&text) else {
                continue;
            };

            let stdin = match prev_reader.take() {
                Some(r) => StageInput::Pipe(r),
                None => StageInput::Inherit,
            };

            let (stdout, stderr) = if is_last {
                match open_final_outputs(&redirs) {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!("output wiring failed for '{}': {e:#}", cmd.name);
                        eprintln!("shoal: {e:#}");
                        outcomes.push(StageOutcome::Skipped { name: cmd.name });
                        continue;
                    }
                }
            } else {
                match stage_pipe() {
                    Ok((stdout, stderr, reader)) => {
                        prev_reader = Some(reader);
                        (stdout, stderr)
                    }
                    Err(e) => {
                        warn!("pipe allocation failed for '{}': {e}", cmd.name);
                        eprintln!("shoal: {e}");
                        outcomes.push(StageOutcome::Skipped { name: cmd.name });
                        continue;
                    }
                }
            };

            let io = StageIo {
                stdin,
                stdout,
                stderr,
            };

            if let Some(builtin) = registry.get(&cmd.name) {
                if count == 1 {
                    // Sole stage: run on the loop thread against live state.
                    let (_, mut out, mut err) = io.into_builtin_parts();
                    let result = builtin.run(
                        &cmd,
                        session,
                        &mut BuiltinIo {
                            out: &mut *out,
                            err: &mut *err,
                        },
                    );
                    if let Err(e) = result.and_then(|()| out.flush()) {
                        debug!("builtin '{}' I/O error: {e}", cmd.name);
                    }
                    outcomes.push(StageOutcome::Builtin { name: cmd.name });
                } else if builtin.mutates_session() {
                    // Session-mutating builtins only run as a sole stage;
                    // DESIGN.md records the pipeline-position policy.
                    let (_, _, mut err) = io.into_builtin_parts();
                    let _ = writeln!(err, "{}: cannot be used inside a pipeline", cmd.name);
                    outcomes.push(StageOutcome::Skipped { name: cmd.name });
                } else {
                    let snapshot = session.clone();
                    let name = cmd.name.clone();
                    let handle =
                        scope.spawn(move || run_builtin_stage(builtin, &cmd, snapshot, io));
                    handles.push(StageHandle::Builtin(name, handle));
                }
            } else if let Some(path) = find_in_path(&cmd.name, session.path_dirs()) {
                match spawn_external(&path, &cmd, io) {
                    Ok(child) => handles.push(StageHandle::External(cmd.name, child)),
                    Err(e) => {
                        warn!("{e:#}");
                        eprintln!("shoal: {e:#}");
                        outcomes.push(StageOutcome::Skipped { name: cmd.name });
                    }
                }
            } else {
                // Unresolved: a notice on the stage's error destination;
                // its endpoints drop here so downstream sees end-of-stream.
                let (_, _, mut err) = io.into_builtin_parts();
                let _ = writeln!(err, "{}: command not found", cmd.name);
                outcomes.push(StageOutcome::NotFound { name: cmd.name });
            }
        }

        for handle in handles {
            match handle {
                StageHandle::Builtin(name, join) => {
                    match join.join() {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => debug!("builtin '{name}' I/O error: {e}"),
                        Err(_) => warn!("builtin '{name}' panicked"),
                    }
                    outcomes.push(StageOutcome::Builtin { name });
                }
                StageHandle::External(name, mut child) => match child.wait() {
                    Ok(status) => {
                        if !status.success() {
                            debug!("'{name}' exited with {status}");
                        }
                        outcomes.push(StageOutcome::Exited {
                            name,
                            code: status.code(),
                        });
                    }
                    Err(e) => {
                        warn!("wait failed for '{name}': {e}");
                        outcomes.push(StageOutcome::Exited { name, code: None });
                    }
                },
            }
        }
    });

    outcomes
}

/// Run a builtin as a concurrent pipeline stage: drain pipe input to
/// end-of-stream first (full buffering, not streaming), then act on the
/// session snapshot.
fn run_builtin_stage(
    builtin: &dyn Builtin,
    cmd: &ParsedCommand,
    mut session: Session,
    io: StageIo,
) -> std::io::Result<()> {
    let (input, mut out, mut err) = io.into_builtin_parts();
    if builtin.drains_pipe()
        && let Some(mut reader) = input
    {
        let mut drained = Vec::new();
        reader.read_to_end(&mut drained)?;
    }
    builtin.run(
        cmd,
        &mut session,
        &mut BuiltinIo {
            out: &mut *out,
            err: &mut *err,
        },
    )?;
    out.flush()?;
    err.flush()
}

/// A pipe for one non-last stage: both of the stage's output streams feed
/// the write end; the read end becomes the next stage's input.
fn stage_pipe() -> std::io::Result<(StageOutput, StageOutput, PipeReader)> {
    let (reader, writer) = os_pipe::pipe()?;
    let err_writer = writer.try_clone()?;
    Ok((
        StageOutput::Pipe(writer),
        StageOutput::Pipe(err_writer),
        reader,
    ))
}

/// Resolve the final stage's streams: redirect targets (append wins over
/// truncate) or the shell's inherited streams.
fn open_final_outputs(redirs: &Redirections) -> Result<(StageOutput, StageOutput)> {
    let stdout = match redirs.stdout_target() {
        Some((path, mode)) => StageOutput::File(
            parse::open_target(path, mode)
                .with_context(|| format!("cannot open '{}'", path.display()))?,
        ),
        None => StageOutput::Inherit,
    };
    let stderr = match redirs.stderr_target() {
        Some((path, mode)) => StageOutput::File(
            parse::open_target(path, mode)
                .with_context(|| format!("cannot open '{}'", path.display()))?,
        ),
        None => StageOutput::InheritErr,
    };
    Ok((stdout, stderr))
}

/// Spawn an external stage on its resolved path, with `argv[0]` reset to
/// the typed name. The `Command` drops on return, closing the parent's
/// copies of any pipe ends it was handed.
fn spawn_external(path: &Path, cmd: &ParsedCommand, io: StageIo) -> Result<Child> {
    let mut command = Command::new(path);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.arg0(&cmd.name);
    }
    command
        .args(&cmd.args)
        .stdin(io.stdin.into_stdio())
        .stdout(io.stdout.into_stdio())
        .stderr(io.stderr.into_stdio())
        .spawn()
        .with_context(|| format!("failed to spawn '{}'", cmd.name))
}
