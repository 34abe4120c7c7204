//! Types produced by the shell parsers and consumed by the executor.

use std::path::PathBuf;

/// How a redirection target file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>` / `1>` / `2>` — create or truncate
    Truncate,
    /// `>>` / `1>>` / `2>>` — create or append
    Append,
}

/// Redirection targets captured from one pipeline stage.
///
/// At most one capture per stream and mode (first match wins). When both a
/// truncate and an append capture exist for the same stream, append wins
/// when the writer is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirections {
    pub stdout: Option<PathBuf>,
    pub stderr: Option<PathBuf>,
    pub stdout_append: Option<PathBuf>,
    pub stderr_append: Option<PathBuf>,
}

impl Redirections {
    /// Effective target and mode for standard output.
    pub fn stdout_target(&self) -> Option<(&PathBuf, RedirectMode)> {
        self.stdout_append
            .as_ref()
            .map(|p| (p, RedirectMode::Append))
            .or_else(|| self.stdout.as_ref().map(|p| (p, RedirectMode::Truncate)))
    }

    /// Effective target and mode for standard error.
    pub fn stderr_target(&self) -> Option<(&PathBuf, RedirectMode)> {
        self.stderr_append
            .as_ref()
            .map(|p| (p, RedirectMode::Append))
            .or_else(|| self.stderr.as_ref().map(|p| (p, RedirectMode::Truncate)))
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.is_none()
            && self.stderr.is_none()
            && self.stdout_append.is_none()
            && self.stderr_append.is_none()
    }
}

/// One tokenized pipeline stage: a command name plus opaque argv entries.
///
/// Each argument is handed to the spawned process verbatim as a single argv
/// entry; there is no further word splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// The space-joined argument list (`echo` and `cd` operate on this form).
    pub fn arg_string(&self) -> String {
        self.args.join(" ")
    }
}
