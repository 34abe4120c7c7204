//! Process-wide shell state.

use std::env;
use std::path::PathBuf;

/// Session state threaded through the executor and builtin dispatch.
///
/// The history log is append-only: never reordered, never deduplicated.
/// The PATH directory list is snapshotted once at startup and read-only
/// afterwards. `Session` is `Clone` so builtin stages inside a concurrent
/// pipeline receive a point-in-time view; builtins that mutate state only
/// run on the loop thread against the live value. The working directory is
/// the process working directory and is not duplicated here.
#[derive(Debug, Clone, Default)]
pub struct Session {
    history: Vec<String>,
    path_dirs: Vec<PathBuf>,
}

impl Session {
    /// Build a session from the current environment, splitting `PATH` once.
    pub fn from_env() -> Self {
        let path_dirs = env::var_os("PATH")
            .map(|p| env::split_paths(&p).collect())
            .unwrap_or_default();
        Self {
            history: Vec::new(),
            path_dirs,
        }
    }

    /// A session with an explicit PATH snapshot.
    pub fn with_path_dirs(path_dirs: Vec<PathBuf>) -> Self {
        Self {
            history: Vec::new(),
            path_dirs,
        }
    }

    pub fn path_dirs(&self) -> &[PathBuf] {
        &self.path_dirs
    }

    /// Record an executed line. Whitespace-only lines are not recorded.
    pub fn record(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.history.push(line.trim_end_matches(['\n', '\r']).to_string());
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut session = Session::default();
        session.record("echo one");
        session.record("echo one");
        session.record("pwd");
        assert_eq!(session.history(), ["echo one", "echo one", "pwd"]);
    }

    #[test]
    fn skips_blank_lines() {
        let mut session = Session::default();
        session.record("   ");
        session.record("\n");
        assert!(session.history().is_empty());
    }

    #[test]
    fn strips_line_break() {
        let mut session = Session::default();
        session.record("pwd\n");
        assert_eq!(session.history(), ["pwd"]);
    }
}
