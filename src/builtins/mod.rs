//! Shell-intrinsic commands.
//!
//! Each builtin runs inside the shell process instead of spawning an
//! executable. On the sole-stage path it runs synchronously on the loop
//! thread with the live [`Session`]; inside a multi-stage pipeline it runs
//! as a concurrent task against a session snapshot, communicating only
//! through its assigned stream endpoints.

/// `cd` — change the process working directory.
pub mod cd;
/// `echo` — write the joined arguments to the output destination.
pub mod echo;
/// `exit` — terminate the shell on `exit 0`, no-op otherwise.
pub mod exit;
/// `history` — list the session's command log.
pub mod history;
/// `pwd` — report the working directory.
pub mod pwd;
/// `type` — classify names as builtins or PATH executables.
pub mod type_cmd;

use std::collections::HashMap;
use std::io::{self, Write};

use crate::parse::ParsedCommand;
use crate::session::Session;

/// Names of every builtin.
pub const NAMES: [&str; 6] = ["cd", "echo", "exit", "history", "pwd", "type"];

pub fn is_builtin(name: &str) -> bool {
    NAMES.contains(&name)
}

/// Resolved output and error destinations handed to a builtin.
pub struct BuiltinIo<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// Trait for builtin commands.
pub trait Builtin: Send + Sync {
    /// Run the builtin. `session` is the live state on the sole-stage path
    /// and a snapshot inside a concurrent pipeline.
    fn run(
        &self,
        cmd: &ParsedCommand,
        session: &mut Session,
        io: &mut BuiltinIo<'_>,
    ) -> io::Result<()>;

    /// Builtins that rewrite session or process state must run on the loop
    /// thread; the executor rejects them inside a multi-stage pipeline.
    fn mutates_session(&self) -> bool {
        false
    }

    /// Whether a pipe input is drained to end-of-stream before the builtin
    /// acts. `type` opts out: its semantics are argument-driven, never
    /// stream-driven.
    fn drains_pipe(&self) -> bool {
        true
    }
}

/// Registry of builtins, keyed by command name.
pub struct BuiltinRegistry {
    entries: HashMap<&'static str, Box<dyn Builtin>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut entries: HashMap<&'static str, Box<dyn Builtin>> = HashMap::new();
        entries.insert("cd", Box::new(cd::Cd));
        entries.insert("echo", Box::new(echo::Echo));
        entries.insert("exit", Box::new(exit::Exit));
        entries.insert("history", Box::new(history::History));
        entries.insert("pwd", Box::new(pwd::Pwd));
        entries.insert("type", Box::new(type_cmd::Type));
        Self { entries }
    }

    /// Look up a builtin by exact command name.
    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.entries.get(name).map(|b| b.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_name() {
        let registry = BuiltinRegistry::new();
        for name in NAMES {
            assert!(registry.contains(name), "missing builtin: {name}");
        }
        assert!(!registry.contains("ls"));
    }

    #[test]
    fn mutating_set_is_cd_and_exit() {
        let registry = BuiltinRegistry::new();
        for name in NAMES {
            let expected = matches!(name, "cd" | "exit");
            assert_eq!(
                registry.get(name).map(|b| b.mutates_session()),
                Some(expected),
                "builtin: {name}"
            );
        }
    }

    #[test]
    fn only_type_skips_pipe_drain() {
        let registry = BuiltinRegistry::new();
        for name in NAMES {
            assert_eq!(
                registry.get(name).map(|b| b.drains_pipe()),
                Some(name != "type"),
                "builtin: {name}"
            );
        }
    }
}
