//! `cd` — change the process working directory.

use std::env;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use crate::builtins::{Builtin, BuiltinIo};
use crate::parse::ParsedCommand;
use crate::session::Session;

pub struct Cd;

impl Builtin for Cd {
    fn run(
        &self,
        cmd: &ParsedCommand,
        _session: &mut Session,
        io: &mut BuiltinIo<'_>,
    ) -> io::Result<()> {
        if cmd.args.len() != 1 {
            return writeln!(io.err, "cd: expected exactly one argument");
        }
        let given = &cmd.args[0];
        let expanded = shellexpand::tilde(given);
        let target = normalize(Path::new(expanded.as_ref()));
        if let Err(e) = env::set_current_dir(&target) {
            if e.kind() == io::ErrorKind::NotFound {
                return writeln!(io.err, "cd: {given}: No such file or directory");
            }
            return writeln!(io.err, "cd: {given}: {e}");
        }
        Ok(())
    }

    fn mutates_session(&self) -> bool {
        true
    }
}

/// Lexically normalize a path: drop `.` components and resolve `..`
/// against the preceding component, without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
