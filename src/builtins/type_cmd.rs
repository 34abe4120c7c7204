//! `type` — classify names as builtins or PATH executables.

use std::io::{self, Write};

use crate::builtins::{Builtin, BuiltinIo};
use crate::exec::find_in_path;
use crate::parse::ParsedCommand;
use crate::session::Session;

pub struct Type;

impl Builtin for Type {
    fn run(
        &self,
        cmd: &ParsedCommand,
        session: &mut Session,
        io: &mut BuiltinIo<'_>,
    ) -> io::Result<()> {
        if cmd.args.is_empty() {
            writeln!(io.err, "type: missing argument")?;
            return Ok(());
        }
        for target in &cmd.args {
            if super::is_builtin(target) {
                writeln!(io.out, "{target} is a shell builtin")?;
            } else if let Some(path) = find_in_path(target, session.path_dirs()) {
                writeln!(io.out, "{target} is {}", path.display())?;
            } else {
                writeln!(io.err, "{target}: not found")?;
            }
        }
        Ok(())
    }

    fn drains_pipe(&self) -> bool {
        false
    }
}
